//! Data models for the AXL API.
//!
//! Entity payloads are opaque JSON trees; only the result envelope and the
//! fault are modelled.

// Export submodules
pub mod api_response;
pub mod fault;
