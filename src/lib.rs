//! # axl-client
//!
//! A Rust client library for the Cisco Unified Communications Manager AXL
//! SOAP API.
//!
//! Every AXL operation is dispatched through one generic call that builds the
//! SOAP envelope, posts it to `https://<host>:8443/axl/` and shapes the reply
//! into a uniform [`AxlResponse`] envelope: `success`, the unwrapped
//! `response` and the SOAP fault in `error`.
//!
//! ## Features
//!
//! - 📇 Operation table covering the common AXL entity families
//! - 🧰 Fluent builders for phones, lines, users, devices, SQL and system info
//! - 🔄 Async API with Tokio runtime support
//! - 🛡️ SOAP faults reported as data, transport failures as errors
//!
//! ## Example
//!
//! ```rust,no_run
//! use axl_client::AxlClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AxlClient::builder()
//!         .host("ucm-pub.example.com")
//!         .username("axladmin")
//!         .password_from_env("AXL_PASSWORD")
//!         .version("12.5")
//!         .build()
//!         .await?;
//!
//!     let reply = client.phones().get("SEP001122334455").send().await?;
//!     if reply.success {
//!         println!("{:#?}", reply.response);
//!     } else if let Some(fault) = reply.error {
//!         println!("AXL fault: {fault}");
//!     }
//!
//!     Ok(())
//! }
//! ```

mod api;
mod client;
mod error;
pub mod models;
pub mod operations;
pub mod schema;
mod soap;
pub mod transport;
mod xml;

pub use api::device::{DeviceHandler, DeviceLoginBuilder, DeviceResetBuilder, ResetType};
pub use api::entity::{
    ActionBuilder, AddBuilder, EntityHandler, GetBuilder, ListBuilder, UpdateBuilder,
};
pub use api::operation::OperationBuilder;
pub use api::phone::PhoneHandler;
pub use api::sql::{SqlHandler, SqlQueryBuilder, SqlUpdateBuilder};
pub use api::system::{CcmVersionBuilder, SystemHandler};
#[cfg(feature = "default-client")]
pub use client::{initialize, instance};
pub use client::{AxlClient, AxlClientBuilder, DEFAULT_PORT, DEFAULT_TIMEOUT};
pub use error::{AxlError, AxlResult};
pub use models::api_response::{is_truthy, AxlResponse};
pub use models::fault::SoapFault;
pub use operations::{Entity, Operation, Verb};
pub use schema::Schema;
pub use transport::{HttpTransport, SoapTransport, TransportResponse};
pub use xml::{ATTRIBUTE_PREFIX, TEXT_KEY};
