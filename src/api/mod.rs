// Export submodules
pub mod device;
pub mod entity;
pub mod operation;
pub mod phone;
pub mod sql;
pub mod system;
