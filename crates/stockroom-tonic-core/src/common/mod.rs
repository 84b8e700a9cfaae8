//! Shared types and error definitions used across the stockroom service.
//!
//! ## Submodules
//!
//! - [`error`] - Centralized service error type used throughout request
//!   handling.
//! - [`types`] - Shared constants and domain↔proto conversions.
//! - [`proto`] - Generated protobuf types and tonic service stubs.

pub mod error;
pub mod types;

pub use error::{Error, Result};

pub mod proto {
    tonic::include_proto!("stockroom.v1");

    /// File descriptor set for tonic-reflection service discovery.
    pub const FILE_DESCRIPTOR_SET: &[u8] =
        tonic::include_file_descriptor_set!("stockroom_descriptor");
}
