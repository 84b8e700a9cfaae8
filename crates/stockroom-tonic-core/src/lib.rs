//! Shared gRPC protocol types for the stockroom inventory service.
//!
//! This crate owns the wire contract: the generated protobuf/tonic bindings,
//! the unified service [`Error`] with its `tonic::Status` mapping, and the
//! conversions between the core [`stockroom`] record types and their proto
//! counterparts. Both the server and any Rust clients depend on it so the
//! two sides share one compile-time contract.

mod common;
pub use common::*;
// Public re-export so downstream crates can access the core store via
// `stockroom_tonic_core::stockroom`
pub use stockroom;
