//! gRPC service implementation.
//!
//! This module contains the client-facing entry point of the server: the
//! [`handler::InventoryService`] that validates requests, applies them to
//! the product store, and drives snapshot persistence and alert fan-out.

pub mod handler;
