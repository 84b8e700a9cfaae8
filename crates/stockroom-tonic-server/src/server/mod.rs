//! Server runtime for the stockroom inventory service.
//!
//! ## Structure
//!
//! - [`config`] - CLI/env configuration and its validated form.
//! - [`telemetry`] - console logging setup.
//! - [`service`] - gRPC service entry point (`InventoryService`).
//! - [`alerts`] - low-stock alert fan-out to streaming subscribers.

pub mod alerts;
pub mod config;
pub mod service;
pub mod telemetry;
