//! Concurrent inventory record store.
//!
//! This crate holds the state behind the inventory gRPC service: a
//! thread-safe registry of product records with monotonic id allocation
//! ([`ProductStore`]) and a best-effort JSON snapshot of its contents
//! ([`SnapshotPersister`]).
//!
//! The crate is transport-agnostic and fully synchronous; the gRPC surface
//! lives in `stockroom-tonic-core` and `stockroom-tonic-server`.

mod error;
mod product;
mod snapshot;
mod store;

pub use error::{Result, StoreError};
pub use product::Product;
pub use snapshot::SnapshotPersister;
pub use store::ProductStore;
