//! Error types for the product store.

use thiserror::Error;

pub type Result<T> = core::result::Result<T, StoreError>;

/// Failure cases for store operations.
///
/// Every variant is a caller error: the store itself has no fallible
/// internals. Persistence I/O errors are reported separately by
/// [`SnapshotPersister::save`](crate::SnapshotPersister::save).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The product name was empty or all whitespace.
    #[error("product name cannot be empty")]
    EmptyName,

    /// The initial quantity was below zero.
    #[error("quantity cannot be negative")]
    NegativeQuantity,

    /// Applying the delta would drive the quantity below zero.
    #[error("stock cannot go negative (current {current}, delta {delta})")]
    InsufficientStock { current: i64, delta: i64 },

    /// No product exists with the given id.
    #[error("product with id={0} not found")]
    NotFound(u64),
}
