//! Error types for the inventory service.
//!
//! This module defines the central `Error` enum, which captures the
//! reportable error cases of the RPC surface. It implements
//! `From<Error>` for `tonic::Status` so handlers can propagate failures to
//! clients with the appropriate status code and message, and
//! `From<StoreError>` so store outcomes map onto RPC error kinds in one
//! place.
//!
//! Persistence and alert-delivery failures are deliberately absent: those
//! are logged, best-effort events, never surfaced to the caller.

use stockroom::StoreError;
use tonic::Status;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the inventory service.
#[derive(Clone, thiserror::Error, Debug)]
pub enum Error {
    /// The referenced product does not exist.
    #[error("product with id={id} not found")]
    NotFound { id: u64 },

    /// The client request was malformed or semantically illegal.
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Error::NotFound { id },
            other => Error::InvalidRequest {
                reason: other.to_string(),
            },
        }
    }
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound { .. } => Status::not_found(err.to_string()),
            Error::InvalidRequest { reason } => Status::invalid_argument(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    #[test]
    fn store_errors_map_to_status_codes() {
        let cases = [
            (StoreError::NotFound(7), Code::NotFound),
            (StoreError::EmptyName, Code::InvalidArgument),
            (StoreError::NegativeQuantity, Code::InvalidArgument),
            (
                StoreError::InsufficientStock {
                    current: 4,
                    delta: -10,
                },
                Code::InvalidArgument,
            ),
        ];

        for (err, code) in cases {
            let status = Status::from(Error::from(err));
            assert_eq!(status.code(), code);
        }
    }

    #[test]
    fn not_found_message_names_the_id() {
        let status = Status::from(Error::from(StoreError::NotFound(42)));
        assert!(status.message().contains("id=42"));
    }
}
