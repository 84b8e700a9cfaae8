//! Low-stock alert fan-out.
//!
//! ## Structure
//!
//! - [`broadcaster`] - registry of live subscribers with non-blocking
//!   publish.
//! - [`stream`] - per-subscriber response stream with drop-time cleanup.

pub mod broadcaster;
pub mod stream;
