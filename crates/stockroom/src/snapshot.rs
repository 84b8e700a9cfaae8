//! Best-effort JSON snapshot of the product set.

use crate::product::Product;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Writes and restores the full product list as a single JSON file.
///
/// The snapshot is advisory: the in-memory [`ProductStore`] stays
/// authoritative for the life of the process. [`save`] rewrites the file
/// wholesale after every successful mutation, and [`load`] treats a missing
/// or malformed file as an empty store so a broken snapshot never prevents
/// startup.
///
/// [`ProductStore`]: crate::ProductStore
/// [`save`]: SnapshotPersister::save
/// [`load`]: SnapshotPersister::load
#[derive(Clone, Debug)]
pub struct SnapshotPersister {
    path: PathBuf,
}

impl SnapshotPersister {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes the full product set, replacing any previous snapshot.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error. Callers log and swallow it; a
    /// failed save is never retried and never fails the mutation that
    /// triggered it.
    pub fn save(&self, products: &[Product]) -> io::Result<()> {
        let json = serde_json::to_vec_pretty(products)?;
        fs::write(&self.path, json)
    }

    /// Loads the persisted product set.
    ///
    /// Returns an empty set when the file is missing, unreadable, or does
    /// not parse.
    pub fn load(&self) -> Vec<Product> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot file, starting empty");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read snapshot, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(products) => products,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "malformed snapshot, starting empty");
                Vec::new()
            }
        }
    }
}
