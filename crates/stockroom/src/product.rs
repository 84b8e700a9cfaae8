//! The product record.

use serde::{Deserialize, Serialize};

/// A single inventory record.
///
/// Identity is the `id`, assigned by [`ProductStore::add`] and never reused;
/// `name` and `quantity` are mutable state. The serde field names (`id`,
/// `name`, `quantity`) are the snapshot file format.
///
/// [`ProductStore::add`]: crate::ProductStore::add
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub quantity: i64,
}
