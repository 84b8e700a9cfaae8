//! Thread-safe product registry with monotonic id allocation.

use crate::error::{Result, StoreError};
use crate::product::Product;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// First id handed out by an empty store.
const FIRST_ID: u64 = 1;

#[derive(Debug)]
struct StoreInner {
    products: BTreeMap<u64, Product>,
    next_id: u64,
}

/// Concurrent map from product id to record.
///
/// All operations take `&self` and synchronize internally through a single
/// read-write lock with narrow critical sections. The next-id counter lives
/// inside the same critical section as the map, so id assignment and insert
/// are one atomic step: ids are unique and strictly increasing even under
/// concurrent [`add`] calls, and [`update_quantity`] performs its
/// read-check-write without a window for lost updates on a contended id.
///
/// [`add`]: ProductStore::add
/// [`update_quantity`]: ProductStore::update_quantity
#[derive(Debug)]
pub struct ProductStore {
    inner: RwLock<StoreInner>,
}

impl ProductStore {
    /// Creates an empty store; the first assigned id is 1.
    pub fn new() -> Self {
        Self::restore([])
    }

    /// Rebuilds a store from previously persisted products.
    ///
    /// The id counter resumes at `max(id) + 1` so products added after a
    /// restart never collide with restored ids.
    pub fn restore<I>(products: I) -> Self
    where
        I: IntoIterator<Item = Product>,
    {
        let products: BTreeMap<u64, Product> = products.into_iter().map(|p| (p.id, p)).collect();
        let next_id = products.keys().next_back().map_or(FIRST_ID, |max| max + 1);
        Self {
            inner: RwLock::new(StoreInner { products, next_id }),
        }
    }

    /// Validates and inserts a new product, returning it with its assigned
    /// id.
    ///
    /// # Errors
    ///
    /// - [`StoreError::EmptyName`] if `name` is empty or all whitespace.
    /// - [`StoreError::NegativeQuantity`] if `quantity < 0`.
    pub fn add(&self, name: &str, quantity: i64) -> Result<Product> {
        if name.trim().is_empty() {
            return Err(StoreError::EmptyName);
        }
        if quantity < 0 {
            return Err(StoreError::NegativeQuantity);
        }

        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id += 1;
        let product = Product {
            id,
            name: name.to_owned(),
            quantity,
        };
        inner.products.insert(id, product.clone());
        Ok(product)
    }

    /// Returns a copy of the product with the given id.
    pub fn get(&self, id: u64) -> Result<Product> {
        self.inner
            .read()
            .products
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Applies `delta` to the product's quantity and returns the updated
    /// record.
    ///
    /// The negative-result check and the write happen in one critical
    /// section: concurrent deltas on the same id serialize, and each is
    /// either applied exactly once or rejected whole with the store
    /// unchanged.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if the id is absent.
    /// - [`StoreError::InsufficientStock`] if `current + delta < 0`.
    pub fn update_quantity(&self, id: u64, delta: i64) -> Result<Product> {
        let mut inner = self.inner.write();
        let product = inner.products.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        let updated = match product.quantity.checked_add(delta) {
            Some(quantity) if quantity >= 0 => quantity,
            _ => {
                return Err(StoreError::InsufficientStock {
                    current: product.quantity,
                    delta,
                });
            }
        };

        product.quantity = updated;
        Ok(product.clone())
    }

    /// Removes the product, returning the record as it stood.
    ///
    /// The returned record lets the caller derive removal side-effects (the
    /// service logs the negated prior quantity as the stock change).
    pub fn remove(&self, id: u64) -> Result<Product> {
        self.inner
            .write()
            .products
            .remove(&id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Point-in-time snapshot of all products, ordered by id.
    ///
    /// The lock is held only for the copy; the snapshot may be slightly
    /// stale relative to concurrent writers but never contains a
    /// half-updated record.
    pub fn list(&self) -> Vec<Product> {
        self.inner.read().products.values().cloned().collect()
    }

    /// Number of products currently stored.
    pub fn len(&self) -> usize {
        self.inner.read().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn add_assigns_strictly_increasing_ids() {
        let store = ProductStore::new();
        let a = store.add("Widget", 10).unwrap();
        let b = store.add("Gadget", 0).unwrap();
        let c = store.add("Gizmo", 3).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(c.id, 3);
    }

    #[test]
    fn add_rejects_blank_names() {
        let store = ProductStore::new();
        assert_eq!(store.add("", 1), Err(StoreError::EmptyName));
        assert_eq!(store.add("   ", 1), Err(StoreError::EmptyName));
        assert!(store.is_empty());
    }

    #[test]
    fn add_rejects_negative_quantity() {
        let store = ProductStore::new();
        assert_eq!(store.add("Widget", -1), Err(StoreError::NegativeQuantity));
        assert!(store.is_empty());
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let store = ProductStore::new();
        assert_eq!(store.get(42), Err(StoreError::NotFound(42)));
    }

    #[test]
    fn update_applies_delta_exactly_once() {
        let store = ProductStore::new();
        let product = store.add("Widget", 10).unwrap();
        let updated = store.update_quantity(product.id, -6).unwrap();
        assert_eq!(updated.quantity, 4);
        assert_eq!(store.get(product.id).unwrap().quantity, 4);
    }

    #[test]
    fn update_rejects_negative_result_and_leaves_state() {
        let store = ProductStore::new();
        let product = store.add("Widget", 4).unwrap();
        assert_eq!(
            store.update_quantity(product.id, -10),
            Err(StoreError::InsufficientStock {
                current: 4,
                delta: -10
            })
        );
        assert_eq!(store.get(product.id).unwrap().quantity, 4);
    }

    #[test]
    fn update_to_exactly_zero_is_allowed() {
        let store = ProductStore::new();
        let product = store.add("Widget", 4).unwrap();
        assert_eq!(store.update_quantity(product.id, -4).unwrap().quantity, 0);
    }

    #[test]
    fn remove_returns_prior_record() {
        let store = ProductStore::new();
        let product = store.add("Widget", 7).unwrap();
        let removed = store.remove(product.id).unwrap();
        assert_eq!(removed, product);
    }

    #[test]
    fn removed_id_is_gone_for_all_operations() {
        let store = ProductStore::new();
        let id = store.add("Widget", 7).unwrap().id;
        store.remove(id).unwrap();
        assert_eq!(store.get(id), Err(StoreError::NotFound(id)));
        assert_eq!(store.update_quantity(id, 1), Err(StoreError::NotFound(id)));
        assert_eq!(store.remove(id), Err(StoreError::NotFound(id)));
    }

    #[test]
    fn removed_ids_are_never_reused() {
        let store = ProductStore::new();
        let id = store.add("Widget", 1).unwrap().id;
        store.remove(id).unwrap();
        let next = store.add("Gadget", 1).unwrap();
        assert!(next.id > id);
    }

    #[test]
    fn list_is_an_ordered_snapshot() {
        let store = ProductStore::new();
        store.add("B", 2).unwrap();
        store.add("A", 1).unwrap();
        let listed = store.list();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].id < listed[1].id);

        // Mutations after the copy do not show up in it.
        store.add("C", 3).unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[test]
    fn restore_resumes_counter_past_max_id() {
        let store = ProductStore::restore([
            Product {
                id: 3,
                name: "Widget".into(),
                quantity: 5,
            },
            Product {
                id: 17,
                name: "Gadget".into(),
                quantity: 0,
            },
        ]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.add("Gizmo", 1).unwrap().id, 18);
    }

    #[test]
    fn restore_empty_starts_at_one() {
        let store = ProductStore::restore([]);
        assert_eq!(store.add("Widget", 1).unwrap().id, 1);
    }

    #[test]
    fn concurrent_deltas_on_one_id_lose_nothing() {
        let store = Arc::new(ProductStore::new());
        let id = store.add("Widget", 0).unwrap().id;

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..100 {
                        store.update_quantity(id, 1).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.get(id).unwrap().quantity, 800);
    }

    #[test]
    fn concurrent_adds_assign_unique_ids() {
        let store = Arc::new(ProductStore::new());

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    (0..50)
                        .map(|i| store.add(&format!("product-{worker}-{i}"), 1).unwrap().id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 400);
        assert_eq!(store.len(), 400);
    }
}
