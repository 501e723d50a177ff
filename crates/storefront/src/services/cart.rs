//! Cart manager.
//!
//! Keeps the shopper's line items in memory and writes the full list to the
//! storage adapter after every mutation. The in-memory list is authoritative:
//! a failed write is logged and otherwise ignored.

use std::sync::Arc;

use minicart_core::{CartLineItem, Price, Product, ProductId, Quantity, StorageAdapter};

use crate::storage::keys;

/// In-memory cart backed by a storage adapter.
///
/// Invariants: at most one line item per product ID, every quantity `>= 1`.
pub struct CartManager {
    storage: Arc<dyn StorageAdapter>,
    items: Vec<CartLineItem>,
}

impl std::fmt::Debug for CartManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartManager")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl CartManager {
    /// Create an empty cart without reading storage.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        Self {
            storage,
            items: Vec::new(),
        }
    }

    /// Create a cart from whatever is persisted in `storage`.
    #[must_use]
    pub fn load(storage: Arc<dyn StorageAdapter>) -> Self {
        let mut cart = Self::new(storage);
        cart.restore();
        cart
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Line item for `id`, if present.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line for the same product ID, otherwise
    /// appends a new line with quantity 1.
    pub fn add_item(&mut self, product: &Product) {
        match self.items.iter_mut().find(|item| item.id() == product.id) {
            Some(existing) => existing.quantity = existing.quantity.incremented(),
            None => self.items.push(CartLineItem::new(product.clone())),
        }
        self.persist();
    }

    /// Drop the line for `id`. Missing IDs are a no-op.
    pub fn remove_item(&mut self, id: ProductId) {
        self.items.retain(|item| item.id() != id);
        self.persist();
    }

    /// Set the quantity for `id`. Missing IDs are a no-op.
    ///
    /// The quantity type already guarantees the `>= 1` clamp; callers parse
    /// user input with [`Quantity::parse_lenient`].
    pub fn update_quantity(&mut self, id: ProductId, quantity: Quantity) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id() == id) {
            item.quantity = quantity;
        }
        self.persist();
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Sum of price x quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Write the full line list to storage. Failures are logged only.
    pub fn persist(&self) {
        let encoded = match serde_json::to_string(&self.items) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode cart");
                return;
            }
        };

        if let Err(e) = self.storage.set(keys::CART, &encoded) {
            tracing::warn!(error = %e, "Failed to save cart to storage");
        }
    }

    /// Replace the in-memory lines with the stored ones.
    ///
    /// Absent, unreadable, or malformed data yields an empty cart. Stored
    /// duplicates are merged by summing their quantities.
    pub fn restore(&mut self) {
        self.items = match self.storage.get(keys::CART) {
            Ok(Some(raw)) => parse_stored_items(&raw),
            Ok(None) => {
                tracing::debug!("No stored cart");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read cart from storage");
                Vec::new()
            }
        };
    }
}

fn parse_stored_items(raw: &str) -> Vec<CartLineItem> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Stored cart is not valid JSON, starting empty");
            return Vec::new();
        }
    };

    if !value.is_array() {
        tracing::warn!("Stored cart is not a list, starting empty");
        return Vec::new();
    }

    match serde_json::from_value::<Vec<CartLineItem>>(value) {
        Ok(items) => merge_duplicates(items),
        Err(e) => {
            tracing::warn!(error = %e, "Stored cart has malformed line items, starting empty");
            Vec::new()
        }
    }
}

fn merge_duplicates(items: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut merged: Vec<CartLineItem> = Vec::with_capacity(items.len());
    for item in items {
        match merged.iter_mut().find(|m| m.id() == item.id()) {
            Some(existing) => {
                let sum = u64::from(existing.quantity.get()) + u64::from(item.quantity.get());
                existing.quantity = Quantity::new(u32::try_from(sum).unwrap_or(u32::MAX));
            }
            None => merged.push(item),
        }
    }
    merged
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use minicart_core::{MemoryStorage, StorageError};

    use super::*;

    /// Storage whose writes always fail.
    struct FullStorage;

    impl StorageAdapter for FullStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::QuotaExceeded {
                needed: 1,
                limit: 0,
            })
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }
    }

    fn product(id: i32, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::from_cents(cents).unwrap(),
            category: "misc".to_string(),
            image: format!("https://cdn.example.com/{id}.webp"),
            description: String::new(),
        }
    }

    fn memory_cart() -> (MemoryStorage, CartManager) {
        let storage = MemoryStorage::new();
        let cart = CartManager::new(Arc::new(storage.clone()));
        (storage, cart)
    }

    #[test]
    fn test_adding_same_product_twice_increments() {
        let (_, mut cart) = memory_cart();
        let p = product(1, 1000);

        cart.add_item(&p);
        cart.add_item(&p);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity.get(), 2);
        assert_eq!(cart.total(), Price::from_cents(2000).unwrap());
    }

    #[test]
    fn test_add_sequence_counts_per_id() {
        let (_, mut cart) = memory_cart();
        let sequence = [3, 1, 3, 2, 3, 1];
        for id in sequence {
            cart.add_item(&product(id, 100));
        }

        assert_eq!(cart.len(), 3);
        for id in [1, 2, 3] {
            let expected = sequence.iter().filter(|&&s| s == id).count();
            let quantity = cart.get(ProductId::new(id)).unwrap().quantity.get();
            assert_eq!(quantity as usize, expected);
        }
        // First-add order is kept
        let ids: Vec<i32> = cart.items().iter().map(|i| i.id().as_i32()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(cart.item_count(), 6);
    }

    #[test]
    fn test_remove_on_empty_cart_is_noop() {
        let (_, mut cart) = memory_cart();
        cart.remove_item(ProductId::new(9));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_drops_only_matching_line() {
        let (_, mut cart) = memory_cart();
        cart.add_item(&product(1, 100));
        cart.add_item(&product(2, 100));
        cart.remove_item(ProductId::new(1));
        assert!(cart.get(ProductId::new(1)).is_none());
        assert!(cart.get(ProductId::new(2)).is_some());
    }

    #[test]
    fn test_update_quantity_clamps_non_positive() {
        let (_, mut cart) = memory_cart();
        cart.add_item(&product(1, 100));

        for value in [0, -1, -100] {
            cart.update_quantity(ProductId::new(1), Quantity::clamped(value));
            assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, Quantity::ONE);
        }

        cart.update_quantity(ProductId::new(1), Quantity::parse_lenient(Some("oops")));
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, Quantity::ONE);

        cart.update_quantity(ProductId::new(1), Quantity::new(5));
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity.get(), 5);
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let (_, mut cart) = memory_cart();
        cart.add_item(&product(1, 100));
        cart.update_quantity(ProductId::new(2), Quantity::new(4));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_total_sums_price_times_quantity() {
        let (_, mut cart) = memory_cart();
        cart.add_item(&product(1, 999));
        cart.add_item(&product(2, 250));
        cart.update_quantity(ProductId::new(2), Quantity::new(4));

        let expected: Price = cart
            .items()
            .iter()
            .map(|i| i.product.price.times(i.quantity))
            .sum();
        assert_eq!(cart.total(), expected);
        assert_eq!(cart.total(), Price::from_cents(1999).unwrap());
    }

    #[test]
    fn test_total_of_empty_cart_is_zero() {
        let (_, cart) = memory_cart();
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_every_mutation_persists() {
        let (storage, mut cart) = memory_cart();
        cart.add_item(&product(1, 100));

        let reloaded = CartManager::load(Arc::new(storage.clone()));
        assert_eq!(reloaded.items(), cart.items());

        cart.update_quantity(ProductId::new(1), Quantity::new(3));
        let reloaded = CartManager::load(Arc::new(storage.clone()));
        assert_eq!(reloaded.item_count(), 3);
    }

    #[test]
    fn test_clear_persists_empty_list() {
        let (storage, mut cart) = memory_cart();
        cart.add_item(&product(1, 100));
        cart.add_item(&product(2, 100));

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(storage.get(keys::CART).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_restore_absent_is_empty() {
        let (_, mut cart) = memory_cart();
        cart.restore();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_restore_malformed_is_empty() {
        for raw in ["{not json", "{\"id\":1}", "42", "null", "[{\"id\":\"x\"}]"] {
            let storage = MemoryStorage::new();
            storage.set(keys::CART, raw).unwrap();
            let cart = CartManager::load(Arc::new(storage));
            assert!(cart.is_empty(), "expected empty cart for {raw}");
        }
    }

    #[test]
    fn test_restore_repairs_duplicates_and_quantities() {
        let storage = MemoryStorage::new();
        storage
            .set(
                keys::CART,
                r#"[
                    {"id":1,"title":"A","price":"2.50","category":"c","image":"i","description":"d","qty":2},
                    {"id":2,"title":"B","price":1,"category":"c","image":"i","description":"d","qty":0},
                    {"id":1,"title":"A","price":"2.50","category":"c","image":"i","description":"d","qty":3}
                ]"#,
            )
            .unwrap();

        let cart = CartManager::load(Arc::new(storage));
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity.get(), 5);
        assert_eq!(cart.get(ProductId::new(2)).unwrap().quantity, Quantity::ONE);
    }

    #[test]
    fn test_total_of_huge_line_saturates() {
        let storage = MemoryStorage::new();
        storage
            .set(
                keys::CART,
                r#"[{"id":9,"title":"Yacht","price":"100000000000000000000","category":"c","image":"i","description":"d","qty":1}]"#,
            )
            .unwrap();
        let mut cart = CartManager::load(Arc::new(storage));

        cart.update_quantity(
            ProductId::new(9),
            Quantity::parse_lenient(Some("4294967295")),
        );

        assert_eq!(cart.total(), cart.items()[0].line_total());
        assert_eq!(cart.total().amount(), rust_decimal::Decimal::MAX);
    }

    #[test]
    fn test_storage_failure_keeps_memory_state() {
        let mut cart = CartManager::new(Arc::new(FullStorage));
        cart.add_item(&product(1, 100));
        cart.add_item(&product(1, 100));
        assert_eq!(cart.item_count(), 2);

        cart.clear();
        assert!(cart.is_empty());
    }
}
