//! The cart store: mutation operations over the cart state.

use rust_decimal::Decimal;
use tracing::warn;
use vinayak_core::{OrderLineItem, ProductId};

use crate::item::{CartItem, ProductSnapshot};
use crate::state::CartState;
use crate::storage::CartStorage;

/// The authoritative cart for one customer session.
///
/// Every mutation recomputes the derived totals together with the item
/// change and then writes the new state to the injected storage. Mutations
/// themselves never fail: a storage write failure is logged and the
/// in-memory cart keeps the change.
#[derive(Debug)]
pub struct CartStore<S> {
    state: CartState,
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Open the cart, loading any previously saved state.
    ///
    /// A missing save starts empty. A corrupt or unreadable save is logged
    /// and also starts empty; the next mutation overwrites it.
    pub fn open(storage: S) -> Self {
        let state = match storage.load() {
            Ok(Some(mut state)) => {
                // Trust the saved items, not the saved totals.
                state.recompute_totals();
                state
            }
            Ok(None) => CartState::empty(),
            Err(error) => {
                warn!(%error, "failed to load saved cart, starting empty");
                CartState::empty()
            }
        };
        Self { state, storage }
    }

    /// The current cart state.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Current line items in display order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.state.items
    }

    /// Current cart total in rupees.
    #[must_use]
    pub const fn total(&self) -> Decimal {
        self.state.total
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub const fn item_count(&self) -> u64 {
        self.state.item_count
    }

    /// True when the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// The storage backend, for inspection.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Add one unit of `product`.
    ///
    /// If the cart already holds a line for the same product id, its
    /// quantity goes up by one and the original snapshot is kept; the
    /// incoming snapshot is ignored. Otherwise a new line with quantity 1
    /// is appended.
    pub fn add_item(&mut self, product: ProductSnapshot) {
        if let Some(existing) = self.find_mut(product.product_id) {
            existing.quantity = existing.quantity.saturating_add(1);
        } else {
            self.state.items.push(CartItem::new(product));
        }
        self.commit();
    }

    /// Drop the line for `product_id`. No-op if the cart does not hold it.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.state
            .items
            .retain(|item| item.product_id() != product_id);
        self.commit();
    }

    /// Set the absolute quantity for `product_id`.
    ///
    /// A quantity of zero or less removes the line. No-op if the cart does
    /// not hold the product.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(item) = self.find_mut(product_id) {
            item.quantity = quantity;
        }
        self.commit();
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.state.items.clear();
        self.commit();
    }

    /// Snapshot of the cart as canonical order lines, ready for checkout.
    #[must_use]
    pub fn checkout_lines(&self) -> Vec<OrderLineItem> {
        self.state.items.iter().map(CartItem::to_order_line).collect()
    }

    fn find_mut(&mut self, product_id: ProductId) -> Option<&mut CartItem> {
        self.state
            .items
            .iter_mut()
            .find(|item| item.product_id() == product_id)
    }

    fn commit(&mut self) {
        self.state.recompute_totals();
        if let Err(error) = self.storage.save(&self.state) {
            warn!(%error, "failed to save cart, keeping in-memory state");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use vinayak_core::Category;

    use super::*;
    use crate::storage::{MemoryStorage, StorageError};

    fn product(name: &str, price: Decimal) -> ProductSnapshot {
        ProductSnapshot {
            product_id: ProductId::generate(),
            name: name.to_owned(),
            description: None,
            price,
            image: None,
            category: Category::Sweets,
            is_featured: false,
        }
    }

    fn rupees(r: i64) -> Decimal {
        Decimal::new(r * 100, 2)
    }

    fn assert_totals_match_fold(store: &CartStore<impl CartStorage>) {
        let expected_total: Decimal = store.items().iter().map(CartItem::line_total).sum();
        let expected_count: u64 = store.items().iter().map(|i| u64::from(i.quantity)).sum();
        assert_eq!(store.total(), expected_total);
        assert_eq!(store.item_count(), expected_count);
    }

    #[test]
    fn test_add_same_product_twice_merges_into_one_line() {
        let mut store = CartStore::open(MemoryStorage::new());
        let kaju = product("Kaju Katli", rupees(250));

        store.add_item(kaju.clone());
        store.add_item(kaju);

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].quantity, 2);
        assert_eq!(store.total(), rupees(500));
        assert_eq!(store.item_count(), 2);
    }

    #[test]
    fn test_merge_keeps_the_original_snapshot() {
        let mut store = CartStore::open(MemoryStorage::new());
        let kaju = product("Kaju Katli", rupees(250));

        let mut repriced = kaju.clone();
        repriced.price = rupees(999);

        store.add_item(kaju);
        store.add_item(repriced);

        // Quantity went up; the price stayed what it was at first add.
        assert_eq!(store.items()[0].quantity, 2);
        assert_eq!(store.items()[0].product.price, rupees(250));
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add_item(product("Kaju Katli", rupees(250)));
        store.add_item(product("Besan Ladoo", rupees(180)));
        store.add_item(product("Mixture", rupees(95)));

        let names: Vec<_> = store
            .items()
            .iter()
            .map(|i| i.product.name.as_str())
            .collect();
        assert_eq!(names, ["Kaju Katli", "Besan Ladoo", "Mixture"]);
    }

    #[test]
    fn test_totals_track_every_mutation() {
        let mut store = CartStore::open(MemoryStorage::new());
        let kaju = product("Kaju Katli", rupees(250));
        let ladoo = product("Besan Ladoo", rupees(180));

        store.add_item(kaju.clone());
        assert_totals_match_fold(&store);

        store.add_item(ladoo.clone());
        store.add_item(ladoo.clone());
        assert_totals_match_fold(&store);

        store.set_quantity(kaju.product_id, 5);
        assert_totals_match_fold(&store);

        store.remove_item(ladoo.product_id);
        assert_totals_match_fold(&store);

        store.clear();
        assert_totals_match_fold(&store);
        assert_eq!(store.total(), Decimal::ZERO);
    }

    #[test]
    fn test_set_quantity_is_absolute() {
        let mut store = CartStore::open(MemoryStorage::new());
        let kaju = product("Kaju Katli", rupees(250));
        store.add_item(kaju.clone());
        store.add_item(kaju.clone());

        store.set_quantity(kaju.product_id, 3);
        assert_eq!(store.items()[0].quantity, 3);
        assert_eq!(store.total(), rupees(750));
    }

    #[test]
    fn test_set_quantity_zero_removes_the_line() {
        let mut store = CartStore::open(MemoryStorage::new());
        let kaju = product("Kaju Katli", rupees(250));
        store.add_item(kaju.clone());

        store.set_quantity(kaju.product_id, 0);
        assert!(store.is_empty());
        assert_eq!(store.total(), Decimal::ZERO);
        assert_eq!(store.item_count(), 0);
    }

    #[test]
    fn test_set_quantity_negative_removes_the_line() {
        let mut store = CartStore::open(MemoryStorage::new());
        let kaju = product("Kaju Katli", rupees(250));
        store.add_item(kaju.clone());

        store.set_quantity(kaju.product_id, -1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_product_is_a_no_op() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add_item(product("Kaju Katli", rupees(250)));
        let before = store.state().clone();

        store.set_quantity(ProductId::generate(), 4);
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_remove_unknown_product_is_a_no_op() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add_item(product("Kaju Katli", rupees(250)));
        let before = store.state().clone();

        store.remove_item(ProductId::generate());
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_mutations_are_saved_and_survive_reopen() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add_item(product("Kaju Katli", rupees(250)));
        store.add_item(product("Mixture", rupees(95)));

        let saved = store.storage().saved().cloned().unwrap();
        assert_eq!(&saved, store.state());

        let reopened = CartStore::open(MemoryStorage::with_saved(saved));
        assert_eq!(reopened.state(), store.state());
    }

    #[test]
    fn test_open_recomputes_totals_from_saved_items() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add_item(product("Kaju Katli", rupees(250)));

        let mut tampered = store.storage().saved().cloned().unwrap();
        tampered.total = rupees(1);
        tampered.item_count = 99;

        let reopened = CartStore::open(MemoryStorage::with_saved(tampered));
        assert_eq!(reopened.total(), rupees(250));
        assert_eq!(reopened.item_count(), 1);
    }

    #[test]
    fn test_checkout_lines_mirror_the_cart() {
        let mut store = CartStore::open(MemoryStorage::new());
        let kaju = product("Kaju Katli", rupees(250));
        store.add_item(kaju.clone());
        store.add_item(kaju.clone());
        store.add_item(product("Mixture", rupees(95)));

        let lines: Vec<OrderLineItem> = store.checkout_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].product_id, kaju.product_id);
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[1].quantity, 1);
    }

    // Backend that always fails, for exercising the fallback paths.
    struct BrokenStorage;

    impl CartStorage for BrokenStorage {
        fn load(&self) -> Result<Option<CartState>, StorageError> {
            Err(StorageError::Io(std::io::Error::other("backend down")))
        }

        fn save(&mut self, _state: &CartState) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("backend down")))
        }
    }

    #[test]
    fn test_unreadable_save_falls_back_to_empty() {
        let store = CartStore::open(BrokenStorage);
        assert!(store.is_empty());
        assert_eq!(store.total(), Decimal::ZERO);
    }

    #[test]
    fn test_failed_save_keeps_the_in_memory_change() {
        let mut store = CartStore::open(BrokenStorage);
        store.add_item(product("Kaju Katli", rupees(250)));

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.total(), rupees(250));
    }
}
