//! Order store.

use std::{fmt, sync::Arc};

use jiff::Timestamp;
use pizzeria::{
    orders::{
        Order, OrderDraft, OrderStatus, OrderUuid,
        query::{SortKey, sort_orders},
    },
    users::UserUuid,
};
use tracing::{debug, info};

use crate::{
    orders::OrdersError,
    storage::{KeyValueStore, ORDERS_KEY, load_json, save_json},
};

/// Every order placed from this storefront, persisted as one JSON list.
///
/// Orders are append-only; only their status changes after submission.
pub struct OrderStore {
    orders: Vec<Order>,
    storage: Arc<dyn KeyValueStore>,
}

impl OrderStore {
    /// Restores the orders saved under [`ORDERS_KEY`], or starts empty.
    #[must_use]
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let orders: Vec<Order> = load_json(storage.as_ref(), ORDERS_KEY).unwrap_or_default();

        debug!(orders = orders.len(), "loaded orders");

        Self { orders, storage }
    }

    /// Finalizes `draft` as a new order placed now.
    ///
    /// # Errors
    ///
    /// Returns an error if the total overflows or the orders could not be saved.
    pub fn submit(&mut self, draft: OrderDraft) -> Result<Order, OrdersError> {
        self.submit_at(draft, Timestamp::now())
    }

    /// Finalizes `draft` as a new order placed at `created_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the total overflows or the orders could not be saved.
    pub fn submit_at(
        &mut self,
        draft: OrderDraft,
        created_at: Timestamp,
    ) -> Result<Order, OrdersError> {
        let order = Order::from_draft(self.next_id(), draft, created_at)?;

        self.orders.push(order.clone());

        if let Err(error) = self.persist() {
            self.orders.pop();

            return Err(error);
        }

        info!(order = %order.id, user = %order.user_id, total = order.total, "order placed");

        Ok(order)
    }

    /// All orders, newest first.
    #[must_use]
    pub fn list(&self) -> Vec<&Order> {
        sort_orders(&self.orders, SortKey::Newest)
    }

    /// Orders placed by `user_id`, newest first.
    #[must_use]
    pub fn list_for_user(&self, user_id: UserUuid) -> Vec<&Order> {
        sort_orders(
            self.orders.iter().filter(|order| order.user_id == user_id),
            SortKey::Newest,
        )
    }

    #[must_use]
    pub fn get(&self, id: OrderUuid) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Overwrites the status of order `id`. Any status may be set.
    ///
    /// # Errors
    ///
    /// Returns [`OrdersError::NotFound`] for an unknown id, or a storage error
    /// if the orders could not be saved.
    pub fn update_status(
        &mut self,
        id: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersError> {
        self.transition(id, |_| Ok(status))
    }

    /// Moves order `id` one step along the status pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`OrdersError::NotFound`] for an unknown id,
    /// [`OrdersError::AlreadyCompleted`] when the order is finished, or a
    /// storage error if the orders could not be saved.
    pub fn advance(&mut self, id: OrderUuid) -> Result<Order, OrdersError> {
        self.transition(id, |current| {
            current.next().ok_or(OrdersError::AlreadyCompleted(id))
        })
    }

    fn transition(
        &mut self,
        id: OrderUuid,
        next: impl FnOnce(OrderStatus) -> Result<OrderStatus, OrdersError>,
    ) -> Result<Order, OrdersError> {
        let order = self
            .orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or(OrdersError::NotFound(id))?;

        let previous = order.status;

        order.status = next(previous)?;

        let updated = order.clone();

        if let Err(error) = self.persist() {
            if let Some(order) = self.orders.iter_mut().find(|order| order.id == id) {
                order.status = previous;
            }

            return Err(error);
        }

        info!(order = %id, from = %previous, to = %updated.status, "order status updated");

        Ok(updated)
    }

    fn next_id(&self) -> OrderUuid {
        loop {
            let id = OrderUuid::new();

            if self.get(id).is_none() {
                return id;
            }
        }
    }

    fn persist(&self) -> Result<(), OrdersError> {
        save_json(self.storage.as_ref(), ORDERS_KEY, &self.orders).map_err(OrdersError::from)
    }
}

impl fmt::Debug for OrderStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderStore")
            .field("orders", &self.orders.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;
    use pizzeria::{
        cart::CartLine,
        catalog::{ProductId, Size},
        orders::{Customer, DeliveryMethod, PaymentMethod},
    };
    use testresult::TestResult;

    use crate::storage::{MemoryStore, MockKeyValueStore, StorageError};

    use super::*;

    fn draft(user_id: UserUuid, subtotal: u64) -> OrderDraft {
        OrderDraft {
            user_id,
            lines: vec![CartLine {
                product_id: ProductId::from("2"),
                name: "Pepperoni".to_string(),
                size: Size::Small,
                unit_price: subtotal,
                quantity: 1,
                image_url: String::new(),
            }],
            subtotal,
            tax: 0,
            delivery_fee: 0,
            delivery_method: DeliveryMethod::Pickup,
            payment_method: PaymentMethod::Cash,
            customer: Customer {
                name: "Ada Byron".to_string(),
                phone: "555-0199".to_string(),
                address: String::new(),
            },
            delivery_instructions: None,
        }
    }

    #[test]
    fn submit_assigns_processing_status_and_total() -> TestResult {
        let mut store = OrderStore::load(Arc::new(MemoryStore::new()));
        let mut pending = draft(UserUuid::new(), 10_00);

        pending.tax = 80;
        pending.delivery_fee = 3_99;

        let order = store.submit(pending)?;

        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.total, 14_79);
        assert_eq!(store.get(order.id), Some(&order));

        Ok(())
    }

    #[test]
    fn orders_survive_reload() -> TestResult {
        let storage = Arc::new(MemoryStore::new());
        let user = UserUuid::new();

        let placed = OrderStore::load(storage.clone()).submit(draft(user, 9_99))?;
        let reloaded = OrderStore::load(storage);

        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.get(placed.id), Some(&placed));

        Ok(())
    }

    #[test]
    fn list_is_newest_first_and_user_scoped() -> TestResult {
        let mut store = OrderStore::load(Arc::new(MemoryStore::new()));
        let alice = UserUuid::new();
        let bob = UserUuid::new();
        let start = Timestamp::from_second(1_700_000_000)?;

        let first = store.submit_at(draft(alice, 10_00), start)?;
        let second = store.submit_at(draft(bob, 20_00), start.checked_add(5.minutes())?)?;
        let third = store.submit_at(draft(alice, 30_00), start.checked_add(10.minutes())?)?;

        let all: Vec<OrderUuid> = store.list().iter().map(|order| order.id).collect();
        let mine: Vec<OrderUuid> = store
            .list_for_user(alice)
            .iter()
            .map(|order| order.id)
            .collect();

        assert_eq!(all, vec![third.id, second.id, first.id]);
        assert_eq!(mine, vec![third.id, first.id]);
        assert!(store.list_for_user(UserUuid::new()).is_empty());

        Ok(())
    }

    #[test]
    fn update_status_overwrites_without_validation() -> TestResult {
        let mut store = OrderStore::load(Arc::new(MemoryStore::new()));
        let order = store.submit(draft(UserUuid::new(), 10_00))?;

        let updated = store.update_status(order.id, OrderStatus::Completed)?;

        assert_eq!(updated.status, OrderStatus::Completed);

        let reverted = store.update_status(order.id, OrderStatus::Preparing)?;

        assert_eq!(reverted.status, OrderStatus::Preparing);
        assert_eq!(reverted.total, order.total);

        Ok(())
    }

    #[test]
    fn update_status_unknown_order_is_not_found() {
        let mut store = OrderStore::load(Arc::new(MemoryStore::new()));
        let missing = OrderUuid::new();

        let result = store.update_status(missing, OrderStatus::Ready);

        assert!(
            matches!(result, Err(OrdersError::NotFound(id)) if id == missing),
            "expected NotFound, got {result:?}"
        );
    }

    #[test]
    fn advance_walks_pipeline_then_stops() -> TestResult {
        let mut store = OrderStore::load(Arc::new(MemoryStore::new()));
        let order = store.submit(draft(UserUuid::new(), 10_00))?;

        let mut seen = Vec::new();

        for _ in 0..4 {
            seen.push(store.advance(order.id)?.status);
        }

        assert_eq!(
            seen,
            vec![
                OrderStatus::Preparing,
                OrderStatus::Ready,
                OrderStatus::Delivering,
                OrderStatus::Completed,
            ]
        );

        let result = store.advance(order.id);

        assert!(
            matches!(result, Err(OrdersError::AlreadyCompleted(_))),
            "expected AlreadyCompleted, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn failed_write_keeps_previous_state() {
        let mut storage = MockKeyValueStore::new();

        storage.expect_get().once().returning(|_| Ok(None));
        storage
            .expect_set()
            .once()
            .withf(|key, _| key == ORDERS_KEY)
            .returning(|_, _| Err(StorageError::Poisoned));

        let mut store = OrderStore::load(Arc::new(storage));
        let result = store.submit(draft(UserUuid::new(), 10_00));

        assert!(
            matches!(result, Err(OrdersError::Storage(StorageError::Poisoned))),
            "expected Storage error, got {result:?}"
        );
        assert!(store.is_empty());
    }

    #[test]
    fn malformed_snapshot_loads_empty() -> TestResult {
        let storage = Arc::new(MemoryStore::new());

        storage.set(ORDERS_KEY, r#"[{"id": 7}]"#)?;

        assert!(OrderStore::load(storage).is_empty());

        Ok(())
    }
}
