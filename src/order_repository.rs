use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{Error, Order, OrderNumber, OrderStore, OwnerId};

#[derive(Default, Debug)]
struct Orders {
    by_number: HashMap<OrderNumber, Order>,
    // insertion order doubles as creation order
    created: Vec<OrderNumber>,
}

#[derive(Default, Debug)]
pub struct InMemoryOrders {
    inner: Mutex<Orders>,
}

impl InMemoryOrders {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrders {
    async fn create(&self, owner: OwnerId, number: &OrderNumber) -> Result<Order, Error> {
        let mut orders = self.inner.lock();
        let order = match orders.by_number.entry(number.clone()) {
            Entry::Vacant(e) => e.insert(Order::new(owner, number.clone())).clone(),
            Entry::Occupied(_) => {
                return Err(Error::DuplicateOrder {
                    number: number.to_string(),
                });
            }
        };
        orders.created.push(number.clone());
        Ok(order)
    }

    async fn get_by_number(&self, number: &OrderNumber) -> Result<Option<Order>, Error> {
        Ok(self.inner.lock().by_number.get(number).cloned())
    }

    async fn get_by_owner(&self, owner: OwnerId) -> Result<Vec<Order>, Error> {
        let orders = self.inner.lock();
        let mut owned: Vec<Order> = orders
            .created
            .iter()
            .filter_map(|number| orders.by_number.get(number))
            .filter(|order| order.owner == owner)
            .cloned()
            .collect();
        owned.sort_by_key(|order| order.created_at);
        Ok(owned)
    }

    async fn get_pending(&self) -> Result<Vec<Order>, Error> {
        let orders = self.inner.lock();
        Ok(orders
            .created
            .iter()
            .filter_map(|number| orders.by_number.get(number))
            .filter(|order| order.status.is_pending())
            .cloned()
            .collect())
    }

    async fn update(&self, order: &Order) -> Result<(), Error> {
        let mut orders = self.inner.lock();
        match orders.by_number.get_mut(&order.number) {
            Some(stored) => {
                stored.status = order.status;
                stored.accrual = order.accrual;
                Ok(())
            }
            None => Err(Error::Store(format!("order {} not found", order.number))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorKind, OrderStatus};

    fn number(raw: &str) -> OrderNumber {
        OrderNumber::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn create_refuses_duplicates() {
        let store = InMemoryOrders::new();
        store.create(1, &number("79927398713")).await.unwrap();

        let err = store.create(2, &number("79927398713")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(store.get_by_owner(2).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn owner_listing_is_oldest_first() {
        let store = InMemoryOrders::new();
        for raw in ["12345678903", "79927398713", "89920"] {
            store.create(1, &number(raw)).await.unwrap();
        }
        store.create(2, &number("2377225624")).await.unwrap();

        let listed: Vec<String> = store
            .get_by_owner(1)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.number.to_string())
            .collect();
        assert_eq!(listed, ["12345678903", "79927398713", "89920"]);
    }

    #[tokio::test]
    async fn pending_excludes_terminal_orders() {
        let store = InMemoryOrders::new();
        let mut done = store.create(1, &number("79927398713")).await.unwrap();
        store.create(1, &number("89920")).await.unwrap();

        done.status = OrderStatus::Invalid;
        store.update(&done).await.unwrap();

        let pending = store.get_pending().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].number.as_str(), "89920");
    }

    #[tokio::test]
    async fn update_of_unknown_order_fails() {
        let store = InMemoryOrders::new();
        let order = Order::new(1, number("79927398713"));
        let err = store.update(&order).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Store);
    }
}
