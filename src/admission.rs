use std::sync::Arc;

use crate::domain::{Error, Order, OrderNumber, OrderStore, OwnerId};

/// Registers order numbers submitted by owners.
#[derive(Clone)]
pub struct OrderAdmission {
    orders: Arc<dyn OrderStore>,
}

impl OrderAdmission {
    pub fn new(orders: Arc<dyn OrderStore>) -> Self {
        Self { orders }
    }

    /// Returns `true` when the caller had already submitted this number.
    pub async fn submit(&self, owner: OwnerId, raw_number: &str) -> Result<bool, Error> {
        let number = OrderNumber::parse(raw_number)?;

        if let Some(existing) = self.orders.get_by_number(&number).await? {
            return Self::resubmission(owner, &existing);
        }

        match self.orders.create(owner, &number).await {
            Ok(order) => {
                tracing::info!(owner, order = %order.number, "order admitted");
                Ok(false)
            }
            // Lost a race with a concurrent submission of the same number.
            Err(Error::DuplicateOrder { .. }) => match self.orders.get_by_number(&number).await? {
                Some(existing) => Self::resubmission(owner, &existing),
                None => Err(Error::Store(format!(
                    "order {} reported as duplicate but not found",
                    number
                ))),
            },
            Err(e) => Err(e),
        }
    }

    fn resubmission(owner: OwnerId, existing: &Order) -> Result<bool, Error> {
        if existing.owner != owner {
            return Err(Error::OrderOwnedByAnother {
                number: existing.number.to_string(),
            });
        }
        Ok(true)
    }

    /// Oldest first. An owner without orders gets `Error::NoOrders`.
    pub async fn orders_for_owner(&self, owner: OwnerId) -> Result<Vec<Order>, Error> {
        let orders = self.orders.get_by_owner(owner).await?;
        if orders.is_empty() {
            return Err(Error::NoOrders { owner });
        }
        Ok(orders)
    }
}
