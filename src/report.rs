use serde::Serialize;

use crate::admission::OrderAdmission;
use crate::domain::{Balance, Error, Order, OwnerId, Withdrawal};
use crate::ledger::BalanceLedger;

/// Everything the core knows about one owner, in wire shape.
#[derive(Debug, Serialize)]
pub struct OwnerReport {
    pub owner: OwnerId,
    pub balance: Balance,
    pub orders: Vec<Order>,
    pub withdrawals: Vec<Withdrawal>,
}

impl OwnerReport {
    pub async fn collect(
        owner: OwnerId,
        admission: &OrderAdmission,
        ledger: &BalanceLedger,
    ) -> Result<Self, Error> {
        let orders = match admission.orders_for_owner(owner).await {
            Ok(orders) => orders,
            Err(Error::NoOrders { .. }) => Vec::new(),
            Err(e) => return Err(e),
        };

        Ok(Self {
            owner,
            balance: ledger.balance(owner).await?,
            orders,
            withdrawals: ledger.withdrawals(owner).await?,
        })
    }
}
