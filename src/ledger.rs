use std::sync::Arc;

use crate::domain::{
    Balance, BalanceStore, Error, OrderNumber, OrderStore, OwnerId, Points, Withdrawal,
};

/// Withdrawals draw on the owner's aggregate balance, not on a single
/// order's accrual. The referenced order must still be one of the owner's.
#[derive(Clone)]
pub struct BalanceLedger {
    orders: Arc<dyn OrderStore>,
    balances: Arc<dyn BalanceStore>,
}

impl BalanceLedger {
    pub fn new(orders: Arc<dyn OrderStore>, balances: Arc<dyn BalanceStore>) -> Self {
        Self { orders, balances }
    }

    pub async fn withdraw(
        &self,
        owner: OwnerId,
        raw_number: &str,
        amount: Points,
    ) -> Result<Withdrawal, Error> {
        if !amount.is_positive() {
            return Err(Error::NonPositiveAmount { amount });
        }
        let number = OrderNumber::parse(raw_number)?;

        // Someone else's order reads the same as a missing one.
        match self.orders.get_by_number(&number).await? {
            Some(order) if order.owner == owner => {}
            _ => {
                return Err(Error::OrderNotFound {
                    number: number.to_string(),
                });
            }
        }

        let balance = self.balances.get_balance(owner).await?;
        if amount > balance.current {
            return Err(Error::InsufficientFunds {
                requested: amount,
                available: balance.current,
            });
        }

        // The store checks again under the owner's lock; a concurrent
        // withdrawal may have won in between.
        let withdrawal = self
            .balances
            .debit_and_record_withdrawal(owner, &number, amount)
            .await?;

        tracing::info!(owner, order = %number, %amount, "withdrawal committed");
        Ok(withdrawal)
    }

    pub async fn credit(&self, owner: OwnerId, amount: Points) -> Result<(), Error> {
        if amount.is_negative() {
            return Err(Error::NonPositiveAmount { amount });
        }
        self.balances.credit(owner, amount).await?;
        tracing::debug!(owner, %amount, "balance credited");
        Ok(())
    }

    pub async fn balance(&self, owner: OwnerId) -> Result<Balance, Error> {
        self.balances.get_balance(owner).await
    }

    pub async fn withdrawals(&self, owner: OwnerId) -> Result<Vec<Withdrawal>, Error> {
        self.balances.list_withdrawals(owner).await
    }
}
