use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;

use crate::domain::{Balance, BalanceStore, Error, OrderNumber, OwnerId, Points, Withdrawal};

#[derive(Default, Debug)]
struct Account {
    balance: Balance,
    withdrawals: Vec<Withdrawal>,
}

/// Balances keyed by owner. Each owner has its own lock, so operations on
/// one owner never wait on another owner's.
#[derive(Default, Debug)]
pub struct InMemoryBalances {
    accounts: DashMap<OwnerId, Arc<Mutex<Account>>>,
}

impl InMemoryBalances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only writes create an account.
    fn account_or_default(&self, owner: OwnerId) -> Arc<Mutex<Account>> {
        // the shard guard is released at the end of this statement
        self.accounts.entry(owner).or_default().clone()
    }

    fn existing(&self, owner: OwnerId) -> Option<Arc<Mutex<Account>>> {
        self.accounts.get(&owner).map(|entry| entry.value().clone())
    }

    #[cfg(test)]
    fn owners(&self) -> usize {
        self.accounts.len()
    }
}

#[async_trait]
impl BalanceStore for InMemoryBalances {
    async fn get_balance(&self, owner: OwnerId) -> Result<Balance, Error> {
        let Some(account) = self.existing(owner) else {
            return Ok(Balance::default());
        };
        let balance = account.lock().balance;
        Ok(balance)
    }

    async fn credit(&self, owner: OwnerId, amount: Points) -> Result<(), Error> {
        let account = self.account_or_default(owner);
        let mut account = account.lock();
        account.balance.credit(amount)
    }

    async fn debit_and_record_withdrawal(
        &self,
        owner: OwnerId,
        number: &OrderNumber,
        amount: Points,
    ) -> Result<Withdrawal, Error> {
        let account = self.account_or_default(owner);
        let mut account = account.lock();

        // Computed on a copy, written back only once every step succeeded.
        let next = account.balance.debited(amount)?;
        let withdrawal = Withdrawal::new(owner, number.clone(), amount);
        account.withdrawals.push(withdrawal.clone());
        account.balance = next;

        Ok(withdrawal)
    }

    async fn list_withdrawals(&self, owner: OwnerId) -> Result<Vec<Withdrawal>, Error> {
        let Some(account) = self.existing(owner) else {
            return Ok(Vec::new());
        };
        let withdrawals = account.lock().withdrawals.clone();
        Ok(withdrawals)
    }
}
