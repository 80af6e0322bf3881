use async_trait::async_trait;
use futures::Stream;

use crate::domain::{
    AccrualError, AccrualReply, Balance, Command, Error, Order, OrderNumber, OwnerId, Points,
    Withdrawal,
};

pub trait CommandStream {
    type CmdStream: Stream<Item = Result<Command, Error>> + Send + Unpin + 'static;
    fn stream(&mut self) -> Self::CmdStream;
}

pub trait DeadLetterQueue {
    /// `command` is `None` when the input could not be read as a command.
    fn report(&self, command: Option<&Command>, error: &Error);
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Fails with `Error::DuplicateOrder` when the number is already taken.
    async fn create(&self, owner: OwnerId, number: &OrderNumber) -> Result<Order, Error>;

    async fn get_by_number(&self, number: &OrderNumber) -> Result<Option<Order>, Error>;

    /// Oldest first.
    async fn get_by_owner(&self, owner: OwnerId) -> Result<Vec<Order>, Error>;

    /// Orders in `NEW` or `PROCESSING`.
    async fn get_pending(&self) -> Result<Vec<Order>, Error>;

    async fn update(&self, order: &Order) -> Result<(), Error>;
}

#[async_trait]
pub trait BalanceStore: Send + Sync {
    async fn get_balance(&self, owner: OwnerId) -> Result<Balance, Error>;

    async fn credit(&self, owner: OwnerId, amount: Points) -> Result<(), Error>;

    /// Re-checks funds under the owner's lock, debits and records the
    /// withdrawal as one unit. On error nothing is written.
    async fn debit_and_record_withdrawal(
        &self,
        owner: OwnerId,
        number: &OrderNumber,
        amount: Points,
    ) -> Result<Withdrawal, Error>;

    /// Oldest first.
    async fn list_withdrawals(&self, owner: OwnerId) -> Result<Vec<Withdrawal>, Error>;
}

#[async_trait]
pub trait AccrualClient: Send + Sync {
    async fn fetch(&self, number: &OrderNumber) -> Result<AccrualReply, AccrualError>;
}
