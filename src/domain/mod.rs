pub mod accrual;
pub mod balance;
pub mod command;
pub mod error;
pub mod luhn;
pub mod order;
pub mod points;
pub mod traits;
pub mod withdrawal;

pub use accrual::{AccrualReply, AccrualStatus};
pub use balance::Balance;
pub use command::Command;
pub use error::{AccrualError, Error, ErrorKind};
pub use order::{Order, OrderNumber, OrderStatus, OwnerId};
pub use points::Points;
pub use traits::{AccrualClient, BalanceStore, CommandStream, DeadLetterQueue, OrderStore};
pub use withdrawal::Withdrawal;
