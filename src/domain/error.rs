use crate::domain::{OrderStatus, OwnerId, Points};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error("Ingestion failed with: {0}")]
    Ingestion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("order number must contain only digits: {number:?}")]
    NonNumericOrderNumber { number: String },

    #[error("invalid order number")]
    InvalidOrderNumber { number: String },

    #[error("amount must be positive, got {amount}")]
    NonPositiveAmount { amount: Points },

    #[error("order is already loaded by another user")]
    OrderOwnedByAnother { number: String },

    #[error("order {number} already exists")]
    DuplicateOrder { number: String },

    #[error("order {number} not found")]
    OrderNotFound { number: String },

    #[error("no orders added yet for owner {owner}")]
    NoOrders { owner: OwnerId },

    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Points, available: Points },

    #[error("order {number} cannot move from {from} to {to}")]
    InvalidTransition {
        number: String,
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("Store failed with: {0}")]
    Store(String),

    #[error(transparent)]
    Accrual(#[from] AccrualError),
}

/// Failures talking to the accrual authority. Never shown to end users.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccrualError {
    #[error("accrual system unreachable: {0}")]
    Unreachable(String),

    #[error("accrual system responded with status {0}")]
    Unexpected(u16),

    #[error("accrual system sent a malformed reply: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    InsufficientFunds,
    InvalidTransition,
    Store,
    Accrual,
    Ingestion,
    Config,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IO(_) => ErrorKind::Io,
            Error::Ingestion(_) => ErrorKind::Ingestion,
            Error::Config(_) => ErrorKind::Config,
            Error::NonNumericOrderNumber { .. }
            | Error::InvalidOrderNumber { .. }
            | Error::NonPositiveAmount { .. } => ErrorKind::Validation,
            Error::OrderOwnedByAnother { .. } | Error::DuplicateOrder { .. } => {
                ErrorKind::Conflict
            }
            Error::OrderNotFound { .. } | Error::NoOrders { .. } => ErrorKind::NotFound,
            Error::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Error::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Error::Store(_) => ErrorKind::Store,
            Error::Accrual(_) => ErrorKind::Accrual,
        }
    }
}
