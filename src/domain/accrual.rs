use serde::Deserialize;

use crate::domain::{OrderStatus, Points};

/// Body of a 200 reply from the accrual authority.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccrualReply {
    pub order: String,
    pub status: String,
    #[serde(default)]
    pub accrual: Option<Points>,
}

/// Status vocabulary spoken by the accrual authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccrualStatus {
    Registered,
    Invalid,
    Processing,
    Processed,
}

impl AccrualStatus {
    /// `None` for anything outside the known vocabulary.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "REGISTERED" => Some(AccrualStatus::Registered),
            "INVALID" => Some(AccrualStatus::Invalid),
            "PROCESSING" => Some(AccrualStatus::Processing),
            "PROCESSED" => Some(AccrualStatus::Processed),
            _ => None,
        }
    }

    pub fn order_status(self) -> OrderStatus {
        match self {
            AccrualStatus::Registered => OrderStatus::New,
            AccrualStatus::Invalid => OrderStatus::Invalid,
            AccrualStatus::Processing => OrderStatus::Processing,
            AccrualStatus::Processed => OrderStatus::Processed,
        }
    }
}

impl AccrualReply {
    pub fn known_status(&self) -> Option<AccrualStatus> {
        AccrualStatus::parse(&self.status)
    }
}
