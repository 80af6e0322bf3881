use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{OrderNumber, OwnerId, Points};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Withdrawal {
    #[serde(skip)]
    pub id: Uuid,
    #[serde(skip)]
    pub owner: OwnerId,
    #[serde(rename = "order")]
    pub order_number: OrderNumber,
    #[serde(rename = "sum")]
    pub amount: Points,
    pub processed_at: DateTime<Utc>,
}

impl Withdrawal {
    pub fn new(owner: OwnerId, order_number: OrderNumber, amount: Points) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            order_number,
            amount,
            processed_at: Utc::now(),
        }
    }
}
