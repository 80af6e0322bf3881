use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Points, luhn};

pub type OwnerId = u64;

/// A digit string that passed the check digit validation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    pub fn parse(raw: &str) -> Result<Self, Error> {
        if !luhn::only_digits(raw) {
            return Err(Error::NonNumericOrderNumber {
                number: raw.to_string(),
            });
        }
        if !luhn::is_valid(raw) {
            return Err(Error::InvalidOrderNumber {
                number: raw.to_string(),
            });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,        // uploaded, not yet picked up by the poller
    Processing, // accrual is being calculated
    Invalid,    // authority refused to calculate an accrual
    Processed,  // accrual known and credited
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Invalid | OrderStatus::Processed)
    }

    pub fn is_pending(self) -> bool {
        !self.is_terminal()
    }

    /// PROCESSING may fall back to NEW when the authority has only registered the order.
    pub fn can_advance_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (New, Processing)
                | (Processing, New)
                | (Processing, Processing)
                | (Processing, Invalid)
                | (Processing, Processed)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::New => "NEW",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Invalid => "INVALID",
            OrderStatus::Processed => "PROCESSED",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub number: OrderNumber,
    #[serde(skip)]
    pub owner: OwnerId,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accrual: Option<Points>,
    #[serde(rename = "uploaded_at")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(owner: OwnerId, number: OrderNumber) -> Self {
        Self {
            number,
            owner,
            status: OrderStatus::New,
            accrual: None,
            created_at: Utc::now(),
        }
    }

    pub fn advance(&mut self, next: OrderStatus) -> Result<(), Error> {
        if !self.status.can_advance_to(next) {
            return Err(Error::InvalidTransition {
                number: self.number.to_string(),
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

impl core::fmt::Display for Order {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.accrual {
            Some(accrual) => write!(
                f,
                "order={},owner={},status={},accrual={}",
                self.number, self.owner, self.status, accrual
            ),
            None => write!(
                f,
                "order={},owner={},status={}",
                self.number, self.owner, self.status
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;

    #[test]
    fn parse_classifies_failures() {
        let err = OrderNumber::parse("123456abcd").unwrap_err();
        assert!(matches!(err, Error::NonNumericOrderNumber { .. }));
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = OrderNumber::parse("4147203059780942").unwrap_err();
        assert!(matches!(err, Error::InvalidOrderNumber { .. }));
        assert_eq!(err.to_string(), "invalid order number");

        assert_eq!(
            OrderNumber::parse("5062821234567892").unwrap().as_str(),
            "5062821234567892"
        );
    }

    #[test]
    fn terminal_states_never_move() {
        let mut order = Order::new(1, OrderNumber::parse("79927398713").unwrap());
        order.advance(OrderStatus::Processing).unwrap();
        order.advance(OrderStatus::Processed).unwrap();

        for next in [
            OrderStatus::New,
            OrderStatus::Processing,
            OrderStatus::Invalid,
            OrderStatus::Processed,
        ] {
            let err = order.clone().advance(next).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidTransition);
        }
    }

    #[test]
    fn new_orders_must_pass_through_processing() {
        let mut order = Order::new(1, OrderNumber::parse("79927398713").unwrap());
        assert!(order.clone().advance(OrderStatus::Processed).is_err());
        order.advance(OrderStatus::Processing).unwrap();
        order.advance(OrderStatus::New).unwrap();
        assert_eq!(order.status, OrderStatus::New);
    }

    #[test]
    fn serializes_wire_shape() {
        let mut order = Order::new(7, OrderNumber::parse("79927398713").unwrap());
        order.status = OrderStatus::Processed;
        order.accrual = Some(Points::from(500));

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["number"], "79927398713");
        assert_eq!(value["status"], "PROCESSED");
        assert_eq!(value["accrual"], 500.0);
        assert!(value.get("owner").is_none());
        assert!(value["uploaded_at"].is_string());

        order.accrual = None;
        let value = serde_json::to_value(&order).unwrap();
        assert!(value.get("accrual").is_none());
    }
}
