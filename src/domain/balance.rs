use serde::Serialize;

use crate::domain::{Error, Points};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Balance {
    pub current: Points,   // points available for withdrawal
    pub withdrawn: Points, // points withdrawn to date
}

impl Balance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credit(&mut self, amount: Points) -> Result<(), Error> {
        if amount.is_negative() {
            return Err(Error::NonPositiveAmount { amount });
        }
        self.current = self
            .current
            .checked_add(amount)
            .ok_or_else(|| Error::Store(format!("balance overflow crediting {}", amount)))?;
        Ok(())
    }

    /// Returns the balance after debiting `amount`; `self` is left untouched.
    pub fn debited(&self, amount: Points) -> Result<Balance, Error> {
        if !amount.is_positive() {
            return Err(Error::NonPositiveAmount { amount });
        }
        if amount > self.current {
            return Err(Error::InsufficientFunds {
                requested: amount,
                available: self.current,
            });
        }

        let current = self
            .current
            .checked_sub(amount)
            .ok_or_else(|| Error::Store(format!("balance underflow debiting {}", amount)))?;
        let withdrawn = self
            .withdrawn
            .checked_add(amount)
            .ok_or_else(|| Error::Store(format!("withdrawn overflow debiting {}", amount)))?;

        Ok(Balance { current, withdrawn })
    }
}
