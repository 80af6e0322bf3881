use crate::domain::{OwnerId, Points};

/// One request against the core. Order numbers stay raw here; the core validates them.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Submit {
        owner: OwnerId,
        order: String,
    },
    Withdraw {
        owner: OwnerId,
        order: String,
        amount: Points,
    },
    Reconcile,
}

impl Command {
    pub fn owner(&self) -> Option<OwnerId> {
        match self {
            Command::Submit { owner, .. } | Command::Withdraw { owner, .. } => Some(*owner),
            Command::Reconcile => None,
        }
    }
}

impl core::fmt::Display for Command {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Command::Submit { owner, order } => write!(f, "submit,owner={},order={}", owner, order),
            Command::Withdraw {
                owner,
                order,
                amount,
            } => write!(
                f,
                "withdraw,owner={},order={},amount={}",
                owner, order, amount
            ),
            Command::Reconcile => write!(f, "reconcile"),
        }
    }
}
