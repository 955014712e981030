//! Maps an account kind to the movement kinds counted as its income and expense.

use serde::{Deserialize, Serialize};

use crate::domain::{AccountKind, MovementKind};

/// The pair of movement kinds an account aggregates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Classification {
    pub income: MovementKind,
    pub expense: MovementKind,
}

/// Side of the aggregate an entry contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRole {
    Income,
    Expense,
}

impl Classification {
    pub fn role_of(&self, kind: MovementKind) -> Option<EntryRole> {
        if kind == self.income {
            Some(EntryRole::Income)
        } else if kind == self.expense {
            Some(EntryRole::Expense)
        } else {
            None
        }
    }
}

/// Exhaustive lookup; a new account kind must be given a row here.
pub fn classify(kind: AccountKind) -> Classification {
    match kind {
        AccountKind::Current | AccountKind::Savings | AccountKind::Loan => Classification {
            income: MovementKind::Income,
            expense: MovementKind::Expense,
        },
        AccountKind::Business => Classification {
            income: MovementKind::Revenue,
            expense: MovementKind::Cost,
        },
    }
}
