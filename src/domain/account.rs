use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::Identifiable;

/// Represents a financial account that owns ledger entries and depreciable assets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub kind: AccountKind,
}

impl Account {
    /// Creates a new account with the provided kind.
    pub fn new(name: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
        }
    }
}

impl Identifiable for Account {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Enumerates the supported account classifications.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountKind {
    Current,
    Savings,
    Loan,
    Business,
}

impl AccountKind {
    pub const ALL: [AccountKind; 4] = [
        AccountKind::Current,
        AccountKind::Savings,
        AccountKind::Loan,
        AccountKind::Business,
    ];
}
