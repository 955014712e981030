use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Amount, Identifiable};

/// Semantic type of a ledger movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementKind {
    Income,
    Expense,
    Revenue,
    Cost,
    Transfer,
}

impl MovementKind {
    pub const ALL: [MovementKind; 5] = [
        MovementKind::Income,
        MovementKind::Expense,
        MovementKind::Revenue,
        MovementKind::Cost,
        MovementKind::Transfer,
    ];

    pub fn is_transfer(self) -> bool {
        matches!(self, MovementKind::Transfer)
    }
}

/// A single dated, typed monetary movement recorded against an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub account: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Uuid>,
    pub kind: MovementKind,
    pub amount: Amount,
    pub executed_at: DateTime<Utc>,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default)]
    pub removed: bool,
}

impl LedgerEntry {
    pub fn new(
        account: Uuid,
        kind: MovementKind,
        amount: Amount,
        executed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account,
            receiver: None,
            asset: None,
            category: None,
            kind,
            amount,
            executed_at,
            note: String::new(),
            latitude: None,
            longitude: None,
            photo: None,
            removed: false,
        }
    }

    pub fn with_receiver(mut self, receiver: Uuid) -> Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// True when the account is the owner or the transfer receiver of this entry.
    pub fn involves(&self, account_id: Uuid) -> bool {
        self.account == account_id || self.receiver == Some(account_id)
    }
}

impl Identifiable for LedgerEntry {
    fn id(&self) -> Uuid {
        self.id
    }
}
