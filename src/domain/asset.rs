use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Amount, Identifiable};

/// An owned item whose worth moves linearly from `acquisition_price` to
/// `depreciation_price` between `start_date` and `end_date`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepreciableAsset {
    pub id: Uuid,
    pub account: Uuid,
    pub acquisition_price: Amount,
    /// Residual value at the end of the schedule.
    pub depreciation_price: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub removed: bool,
}

impl DepreciableAsset {
    pub fn new(
        account: Uuid,
        acquisition_price: Amount,
        depreciation_price: Amount,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account,
            acquisition_price,
            depreciation_price,
            start_date: Some(start_date),
            end_date: Some(end_date),
            removed: false,
        }
    }
}

impl Identifiable for DepreciableAsset {
    fn id(&self) -> Uuid {
        self.id
    }
}
