#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use ledger_engine::{
    config::EngineConfig,
    core::{EngineContext, FixedClock},
    domain::{Account, AccountKind, Amount, LedgerEntry, MovementKind},
    storage::InMemoryLedger,
};
use once_cell::sync::Lazy;
use uuid::Uuid;

/// Instant every fixture treats as "now".
pub static NOW: Lazy<DateTime<Utc>> =
    Lazy::new(|| Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap());

/// Store, frozen clock and config wired together for one test.
pub struct TestEnv {
    pub store: InMemoryLedger,
    pub clock: FixedClock,
    pub config: EngineConfig,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        ledger_engine::init();
        Self {
            store: InMemoryLedger::new(),
            clock: FixedClock(*NOW),
            config,
        }
    }

    pub fn ctx(&self) -> EngineContext<'_> {
        EngineContext::new(&self.store, &self.clock, &self.config)
    }

    pub fn account(&self, name: &str, kind: AccountKind) -> Uuid {
        self.store.add_account(Account::new(name, kind))
    }

    /// Records an entry directly in the store, `days_ago` days before `NOW`.
    pub fn record(&self, account: Uuid, kind: MovementKind, amount: Amount, days_ago: i64) -> Uuid {
        let entry = LedgerEntry::new(account, kind, amount, days_before_now(days_ago));
        self.store.upsert_entry(entry)
    }
}

pub fn days_before_now(days: i64) -> DateTime<Utc> {
    *NOW - Duration::days(days)
}
