use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use uuid::Uuid;

use crate::{
    config::EngineConfig,
    core::{
        context::EngineContext,
        mutation::{self, MutationRequest},
        resolvers::{AccountResolver, AssetResolver, CategoryResolver, EntrySource, ResolveResult},
        time::Clock,
    },
    domain::{Account, Category, DepreciableAsset, Identifiable, LedgerEntry, TimeWindow},
    errors::{EngineError, Result},
};

/// Snapshot of everything the store holds. Also answers lookups directly, which lets
/// a writer resolve references while it holds the write lock.
#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    pub accounts: HashMap<Uuid, Account>,
    pub assets: HashMap<Uuid, DepreciableAsset>,
    pub categories: HashMap<Uuid, Category>,
    pub entries: HashMap<Uuid, LedgerEntry>,
}

/// Thread-safe in-process store implementing every lookup the engine consumes.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_account(&self, account: Account) -> Uuid {
        insert(&mut self.write().accounts, account)
    }

    pub fn add_asset(&self, asset: DepreciableAsset) -> Uuid {
        insert(&mut self.write().assets, asset)
    }

    pub fn add_category(&self, category: Category) -> Uuid {
        insert(&mut self.write().categories, category)
    }

    /// Inserts or replaces an entry as-is. Callers normally go through
    /// [`InMemoryLedger::apply_mutation`] instead.
    pub fn upsert_entry(&self, entry: LedgerEntry) -> Uuid {
        insert(&mut self.write().entries, entry)
    }

    pub fn entry(&self, id: Uuid) -> Option<LedgerEntry> {
        self.read().entries.get(&id).cloned()
    }

    pub fn remove_entry(&self, id: Uuid) -> Option<LedgerEntry> {
        self.write().entries.remove(&id)
    }

    pub fn entry_count(&self) -> usize {
        self.read().entries.len()
    }

    /// Creates (`entry_id = None`) or updates an entry as one read-modify-write step.
    /// Concurrent mutations of the same store are serialized by the write lock.
    pub fn apply_mutation(
        &self,
        entry_id: Option<Uuid>,
        request: &MutationRequest,
        clock: &dyn Clock,
        config: &EngineConfig,
    ) -> Result<LedgerEntry> {
        let mut state = self.write();
        let previous = match entry_id {
            Some(id) => Some(
                state
                    .entries
                    .get(&id)
                    .cloned()
                    .ok_or(EngineError::EntryNotFound(id))?,
            ),
            None => None,
        };
        let ctx = EngineContext::new(&*state, clock, config);
        let merged = mutation::merge(&ctx, previous.as_ref(), request)?;
        insert(&mut state.entries, merged.clone());
        tracing::debug!(entry = %merged.id, created = previous.is_none(), "entry stored");
        Ok(merged)
    }
}

fn insert<T: Identifiable>(map: &mut HashMap<Uuid, T>, item: T) -> Uuid {
    let id = item.id();
    map.insert(id, item);
    id
}

impl AccountResolver for LedgerState {
    fn resolve_account(&self, id: Uuid) -> ResolveResult<Option<Account>> {
        Ok(self.accounts.get(&id).cloned())
    }
}

impl AssetResolver for LedgerState {
    fn resolve_asset(&self, id: Uuid) -> ResolveResult<Option<DepreciableAsset>> {
        Ok(self.assets.get(&id).cloned())
    }

    fn assets_of(&self, account_id: Uuid) -> ResolveResult<Vec<DepreciableAsset>> {
        Ok(self
            .assets
            .values()
            .filter(|asset| asset.account == account_id)
            .cloned()
            .collect())
    }
}

impl CategoryResolver for LedgerState {
    fn resolve_category(&self, id: Uuid) -> ResolveResult<Option<Category>> {
        Ok(self.categories.get(&id).cloned())
    }
}

impl EntrySource for LedgerState {
    fn fetch_entries(
        &self,
        account_id: Uuid,
        window: TimeWindow,
    ) -> ResolveResult<Vec<LedgerEntry>> {
        let mut entries: Vec<LedgerEntry> = self
            .entries
            .values()
            .filter(|entry| entry.involves(account_id) && window.contains(entry.executed_at))
            .cloned()
            .collect();
        entries.sort_by_key(|entry| entry.executed_at);
        Ok(entries)
    }
}

impl AccountResolver for InMemoryLedger {
    fn resolve_account(&self, id: Uuid) -> ResolveResult<Option<Account>> {
        self.read().resolve_account(id)
    }
}

impl AssetResolver for InMemoryLedger {
    fn resolve_asset(&self, id: Uuid) -> ResolveResult<Option<DepreciableAsset>> {
        self.read().resolve_asset(id)
    }

    fn assets_of(&self, account_id: Uuid) -> ResolveResult<Vec<DepreciableAsset>> {
        self.read().assets_of(account_id)
    }
}

impl CategoryResolver for InMemoryLedger {
    fn resolve_category(&self, id: Uuid) -> ResolveResult<Option<Category>> {
        self.read().resolve_category(id)
    }
}

impl EntrySource for InMemoryLedger {
    fn fetch_entries(
        &self,
        account_id: Uuid,
        window: TimeWindow,
    ) -> ResolveResult<Vec<LedgerEntry>> {
        self.read().fetch_entries(account_id, window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;
    use crate::domain::{AccountKind, MovementKind};
    use crate::errors::MergeError;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn fetch_entries_includes_received_transfers_in_time_order() {
        let store = InMemoryLedger::new();
        let checking = store.add_account(Account::new("Checking", AccountKind::Current));
        let savings = store.add_account(Account::new("Savings", AccountKind::Savings));
        let t0 = clock().0;

        let late = LedgerEntry::new(checking, MovementKind::Income, dec!(10), t0);
        let early = LedgerEntry::new(savings, MovementKind::Transfer, dec!(5), t0 - Duration::days(2))
            .with_receiver(checking);
        let unrelated = LedgerEntry::new(savings, MovementKind::Expense, dec!(1), t0);
        store.upsert_entry(late.clone());
        store.upsert_entry(early.clone());
        store.upsert_entry(unrelated);

        let fetched = store.fetch_entries(checking, TimeWindow::unbounded()).unwrap();
        let ids: Vec<Uuid> = fetched.iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![early.id, late.id]);

        let recent = store
            .fetch_entries(checking, TimeWindow::since(t0 - Duration::days(1)))
            .unwrap();
        assert_eq!(recent.len(), 1);
    }

    #[test]
    fn apply_mutation_creates_then_updates() {
        let store = InMemoryLedger::new();
        let checking = store.add_account(Account::new("Checking", AccountKind::Current));
        let config = EngineConfig::default();
        let create = MutationRequest::new()
            .kind(MovementKind::Expense)
            .account(checking)
            .amount(dec!(20));
        let created = store.apply_mutation(None, &create, &clock(), &config).unwrap();
        assert_eq!(store.entry_count(), 1);

        let update = MutationRequest::new().amount(dec!(25));
        let updated = store
            .apply_mutation(Some(created.id), &update, &clock(), &config)
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(store.entry(created.id).unwrap().amount, dec!(25));
        assert_eq!(store.entry_count(), 1);
    }

    #[test]
    fn failed_mutation_leaves_store_untouched() {
        let store = InMemoryLedger::new();
        let checking = store.add_account(Account::new("Checking", AccountKind::Current));
        let config = EngineConfig::default();
        let original = LedgerEntry::new(checking, MovementKind::Expense, dec!(8), clock().0);
        store.upsert_entry(original.clone());

        let bad = MutationRequest::new().amount(dec!(-3)).note("changed");
        let err = store
            .apply_mutation(Some(original.id), &bad, &clock(), &config)
            .unwrap_err();
        assert!(matches!(err, EngineError::Merge(MergeError::AmountMustBePositive)));
        assert_eq!(store.entry(original.id), Some(original));
    }

    #[test]
    fn updating_unknown_entry_fails() {
        let store = InMemoryLedger::new();
        let id = Uuid::new_v4();
        let err = store
            .apply_mutation(Some(id), &MutationRequest::new(), &clock(), &EngineConfig::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::EntryNotFound(missing) if missing == id));
    }

    #[test]
    fn remove_entry_deletes() {
        let store = InMemoryLedger::new();
        let entry = LedgerEntry::new(Uuid::new_v4(), MovementKind::Cost, dec!(1), clock().0);
        let id = store.upsert_entry(entry);
        assert!(store.remove_entry(id).is_some());
        assert!(store.entry(id).is_none());
        assert!(store.remove_entry(id).is_none());
    }
}
