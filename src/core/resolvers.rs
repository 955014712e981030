//! Lookups the engine consumes but never implements itself.
//!
//! `Ok(None)` means the id does not resolve; `Err` is an I/O failure of the
//! collaborator and is propagated to the caller unchanged.

use uuid::Uuid;

use crate::domain::{Account, Category, DepreciableAsset, LedgerEntry, TimeWindow};
use crate::errors::ResolveError;

pub type ResolveResult<T> = Result<T, ResolveError>;

/// Resolves accounts, both as entry owners and as transfer receivers.
pub trait AccountResolver: Send + Sync {
    fn resolve_account(&self, id: Uuid) -> ResolveResult<Option<Account>>;
}

pub trait AssetResolver: Send + Sync {
    fn resolve_asset(&self, id: Uuid) -> ResolveResult<Option<DepreciableAsset>>;

    /// Every asset owned by the account, removed ones included.
    fn assets_of(&self, account_id: Uuid) -> ResolveResult<Vec<DepreciableAsset>>;
}

pub trait CategoryResolver: Send + Sync {
    fn resolve_category(&self, id: Uuid) -> ResolveResult<Option<Category>>;
}

pub trait EntrySource: Send + Sync {
    /// Entries where the account is sender or receiver, executed inside `window`,
    /// ordered by execution time.
    fn fetch_entries(&self, account_id: Uuid, window: TimeWindow)
        -> ResolveResult<Vec<LedgerEntry>>;
}

/// Convenience bound for stores that provide every lookup.
pub trait LedgerStore: AccountResolver + AssetResolver + CategoryResolver + EntrySource {}

impl<T> LedgerStore for T where T: AccountResolver + AssetResolver + CategoryResolver + EntrySource {}
