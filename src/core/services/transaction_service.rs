//! Creation and partial update of ledger entries.

use crate::core::context::EngineContext;
use crate::core::mutation::{self, MutationRequest};
use crate::domain::LedgerEntry;
use crate::errors::MergeError;

/// Applies mutation requests; the caller persists whatever comes back.
pub struct TransactionService;

impl TransactionService {
    /// Merges `request` over `previous` (or over nothing when creating).
    pub fn mutate(
        ctx: &EngineContext<'_>,
        previous: Option<&LedgerEntry>,
        request: &MutationRequest,
    ) -> Result<LedgerEntry, MergeError> {
        let merged = mutation::merge(ctx, previous, request)?;
        tracing::debug!(
            entry = %merged.id,
            kind = ?merged.kind,
            created = previous.is_none(),
            "entry merged"
        );
        Ok(merged)
    }

    pub fn create(
        ctx: &EngineContext<'_>,
        request: &MutationRequest,
    ) -> Result<LedgerEntry, MergeError> {
        Self::mutate(ctx, None, request)
    }

    pub fn update(
        ctx: &EngineContext<'_>,
        previous: &LedgerEntry,
        request: &MutationRequest,
    ) -> Result<LedgerEntry, MergeError> {
        Self::mutate(ctx, Some(previous), request)
    }
}
