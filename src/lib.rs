#![doc(test(attr(deny(warnings))))]

//! Account valuation and ledger mutation.
//!
//! [`core::services::SummaryService`] turns an account's entries and depreciable assets
//! into income, expense, balance and net worth over a [`domain::TimeWindow`].
//! [`core::services::TransactionService`] merges a [`MutationRequest`] into a new or
//! existing entry, field by field. Both read their collaborators through an
//! [`EngineContext`]; [`storage::InMemoryLedger`] provides every lookup in-process.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use crate::config::EngineConfig;
pub use crate::core::{EngineContext, MutationRequest};
pub use crate::errors::{EngineError, MergeError, ResolveError};

use std::sync::Once;

static ENGINE_INIT: Once = Once::new();

/// Installs the engine's tracing subscriber unless the host already has one.
/// Safe to call from every entry point.
pub fn init() {
    ENGINE_INIT.call_once(|| {
        utils::init_tracing();
        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            max_note_chars = config::DEFAULT_MAX_NOTE_CHARS,
            "ledger engine ready"
        );
    });
}
