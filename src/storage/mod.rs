//! Reference persistence adapter for the engine's collaborator traits.

pub mod memory;

pub use memory::{InMemoryLedger, LedgerState};
