//! Calculation core: classification, valuation, aggregation and entry mutation.
//! No I/O happens here; lookups arrive through [`context::EngineContext`].

pub mod classifier;
pub mod context;
pub mod mutation;
pub mod resolvers;
pub mod services;
pub mod time;
pub mod valuation;

pub use classifier::{classify, Classification, EntryRole};
pub use context::EngineContext;
pub use mutation::MutationRequest;
pub use resolvers::{
    AccountResolver, AssetResolver, CategoryResolver, EntrySource, LedgerStore, ResolveResult,
};
pub use time::{Clock, FixedClock, SystemClock};
