use crate::config::EngineConfig;
use crate::core::resolvers::{
    AccountResolver, AssetResolver, CategoryResolver, EntrySource, LedgerStore,
};
use crate::core::time::Clock;

/// Collaborators injected into the services. The engine performs no I/O of its own;
/// every lookup goes through one of these handles.
#[derive(Clone, Copy)]
pub struct EngineContext<'a> {
    pub accounts: &'a dyn AccountResolver,
    pub assets: &'a dyn AssetResolver,
    pub categories: &'a dyn CategoryResolver,
    pub entries: &'a dyn EntrySource,
    pub clock: &'a dyn Clock,
    pub config: &'a EngineConfig,
}

impl<'a> EngineContext<'a> {
    /// Builds a context where a single store answers every lookup.
    pub fn new<S: LedgerStore>(store: &'a S, clock: &'a dyn Clock, config: &'a EngineConfig) -> Self {
        Self {
            accounts: store,
            assets: store,
            categories: store,
            entries: store,
            clock,
            config,
        }
    }
}
