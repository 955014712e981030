//! Value shapes consumed and produced by the valuation and mutation engine.

pub mod account;
pub mod asset;
pub mod category;
pub mod common;
pub mod entry;

pub use account::{Account, AccountKind};
pub use asset::DepreciableAsset;
pub use category::Category;
pub use common::{Amount, Identifiable, TimeWindow};
pub use entry::{LedgerEntry, MovementKind};
