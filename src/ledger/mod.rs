//! Ledger domain models, persistence-friendly types, and the recurrence expander.

pub mod category;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod recurring;
pub mod time_interval;
pub mod transaction;
pub mod window;

pub use category::{Category, CategoryKind};
pub use ledger::LedgerData;
pub use recurring::{
    default_horizon, expand_transactions, expansion_ceiling, occurrences_of,
    DEFAULT_HORIZON_YEARS, MAX_OCCURRENCES_PER_RULE,
};
pub use time_interval::{TimeInterval, TimeUnit};
pub use transaction::{BaseTransaction, LedgerEntry, Recurrence, RecurrenceKind};
pub use window::{DateWindow, YearMonth};
