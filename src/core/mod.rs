pub mod session;

pub use session::{LedgerObserver, LedgerSession};
