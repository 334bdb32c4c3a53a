pub mod config;
pub mod events;
pub mod ledger;
pub mod paths;
pub mod store;

pub use config::Config;
pub use events::{EventLog, StoreEvent};
pub use ledger::ReviewLedger;
pub use paths::StorePaths;
pub use store::ProgressStore;
