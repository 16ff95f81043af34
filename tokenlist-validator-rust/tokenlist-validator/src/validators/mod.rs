pub mod aggregator;
pub mod entry_loader;
pub mod external_list_checker;
pub mod reconciler;
pub mod schema;

pub use aggregator::Aggregator;
pub use entry_loader::{EntryLoader, LoadedEntry};
pub use external_list_checker::ExternalListChecker;
pub use reconciler::Reconciler;
