pub mod file;
pub mod ledger;
pub mod semester;
pub mod traits;

// Re-export
pub use file::data_dir;
pub use ledger::FileLedgerRepository;
pub use semester::FileSemesterRepository;
pub use traits::{LedgerRepository, SemesterRepository};
