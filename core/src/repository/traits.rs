use crate::model::ledger::{AttendanceLedger, LedgerMutation};
use crate::model::semester::SemesterConfig;
use anyhow::Result;

pub trait SemesterRepository {
    /// `None` until a semester has been set up.
    fn load(&self) -> Result<Option<SemesterConfig>>;
    /// Replaces the stored semester as a whole.
    fn save(&self, config: &SemesterConfig) -> Result<()>;
}

pub trait LedgerRepository {
    /// An empty ledger when nothing has been recorded yet.
    fn load(&self) -> Result<AttendanceLedger>;
    fn save(&self, ledger: &AttendanceLedger) -> Result<()>;
    fn exists(&self) -> bool;

    /// Applies one write set against the latest stored snapshot and returns the
    /// ledger as written.
    fn apply(&self, mutation: &LedgerMutation) -> Result<AttendanceLedger> {
        let mut ledger = self.load()?;
        ledger.apply(mutation);
        self.save(&ledger)?;
        Ok(ledger)
    }
}
