use std::path::PathBuf;

use anyhow::Result;

use crate::model::ledger::AttendanceLedger;
use crate::repository::file::{data_dir, read_json, write_json};
use crate::repository::traits::LedgerRepository;

const LEDGER_FILE_NAME: &str = "attendance.json";

#[derive(Clone)]
pub struct FileLedgerRepository {
    file_path: PathBuf,
}

impl FileLedgerRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let path = data_dir(base_dir)?.join(LEDGER_FILE_NAME);
        Ok(FileLedgerRepository { file_path: path })
    }
}

impl LedgerRepository for FileLedgerRepository {
    fn load(&self) -> Result<AttendanceLedger> {
        Ok(read_json(&self.file_path)?.unwrap_or_default())
    }

    fn save(&self, ledger: &AttendanceLedger) -> Result<()> {
        write_json(&self.file_path, ledger)
    }

    fn exists(&self) -> bool {
        self.file_path.exists()
    }
}
