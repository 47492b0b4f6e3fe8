use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use crate::model::semester::SemesterConfig;
use crate::repository::file::{data_dir, read_json, write_json};
use crate::repository::traits::SemesterRepository;

const SEMESTER_FILE_NAME: &str = "semester.json";

#[derive(Clone)]
pub struct FileSemesterRepository {
    file_path: PathBuf,
}

impl FileSemesterRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let path = data_dir(base_dir)?.join(SEMESTER_FILE_NAME);
        Ok(FileSemesterRepository { file_path: path })
    }
}

impl SemesterRepository for FileSemesterRepository {
    fn load(&self) -> Result<Option<SemesterConfig>> {
        // Deserializing runs full validation, so a hand-edited file with a bad
        // schedule fails here rather than producing wrong numbers later.
        read_json(&self.file_path)
    }

    fn save(&self, config: &SemesterConfig) -> Result<()> {
        debug!("Replacing semester with {}", config.name());
        write_json(&self.file_path, config)
    }
}
