use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};

const DEFAULT_DIR_NAME: &str = ".attendo";

/// Resolves and creates the data directory: `base_dir` when given, otherwise
/// `~/.attendo`.
pub fn data_dir(base_dir: Option<PathBuf>) -> Result<PathBuf> {
    let path = match base_dir {
        Some(dir) => dir,
        None => {
            let home_dir = dirs::home_dir()
                .ok_or_else(|| anyhow!("Could not determine home directory"))?;
            home_dir.join(DEFAULT_DIR_NAME)
        }
    };
    fs::create_dir_all(&path)
        .with_context(|| format!("Unable to create data directory {}", path.display()))?;
    Ok(path)
}

/// Reads a JSON document, `None` when the file does not exist yet.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        trace!("{} does not exist", path.display());
        return Ok(None);
    }
    let file = File::open(path).with_context(|| format!("Unable to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let value = serde_json::from_reader(reader)
        .with_context(|| format!("Invalid document in {}", path.display()))?;
    debug!("Loaded {}", path.display());
    Ok(Some(value))
}

/// Writes the whole document to a sibling temp file, then renames it over the
/// target so readers never see a half-written file.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    {
        let file = File::create(&tmp)
            .with_context(|| format!("Unable to create {}", tmp.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush()?;
    }
    fs::rename(&tmp, path)
        .with_context(|| format!("Unable to replace {}", path.display()))?;
    debug!("Saved {}", path.display());
    Ok(())
}
