use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const ERROR_LOG_FILENAME: &str = "typescript_errors.json";

/// One recorded type-check failure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub file_path: String,
    pub errors: String,
    pub session_id: Option<String>,
}

/// Accumulating record of type-check failures across hook invocations.
///
/// Stored as a JSON array, read and rewritten in full on each append.
/// There is no locking; concurrent invocations can lose an update. The log
/// is a diagnostic aid, not a source of truth.
#[derive(Debug)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default log location: one directory above the hook binary
    pub fn default_path() -> Result<PathBuf> {
        let exe = std::env::current_exe().context("failed to locate hook binary")?;
        let dir = exe
            .parent()
            .and_then(Path::parent)
            .context("hook binary has no parent directory")?;
        Ok(dir.join(ERROR_LOG_FILENAME))
    }

    /// Append one entry, rewriting the whole file
    pub fn append(&self, entry: ErrorEntry) -> Result<()> {
        let mut entries = self.load()?;
        entries.push(entry);

        let content =
            serde_json::to_string_pretty(&entries).context("failed to serialize error log")?;
        fs::write(&self.path, content)
            .with_context(|| format!("failed to write error log: {}", self.path.display()))?;
        Ok(())
    }

    fn load(&self) -> Result<Vec<ErrorEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read error log: {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse error log: {}", self.path.display()))
    }
}
