//! Newline-delimited JSON error log.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use serde_json::Value;

use crate::domain::ports::{ErrorLog, ErrorLogError};

pub(crate) const ERROR_LOG_FILE: &str = "errors.ndjson";

/// Appends one JSON document per line to `errors.ndjson`.
#[derive(Debug)]
pub struct NdjsonErrorLog {
    dir: Dir,
    root: PathBuf,
}

impl NdjsonErrorLog {
    /// Open the log's directory, creating it if needed.
    pub fn open(data_dir: impl AsRef<Path>) -> io::Result<Self> {
        let root = data_dir.as_ref().to_path_buf();
        Dir::create_ambient_dir_all(&root, ambient_authority())?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority())?;
        Ok(Self { dir, root })
    }

    /// Full path of the log file.
    pub fn path(&self) -> PathBuf {
        self.root.join(ERROR_LOG_FILE)
    }

    fn append_line(&self, line: &str) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.append(true).create(true);
        let mut file = self.dir.open_with(ERROR_LOG_FILE, &options)?;
        file.write_all(format!("{line}\n").as_bytes())
    }
}

#[async_trait]
impl ErrorLog for NdjsonErrorLog {
    async fn append(&self, entry: &Value) -> Result<(), ErrorLogError> {
        let line =
            serde_json::to_string(entry).map_err(|err| ErrorLogError::append(err.to_string()))?;
        self.append_line(&line)
            .map_err(|err| ErrorLogError::append(err.to_string()))
    }
}
