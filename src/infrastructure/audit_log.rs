use crate::domain::ports::AuditLog;
use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Append-only text file sink.
///
/// Appends are serialized through a mutex so concurrent callers sharing one
/// instance never interleave partial lines.
pub struct FileAuditLog {
    path: PathBuf,
    writer: Mutex<()>,
}

impl FileAuditLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            writer: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AuditLog for FileAuditLog {
    async fn append(&self, line: &str) -> Result<()> {
        let _guard = self.writer.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        let mut entry = String::with_capacity(line.len() + 1);
        entry.push_str(line);
        entry.push('\n');
        file.write_all(entry.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
