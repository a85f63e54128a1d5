use async_trait::async_trait;
use servicedex_application::ports::AuditLogPort;
use servicedex_domain::{AuditLogEntry, DomainError};
use std::path::PathBuf;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Plain-text, append-only log of disable actions.
pub struct FileAuditLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileAuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl AuditLogPort for FileAuditLog {
    async fn append(&self, entry: &AuditLogEntry) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::AuditLog(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                DomainError::AuditLog(format!("Failed to open {}: {}", self.path.display(), e))
            })?;

        file.write_all(entry.to_line().as_bytes())
            .await
            .map_err(|e| {
                DomainError::AuditLog(format!("Failed to write {}: {}", self.path.display(), e))
            })?;
        file.flush().await.map_err(|e| {
            DomainError::AuditLog(format!("Failed to flush {}: {}", self.path.display(), e))
        })
    }
}
