use super::backend::StorageBackend;
use super::document::JsonDocument;
use super::records::HistoryEntry;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

/// Maximum number of calculations kept in history
pub const HISTORY_LIMIT: usize = 10;

/// Time-ordered log of recent calculations, oldest evicted first
#[derive(Debug)]
pub struct HistoryStore {
    document: JsonDocument<Vec<HistoryEntry>>,
}

impl HistoryStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            document: JsonDocument::new(backend),
        }
    }

    pub fn load(&self) -> Result<Vec<HistoryEntry>, AppError> {
        self.document.load()
    }

    /// Append `entry`, dropping the oldest entries beyond [`HISTORY_LIMIT`].
    /// Returns the number of stored entries.
    pub fn append(&self, entry: HistoryEntry) -> Result<usize, AppError> {
        let len = self.document.update(|entries| {
            entries.push(entry);
            let excess = entries.len().saturating_sub(HISTORY_LIMIT);
            entries.drain(..excess);
            Ok(entries.len())
        })?;

        info!(entries = len, "History entry appended");
        Ok(len)
    }

    pub fn clear(&self) -> Result<(), AppError> {
        self.document.replace(&Vec::new())?;
        info!("History cleared");
        Ok(())
    }
}
