use super::backend::StorageBackend;
use super::document::JsonDocument;
use super::records::PinnedEntry;
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, warn};

/// Maximum number of pinned calculations
pub const PINNED_LIMIT: usize = 5;

/// Calculations the operator chose to keep. Full means full: no eviction.
#[derive(Debug)]
pub struct PinnedStore {
    document: JsonDocument<Vec<PinnedEntry>>,
}

impl PinnedStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            document: JsonDocument::new(backend),
        }
    }

    pub fn load(&self) -> Result<Vec<PinnedEntry>, AppError> {
        self.document.load()
    }

    /// Pin `entry`. Fails with [`AppError::Capacity`] once [`PINNED_LIMIT`] entries are held,
    /// leaving the store untouched.
    pub fn pin(&self, entry: PinnedEntry) -> Result<usize, AppError> {
        let result = self.document.update(|entries| {
            if entries.len() >= PINNED_LIMIT {
                return Err(AppError::Capacity(format!(
                    "limit of {} reached",
                    PINNED_LIMIT
                )));
            }
            entries.push(entry);
            Ok(entries.len())
        });

        match &result {
            Ok(len) => info!(entries = len, "Calculation pinned"),
            Err(e) => warn!(error = %e, "Pin rejected"),
        }
        result
    }

    pub fn clear(&self) -> Result<(), AppError> {
        self.document.replace(&Vec::new())?;
        info!("Pinned calculations cleared");
        Ok(())
    }
}
