use super::backend::StorageBackend;
use crate::error::AppError;
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use std::sync::Arc;

/// Typed JSON document over a [`StorageBackend`].
///
/// Every read goes to the backend; nothing is cached between calls.
#[derive(Debug)]
pub struct JsonDocument<T> {
    backend: Arc<dyn StorageBackend>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            _marker: PhantomData,
        }
    }

    /// Current value. The first load of a missing document persists the empty default.
    pub fn load(&self) -> Result<T, AppError> {
        let _lock = self.backend.lock()?;
        self.load_locked()
    }

    /// Locked read-modify-write. When `mutate` fails nothing is written.
    pub fn update<R>(
        &self,
        mutate: impl FnOnce(&mut T) -> Result<R, AppError>,
    ) -> Result<R, AppError> {
        let _lock = self.backend.lock()?;
        let mut value = self.load_locked()?;
        let outcome = mutate(&mut value)?;
        self.persist(&value)?;
        Ok(outcome)
    }

    /// Overwrite the whole document
    pub fn replace(&self, value: &T) -> Result<(), AppError> {
        let _lock = self.backend.lock()?;
        self.persist(value)
    }

    fn load_locked(&self) -> Result<T, AppError> {
        match self.backend.read()? {
            Some(text) if !text.trim().is_empty() => serde_json::from_str(&text)
                .map_err(|e| AppError::Persistence(format!("Corrupt store: {}", e))),
            _ => {
                let value = T::default();
                self.persist(&value)?;
                Ok(value)
            }
        }
    }

    fn persist(&self, value: &T) -> Result<(), AppError> {
        let text = serde_json::to_string_pretty(value)?;
        self.backend.write(&text)
    }
}
