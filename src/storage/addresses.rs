use super::backend::StorageBackend;
use super::document::JsonDocument;
use super::outcome::Outcome;
use crate::error::AppError;
use crate::providers::GeocodingProvider;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};
use subtle::ConstantTimeEq;
use tracing::{info, warn};

/// Brazilian postal code (CEP), `NNNNN-NNN`
static POSTAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{5}-\d{3}\b").unwrap());

/// Closed set of address roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Origin,
    Destination,
    Recharge,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Origin, Role::Destination, Role::Recharge];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Origin => "origin",
            Role::Destination => "destination",
            Role::Recharge => "recharge",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "origin" | "origem" => Ok(Role::Origin),
            "destination" | "destino" => Ok(Role::Destination),
            "recharge" | "recarga" => Ok(Role::Recharge),
            other => Err(AppError::Validation(format!("unknown role '{}'", other))),
        }
    }
}

/// Geocoded location stored under a name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub formatted_address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub postal_code: Option<String>,
    pub registered_at: DateTime<Utc>,
}

/// A record together with the key it is stored under
#[derive(Debug, Clone, PartialEq)]
pub struct AddressEntry {
    pub role: Role,
    pub name: String,
    pub record: AddressRecord,
}

/// Persisted shape: role -> name -> record. Every role is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressBook(BTreeMap<Role, BTreeMap<String, AddressRecord>>);

impl Default for AddressBook {
    fn default() -> Self {
        Self(Role::ALL.iter().map(|r| (*r, BTreeMap::new())).collect())
    }
}

impl AddressBook {
    pub fn role(&self, role: Role) -> Option<&BTreeMap<String, AddressRecord>> {
        self.0.get(&role)
    }

    pub fn get(&self, role: Role, name: &str) -> Option<&AddressRecord> {
        self.0.get(&role).and_then(|names| names.get(name))
    }

    pub fn len(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn role_mut(&mut self, role: Role) -> &mut BTreeMap<String, AddressRecord> {
        self.0.entry(role).or_default()
    }

    fn check_unique(&self, role: Role, name: &str, address: &str) -> Result<(), AppError> {
        let Some(names) = self.role(role) else {
            return Ok(());
        };
        if names.contains_key(name) {
            return Err(AppError::Duplicate(format!(
                "name '{}' already used in {}",
                name, role
            )));
        }
        if names
            .values()
            .any(|r| r.formatted_address.eq_ignore_ascii_case(address))
        {
            return Err(AppError::Duplicate(format!(
                "address already registered in {}",
                role
            )));
        }
        Ok(())
    }
}

/// Split a CEP out of a formatted address.
///
/// The comma-separated component equal to the CEP is dropped from the address;
/// other components are kept in order.
pub fn split_postal_code(formatted: &str) -> (String, Option<String>) {
    let Some(found) = POSTAL_CODE_RE.find(formatted) else {
        return (formatted.to_string(), None);
    };
    let cep = found.as_str().to_string();
    let address = formatted
        .split(", ")
        .filter(|part| part.trim() != cep)
        .collect::<Vec<_>>()
        .join(", ");
    (address, Some(cep))
}

/// Named locations keyed by role.
///
/// Registration needs the caller to present the configured shared secret, which is
/// also forwarded as the geocoding API key.
pub struct AddressRepository {
    document: JsonDocument<AddressBook>,
    geocoder: Arc<dyn GeocodingProvider>,
    shared_secret: String,
}

impl fmt::Debug for AddressRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressRepository")
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}

impl AddressRepository {
    pub fn new(
        backend: Arc<dyn StorageBackend>,
        geocoder: Arc<dyn GeocodingProvider>,
        shared_secret: impl Into<String>,
    ) -> Self {
        Self {
            document: JsonDocument::new(backend),
            geocoder,
            shared_secret: shared_secret.into(),
        }
    }

    pub fn load(&self) -> Result<AddressBook, AppError> {
        self.document.load()
    }

    /// Entries of one role, ordered by name
    pub fn list(&self, role: Role) -> Result<Vec<AddressEntry>, AppError> {
        let book = self.load()?;
        Ok(book
            .role(role)
            .into_iter()
            .flatten()
            .map(|(name, record)| AddressEntry {
                role,
                name: name.clone(),
                record: record.clone(),
            })
            .collect())
    }

    pub fn get(&self, role: Role, name: &str) -> Result<AddressRecord, AppError> {
        self.load()?
            .get(role, name)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("'{}' is not registered in {}", name, role)))
    }

    /// Geocode `raw_address` and store it under `name`.
    ///
    /// Field, duplicate and secret checks all run before the geocoding call. The
    /// duplicate checks are repeated under the store lock against the geocoded address.
    pub async fn register(
        &self,
        role: Role,
        name: &str,
        raw_address: &str,
        key: &str,
    ) -> Result<AddressEntry, AppError> {
        let name = name.trim();
        let raw_address = raw_address.trim();
        if name.is_empty() || raw_address.is_empty() {
            return Err(AppError::Validation(
                "name and address must not be empty".to_string(),
            ));
        }

        self.load()?.check_unique(role, name, raw_address)?;
        self.authorize(key)?;

        let location = self.geocoder.geocode(raw_address, key).await?;
        let (formatted_address, postal_code) = split_postal_code(&location.formatted_address);
        let record = AddressRecord {
            formatted_address,
            latitude: location.latitude,
            longitude: location.longitude,
            postal_code,
            registered_at: Utc::now(),
        };

        let stored = record.clone();
        self.document.update(|book| {
            book.check_unique(role, name, &stored.formatted_address)?;
            book.role_mut(role).insert(name.to_string(), stored);
            Ok(())
        })?;

        info!(role = %role, name = %name, "Address registered");
        Ok(AddressEntry {
            role,
            name: name.to_string(),
            record,
        })
    }

    pub fn delete(&self, role: Role, name: &str) -> Result<AddressRecord, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("name must not be empty".to_string()));
        }

        let removed = self.document.update(|book| {
            book.role_mut(role)
                .remove(name)
                .ok_or_else(|| AppError::NotFound(format!("'{}' is not registered in {}", name, role)))
        })?;

        info!(role = %role, name = %name, "Address deleted");
        Ok(removed)
    }

    /// [`register`](Self::register) collapsed into a success flag and message
    pub async fn register_outcome(
        &self,
        role: Role,
        name: &str,
        raw_address: &str,
        key: &str,
    ) -> Outcome {
        Outcome::from_result(self.register(role, name, raw_address, key).await, |entry| {
            format!(
                "Saved '{}' as {}: {}",
                entry.name, entry.role, entry.record.formatted_address
            )
        })
    }

    /// [`delete`](Self::delete) collapsed into a success flag and message
    pub fn delete_outcome(&self, role: Role, name: &str) -> Outcome {
        Outcome::from_result(self.delete(role, name), |_| {
            format!("Deleted '{}' from {}", name.trim(), role)
        })
    }

    fn authorize(&self, key: &str) -> Result<(), AppError> {
        if key.is_empty() {
            return Err(AppError::Auth("missing key".to_string()));
        }
        let expected = self.shared_secret.as_bytes();
        if expected.is_empty() || !bool::from(key.as_bytes().ct_eq(expected)) {
            warn!("Address registration rejected: key mismatch");
            return Err(AppError::Auth("invalid key".to_string()));
        }
        Ok(())
    }
}
