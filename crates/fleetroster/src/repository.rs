//! Whole-collection persistence of the fleet.

use tracing::{debug, warn};

use crate::config::DEFAULT_FLEET_KEY;
use crate::error::Result;
use crate::storage::ItemStore;
use crate::vehicle::VehicleRecord;

/// Reads and writes the fleet as a single JSON array under one storage key.
///
/// There are no partial updates: every mutation reads the whole collection,
/// changes it and writes the whole collection back.
#[derive(Debug)]
pub struct FleetRepository<S> {
    store: S,
    key: String,
}

impl<S: ItemStore> FleetRepository<S> {
    /// Create a repository using the default `fleetData` key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_FLEET_KEY)
    }

    /// Create a repository storing the fleet under `key`.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The storage key in use.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the whole fleet.
    ///
    /// A missing key, an unreadable store or a value that is not an array of
    /// vehicle records all read as an empty fleet. The next write replaces
    /// whatever was there.
    #[must_use]
    pub fn read_all(&self) -> Vec<VehicleRecord> {
        let raw = match self.store.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(
                    "Could not read '{}', treating fleet as empty: {}",
                    self.key, err
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<VehicleRecord>>(&raw) {
            Ok(records) => {
                debug!("Read {} vehicle(s) from '{}'", records.len(), self.key);
                records
            }
            Err(err) => {
                warn!(
                    "Stored fleet under '{}' is malformed, treating as empty: {}",
                    self.key, err
                );
                Vec::new()
            }
        }
    }

    /// Replace the stored fleet with `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be serialized or the store
    /// cannot be written.
    pub fn write_all(&mut self, records: &[VehicleRecord]) -> Result<()> {
        let raw = serde_json::to_string(records)?;
        self.store.set_item(&self.key, &raw)?;
        debug!("Wrote {} vehicle(s) to '{}'", records.len(), self.key);
        Ok(())
    }
}
