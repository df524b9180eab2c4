//! Best score persistence
//!
//! Stored as a base-10 integer string under a fixed key. Anything unreadable
//! counts as no best score yet.

use crate::persistence::{KeyValueStore, StorageError};

/// The persisted best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    pub value: u64,
}

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "np_highscore";

    pub fn new(value: u64) -> Self {
        Self { value }
    }

    /// Parse a stored value; missing, negative or non-numeric data yields 0
    pub fn parse(raw: Option<&str>) -> Self {
        let value = raw.and_then(parse_value).unwrap_or(0);
        Self { value }
    }

    /// Read the best score from `store`, degrading to 0 on any failure
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(None) => Self::default(),
            Ok(Some(raw)) => match parse_value(&raw) {
                Some(value) => {
                    log::info!("Loaded best score {value}");
                    Self { value }
                }
                None => {
                    log::warn!("Ignoring unreadable best score {raw:?}");
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read best score: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(Self::STORAGE_KEY, &self.value.to_string())?;
        log::info!("Best score saved ({})", self.value);
        Ok(())
    }
}

fn parse_value(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}
