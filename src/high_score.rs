//! Best score slot
//!
//! A single integer persisted as a decimal string under a fixed key.

use crate::persistence::{Storage, StorageError};

/// Best score persisted in a named storage slot
#[derive(Debug)]
pub struct HighScoreStore<S> {
    storage: S,
    key: String,
}

impl<S: Storage> HighScoreStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Stored best score, or 0 if absent or not a valid integer
    pub fn load(&self) -> u32 {
        let Some(raw) = self.storage.get(&self.key) else {
            log::info!("No best score found, starting fresh");
            return 0;
        };

        match raw.trim().parse::<u32>() {
            Ok(score) => {
                log::info!("Loaded best score {}", score);
                score
            }
            Err(_) => {
                log::warn!("Ignoring invalid best score {:?}", raw);
                0
            }
        }
    }

    /// Overwrite the stored best score
    pub fn save(&mut self, score: u32) -> Result<(), StorageError> {
        self.storage.set(&self.key, &score.to_string())?;
        log::info!("Best score saved ({})", score);
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
