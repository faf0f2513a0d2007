//! Theme preference persistence.
//!
//! The dark-mode flag lives under its own key as a JSON boolean. Missing or
//! unreadable values mean light mode.

use crate::repo::kv_store::KeyValueStore;
use crate::repo::note_repo::RepoResult;
use log::warn;

/// Storage key holding the dark-mode flag.
pub const DARK_MODE_KEY: &str = "darkNodes";

/// Reads and writes the host theme preference.
pub struct PreferenceRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PreferenceRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the stored dark-mode flag, `false` when absent or malformed.
    pub fn dark_mode(&self) -> RepoResult<bool> {
        let Some(raw) = self.store.get(DARK_MODE_KEY)? else {
            return Ok(false);
        };
        match serde_json::from_str::<bool>(&raw) {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(
                    "event=theme_load module=repo status=degraded reason=malformed_payload error={err}"
                );
                Ok(false)
            }
        }
    }

    /// Persists the dark-mode flag. Written on every change, including `false`.
    pub fn set_dark_mode(&self, enabled: bool) -> RepoResult<()> {
        let payload = serde_json::to_string(&enabled)?;
        self.store.set(DARK_MODE_KEY, &payload)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{PreferenceRepository, DARK_MODE_KEY};
    use crate::repo::kv_store::{KeyValueStore, MemoryKvStore};

    #[test]
    fn dark_mode_defaults_to_false() {
        let repo = PreferenceRepository::new(MemoryKvStore::new());
        assert!(!repo.dark_mode().unwrap());
    }

    #[test]
    fn dark_mode_round_trips_and_writes_false() {
        let store = MemoryKvStore::new();
        let repo = PreferenceRepository::new(&store);
        repo.set_dark_mode(true).unwrap();
        assert!(repo.dark_mode().unwrap());
        repo.set_dark_mode(false).unwrap();
        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn malformed_flag_reads_as_light_mode() {
        let store = MemoryKvStore::new();
        store.set(DARK_MODE_KEY, "maybe").unwrap();
        let repo = PreferenceRepository::new(&store);
        assert!(!repo.dark_mode().unwrap());
    }
}
