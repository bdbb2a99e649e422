//! Key/value settings store abstraction.
//!
//! The concrete backend (browser local storage, a file, a registry) lives
//! with the host. The crate only ships [`MemoryStore`], which is enough
//! for tests and headless hosts.

use rustc_hash::FxHashMap;

use crate::error::StoreError;

/// Fixed storage keys. Kept stable so existing saved data keeps loading.
pub mod keys {
    /// All-time points, a JSON object of name → points.
    pub const POINTS: &str = "uno_clock_points";
    /// Archived all-time tables, a JSON array of `{timestamp, points}`.
    pub const POINTS_ARCHIVES: &str = "uno_clock_points_archives";
    /// Increment mode name: `none`, `increment` or `delay`.
    pub const INC_MODE: &str = "uno_clock_inc_mode";
    /// Increment/delay length as `mm:ss`.
    pub const INC_VALUE: &str = "uno_clock_inc_value";
    /// Knockout bonus as `mm:ss`.
    pub const KO_BONUS: &str = "uno_clock_ko_bonus";
    /// Reinstatement bonus as `mm:ss`.
    pub const REINSTATE_BONUS: &str = "uno_clock_reinstate_bonus";
    /// Name lock flag: `1` or `0`.
    pub const LOCK_NAMES: &str = "uno_clock_lock_names";

    /// Every key the crate reads or writes.
    pub const ALL: [&str; 7] = [
        POINTS,
        POINTS_ARCHIVES,
        INC_MODE,
        INC_VALUE,
        KO_BONUS,
        REINSTATE_BONUS,
        LOCK_NAMES,
    ];
}

/// String key/value persistence.
///
/// Implementations may fail at any time; callers in this crate log the
/// failure and carry on with in-memory state.
pub trait SettingsStore {
    /// Read a value. `Ok(None)` means the key was never written.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, builder style.
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Read a value directly.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: SettingsStore + ?Sized> SettingsStore for Box<S> {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).save(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load(keys::KO_BONUS).unwrap(), None);

        store.save(keys::KO_BONUS, "01:00").unwrap();

        assert_eq!(store.load(keys::KO_BONUS).unwrap(), Some("01:00".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_seeded_store() {
        let store = MemoryStore::new().with(keys::LOCK_NAMES, "1");
        assert_eq!(store.get(keys::LOCK_NAMES), Some("1"));
    }

    #[test]
    fn test_keys_are_distinct() {
        for (i, a) in keys::ALL.iter().enumerate() {
            for b in &keys::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
