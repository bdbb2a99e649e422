//! Reading and writing individual settings through a [`SettingsStore`].
//!
//! Every function here is infallible from the caller's point of view:
//! store failures and undecodable values are logged at `warn` and the
//! compiled-in default is used instead. Durations are stored as `mm:ss`.

use im::Vector;
use serde_json::Value;
use tracing::warn;

use super::coerce::{coerce_int, coerce_ms};
use super::store::{keys, SettingsStore};
use crate::core::{time, ClockConfig, IncrementMode};
use crate::error::StoreError;
use crate::scoring::{ArchiveEntry, PointsMap};

/// Read a raw value, logging and swallowing store failures.
pub fn read(store: &dyn SettingsStore, key: &str) -> Option<String> {
    match store.load(key) {
        Ok(value) => value,
        Err(err) => {
            warn!(key, %err, "Failed to read setting");
            None
        }
    }
}

/// Write a raw value, logging and swallowing store failures.
pub fn write(store: &mut dyn SettingsStore, key: &str, value: &str) {
    if let Err(err) = store.save(key, value) {
        warn!(key, %err, "Failed to save setting");
    }
}

fn corrupt(key: &str, reason: impl Into<String>) {
    let err = StoreError::Corrupt {
        key: key.to_string(),
        reason: reason.into(),
    };
    warn!(%err, "Ignoring stored value");
}

fn read_duration(store: &dyn SettingsStore, key: &str, default: u64) -> u64 {
    let Some(raw) = read(store, key) else {
        return default;
    };
    match time::try_parse(&raw) {
        Some(ms) => ms,
        None => {
            corrupt(key, format!("not a duration: {raw:?}"));
            default
        }
    }
}

impl ClockConfig {
    /// Assemble the configuration from stored settings, falling back to
    /// the default field by field. Direction is not persisted.
    #[must_use]
    pub fn load(store: &dyn SettingsStore) -> Self {
        let defaults = ClockConfig::default();

        let increment_mode = match read(store, keys::INC_MODE) {
            Some(raw) => IncrementMode::from_name(&raw).unwrap_or_else(|| {
                corrupt(keys::INC_MODE, format!("unknown mode: {raw:?}"));
                defaults.increment_mode
            }),
            None => defaults.increment_mode,
        };

        Self {
            increment_mode,
            increment_ms: read_duration(store, keys::INC_VALUE, defaults.increment_ms),
            ko_bonus_ms: read_duration(store, keys::KO_BONUS, defaults.ko_bonus_ms),
            reinstate_bonus_ms: read_duration(
                store,
                keys::REINSTATE_BONUS,
                defaults.reinstate_bonus_ms,
            ),
            direction: defaults.direction,
        }
    }
}

/// Persist the increment mode and length.
pub fn save_increment(store: &mut dyn SettingsStore, mode: IncrementMode, ms: u64) {
    write(store, keys::INC_MODE, mode.as_str());
    write(store, keys::INC_VALUE, &time::format(ms));
}

/// Persist the knockout bonus.
pub fn save_ko_bonus(store: &mut dyn SettingsStore, ms: u64) {
    write(store, keys::KO_BONUS, &time::format(ms));
}

/// Persist the reinstatement bonus.
pub fn save_reinstate_bonus(store: &mut dyn SettingsStore, ms: u64) {
    write(store, keys::REINSTATE_BONUS, &time::format(ms));
}

/// Stored name lock. Anything but `1` means unlocked.
pub fn load_lock_names(store: &dyn SettingsStore) -> bool {
    read(store, keys::LOCK_NAMES).is_some_and(|raw| raw == "1")
}

/// Persist the name lock.
pub fn save_lock_names(store: &mut dyn SettingsStore, locked: bool) {
    write(store, keys::LOCK_NAMES, if locked { "1" } else { "0" });
}

/// Decode a points table from a JSON object. Each value is coerced to a
/// non-negative integer; non-objects yield `None`.
pub fn points_from_value(value: &Value) -> Option<PointsMap> {
    let object = value.as_object()?;
    Some(
        object
            .iter()
            .map(|(name, points)| (name.clone(), coerce_ms(points)))
            .collect(),
    )
}

/// Stored all-time points. Missing or corrupt data yields an empty table.
pub fn load_points(store: &dyn SettingsStore) -> PointsMap {
    let Some(raw) = read(store, keys::POINTS) else {
        return PointsMap::new();
    };
    let decoded = serde_json::from_str::<Value>(&raw)
        .map_err(|err| err.to_string())
        .and_then(|value| points_from_value(&value).ok_or_else(|| "not an object".to_string()));
    match decoded {
        Ok(points) => points,
        Err(reason) => {
            corrupt(keys::POINTS, reason);
            PointsMap::new()
        }
    }
}

/// Persist all-time points as a JSON object.
pub fn save_points(store: &mut dyn SettingsStore, points: &PointsMap) {
    match serde_json::to_string(points) {
        Ok(json) => write(store, keys::POINTS, &json),
        Err(err) => warn!(%err, "Failed to encode points"),
    }
}

/// Stored archive log. Malformed entries are skipped; a corrupt log yields
/// an empty one.
pub fn load_archives(store: &dyn SettingsStore) -> Vector<ArchiveEntry> {
    let Some(raw) = read(store, keys::POINTS_ARCHIVES) else {
        return Vector::new();
    };
    let entries = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(_) => {
            corrupt(keys::POINTS_ARCHIVES, "not an array");
            return Vector::new();
        }
        Err(err) => {
            corrupt(keys::POINTS_ARCHIVES, err.to_string());
            return Vector::new();
        }
    };

    entries
        .iter()
        .filter_map(|entry| {
            let timestamp = coerce_int(entry.get("timestamp")?)
                .and_then(|ts| u64::try_from(ts).ok())?;
            let points = points_from_value(entry.get("points")?)?;
            Some(ArchiveEntry { timestamp, points })
        })
        .collect()
}

/// Persist the archive log as a JSON array.
pub fn save_archives(store: &mut dyn SettingsStore, archives: &Vector<ArchiveEntry>) {
    match serde_json::to_string(archives) {
        Ok(json) => write(store, keys::POINTS_ARCHIVES, &json),
        Err(err) => warn!(%err, "Failed to encode archives"),
    }
}
