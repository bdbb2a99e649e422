//! Persistence: the settings store seam, stored settings and snapshots.
//!
//! - [`store`]: `SettingsStore` trait, `MemoryStore` and the storage keys
//! - [`settings`]: typed load/save helpers that never fail
//! - [`snapshot`]: JSON session export and lenient import
//! - [`coerce`]: forgiving readers for loosely typed JSON

pub mod coerce;
pub mod settings;
pub mod snapshot;
pub mod store;

pub use snapshot::{ImportedSession, SessionSnapshot, SnapshotSettings, SNAPSHOT_VERSION};
pub use store::{keys, MemoryStore, SettingsStore};
