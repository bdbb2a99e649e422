//! Session snapshot export and import.
//!
//! The snapshot is a versioned JSON document carrying the settings, the
//! seats, the active index and the all-time points:
//!
//! ```json
//! { "version": 1,
//!   "settings": { "initialTime": "05:00", "playerCount": 4, "incMode": "none",
//!                 "incMs": 2000, "lockNames": false, "koBonusMs": 60000,
//!                 "reinstateBonusMs": 0 },
//!   "activeIndex": 0,
//!   "players": [ { "name": "Player 1", "msLeft": 300000, "knocked": false } ],
//!   "pointsMap": { "Alice": 25 } }
//! ```
//!
//! Export is strict. Import is lenient field by field: numbers may be
//! strings, unknown modes keep the current one, missing seats are filled
//! with fresh ones. Only a missing `players`/`settings` or one of the wrong
//! shape aborts the import, and it does so before anything is changed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coerce::{coerce_int, coerce_ms, truthy};
use super::settings::points_from_value;
use crate::core::{
    clamp_seat_count, time, ClockConfig, IncrementMode, PlayerState, SeatId, DEFAULT_INITIAL_MS,
    DEFAULT_SEATS,
};
use crate::error::SnapshotError;
use crate::scoring::PointsMap;
use crate::turns::TurnEngine;

/// Version written by [`SessionSnapshot::capture`].
pub const SNAPSHOT_VERSION: u32 = 1;

static NULL: Value = Value::Null;

/// Settings block of a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotSettings {
    /// Initial time text as entered, e.g. `05:00`.
    pub initial_time: String,
    /// Number of seats.
    pub player_count: usize,
    /// Increment mode.
    pub inc_mode: IncrementMode,
    /// Increment or delay length.
    pub inc_ms: u64,
    /// Name lock flag.
    pub lock_names: bool,
    /// Knockout bonus.
    pub ko_bonus_ms: u64,
    /// Reinstatement bonus.
    pub reinstate_bonus_ms: u64,
}

/// A complete exported session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Format version.
    pub version: u32,
    /// Settings at export time.
    pub settings: SnapshotSettings,
    /// Index of the active seat.
    pub active_index: usize,
    /// Every seat in seat order.
    pub players: Vec<PlayerState>,
    /// All-time points.
    pub points_map: PointsMap,
}

impl SessionSnapshot {
    /// Capture the current state.
    #[must_use]
    pub fn capture(
        engine: &TurnEngine,
        initial_time: &str,
        lock_names: bool,
        points: &PointsMap,
    ) -> Self {
        let config = engine.config();
        Self {
            version: SNAPSHOT_VERSION,
            settings: SnapshotSettings {
                initial_time: initial_time.to_string(),
                player_count: engine.seat_count(),
                inc_mode: config.increment_mode,
                inc_ms: config.increment_ms,
                lock_names,
                ko_bonus_ms: config.ko_bonus_ms,
                reinstate_bonus_ms: config.reinstate_bonus_ms,
            },
            active_index: engine.active().index(),
            players: engine.seats().values().cloned().collect(),
            points_map: points.clone(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Everything an import wants to change, decoded but not yet applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportedSession {
    /// Configuration to install.
    pub config: ClockConfig,
    /// Seats, already sized to the imported seat count.
    pub players: Vec<PlayerState>,
    /// Active seat index, already clamped into range.
    pub active_index: usize,
    /// New initial time text, when the snapshot carries one.
    pub initial_time: Option<String>,
    /// New name lock, when the snapshot carries one.
    pub lock_names: Option<bool>,
    /// New all-time points, when the snapshot carries them.
    pub points: Option<PointsMap>,
}

impl ImportedSession {
    /// Build the engine for the imported seats.
    #[must_use]
    pub fn engine(&self) -> TurnEngine {
        TurnEngine::from_parts(self.config.clone(), self.players.clone(), self.active_index)
    }
}

/// Parse snapshot text. See [`decode`].
pub fn decode_str(
    text: &str,
    base: &ClockConfig,
    initial_time: &str,
) -> Result<ImportedSession, SnapshotError> {
    let value: Value = serde_json::from_str(text)?;
    decode(&value, base, initial_time)
}

/// Decode a snapshot on top of the current configuration.
///
/// `base` supplies every setting the snapshot leaves out (the turn
/// direction always comes from `base`). `initial_time` is the current
/// initial time text, used for fresh seats unless the snapshot overrides it.
pub fn decode(
    value: &Value,
    base: &ClockConfig,
    initial_time: &str,
) -> Result<ImportedSession, SnapshotError> {
    let players = require(value, "players")?
        .as_array()
        .ok_or(SnapshotError::InvalidField {
            field: "players",
            expected: "an array",
        })?;
    let settings = require(value, "settings")?
        .as_object()
        .ok_or(SnapshotError::InvalidField {
            field: "settings",
            expected: "an object",
        })?;
    let setting = |key: &str| settings.get(key).unwrap_or(&NULL);

    let requested = match setting("playerCount") {
        count if truthy(count) => coerce_int(count),
        _ => i64::try_from(players.len()).ok(),
    };
    let seat_count = match requested {
        Some(0) | None => DEFAULT_SEATS,
        Some(n) => clamp_seat_count(n),
    };

    let initial_time_override = setting("initialTime").as_str().map(str::to_string);
    let initial_ms = time::parse_or(
        initial_time_override.as_deref().unwrap_or(initial_time),
        DEFAULT_INITIAL_MS,
    );

    let mut config = base.clone();
    if let Some(mode) = setting("incMode").as_str().and_then(IncrementMode::from_name) {
        config.increment_mode = mode;
    }
    if let Some(ms) = number(setting("incMs")) {
        config.increment_ms = ms;
    }
    if let Some(ms) = number(setting("koBonusMs")) {
        config.ko_bonus_ms = ms;
    }
    if let Some(ms) = number(setting("reinstateBonusMs")) {
        config.reinstate_bonus_ms = ms;
    }

    let seats: Vec<PlayerState> = SeatId::all(seat_count)
        .map(|seat| match players.get(seat.index()) {
            Some(imported) => import_player(seat, imported),
            None => PlayerState::new(seat, initial_ms),
        })
        .collect();

    let active_index = value
        .get("activeIndex")
        .and_then(coerce_int)
        .and_then(|i| usize::try_from(i).ok())
        .unwrap_or(0)
        .min(seat_count - 1);

    let points = value
        .get("pointsMap")
        .filter(|v| v.is_object())
        .and_then(points_from_value);

    Ok(ImportedSession {
        config,
        players: seats,
        active_index,
        initial_time: initial_time_override,
        lock_names: setting("lockNames").as_bool(),
        points,
    })
}

fn require<'a>(value: &'a Value, field: &'static str) -> Result<&'a Value, SnapshotError> {
    value
        .get(field)
        .filter(|v| truthy(v))
        .ok_or(SnapshotError::MissingField(field))
}

fn number(value: &Value) -> Option<u64> {
    value.is_number().then(|| coerce_ms(value))
}

fn import_player(seat: SeatId, value: &Value) -> PlayerState {
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default();
    PlayerState {
        name: PlayerState::sanitize_name(seat, name),
        ms_left: value.get("msLeft").map_or(0, coerce_ms),
        knocked: value.get("knocked").is_some_and(truthy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TurnDirection;
    use serde_json::json;

    fn decode_default(value: &Value) -> Result<ImportedSession, SnapshotError> {
        decode(value, &ClockConfig::default(), "05:00")
    }

    #[test]
    fn test_missing_players_is_rejected() {
        let err = decode_default(&json!({ "settings": {} })).unwrap_err();
        assert!(matches!(err, SnapshotError::MissingField("players")));
    }

    #[test]
    fn test_missing_settings_is_rejected() {
        let err = decode_default(&json!({ "players": [] })).unwrap_err();
        assert!(matches!(err, SnapshotError::MissingField("settings")));
    }

    #[test]
    fn test_wrong_shapes_are_rejected() {
        let err = decode_default(&json!({ "players": 3, "settings": {} })).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidField { field: "players", .. }));

        let err = decode_default(&json!({ "players": [], "settings": "x" })).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidField { field: "settings", .. }));
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let err = decode_str("{ nope", &ClockConfig::default(), "05:00").unwrap_err();
        assert!(matches!(err, SnapshotError::Json(_)));
    }

    #[test]
    fn test_seat_count_from_settings_or_players() {
        let from_settings = decode_default(&json!({
            "players": [], "settings": { "playerCount": "6" }
        }))
        .unwrap();
        assert_eq!(from_settings.players.len(), 6);

        let from_players = decode_default(&json!({
            "players": [{}, {}, {}], "settings": {}
        }))
        .unwrap();
        assert_eq!(from_players.players.len(), 3);

        let fallback = decode_default(&json!({
            "players": [], "settings": { "playerCount": "lots" }
        }))
        .unwrap();
        assert_eq!(fallback.players.len(), DEFAULT_SEATS);

        let clamped = decode_default(&json!({
            "players": [], "settings": { "playerCount": 40 }
        }))
        .unwrap();
        assert_eq!(clamped.players.len(), 8);
    }

    #[test]
    fn test_players_are_coerced() {
        let imported = decode_default(&json!({
            "players": [
                { "name": "  Alice ", "msLeft": "90000", "knocked": 1 },
                { "name": "", "msLeft": -5 },
            ],
            "settings": { "playerCount": 3, "initialTime": "02:00" }
        }))
        .unwrap();

        assert_eq!(imported.players[0].name, "Alice");
        assert_eq!(imported.players[0].ms_left, 90_000);
        assert!(imported.players[0].knocked);
        assert_eq!(imported.players[1].name, "Player 2");
        assert_eq!(imported.players[1].ms_left, 0);
        // Seats beyond the imported list start fresh at the imported initial time.
        assert_eq!(imported.players[2], PlayerState::new(SeatId::new(2), 120_000));
        assert_eq!(imported.initial_time.as_deref(), Some("02:00"));
    }

    #[test]
    fn test_settings_override_base_and_keep_direction() {
        let base = ClockConfig::default().with_direction(TurnDirection::Reverse);
        let imported = decode(
            &json!({
                "players": [],
                "settings": {
                    "incMode": "delay", "incMs": 4000, "koBonusMs": 0,
                    "reinstateBonusMs": "15000", "lockNames": true
                }
            }),
            &base,
            "05:00",
        )
        .unwrap();

        assert_eq!(imported.config.increment_mode, IncrementMode::Delay);
        assert_eq!(imported.config.increment_ms, 4_000);
        assert_eq!(imported.config.ko_bonus_ms, 0);
        // Non-numeric JSON leaves the current value in place.
        assert_eq!(imported.config.reinstate_bonus_ms, 0);
        assert_eq!(imported.config.direction, TurnDirection::Reverse);
        assert_eq!(imported.lock_names, Some(true));
    }

    #[test]
    fn test_active_index_clamped() {
        let imported = decode_default(&json!({
            "players": [{}, {}],
            "settings": {},
            "activeIndex": 9
        }))
        .unwrap();
        assert_eq!(imported.active_index, 1);

        let negative = decode_default(&json!({
            "players": [{}, {}],
            "settings": {},
            "activeIndex": -3
        }))
        .unwrap();
        assert_eq!(negative.active_index, 0);
    }

    #[test]
    fn test_points_map_optional() {
        let without = decode_default(&json!({ "players": [], "settings": {} })).unwrap();
        assert_eq!(without.points, None);

        let with = decode_default(&json!({
            "players": [], "settings": {}, "pointsMap": { "Alice": "25", "Bob": -1 }
        }))
        .unwrap();
        let points = with.points.unwrap();
        assert_eq!(points.get("Alice"), Some(&25));
        assert_eq!(points.get("Bob"), Some(&0));
    }

    #[test]
    fn test_capture_matches_document_shape() {
        let mut engine = TurnEngine::new(2, 300_000, ClockConfig::default());
        engine.rename(SeatId::new(0), "Alice");
        let points = PointsMap::unit("Alice".to_string(), 25);

        let snapshot = SessionSnapshot::capture(&engine, "05:00", false, &points);
        let value = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(value["version"], 1);
        assert_eq!(value["settings"]["incMode"], "none");
        assert_eq!(value["settings"]["playerCount"], 2);
        assert_eq!(value["players"][0]["name"], "Alice");
        assert_eq!(value["players"][0]["msLeft"], 300_000);
        assert_eq!(value["pointsMap"]["Alice"], 25);
        assert_eq!(value["activeIndex"], 0);
    }

    #[test]
    fn test_capture_then_decode_restores_seats() {
        let mut engine = TurnEngine::new(5, 200_000, ClockConfig::default());
        engine.knock_out(SeatId::new(3));
        engine.make_active(SeatId::new(4));

        let snapshot = SessionSnapshot::capture(&engine, "03:20", true, &PointsMap::new());
        let json = snapshot.to_json().unwrap();
        let imported = decode_str(&json, &ClockConfig::default(), "05:00").unwrap();

        assert_eq!(imported.players, snapshot.players);
        assert_eq!(imported.active_index, 4);
        assert_eq!(imported.lock_names, Some(true));
        assert_eq!(imported.engine().active(), SeatId::new(4));
    }
}
