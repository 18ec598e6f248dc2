// src/models/player_stats.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-player, per-match statistics.
///
/// `goals` is exclusively event-derived; `started` and `minutes_played` come
/// from the lineup and the batch-correction path respectively.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct PlayerMatchStats {
    pub id: Uuid,
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub started: bool,
    pub minutes_played: i32,
    pub goals: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stats row joined with the roster display name, as returned by the
/// per-team stats endpoints.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct PlayerStatsWithName {
    pub player_id: Uuid,
    pub player_name: String,
    pub started: bool,
    pub minutes_played: i32,
    pub goals: i32,
}

/// One correction inside a batch stats update. `goals` is deliberately not
/// correctable here; it stays event-derived.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlayerStatCorrection {
    pub player_id: Uuid,
    pub started: Option<bool>,
    pub minutes_played: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BatchStatsRequest {
    pub corrections: Vec<PlayerStatCorrection>,
}

/// Read-time season totals for one player; summed over `player_match_stats`,
/// never stored.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerSeasonTotals {
    pub player_id: Uuid,
    pub season_id: Uuid,
    pub matches_played: i64,
    pub matches_started: i64,
    pub minutes_played: i64,
    pub goals: i64,
}
