// src/models/lineup.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Lineup {
    pub id: Uuid,
    pub match_id: Uuid,
    pub team_id: Uuid,
    pub formation: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct LineupEntry {
    pub id: Uuid,
    pub lineup_id: Uuid,
    pub player_id: Uuid,
    pub position: String,
    pub is_starter: bool,
    pub formation_slot: Option<i32>,
    pub sort_order: i32,
}

/// Full lineup for one team in one match.
#[derive(Debug, Serialize, Deserialize)]
pub struct LineupResponse {
    pub lineup: Lineup,
    pub entries: Vec<LineupEntry>,
}

// Request DTOs

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LineupEntryRequest {
    pub player_id: Uuid,
    pub position: String,
    pub is_starter: bool,
    pub formation_slot: Option<i32>,
}

/// Wholesale lineup replacement; lineups are never patched incrementally.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ReplaceLineupRequest {
    pub formation: Option<String>,
    pub entries: Vec<LineupEntryRequest>,
}

impl ReplaceLineupRequest {
    pub fn starter_ids(&self) -> Vec<Uuid> {
        self.entries
            .iter()
            .filter(|e| e.is_starter)
            .map(|e| e.player_id)
            .collect()
    }
}
