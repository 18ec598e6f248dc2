// src/models/match_event.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Ledger entry for something that happened during a match.
///
/// Stored flat; use [`MatchEvent::kind`] to get the typed view so handling
/// stays exhaustive over event kinds.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct MatchEvent {
    pub id: Uuid,
    pub match_id: Uuid,
    pub event_type: MatchEventType,
    pub team_id: Uuid,
    pub player_id: Option<Uuid>,
    pub player_name: Option<String>,
    pub match_minute: i32,
    pub extra_time: Option<i32>,
    pub player_out_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MatchEventType {
    Goal,
    Substitution,
}

impl MatchEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchEventType::Goal => "goal",
            MatchEventType::Substitution => "substitution",
        }
    }
}

/// Typed view over a stored event row.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Goal {
        team_id: Uuid,
        player_id: Option<Uuid>,
    },
    Substitution {
        team_id: Uuid,
        player_in_id: Option<Uuid>,
        player_out_id: Option<Uuid>,
    },
}

impl MatchEvent {
    pub fn kind(&self) -> EventKind {
        match self.event_type {
            MatchEventType::Goal => EventKind::Goal {
                team_id: self.team_id,
                player_id: self.player_id,
            },
            MatchEventType::Substitution => EventKind::Substitution {
                team_id: self.team_id,
                player_in_id: self.player_id,
                player_out_id: self.player_out_id,
            },
        }
    }
}

// Request/Response DTOs
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateEventRequest {
    pub event_type: MatchEventType,
    pub team_id: Uuid,
    pub player_id: Option<Uuid>,
    pub player_name: Option<String>,
    pub match_minute: i32,
    pub extra_time: Option<i32>,
    pub player_out_id: Option<Uuid>,
}

/// Partial event update. Omitted fields keep their stored value; concurrent
/// updates of the same event are last-write-wins.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UpdateEventRequest {
    pub player_id: Option<Uuid>,
    pub player_name: Option<String>,
    pub match_minute: Option<i32>,
    pub extra_time: Option<i32>,
    pub player_out_id: Option<Uuid>,
}

impl UpdateEventRequest {
    pub fn is_empty(&self) -> bool {
        self.player_id.is_none()
            && self.player_name.is_none()
            && self.match_minute.is_none()
            && self.extra_time.is_none()
            && self.player_out_id.is_none()
    }
}
