// src/models/matches.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// A scheduled fixture together with its live, mutable state.
///
/// `home_score`/`away_score` are event-derived counters except for forfeited
/// matches, where the score is assigned by rule (3-0 against the forfeiting
/// team) and no goal events back it.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Match {
    pub id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub season_id: Uuid,
    pub age_group_id: Uuid,
    pub division_id: Option<Uuid>,
    pub match_type: MatchType,
    pub scheduled_kickoff: DateTime<Utc>,
    pub half_duration_minutes: i32,
    pub status: MatchStatus,
    pub current_period: i32,
    pub current_minute: i32,
    pub home_score: i32,
    pub away_score: i32,
    pub forfeit_team_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Scheduled,
    Tbd,
    Live,
    Halftime,
    SecondHalf,
    Completed,
    Postponed,
    Cancelled,
    Forfeit,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::Tbd => "tbd",
            MatchStatus::Live => "live",
            MatchStatus::Halftime => "halftime",
            MatchStatus::SecondHalf => "secondhalf",
            MatchStatus::Completed => "completed",
            MatchStatus::Postponed => "postponed",
            MatchStatus::Cancelled => "cancelled",
            MatchStatus::Forfeit => "forfeit",
        }
    }

    /// All statuses, used to exercise the full transition table in tests.
    pub fn all() -> [MatchStatus; 9] {
        [
            MatchStatus::Scheduled,
            MatchStatus::Tbd,
            MatchStatus::Live,
            MatchStatus::Halftime,
            MatchStatus::SecondHalf,
            MatchStatus::Completed,
            MatchStatus::Postponed,
            MatchStatus::Cancelled,
            MatchStatus::Forfeit,
        ]
    }

    /// Terminal statuses never transition anywhere else.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            MatchStatus::Completed
                | MatchStatus::Postponed
                | MatchStatus::Cancelled
                | MatchStatus::Forfeit
        )
    }

    /// Statuses in which the match clock is running and events are posted live.
    pub fn is_in_play(&self) -> bool {
        matches!(
            self,
            MatchStatus::Live | MatchStatus::Halftime | MatchStatus::SecondHalf
        )
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for MatchStatus {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "tbd" => MatchStatus::Tbd,
            "live" => MatchStatus::Live,
            "halftime" => MatchStatus::Halftime,
            "secondhalf" => MatchStatus::SecondHalf,
            "completed" => MatchStatus::Completed,
            "postponed" => MatchStatus::Postponed,
            "cancelled" => MatchStatus::Cancelled,
            "forfeit" => MatchStatus::Forfeit,
            _ => MatchStatus::Scheduled,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    League,
    Cup,
    Playoff,
    Friendly,
}

/// Which side of the fixture a team is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamSide {
    Home,
    Away,
}

impl Match {
    /// Resolve a team id to its side of this fixture, if it participates.
    pub fn side_of(&self, team_id: Uuid) -> Option<TeamSide> {
        if team_id == self.home_team_id {
            Some(TeamSide::Home)
        } else if team_id == self.away_team_id {
            Some(TeamSide::Away)
        } else {
            None
        }
    }
}

// Request/Response DTOs
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TransitionRequest {
    pub target: MatchStatus,
    pub forfeit_team_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchListQuery {
    pub status: Option<String>,
    pub season_id: Option<Uuid>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl fmt::Display for MatchListQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "status: {:?}, season_id: {:?}",
            self.status, self.season_id
        )
    }
}
