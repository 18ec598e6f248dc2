// src/matchday/validation.rs
//! Centralized request validation for match mutations. Everything here runs
//! before any row is touched, so a rejected request leaves no partial state.

use std::collections::HashSet;

use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::lineup::ReplaceLineupRequest;
use crate::models::match_event::{
    CreateEventRequest, MatchEvent, MatchEventType, UpdateEventRequest,
};
use crate::models::matches::Match;
use crate::models::player_stats::BatchStatsRequest;

/// Hard ceiling on a recorded minute; covers extra-time replays and
/// tournament formats beyond the configured half length.
const MAX_MATCH_MINUTE: i32 = 130;
const MAX_EXTRA_TIME: i32 = 20;
const MAX_MINUTES_PLAYED: i32 = 2 * MAX_MATCH_MINUTE;
const MAX_STARTERS: usize = 11;

pub struct EventValidator;

impl EventValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_create_request(
        &self,
        game: &Match,
        request: &CreateEventRequest,
    ) -> Result<(), ApiError> {
        if game.side_of(request.team_id).is_none() {
            return Err(ApiError::Validation(format!(
                "team {} is not a participant in match {}",
                request.team_id, game.id
            )));
        }
        self.validate_minute(request.match_minute)?;
        if let Some(extra) = request.extra_time {
            self.validate_extra_time(extra)?;
        }
        if request.player_id.is_none()
            && request
                .player_name
                .as_deref()
                .map(str::trim)
                .unwrap_or("")
                .is_empty()
        {
            return Err(ApiError::Validation(
                "event requires a player_id or a non-empty player_name".into(),
            ));
        }
        match request.event_type {
            MatchEventType::Goal => {
                if request.player_out_id.is_some() {
                    return Err(ApiError::Validation(
                        "player_out_id is only valid for substitution events".into(),
                    ));
                }
            }
            MatchEventType::Substitution => {
                self.validate_resolved_players(
                    request.event_type,
                    request.player_id,
                    request.player_out_id,
                )?;
            }
        }
        Ok(())
    }

    /// Check the player pair an event holds once patch defaults are merged
    /// with the stored row. A partial update must not produce a pair the
    /// create path would have rejected.
    pub fn validate_resolved_players(
        &self,
        event_type: MatchEventType,
        player_id: Option<Uuid>,
        player_out_id: Option<Uuid>,
    ) -> Result<(), ApiError> {
        if event_type == MatchEventType::Substitution
            && player_id.is_some()
            && player_id == player_out_id
        {
            return Err(ApiError::Validation(
                "a player cannot be substituted for themselves".into(),
            ));
        }
        Ok(())
    }

    pub fn validate_update_request(
        &self,
        event: &MatchEvent,
        patch: &UpdateEventRequest,
    ) -> Result<(), ApiError> {
        if patch.is_empty() {
            return Err(ApiError::Validation(
                "event update contains no fields".into(),
            ));
        }
        if let Some(minute) = patch.match_minute {
            self.validate_minute(minute)?;
        }
        if let Some(extra) = patch.extra_time {
            self.validate_extra_time(extra)?;
        }
        if patch.player_out_id.is_some() && event.event_type != MatchEventType::Substitution {
            return Err(ApiError::Validation(
                "player_out_id is only valid for substitution events".into(),
            ));
        }
        Ok(())
    }

    pub fn validate_lineup_request(&self, request: &ReplaceLineupRequest) -> Result<(), ApiError> {
        let mut seen = HashSet::new();
        for entry in &request.entries {
            if !seen.insert(entry.player_id) {
                return Err(ApiError::Validation(format!(
                    "player {} appears more than once in the lineup",
                    entry.player_id
                )));
            }
            if entry.position.trim().is_empty() {
                return Err(ApiError::Validation(format!(
                    "player {} has an empty position",
                    entry.player_id
                )));
            }
        }
        let starters = request.entries.iter().filter(|e| e.is_starter).count();
        if starters > MAX_STARTERS {
            return Err(ApiError::Validation(format!(
                "a lineup can name at most {} starters, got {}",
                MAX_STARTERS, starters
            )));
        }
        Ok(())
    }

    pub fn validate_batch_stats_request(&self, request: &BatchStatsRequest) -> Result<(), ApiError> {
        if request.corrections.is_empty() {
            return Err(ApiError::Validation(
                "batch stats update contains no corrections".into(),
            ));
        }
        let mut seen = HashSet::new();
        for correction in &request.corrections {
            if !seen.insert(correction.player_id) {
                return Err(ApiError::Validation(format!(
                    "player {} appears more than once in the batch",
                    correction.player_id
                )));
            }
            if let Some(minutes) = correction.minutes_played {
                if !(0..=MAX_MINUTES_PLAYED).contains(&minutes) {
                    return Err(ApiError::Validation(format!(
                        "minutes_played {} out of range 0..={}",
                        minutes, MAX_MINUTES_PLAYED
                    )));
                }
            }
        }
        Ok(())
    }

    fn validate_minute(&self, minute: i32) -> Result<(), ApiError> {
        if !(0..=MAX_MATCH_MINUTE).contains(&minute) {
            return Err(ApiError::Validation(format!(
                "match_minute {} out of range 0..={}",
                minute, MAX_MATCH_MINUTE
            )));
        }
        Ok(())
    }

    fn validate_extra_time(&self, extra: i32) -> Result<(), ApiError> {
        if !(0..=MAX_EXTRA_TIME).contains(&extra) {
            return Err(ApiError::Validation(format!(
                "extra_time {} out of range 0..={}",
                extra, MAX_EXTRA_TIME
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lineup::LineupEntryRequest;
    use crate::models::matches::{MatchStatus, MatchType};
    use crate::models::player_stats::PlayerStatCorrection;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_match() -> Match {
        Match {
            id: Uuid::new_v4(),
            home_team_id: Uuid::new_v4(),
            away_team_id: Uuid::new_v4(),
            season_id: Uuid::new_v4(),
            age_group_id: Uuid::new_v4(),
            division_id: None,
            match_type: MatchType::League,
            scheduled_kickoff: Utc::now(),
            half_duration_minutes: 35,
            status: MatchStatus::Live,
            current_period: 1,
            current_minute: 20,
            home_score: 0,
            away_score: 0,
            forfeit_team_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn goal_request(game: &Match) -> CreateEventRequest {
        CreateEventRequest {
            event_type: MatchEventType::Goal,
            team_id: game.home_team_id,
            player_id: Some(Uuid::new_v4()),
            player_name: None,
            match_minute: 23,
            extra_time: None,
            player_out_id: None,
        }
    }

    #[test]
    fn accepts_a_valid_goal() {
        let game = sample_match();
        let request = goal_request(&game);
        assert!(EventValidator::new()
            .validate_create_request(&game, &request)
            .is_ok());
    }

    #[test]
    fn rejects_unknown_team() {
        let game = sample_match();
        let mut request = goal_request(&game);
        request.team_id = Uuid::new_v4();
        assert!(EventValidator::new()
            .validate_create_request(&game, &request)
            .is_err());
    }

    #[test]
    fn rejects_out_of_range_minute() {
        let game = sample_match();
        let mut request = goal_request(&game);
        request.match_minute = 131;
        assert!(EventValidator::new()
            .validate_create_request(&game, &request)
            .is_err());
        request.match_minute = -1;
        assert!(EventValidator::new()
            .validate_create_request(&game, &request)
            .is_err());
    }

    #[test]
    fn rejects_goal_without_any_player_reference() {
        let game = sample_match();
        let mut request = goal_request(&game);
        request.player_id = None;
        request.player_name = Some("   ".to_string());
        assert!(EventValidator::new()
            .validate_create_request(&game, &request)
            .is_err());
    }

    #[test]
    fn accepts_goal_with_name_only() {
        let game = sample_match();
        let mut request = goal_request(&game);
        request.player_id = None;
        request.player_name = Some("Trialist #9".to_string());
        assert!(EventValidator::new()
            .validate_create_request(&game, &request)
            .is_ok());
    }

    #[test]
    fn rejects_goal_with_player_out() {
        let game = sample_match();
        let mut request = goal_request(&game);
        request.player_out_id = Some(Uuid::new_v4());
        assert!(EventValidator::new()
            .validate_create_request(&game, &request)
            .is_err());
    }

    #[test]
    fn rejects_self_substitution() {
        let game = sample_match();
        let player = Uuid::new_v4();
        let request = CreateEventRequest {
            event_type: MatchEventType::Substitution,
            team_id: game.away_team_id,
            player_id: Some(player),
            player_name: None,
            match_minute: 60,
            extra_time: None,
            player_out_id: Some(player),
        };
        assert!(EventValidator::new()
            .validate_create_request(&game, &request)
            .is_err());
    }

    #[test]
    fn rejects_self_substitution_after_patch_merge() {
        let player = Uuid::new_v4();
        let validator = EventValidator::new();
        // Either side of the pair can arrive through the patch; both merged
        // outcomes are rejected.
        assert!(validator
            .validate_resolved_players(
                MatchEventType::Substitution,
                Some(player),
                Some(player)
            )
            .is_err());
        assert!(validator
            .validate_resolved_players(
                MatchEventType::Substitution,
                Some(player),
                Some(Uuid::new_v4())
            )
            .is_ok());
        assert!(validator
            .validate_resolved_players(MatchEventType::Goal, Some(player), None)
            .is_ok());
    }

    #[test]
    fn rejects_empty_patch() {
        let game = sample_match();
        let event = MatchEvent {
            id: Uuid::new_v4(),
            match_id: game.id,
            event_type: MatchEventType::Goal,
            team_id: game.home_team_id,
            player_id: Some(Uuid::new_v4()),
            player_name: None,
            match_minute: 23,
            extra_time: None,
            player_out_id: None,
            created_at: Utc::now(),
        };
        assert!(EventValidator::new()
            .validate_update_request(&event, &UpdateEventRequest::default())
            .is_err());
    }

    #[test]
    fn rejects_duplicate_lineup_players() {
        let player = Uuid::new_v4();
        let entry = LineupEntryRequest {
            player_id: player,
            position: "GK".to_string(),
            is_starter: true,
            formation_slot: Some(1),
        };
        let request = ReplaceLineupRequest {
            formation: None,
            entries: vec![entry.clone(), entry],
        };
        assert!(EventValidator::new()
            .validate_lineup_request(&request)
            .is_err());
    }

    #[test]
    fn rejects_too_many_starters() {
        let entries = (0..12)
            .map(|i| LineupEntryRequest {
                player_id: Uuid::new_v4(),
                position: format!("P{}", i),
                is_starter: true,
                formation_slot: None,
            })
            .collect();
        let request = ReplaceLineupRequest {
            formation: None,
            entries,
        };
        assert!(EventValidator::new()
            .validate_lineup_request(&request)
            .is_err());
    }

    #[test]
    fn rejects_negative_minutes_in_batch() {
        let request = BatchStatsRequest {
            corrections: vec![PlayerStatCorrection {
                player_id: Uuid::new_v4(),
                started: None,
                minutes_played: Some(-5),
            }],
        };
        assert!(EventValidator::new()
            .validate_batch_stats_request(&request)
            .is_err());
    }

    #[test]
    fn rejects_duplicate_players_in_batch() {
        let player = Uuid::new_v4();
        let correction = PlayerStatCorrection {
            player_id: player,
            started: Some(true),
            minutes_played: Some(70),
        };
        let request = BatchStatsRequest {
            corrections: vec![correction.clone(), correction],
        };
        assert!(EventValidator::new()
            .validate_batch_stats_request(&request)
            .is_err());
    }
}
