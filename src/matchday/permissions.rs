// src/matchday/permissions.rs
//! Match-scoped permission checks. Role assignment lives in the external
//! identity service; tokens carry the caller's role plus the team ids they
//! manage, and this module interprets them against a concrete match.

use crate::errors::ApiError;
use crate::middleware::auth::Claims;
use crate::models::matches::Match;
use crate::models::user::UserRole;

/// Admins may mutate any match; everyone else must manage one of the two
/// participating teams.
pub fn ensure_can_mutate(claims: &Claims, game: &Match) -> Result<(), ApiError> {
    if claims.role == UserRole::Admin {
        return Ok(());
    }
    let manages_participant = claims
        .team_ids
        .iter()
        .any(|team_id| game.side_of(*team_id).is_some());
    if manages_participant {
        Ok(())
    } else {
        Err(ApiError::PermissionDenied(format!(
            "user {} ({}) has no scope for match {}",
            claims.username, claims.role, game.id
        )))
    }
}

/// Team-scoped mutations (lineups, stat corrections) additionally require
/// the caller to manage the specific team being edited.
pub fn ensure_can_mutate_team(
    claims: &Claims,
    game: &Match,
    team_id: uuid::Uuid,
) -> Result<(), ApiError> {
    if claims.role == UserRole::Admin {
        return Ok(());
    }
    if claims.team_ids.contains(&team_id) && game.side_of(team_id).is_some() {
        Ok(())
    } else {
        Err(ApiError::PermissionDenied(format!(
            "user {} ({}) has no scope for team {} in match {}",
            claims.username, claims.role, team_id, game.id
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::matches::{MatchStatus, MatchType};
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
            current_minute: 10,
            home_score: 0,
            away_score: 0,
            forfeit_team_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn claims(role: UserRole, team_ids: Vec<Uuid>) -> Claims {
        Claims {
            sub: Uuid::new_v4().to_string(),
            username: "coach_sam".to_string(),
            role,
            team_ids,
            exp: 0,
        }
    }

    #[test]
    fn admin_passes_without_team_scope() {
        let game = sample_match();
        assert!(ensure_can_mutate(&claims(UserRole::Admin, vec![]), &game).is_ok());
    }

    #[test]
    fn team_manager_of_participant_passes() {
        let game = sample_match();
        let c = claims(UserRole::TeamManager, vec![game.away_team_id]);
        assert!(ensure_can_mutate(&c, &game).is_ok());
    }

    #[test]
    fn manager_of_unrelated_team_is_denied() {
        let game = sample_match();
        let c = claims(UserRole::ClubManager, vec![Uuid::new_v4()]);
        let err = ensure_can_mutate(&c, &game).unwrap_err();
        assert!(matches!(err, ApiError::PermissionDenied(_)));
    }

    #[test]
    fn team_scoped_check_rejects_the_opponents_manager() {
        let game = sample_match();
        let c = claims(UserRole::TeamManager, vec![game.home_team_id]);
        assert!(ensure_can_mutate_team(&c, &game, game.home_team_id).is_ok());
        let err = ensure_can_mutate_team(&c, &game, game.away_team_id).unwrap_err();
        assert!(matches!(err, ApiError::PermissionDenied(_)));
    }

    #[test]
    fn team_scoped_check_lets_admins_through() {
        let game = sample_match();
        let c = claims(UserRole::Admin, vec![]);
        assert!(ensure_can_mutate_team(&c, &game, game.away_team_id).is_ok());
    }
}
