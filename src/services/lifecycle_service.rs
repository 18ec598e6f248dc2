// src/services/lifecycle_service.rs
//! The match lifecycle controller: validates a requested status transition,
//! applies it, and runs its score side effects (forfeit) in the same
//! transaction.

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{match_queries, score};
use crate::errors::ApiError;
use crate::matchday::lifecycle;
use crate::matchday::permissions;
use crate::middleware::auth::Claims;
use crate::models::matches::{Match, MatchStatus, TransitionRequest};

pub struct MatchLifecycleService {
    pool: PgPool,
}

impl MatchLifecycleService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Perform a lifecycle transition. Serialization failures are retried
    /// once before surfacing as a conflict the caller can retry.
    pub async fn transition(
        &self,
        match_id: Uuid,
        claims: &Claims,
        request: &TransitionRequest,
    ) -> Result<Match, ApiError> {
        match self.try_transition(match_id, claims, request).await {
            Err(e) if e.is_retryable() => {
                tracing::warn!(
                    "Transition of match {} hit a serialization conflict, retrying once",
                    match_id
                );
                self.try_transition(match_id, claims, request)
                    .await
                    .map_err(into_conflict)
            }
            other => other,
        }
    }

    async fn try_transition(
        &self,
        match_id: Uuid,
        claims: &Claims,
        request: &TransitionRequest,
    ) -> Result<Match, ApiError> {
        let mut tx = self.pool.begin().await?;

        let game = match_queries::lock_match(&mut tx, match_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("match {} not found", match_id)))?;

        permissions::ensure_can_mutate(claims, &game)?;

        // Forfeiting an already-forfeited match with the same team is a
        // no-op returning the current state; with the other team it is an
        // ordinary invalid transition.
        if game.status == MatchStatus::Forfeit && request.target == MatchStatus::Forfeit {
            let requested = request.forfeit_team_id.ok_or_else(|| {
                ApiError::Validation("forfeit transition requires forfeit_team_id".into())
            })?;
            if Some(requested) == game.forfeit_team_id {
                tx.rollback().await?;
                return Ok(game);
            }
            return Err(ApiError::InvalidTransition {
                from: game.status,
                to: request.target,
            });
        }

        lifecycle::validate_transition(game.status, request.target)?;

        let mut forfeit_side = None;
        let (period, minute, forfeit_team_id) = match request.target {
            MatchStatus::Live => (1, 0, None),
            // Halftime freezes the clock where it stood.
            MatchStatus::Halftime => (1, game.current_minute, None),
            MatchStatus::SecondHalf => (2, game.half_duration_minutes, None),
            MatchStatus::Completed => (game.current_period, game.current_minute, None),
            MatchStatus::Postponed | MatchStatus::Cancelled => {
                (game.current_period, game.current_minute, None)
            }
            MatchStatus::Forfeit => {
                let team = request.forfeit_team_id.ok_or_else(|| {
                    ApiError::Validation("forfeit transition requires forfeit_team_id".into())
                })?;
                let side = game.side_of(team).ok_or_else(|| {
                    ApiError::Validation(format!(
                        "forfeit_team_id {} is not a participant in match {}",
                        team, game.id
                    ))
                })?;
                forfeit_side = Some(side);
                (game.current_period, game.current_minute, Some(team))
            }
            MatchStatus::Scheduled | MatchStatus::Tbd => {
                // Unreachable: no transition targets these states.
                return Err(ApiError::InvalidTransition {
                    from: game.status,
                    to: request.target,
                });
            }
        };

        let mut updated = match_queries::apply_transition(
            &mut tx,
            match_id,
            request.target,
            period,
            minute,
            forfeit_team_id,
        )
        .await?;

        if let Some(side) = forfeit_side {
            // The forfeit scoreline is assigned by rule; no goal events back it.
            updated = score::force_forfeit_score(&mut tx, match_id, side).await?;
        }

        tx.commit().await?;

        tracing::info!(
            "Match {} transitioned {} -> {}",
            match_id,
            game.status,
            updated.status
        );

        Ok(updated)
    }
}

fn into_conflict(e: ApiError) -> ApiError {
    if e.is_retryable() {
        ApiError::Conflict("concurrent update on this match, please retry".into())
    } else {
        e
    }
}
