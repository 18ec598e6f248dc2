// src/services/event_service.rs
//! Event creation, deletion and correction, with their score/stat deltas.
//!
//! Each operation is one transaction: the ledger write and the counter
//! deltas land together or not at all. The live surface and the post-match
//! editor both call into this service; only the [`EditWindow`] gate differs.

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{event_store, match_queries, roster_queries, score, stats};
use crate::errors::ApiError;
use crate::matchday::lifecycle::{self, EditWindow};
use crate::matchday::permissions;
use crate::matchday::validation::EventValidator;
use crate::middleware::auth::Claims;
use crate::models::match_event::{
    CreateEventRequest, EventKind, MatchEvent, UpdateEventRequest,
};
use crate::models::matches::{Match, MatchStatus};

pub struct MatchEventService {
    pool: PgPool,
    validator: EventValidator,
}

impl MatchEventService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            validator: EventValidator::new(),
        }
    }

    pub async fn create_event(
        &self,
        match_id: Uuid,
        claims: &Claims,
        request: &CreateEventRequest,
        window: EditWindow,
    ) -> Result<(MatchEvent, Match), ApiError> {
        match self
            .try_create_event(match_id, claims, request, window)
            .await
        {
            Err(e) if e.is_retryable() => self
                .try_create_event(match_id, claims, request, window)
                .await
                .map_err(into_conflict),
            other => other,
        }
    }

    async fn try_create_event(
        &self,
        match_id: Uuid,
        claims: &Claims,
        request: &CreateEventRequest,
        window: EditWindow,
    ) -> Result<(MatchEvent, Match), ApiError> {
        let mut tx = self.pool.begin().await?;

        let game = match_queries::lock_match(&mut tx, match_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("match {} not found", match_id)))?;

        permissions::ensure_can_mutate(claims, &game)?;
        lifecycle::ensure_event_window(game.status, window)?;
        self.validator.validate_create_request(&game, request)?;

        // Resolve the denormalized player name: rostered players get the
        // roster's display name, unlinked players keep the free-text name.
        let player_name = match request.player_id {
            Some(player_id) => {
                let entry = roster_queries::find_roster_entry(
                    &mut tx,
                    request.team_id,
                    game.season_id,
                    player_id,
                )
                .await?
                .ok_or_else(|| {
                    ApiError::Validation(format!(
                        "player {} is not on the roster of team {} for this season",
                        player_id, request.team_id
                    ))
                })?;
                Some(entry.player_name)
            }
            None => request.player_name.as_ref().map(|n| n.trim().to_string()),
        };

        let event = event_store::insert_event(&mut tx, match_id, request, player_name).await?;

        let updated = match event.kind() {
            EventKind::Goal { team_id, player_id } => {
                let side = game
                    .side_of(team_id)
                    .ok_or_else(|| ApiError::Validation("team is not a participant".into()))?;
                if let Some(player_id) = player_id {
                    stats::adjust_goals(&mut tx, match_id, player_id, 1).await?;
                }
                // A forfeit scoreline is assigned by rule and stays 3-0;
                // retroactive goal edits move player stats only.
                if game.status == MatchStatus::Forfeit {
                    game
                } else {
                    score::apply_goal_delta(&mut tx, match_id, side, 1).await?
                }
            }
            // Substitutions are informational; they never move the score and
            // never rewrite `started` (the lineup is the source for that).
            EventKind::Substitution { .. } => game,
        };

        tx.commit().await?;

        tracing::info!(
            "Recorded {} event {} for match {} ({}-{})",
            event.event_type.as_str(),
            event.id,
            match_id,
            updated.home_score,
            updated.away_score
        );

        Ok((event, updated))
    }

    pub async fn delete_event(
        &self,
        match_id: Uuid,
        event_id: Uuid,
        claims: &Claims,
        window: EditWindow,
    ) -> Result<Match, ApiError> {
        match self
            .try_delete_event(match_id, event_id, claims, window)
            .await
        {
            Err(e) if e.is_retryable() => self
                .try_delete_event(match_id, event_id, claims, window)
                .await
                .map_err(into_conflict),
            other => other,
        }
    }

    async fn try_delete_event(
        &self,
        match_id: Uuid,
        event_id: Uuid,
        claims: &Claims,
        window: EditWindow,
    ) -> Result<Match, ApiError> {
        let mut tx = self.pool.begin().await?;

        let game = match_queries::lock_match(&mut tx, match_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("match {} not found", match_id)))?;

        permissions::ensure_can_mutate(claims, &game)?;
        lifecycle::ensure_event_window(game.status, window)?;

        let event = event_store::delete_event(&mut tx, match_id, event_id)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!("event {} not found on match {}", event_id, match_id))
            })?;

        let updated = match event.kind() {
            EventKind::Goal { team_id, player_id } => {
                let side = game
                    .side_of(team_id)
                    .ok_or_else(|| ApiError::Validation("team is not a participant".into()))?;
                if let Some(player_id) = player_id {
                    stats::adjust_goals(&mut tx, match_id, player_id, -1).await?;
                }
                // The rule-assigned forfeit scoreline is untouched by ledger
                // edits.
                if game.status == MatchStatus::Forfeit {
                    game
                } else {
                    score::apply_goal_delta(&mut tx, match_id, side, -1).await?
                }
            }
            EventKind::Substitution { .. } => game,
        };

        tx.commit().await?;

        tracing::info!(
            "Deleted {} event {} from match {} ({}-{})",
            event.event_type.as_str(),
            event_id,
            match_id,
            updated.home_score,
            updated.away_score
        );

        Ok(updated)
    }

    /// Patch an event in place. Re-attributing a goal moves the scorer's
    /// stat, not the score: the scoring team did not change. Concurrent
    /// patches of the same event are last-write-wins.
    pub async fn patch_event(
        &self,
        match_id: Uuid,
        event_id: Uuid,
        claims: &Claims,
        patch: &UpdateEventRequest,
        window: EditWindow,
    ) -> Result<(MatchEvent, Match), ApiError> {
        match self
            .try_patch_event(match_id, event_id, claims, patch, window)
            .await
        {
            Err(e) if e.is_retryable() => self
                .try_patch_event(match_id, event_id, claims, patch, window)
                .await
                .map_err(into_conflict),
            other => other,
        }
    }

    async fn try_patch_event(
        &self,
        match_id: Uuid,
        event_id: Uuid,
        claims: &Claims,
        patch: &UpdateEventRequest,
        window: EditWindow,
    ) -> Result<(MatchEvent, Match), ApiError> {
        let mut tx = self.pool.begin().await?;

        let game = match_queries::lock_match(&mut tx, match_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("match {} not found", match_id)))?;

        permissions::ensure_can_mutate(claims, &game)?;
        lifecycle::ensure_event_window(game.status, window)?;

        let event = event_store::lock_event(&mut tx, match_id, event_id)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!("event {} not found on match {}", event_id, match_id))
            })?;

        self.validator.validate_update_request(&event, patch)?;

        let new_player_id = patch.player_id.or(event.player_id);
        let new_player_name = match patch.player_id {
            Some(player_id) => {
                let entry = roster_queries::find_roster_entry(
                    &mut tx,
                    event.team_id,
                    game.season_id,
                    player_id,
                )
                .await?
                .ok_or_else(|| {
                    ApiError::Validation(format!(
                        "player {} is not on the roster of team {} for this season",
                        player_id, event.team_id
                    ))
                })?;
                Some(entry.player_name)
            }
            None => patch.player_name.clone().or(event.player_name.clone()),
        };
        let new_minute = patch.match_minute.unwrap_or(event.match_minute);
        let new_extra_time = patch.extra_time.or(event.extra_time);
        let new_player_out = patch.player_out_id.or(event.player_out_id);

        self.validator
            .validate_resolved_players(event.event_type, new_player_id, new_player_out)?;

        // Re-attribution of a goal: unwind the old scorer, credit the new
        // one. The team (and therefore the score) is untouched.
        if let EventKind::Goal { player_id, .. } = event.kind() {
            if new_player_id != player_id {
                if let Some(old_player) = player_id {
                    stats::adjust_goals(&mut tx, match_id, old_player, -1).await?;
                }
                if let Some(new_player) = new_player_id {
                    stats::adjust_goals(&mut tx, match_id, new_player, 1).await?;
                }
            }
        }

        let updated_event = event_store::update_event(
            &mut tx,
            event_id,
            new_player_id,
            new_player_name,
            new_minute,
            new_extra_time,
            new_player_out,
        )
        .await?;

        let updated_match = match_queries::fetch_match(&mut tx, match_id).await?;

        tx.commit().await?;

        tracing::info!("Patched event {} on match {}", event_id, match_id);

        Ok((updated_event, updated_match))
    }
}

fn into_conflict(e: ApiError) -> ApiError {
    if e.is_retryable() {
        ApiError::Conflict("concurrent update on this match, please retry".into())
    } else {
        e
    }
}
