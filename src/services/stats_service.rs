// src/services/stats_service.rs
//! Stat aggregator surface not covered by event deltas: per-team reads,
//! post-match batch corrections for fields the event log cannot express
//! (`minutes_played`, `started`), and read-time season totals.

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{match_queries, roster_queries, stats};
use crate::errors::ApiError;
use crate::matchday::lifecycle;
use crate::matchday::permissions;
use crate::matchday::validation::EventValidator;
use crate::middleware::auth::Claims;
use crate::models::player_stats::{BatchStatsRequest, PlayerSeasonTotals, PlayerStatsWithName};

pub struct StatsService {
    pool: PgPool,
    validator: EventValidator,
}

impl StatsService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            validator: EventValidator::new(),
        }
    }

    pub async fn get_team_stats(
        &self,
        match_id: Uuid,
        team_id: Uuid,
    ) -> Result<Vec<PlayerStatsWithName>, ApiError> {
        let queries = match_queries::MatchQueries::new(self.pool.clone());
        let game = queries
            .get_match(match_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("match {} not found", match_id)))?;
        if game.side_of(team_id).is_none() {
            return Err(ApiError::Validation(format!(
                "team {} is not a participant in match {}",
                team_id, game.id
            )));
        }
        Ok(stats::get_team_stats(&self.pool, match_id, team_id, game.season_id).await?)
    }

    /// Reconcile a whole team's stats after the fact. Only reachable for
    /// completed/forfeited matches; `goals` cannot be corrected here.
    pub async fn batch_correct(
        &self,
        match_id: Uuid,
        team_id: Uuid,
        claims: &Claims,
        request: &BatchStatsRequest,
    ) -> Result<Vec<PlayerStatsWithName>, ApiError> {
        let mut tx = self.pool.begin().await?;

        let game = match_queries::lock_match(&mut tx, match_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("match {} not found", match_id)))?;

        permissions::ensure_can_mutate_team(claims, &game, team_id)?;
        lifecycle::ensure_stats_window(game.status)?;

        if game.side_of(team_id).is_none() {
            return Err(ApiError::Validation(format!(
                "team {} is not a participant in match {}",
                team_id, game.id
            )));
        }

        self.validator.validate_batch_stats_request(request)?;

        for correction in &request.corrections {
            roster_queries::find_roster_entry(&mut tx, team_id, game.season_id, correction.player_id)
                .await?
                .ok_or_else(|| {
                    ApiError::Validation(format!(
                        "player {} is not on the roster of team {} for this season",
                        correction.player_id, team_id
                    ))
                })?;
        }

        for correction in &request.corrections {
            stats::apply_correction(&mut tx, match_id, correction).await?;
        }

        tx.commit().await?;

        tracing::info!(
            "Applied {} stat corrections for team {} in match {}",
            request.corrections.len(),
            team_id,
            match_id
        );

        Ok(stats::get_team_stats(&self.pool, match_id, team_id, game.season_id).await?)
    }

    pub async fn season_totals(
        &self,
        player_id: Uuid,
        season_id: Uuid,
    ) -> Result<PlayerSeasonTotals, ApiError> {
        Ok(stats::season_totals(&self.pool, player_id, season_id).await?)
    }
}
