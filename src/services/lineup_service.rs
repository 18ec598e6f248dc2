// src/services/lineup_service.rs
//! The lineup manager. Lineups are replaced wholesale, and every starter
//! change is mirrored into the stat aggregator's `started` flags in the same
//! transaction, so "started" can never disagree with the stored lineup.

use std::collections::HashSet;

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{lineup_queries, match_queries, roster_queries, stats};
use crate::errors::ApiError;
use crate::matchday::lifecycle::{self, EditWindow};
use crate::matchday::permissions;
use crate::matchday::validation::EventValidator;
use crate::middleware::auth::Claims;
use crate::models::lineup::{LineupResponse, ReplaceLineupRequest};

pub struct LineupService {
    pool: PgPool,
    validator: EventValidator,
}

impl LineupService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            validator: EventValidator::new(),
        }
    }

    pub async fn get_lineup(
        &self,
        match_id: Uuid,
        team_id: Uuid,
    ) -> Result<LineupResponse, ApiError> {
        lineup_queries::get_lineup(&self.pool, match_id, team_id)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!(
                    "no lineup stored for team {} in match {}",
                    team_id, match_id
                ))
            })
    }

    pub async fn replace_lineup(
        &self,
        match_id: Uuid,
        team_id: Uuid,
        claims: &Claims,
        request: &ReplaceLineupRequest,
        window: EditWindow,
    ) -> Result<LineupResponse, ApiError> {
        let mut tx = self.pool.begin().await?;

        let game = match_queries::lock_match(&mut tx, match_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("match {} not found", match_id)))?;

        permissions::ensure_can_mutate_team(claims, &game, team_id)?;
        lifecycle::ensure_lineup_window(game.status, window)?;

        if game.side_of(team_id).is_none() {
            return Err(ApiError::Validation(format!(
                "team {} is not a participant in match {}",
                team_id, game.id
            )));
        }

        self.validator.validate_lineup_request(request)?;

        // Every named player must be on this team's roster for the season.
        for entry in &request.entries {
            roster_queries::find_roster_entry(&mut tx, team_id, game.season_id, entry.player_id)
                .await?
                .ok_or_else(|| {
                    ApiError::Validation(format!(
                        "player {} is not on the roster of team {} for this season",
                        entry.player_id, team_id
                    ))
                })?;
        }

        let previous_starters = lineup_queries::current_starters(&mut tx, match_id, team_id).await?;

        let (lineup, entries) =
            lineup_queries::replace_lineup(&mut tx, match_id, team_id, request).await?;

        // Reconcile `started`: clear players dropped from the starting
        // eleven, then seed the new starters.
        let new_starters: HashSet<Uuid> = request.starter_ids().into_iter().collect();
        for player_id in &previous_starters {
            if !new_starters.contains(player_id) {
                stats::set_started(&mut tx, match_id, *player_id, false).await?;
            }
        }
        for player_id in &new_starters {
            stats::set_started(&mut tx, match_id, *player_id, true).await?;
        }

        tx.commit().await?;

        tracing::info!(
            "Replaced lineup for team {} in match {} ({} entries, {} starters)",
            team_id,
            match_id,
            entries.len(),
            new_starters.len()
        );

        Ok(LineupResponse { lineup, entries })
    }
}
