// src/db/stats.rs
//! The stat aggregator's storage layer: one `player_match_stats` row per
//! (player, match), created lazily on first touch and never deleted while
//! the match exists.
//!
//! `goals` only ever moves through [`adjust_goals`], driven by goal-event
//! creation/deletion, so it cannot drift from the ledger. `started` and
//! `minutes_played` have no event backing and are written through the lineup
//! seed and the batch-correction path.

use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use crate::models::player_stats::{
    PlayerMatchStats, PlayerSeasonTotals, PlayerStatCorrection, PlayerStatsWithName,
};

/// Move a player's goal count by `delta`, creating the stats row if absent.
/// Floored at zero, mirroring the score counters.
pub async fn adjust_goals(
    tx: &mut Transaction<'_, Postgres>,
    match_id: Uuid,
    player_id: Uuid,
    delta: i32,
) -> Result<PlayerMatchStats, sqlx::Error> {
    sqlx::query_as::<_, PlayerMatchStats>(
        r#"
        INSERT INTO player_match_stats (
            id, match_id, player_id, started, minutes_played, goals, created_at, updated_at
        ) VALUES ($1, $2, $3, false, 0, GREATEST($4, 0), NOW(), NOW())
        ON CONFLICT (match_id, player_id) DO UPDATE
        SET goals = GREATEST(player_match_stats.goals + $4, 0),
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(match_id)
    .bind(player_id)
    .bind(delta)
    .fetch_one(&mut **tx)
    .await
}

/// Seed or clear the `started` flag for one player, creating the row lazily.
pub async fn set_started(
    tx: &mut Transaction<'_, Postgres>,
    match_id: Uuid,
    player_id: Uuid,
    started: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO player_match_stats (
            id, match_id, player_id, started, minutes_played, goals, created_at, updated_at
        ) VALUES ($1, $2, $3, $4, 0, 0, NOW(), NOW())
        ON CONFLICT (match_id, player_id) DO UPDATE
        SET started = $4, updated_at = NOW()
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(match_id)
    .bind(player_id)
    .bind(started)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Apply one batch correction. Omitted fields keep their stored value;
/// `goals` is untouchable here by construction.
pub async fn apply_correction(
    tx: &mut Transaction<'_, Postgres>,
    match_id: Uuid,
    correction: &PlayerStatCorrection,
) -> Result<PlayerMatchStats, sqlx::Error> {
    sqlx::query_as::<_, PlayerMatchStats>(
        r#"
        INSERT INTO player_match_stats (
            id, match_id, player_id, started, minutes_played, goals, created_at, updated_at
        ) VALUES ($1, $2, $3, COALESCE($4, false), COALESCE($5, 0), 0, NOW(), NOW())
        ON CONFLICT (match_id, player_id) DO UPDATE
        SET started = COALESCE($4, player_match_stats.started),
            minutes_played = COALESCE($5, player_match_stats.minutes_played),
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(match_id)
    .bind(correction.player_id)
    .bind(correction.started)
    .bind(correction.minutes_played)
    .fetch_one(&mut **tx)
    .await
}

/// Stats for every rostered player of one team in one match, with display
/// names from the roster collaborator.
pub async fn get_team_stats(
    pool: &PgPool,
    match_id: Uuid,
    team_id: Uuid,
    season_id: Uuid,
) -> Result<Vec<PlayerStatsWithName>, sqlx::Error> {
    sqlx::query_as::<_, PlayerStatsWithName>(
        r#"
        SELECT s.player_id, r.player_name, s.started, s.minutes_played, s.goals
        FROM player_match_stats s
        JOIN roster_entries r
            ON r.player_id = s.player_id
            AND r.team_id = $2
            AND r.season_id = $3
        WHERE s.match_id = $1
        ORDER BY r.player_name ASC
        "#,
    )
    .bind(match_id)
    .bind(team_id)
    .bind(season_id)
    .fetch_all(pool)
    .await
}

/// Season totals are a read-time SUM over the per-match rows; no mutable
/// season aggregate exists anywhere, so there is no second place to drift.
pub async fn season_totals(
    pool: &PgPool,
    player_id: Uuid,
    season_id: Uuid,
) -> Result<PlayerSeasonTotals, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT
            COUNT(*) AS matches_played,
            COUNT(*) FILTER (WHERE s.started) AS matches_started,
            COALESCE(SUM(s.minutes_played), 0) AS minutes_played,
            COALESCE(SUM(s.goals), 0) AS goals
        FROM player_match_stats s
        JOIN matches m ON m.id = s.match_id
        WHERE s.player_id = $1 AND m.season_id = $2
        "#,
    )
    .bind(player_id)
    .bind(season_id)
    .fetch_one(pool)
    .await?;

    Ok(PlayerSeasonTotals {
        player_id,
        season_id,
        matches_played: row.get("matches_played"),
        matches_started: row.get("matches_started"),
        minutes_played: row.get("minutes_played"),
        goals: row.get("goals"),
    })
}
