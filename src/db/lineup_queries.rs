// src/db/lineup_queries.rs
//! Lineup storage: one lineup per (match, team), replaced wholesale. The
//! entries cascade-delete with their lineup so a replacement is a delete
//! plus re-insert inside the caller's transaction.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::lineup::{Lineup, LineupEntry, LineupResponse, ReplaceLineupRequest};

pub async fn get_lineup(
    pool: &PgPool,
    match_id: Uuid,
    team_id: Uuid,
) -> Result<Option<LineupResponse>, sqlx::Error> {
    let lineup = sqlx::query_as::<_, Lineup>(
        "SELECT * FROM lineups WHERE match_id = $1 AND team_id = $2",
    )
    .bind(match_id)
    .bind(team_id)
    .fetch_optional(pool)
    .await?;

    let Some(lineup) = lineup else {
        return Ok(None);
    };

    let entries = sqlx::query_as::<_, LineupEntry>(
        "SELECT * FROM lineup_entries WHERE lineup_id = $1 ORDER BY sort_order ASC",
    )
    .bind(lineup.id)
    .fetch_all(pool)
    .await?;

    Ok(Some(LineupResponse { lineup, entries }))
}

/// Players named as starters in the stored lineup, before it is replaced.
/// The stat aggregator uses this to clear stale `started` flags.
pub async fn current_starters(
    tx: &mut Transaction<'_, Postgres>,
    match_id: Uuid,
    team_id: Uuid,
) -> Result<Vec<Uuid>, sqlx::Error> {
    let rows: Vec<(Uuid,)> = sqlx::query_as(
        r#"
        SELECT e.player_id
        FROM lineup_entries e
        JOIN lineups l ON l.id = e.lineup_id
        WHERE l.match_id = $1 AND l.team_id = $2 AND e.is_starter
        "#,
    )
    .bind(match_id)
    .bind(team_id)
    .fetch_all(&mut **tx)
    .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

pub async fn replace_lineup(
    tx: &mut Transaction<'_, Postgres>,
    match_id: Uuid,
    team_id: Uuid,
    request: &ReplaceLineupRequest,
) -> Result<(Lineup, Vec<LineupEntry>), sqlx::Error> {
    sqlx::query("DELETE FROM lineups WHERE match_id = $1 AND team_id = $2")
        .bind(match_id)
        .bind(team_id)
        .execute(&mut **tx)
        .await?;

    let lineup = sqlx::query_as::<_, Lineup>(
        r#"
        INSERT INTO lineups (id, match_id, team_id, formation, created_at, updated_at)
        VALUES ($1, $2, $3, $4, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(match_id)
    .bind(team_id)
    .bind(request.formation.as_deref())
    .fetch_one(&mut **tx)
    .await?;

    let mut entries = Vec::with_capacity(request.entries.len());
    for (index, entry) in request.entries.iter().enumerate() {
        let inserted = sqlx::query_as::<_, LineupEntry>(
            r#"
            INSERT INTO lineup_entries (
                id, lineup_id, player_id, position, is_starter, formation_slot, sort_order
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(lineup.id)
        .bind(entry.player_id)
        .bind(entry.position.trim())
        .bind(entry.is_starter)
        .bind(entry.formation_slot)
        .bind(index as i32)
        .fetch_one(&mut **tx)
        .await?;
        entries.push(inserted);
    }

    Ok((lineup, entries))
}
