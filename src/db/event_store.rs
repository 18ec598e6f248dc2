// src/db/event_store.rs
//! Append/delete access to the `match_events` ledger.
//!
//! All mutations are transaction-scoped; the caller owns the transaction and
//! pairs every insert/delete with the matching score and stat deltas before
//! committing.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::match_event::{CreateEventRequest, MatchEvent};

pub async fn insert_event(
    tx: &mut Transaction<'_, Postgres>,
    match_id: Uuid,
    request: &CreateEventRequest,
    player_name: Option<String>,
) -> Result<MatchEvent, sqlx::Error> {
    sqlx::query_as::<_, MatchEvent>(
        r#"
        INSERT INTO match_events (
            id, match_id, event_type, team_id, player_id, player_name,
            match_minute, extra_time, player_out_id, created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(match_id)
    .bind(request.event_type.as_str())
    .bind(request.team_id)
    .bind(request.player_id)
    .bind(player_name)
    .bind(request.match_minute)
    .bind(request.extra_time)
    .bind(request.player_out_id)
    .fetch_one(&mut **tx)
    .await
}

/// Fetch an event and lock its row; used before a patch so the old player
/// attribution is stable while the stat deltas run.
pub async fn lock_event(
    tx: &mut Transaction<'_, Postgres>,
    match_id: Uuid,
    event_id: Uuid,
) -> Result<Option<MatchEvent>, sqlx::Error> {
    sqlx::query_as::<_, MatchEvent>(
        "SELECT * FROM match_events WHERE id = $1 AND match_id = $2 FOR UPDATE",
    )
    .bind(event_id)
    .bind(match_id)
    .fetch_optional(&mut **tx)
    .await
}

/// Remove an event, returning the deleted row so the caller can unwind its
/// score/stat contribution.
pub async fn delete_event(
    tx: &mut Transaction<'_, Postgres>,
    match_id: Uuid,
    event_id: Uuid,
) -> Result<Option<MatchEvent>, sqlx::Error> {
    sqlx::query_as::<_, MatchEvent>(
        "DELETE FROM match_events WHERE id = $1 AND match_id = $2 RETURNING *",
    )
    .bind(event_id)
    .bind(match_id)
    .fetch_optional(&mut **tx)
    .await
}

/// Overwrite the mutable fields of an event. The caller computes the final
/// values (patch semantics are resolved in the service layer) so concurrent
/// patches are last-write-wins.
#[allow(clippy::too_many_arguments)]
pub async fn update_event(
    tx: &mut Transaction<'_, Postgres>,
    event_id: Uuid,
    player_id: Option<Uuid>,
    player_name: Option<String>,
    match_minute: i32,
    extra_time: Option<i32>,
    player_out_id: Option<Uuid>,
) -> Result<MatchEvent, sqlx::Error> {
    sqlx::query_as::<_, MatchEvent>(
        r#"
        UPDATE match_events
        SET player_id = $2,
            player_name = $3,
            match_minute = $4,
            extra_time = $5,
            player_out_id = $6
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(event_id)
    .bind(player_id)
    .bind(player_name)
    .bind(match_minute)
    .bind(extra_time)
    .bind(player_out_id)
    .fetch_one(&mut **tx)
    .await
}

/// Newest-first event feed for a match.
pub async fn list_events(
    pool: &PgPool,
    match_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<MatchEvent>, sqlx::Error> {
    sqlx::query_as::<_, MatchEvent>(
        r#"
        SELECT * FROM match_events
        WHERE match_id = $1
        ORDER BY match_minute DESC, created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(match_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_events(pool: &PgPool, match_id: Uuid) -> Result<i64, sqlx::Error> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM match_events WHERE match_id = $1")
        .bind(match_id)
        .fetch_one(pool)
        .await?;
    Ok(count.0)
}
