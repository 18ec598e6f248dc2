// src/db/match_queries.rs
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::matches::{Match, MatchListQuery, MatchStatus};

/// Read and write access to the `matches` table. Mutations take an explicit
/// transaction so a status change and its score side effects commit together.
#[derive(Debug, Clone)]
pub struct MatchQueries {
    pool: PgPool,
}

impl MatchQueries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_match(&self, match_id: Uuid) -> Result<Option<Match>, sqlx::Error> {
        sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE id = $1")
            .bind(match_id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list_matches(&self, query: &MatchListQuery) -> Result<Vec<Match>, sqlx::Error> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * limit;
        let status = query.status.clone().map(MatchStatus::from);

        sqlx::query_as::<_, Match>(
            r#"
            SELECT * FROM matches
            WHERE ($1::varchar IS NULL OR status = $1)
            AND ($2::uuid IS NULL OR season_id = $2)
            ORDER BY scheduled_kickoff ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(status.map(|s| s.as_str()))
        .bind(query.season_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    /// Total rows matching the same filters as [`list_matches`], independent
    /// of the requested page.
    pub async fn count_matches(&self, query: &MatchListQuery) -> Result<i64, sqlx::Error> {
        let status = query.status.clone().map(MatchStatus::from);
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM matches
            WHERE ($1::varchar IS NULL OR status = $1)
            AND ($2::uuid IS NULL OR season_id = $2)
            "#,
        )
        .bind(status.map(|s| s.as_str()))
        .bind(query.season_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count.0)
    }
}

/// Fetch a match and take a row lock on it. Every mutation path goes through
/// this, so two writers on the same match serialize on the row while
/// different matches never contend.
pub async fn lock_match(
    tx: &mut Transaction<'_, Postgres>,
    match_id: Uuid,
) -> Result<Option<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE id = $1 FOR UPDATE")
        .bind(match_id)
        .fetch_optional(&mut **tx)
        .await
}

/// Write the outcome of a validated lifecycle transition.
pub async fn apply_transition(
    tx: &mut Transaction<'_, Postgres>,
    match_id: Uuid,
    status: MatchStatus,
    current_period: i32,
    current_minute: i32,
    forfeit_team_id: Option<Uuid>,
) -> Result<Match, sqlx::Error> {
    sqlx::query_as::<_, Match>(
        r#"
        UPDATE matches
        SET status = $2,
            current_period = $3,
            current_minute = $4,
            forfeit_team_id = $5,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(match_id)
    .bind(status.as_str())
    .bind(current_period)
    .bind(current_minute)
    .bind(forfeit_team_id)
    .fetch_one(&mut **tx)
    .await
}

/// Re-read a match inside an open transaction (no additional lock).
pub async fn fetch_match(
    tx: &mut Transaction<'_, Postgres>,
    match_id: Uuid,
) -> Result<Match, sqlx::Error> {
    sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE id = $1")
        .bind(match_id)
        .fetch_one(&mut **tx)
        .await
}
