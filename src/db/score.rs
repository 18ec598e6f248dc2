// src/db/score.rs
//! Score maintenance for the `matches` row.
//!
//! Deltas run as in-database arithmetic so concurrent increments on the same
//! match serialize on the row instead of losing updates to a read-then-write
//! race. Scores floor at zero; a decrement can never drive a counter
//! negative even if the stored data was corrupted by hand.

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::models::matches::{Match, TeamSide};

/// Apply a goal delta (+1 on create, -1 on delete) to one side's score.
pub async fn apply_goal_delta(
    tx: &mut Transaction<'_, Postgres>,
    match_id: Uuid,
    side: TeamSide,
    delta: i32,
) -> Result<Match, sqlx::Error> {
    let sql = match side {
        TeamSide::Home => {
            r#"
            UPDATE matches
            SET home_score = GREATEST(home_score + $2, 0), updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#
        }
        TeamSide::Away => {
            r#"
            UPDATE matches
            SET away_score = GREATEST(away_score + $2, 0), updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#
        }
    };
    sqlx::query_as::<_, Match>(sql)
        .bind(match_id)
        .bind(delta)
        .fetch_one(&mut **tx)
        .await
}

/// Force the 3-0 forfeit scoreline against the forfeiting side. This is the
/// one place a score is written without goal events behind it.
pub async fn force_forfeit_score(
    tx: &mut Transaction<'_, Postgres>,
    match_id: Uuid,
    forfeiting_side: TeamSide,
) -> Result<Match, sqlx::Error> {
    let (home, away) = match forfeiting_side {
        TeamSide::Home => (0, 3),
        TeamSide::Away => (3, 0),
    };
    sqlx::query_as::<_, Match>(
        r#"
        UPDATE matches
        SET home_score = $2, away_score = $3, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(match_id)
    .bind(home)
    .bind(away)
    .fetch_one(&mut **tx)
    .await
}
