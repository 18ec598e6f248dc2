// src/db/roster_queries.rs
//! Read-only view of the roster collaborator. The `roster_entries` table is
//! owned by the player-directory service; this core only checks eligibility
//! and resolves display names.

use sqlx::{FromRow, Postgres, Transaction};
use uuid::Uuid;

#[derive(Debug, FromRow, Clone)]
pub struct RosterEntry {
    pub player_id: Uuid,
    pub team_id: Uuid,
    pub season_id: Uuid,
    pub player_name: String,
}

/// Look up a player on a team's roster for a season. `None` means the player
/// is not eligible to appear in events for that team.
pub async fn find_roster_entry(
    tx: &mut Transaction<'_, Postgres>,
    team_id: Uuid,
    season_id: Uuid,
    player_id: Uuid,
) -> Result<Option<RosterEntry>, sqlx::Error> {
    sqlx::query_as::<_, RosterEntry>(
        r#"
        SELECT player_id, team_id, season_id, player_name
        FROM roster_entries
        WHERE team_id = $1 AND season_id = $2 AND player_id = $3
        "#,
    )
    .bind(team_id)
    .bind(season_id)
    .bind(player_id)
    .fetch_optional(&mut **tx)
    .await
}
