// src/handlers/matches/stats_handler.rs
use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::services::StatsService;

/// Season totals for one player: a read-time sum over their per-match rows.
pub async fn get_player_season_stats(
    player_id: Uuid,
    season_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let service = StatsService::new(pool.get_ref().clone());
    let totals = service.season_totals(player_id, season_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": totals,
    })))
}
