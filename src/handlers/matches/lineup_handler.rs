// src/handlers/matches/lineup_handler.rs
use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::matchday::lifecycle::EditWindow;
use crate::middleware::auth::Claims;
use crate::models::lineup::ReplaceLineupRequest;
use crate::services::LineupService;

pub async fn get_lineup(
    match_id: Uuid,
    team_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let service = LineupService::new(pool.get_ref().clone());
    let lineup = service.get_lineup(match_id, team_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": lineup,
    })))
}

pub async fn replace_lineup(
    match_id: Uuid,
    team_id: Uuid,
    request: web::Json<ReplaceLineupRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    window: EditWindow,
) -> Result<HttpResponse, ApiError> {
    let service = LineupService::new(pool.get_ref().clone());
    let lineup = service
        .replace_lineup(match_id, team_id, &claims, &request, window)
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": lineup,
    })))
}
