// src/handlers/matches/post_match_handler.rs
//! The post-match editor. Same mutation surface as the live handlers, gated
//! to completed/forfeited matches; nothing here re-implements score or stat
//! logic — every call goes through the same services as the live path.

use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::handlers::matches::{event_handler, lineup_handler};
use crate::matchday::lifecycle::EditWindow;
use crate::middleware::auth::Claims;
use crate::models::lineup::ReplaceLineupRequest;
use crate::models::match_event::{CreateEventRequest, MatchEventType};
use crate::models::player_stats::BatchStatsRequest;
use crate::services::StatsService;

/// Retroactively record a goal on a completed/forfeited match.
pub async fn create_goal(
    match_id: Uuid,
    mut request: web::Json<CreateEventRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    request.event_type = MatchEventType::Goal;
    event_handler::create_event(match_id, request, pool, claims, EditWindow::PostMatch).await
}

/// Retroactively record a substitution on a completed/forfeited match.
pub async fn create_substitution(
    match_id: Uuid,
    mut request: web::Json<CreateEventRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    request.event_type = MatchEventType::Substitution;
    event_handler::create_event(match_id, request, pool, claims, EditWindow::PostMatch).await
}

pub async fn delete_event(
    match_id: Uuid,
    event_id: Uuid,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    event_handler::delete_event(match_id, event_id, pool, claims, EditWindow::PostMatch).await
}

pub async fn replace_lineup(
    match_id: Uuid,
    team_id: Uuid,
    request: web::Json<ReplaceLineupRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    lineup_handler::replace_lineup(
        match_id,
        team_id,
        request,
        pool,
        claims,
        EditWindow::PostMatch,
    )
    .await
}

pub async fn get_team_stats(
    match_id: Uuid,
    team_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let service = StatsService::new(pool.get_ref().clone());
    let stats = service.get_team_stats(match_id, team_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": stats,
    })))
}

/// Batch-correct a team's stats for fields the event log cannot express.
pub async fn correct_team_stats(
    match_id: Uuid,
    team_id: Uuid,
    request: web::Json<BatchStatsRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let service = StatsService::new(pool.get_ref().clone());
    let stats = service
        .batch_correct(match_id, team_id, &claims, &request)
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": stats,
    })))
}
