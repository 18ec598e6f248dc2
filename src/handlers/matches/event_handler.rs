// src/handlers/matches/event_handler.rs
//! Live event mutation surface. The post-match editor re-exposes the same
//! operations through `post_match_handler`; only the edit window differs.

use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::matchday::lifecycle::EditWindow;
use crate::middleware::auth::Claims;
use crate::models::match_event::{CreateEventRequest, UpdateEventRequest};
use crate::services::MatchEventService;

pub async fn create_event(
    match_id: Uuid,
    request: web::Json<CreateEventRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    window: EditWindow,
) -> Result<HttpResponse, ApiError> {
    let service = MatchEventService::new(pool.get_ref().clone());
    let (event, updated) = service
        .create_event(match_id, &claims, &request, window)
        .await?;
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "data": {
            "event": event,
            "match": updated,
        }
    })))
}

pub async fn delete_event(
    match_id: Uuid,
    event_id: Uuid,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    window: EditWindow,
) -> Result<HttpResponse, ApiError> {
    let service = MatchEventService::new(pool.get_ref().clone());
    let updated = service
        .delete_event(match_id, event_id, &claims, window)
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": {
            "match": updated,
        }
    })))
}

pub async fn patch_event(
    match_id: Uuid,
    event_id: Uuid,
    request: web::Json<UpdateEventRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    window: EditWindow,
) -> Result<HttpResponse, ApiError> {
    let service = MatchEventService::new(pool.get_ref().clone());
    let (event, updated) = service
        .patch_event(match_id, event_id, &claims, &request, window)
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": {
            "event": event,
            "match": updated,
        }
    })))
}
