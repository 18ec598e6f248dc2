// src/handlers/matches/transition_handler.rs
use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::middleware::auth::Claims;
use crate::models::matches::TransitionRequest;
use crate::services::MatchLifecycleService;

pub async fn transition_match(
    match_id: Uuid,
    request: web::Json<TransitionRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let service = MatchLifecycleService::new(pool.get_ref().clone());
    let updated = service.transition(match_id, &claims, &request).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": updated,
    })))
}
