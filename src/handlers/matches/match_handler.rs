// src/handlers/matches/match_handler.rs
use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{event_store, lineup_queries, match_queries::MatchQueries};
use crate::errors::ApiError;
use crate::models::common::PaginationQuery;
use crate::models::matches::MatchListQuery;

/// Match detail: the match row, both lineups if stored, and the newest
/// events first with pagination.
pub async fn get_match_detail(
    match_id: Uuid,
    query: web::Query<PaginationQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let queries = MatchQueries::new(pool.get_ref().clone());
    let game = queries
        .get_match(match_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("match {} not found", match_id)))?;

    let (limit, offset) = query.to_limit_offset();
    let events = event_store::list_events(pool.get_ref(), match_id, limit, offset).await?;
    let total_events = event_store::count_events(pool.get_ref(), match_id).await?;

    let home_lineup = lineup_queries::get_lineup(pool.get_ref(), match_id, game.home_team_id).await?;
    let away_lineup = lineup_queries::get_lineup(pool.get_ref(), match_id, game.away_team_id).await?;

    let total_pages = (total_events as f64 / limit as f64).ceil() as i64;
    let page = query.page.unwrap_or(1).max(1);

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": {
            "match": game,
            "home_lineup": home_lineup,
            "away_lineup": away_lineup,
            "events": events,
            "pagination": {
                "page": page,
                "limit": limit,
                "total_count": total_events,
                "total_pages": total_pages,
            }
        }
    })))
}

pub async fn list_matches(
    query: web::Query<MatchListQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let queries = MatchQueries::new(pool.get_ref().clone());
    let matches = queries.list_matches(&query).await?;
    let total_count = queries.count_matches(&query).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": matches,
        "total_count": total_count,
    })))
}
