// src/routes/matches.rs
use actix_web::{delete, get, patch, post, put, web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::handlers::matches::{
    event_handler, lineup_handler, match_handler, post_match_handler, stats_handler,
    transition_handler,
};
use crate::matchday::lifecycle::EditWindow;
use crate::middleware::auth::Claims;
use crate::models::common::PaginationQuery;
use crate::models::lineup::ReplaceLineupRequest;
use crate::models::match_event::{CreateEventRequest, UpdateEventRequest};
use crate::models::matches::{MatchListQuery, TransitionRequest};
use crate::models::player_stats::BatchStatsRequest;

/// List matches, optionally filtered by status and season
#[get("")]
async fn list_matches(
    query: web::Query<MatchListQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    match_handler::list_matches(query, pool).await
}

/// Match detail with lineups and paginated event feed
#[get("/{match_id}")]
async fn get_match_detail(
    path: web::Path<Uuid>,
    query: web::Query<PaginationQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let match_id = path.into_inner();
    match_handler::get_match_detail(match_id, query, pool).await
}

/// Perform a lifecycle transition (start, halftime, complete, forfeit, ...)
#[post("/{match_id}/transition")]
async fn transition_match(
    path: web::Path<Uuid>,
    request: web::Json<TransitionRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let match_id = path.into_inner();
    transition_handler::transition_match(match_id, request, pool, claims).await
}

/// Record a goal or substitution on a match in play
#[post("/{match_id}/events")]
async fn create_event(
    path: web::Path<Uuid>,
    request: web::Json<CreateEventRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let match_id = path.into_inner();
    event_handler::create_event(match_id, request, pool, claims, EditWindow::Live).await
}

/// Delete an event from a match in play, unwinding its score/stat deltas
#[delete("/{match_id}/events/{event_id}")]
async fn delete_event(
    path: web::Path<(Uuid, Uuid)>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let (match_id, event_id) = path.into_inner();
    event_handler::delete_event(match_id, event_id, pool, claims, EditWindow::Live).await
}

/// Partially update an event (scorer re-attribution, minute correction)
#[patch("/{match_id}/events/{event_id}")]
async fn patch_event(
    path: web::Path<(Uuid, Uuid)>,
    request: web::Json<UpdateEventRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let (match_id, event_id) = path.into_inner();
    event_handler::patch_event(match_id, event_id, request, pool, claims, EditWindow::Live).await
}

/// Read a stored lineup
#[get("/{match_id}/lineup/{team_id}")]
async fn get_lineup(
    path: web::Path<(Uuid, Uuid)>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let (match_id, team_id) = path.into_inner();
    lineup_handler::get_lineup(match_id, team_id, pool).await
}

/// Replace a team's lineup wholesale (before completion)
#[put("/{match_id}/lineup/{team_id}")]
async fn replace_lineup(
    path: web::Path<(Uuid, Uuid)>,
    request: web::Json<ReplaceLineupRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let (match_id, team_id) = path.into_inner();
    lineup_handler::replace_lineup(match_id, team_id, request, pool, claims, EditWindow::Live).await
}

/// Retroactively record a goal on a completed/forfeited match
#[post("/{match_id}/post-match/goal")]
async fn post_match_goal(
    path: web::Path<Uuid>,
    request: web::Json<CreateEventRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let match_id = path.into_inner();
    post_match_handler::create_goal(match_id, request, pool, claims).await
}

/// Retroactively record a substitution on a completed/forfeited match
#[post("/{match_id}/post-match/substitution")]
async fn post_match_substitution(
    path: web::Path<Uuid>,
    request: web::Json<CreateEventRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let match_id = path.into_inner();
    post_match_handler::create_substitution(match_id, request, pool, claims).await
}

/// Delete an event from a completed/forfeited match
#[delete("/{match_id}/post-match/events/{event_id}")]
async fn post_match_delete_event(
    path: web::Path<(Uuid, Uuid)>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let (match_id, event_id) = path.into_inner();
    post_match_handler::delete_event(match_id, event_id, pool, claims).await
}

/// Replace a lineup on a completed/forfeited match
#[put("/{match_id}/post-match/lineup/{team_id}")]
async fn post_match_replace_lineup(
    path: web::Path<(Uuid, Uuid)>,
    request: web::Json<ReplaceLineupRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let (match_id, team_id) = path.into_inner();
    post_match_handler::replace_lineup(match_id, team_id, request, pool, claims).await
}

/// Batch-read a team's per-match player stats
#[get("/{match_id}/post-match/stats/{team_id}")]
async fn get_post_match_stats(
    path: web::Path<(Uuid, Uuid)>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let (match_id, team_id) = path.into_inner();
    post_match_handler::get_team_stats(match_id, team_id, pool).await
}

/// Batch-correct a team's per-match player stats (minutes played, started)
#[put("/{match_id}/post-match/stats/{team_id}")]
async fn put_post_match_stats(
    path: web::Path<(Uuid, Uuid)>,
    request: web::Json<BatchStatsRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let (match_id, team_id) = path.into_inner();
    post_match_handler::correct_team_stats(match_id, team_id, request, pool, claims).await
}

/// Season totals for a player, summed at read time
#[get("/{player_id}/seasons/{season_id}/stats")]
async fn get_player_season_stats(
    path: web::Path<(Uuid, Uuid)>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let (player_id, season_id) = path.into_inner();
    stats_handler::get_player_season_stats(player_id, season_id, pool).await
}
