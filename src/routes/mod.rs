use actix_web::web;

pub mod backend_health;
pub mod matches;

use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    // Match routes (require authentication)
    cfg.service(
        web::scope("/matches")
            .wrap(AuthMiddleware)
            .service(matches::list_matches)
            .service(matches::get_match_detail)
            .service(matches::transition_match)
            .service(matches::create_event)
            .service(matches::delete_event)
            .service(matches::patch_event)
            .service(matches::get_lineup)
            .service(matches::replace_lineup)
            .service(matches::post_match_goal)
            .service(matches::post_match_substitution)
            .service(matches::post_match_delete_event)
            .service(matches::post_match_replace_lineup)
            .service(matches::get_post_match_stats)
            .service(matches::put_post_match_stats),
    );
    // Read-only player aggregates (require authentication)
    cfg.service(
        web::scope("/players")
            .wrap(AuthMiddleware)
            .service(matches::get_player_season_stats),
    );
}
