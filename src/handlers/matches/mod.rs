pub mod event_handler;
pub mod lineup_handler;
pub mod match_handler;
pub mod post_match_handler;
pub mod stats_handler;
pub mod transition_handler;
