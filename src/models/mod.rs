pub mod common;
pub mod lineup;
pub mod match_event;
pub mod matches;
pub mod player_stats;
pub mod user;
