pub mod event_store;
pub mod lineup_queries;
pub mod match_queries;
pub mod roster_queries;
pub mod score;
pub mod stats;
