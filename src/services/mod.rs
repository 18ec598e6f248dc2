pub mod event_service;
pub mod lifecycle_service;
pub mod lineup_service;
pub mod stats_service;
pub mod telemetry;

pub use event_service::MatchEventService;
pub use lifecycle_service::MatchLifecycleService;
pub use lineup_service::LineupService;
pub use stats_service::StatsService;
