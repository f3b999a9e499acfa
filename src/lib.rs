pub mod betting;
pub mod comparison;
pub mod config;
pub mod demo_feed;
pub mod export;
pub mod group_stats;
pub mod insights;
pub mod model;
pub mod numfmt;
pub mod origin_stats;
pub mod persist;
pub mod roster;
pub mod state;
