pub mod api;
pub mod config;
pub mod core_state;
pub mod db;
pub mod metrics;
pub mod models;
pub mod pipeline;
