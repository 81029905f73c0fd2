pub mod analysis;
pub mod arrivals;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod journey;
pub mod metrics;
pub mod models;
pub mod monitor;
pub mod output;
pub mod state;
pub mod station;
