//! Interaction scoring, trending aggregation and local persistence for a
//! streaming-content catalogue.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use config::{Config, TrendingSettings};
pub use db::{KeyValueStore, MemoryStore, RedisStore, Storage};
pub use error::{AppError, AppResult, StoreError, StoreResult};
pub use services::TrendingServices;
