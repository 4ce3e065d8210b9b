//! Infrastructure layer: local storage, platform services, configuration.

pub mod config;
pub mod kv_store;
pub mod location;
pub mod navigation;
pub mod spot_repository;

pub use config::AppConfig;
pub use spot_repository::{LoadIssue, LoadOutcome, RepositoryError, STORAGE_KEY, SpotRepository};
