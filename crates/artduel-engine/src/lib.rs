pub mod competition;
pub mod config;

pub use competition::{Competition, EngineError, RunSummary};
pub use config::EngineConfig;
