//! Unified Error Model
//!
//! Per-scan problems never surface here; malformed GS1 content degrades to
//! partial results. These variants cover startup and storage failures.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Gs1Error {
    #[error("REGISTRY/{0}")]
    RegistryError(String),

    #[error("RULES/{0}")]
    RuleSetError(String),

    #[error("STORE/{0}")]
    StoreError(String),

    #[error("CONFIG/{0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, Gs1Error>;
