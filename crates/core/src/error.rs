//! Error taxonomy
//!
//! Every failure in the core has a defined local recovery:
//! - `MissingParameter` / `InvalidRequest`: client input errors, never retried
//! - `NotFound`: unknown scheme id
//! - `Validation`: conversational field failures, recovered by re-prompting
//! - `Provider`: content-generation failure, recovered by local fallback
//! - `UnsupportedCapability`: speech unavailable, flow continues text-only
//! - `Catalog`: catalog load failure at startup is the only fatal case

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Capability unavailable: {0}")]
    UnsupportedCapability(String),

    #[error("Catalog unavailable: {0}")]
    Catalog(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience result alias
pub type Result<T> = std::result::Result<T, Error>;
