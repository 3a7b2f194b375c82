//! Scheme catalog and matching engine
//!
//! The catalog is loaded once from a static JSON file at startup and is
//! read-only afterwards. The matcher is a pure function from a user
//! profile and the catalog to an ordered top-3 of relevant schemes.

mod matcher;
mod store;

pub use matcher::{match_schemes, score_scheme, TOP_N};
pub use store::SchemeCatalog;

use thiserror::Error;

/// Catalog errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate scheme id in catalog: {0}")]
    DuplicateId(String),

    #[error("Catalog is empty")]
    Empty,
}
