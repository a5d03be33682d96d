//! Engine error types.

use srp_db::error::DatabaseError;
use srp_esi::ResolverError;
use srp_parser::ParserError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FitCheckError {
    /// Fitting text could not be parsed. Nothing was written.
    #[error("invalid fitting text: {0}")]
    Parse(#[from] ParserError),

    /// The hull name in the fitting header has no known type ID.
    #[error("could not resolve ship type for hull '{hull}'")]
    UnresolvableHull { hull: String },

    /// A fit or claim addressed by ID does not exist.
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    /// Comparison requested for a claim with no reviewer-selected fit.
    #[error("claim '{claim_id}' has no selected fit")]
    NoFitSelected { claim_id: String },

    /// Direct ESI call (killmail fetch) failed. Name lookups never surface this.
    #[error(transparent)]
    Resolver(#[from] ResolverError),

    /// Storage failure.
    #[error(transparent)]
    Database(DatabaseError),
}

impl From<DatabaseError> for FitCheckError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { entity, id } => Self::NotFound { entity, id },
            other => Self::Database(other),
        }
    }
}
