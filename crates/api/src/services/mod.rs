//! Catalog business rules on top of the repositories.
//!
//! Services check the rules that need the catalog (existing ids, unique
//! names) and report failures as [`CatalogError`] with a stable application
//! code that clients can match on.

pub mod categories;
pub mod products;

use thiserror::Error;

use crate::db::RepositoryError;

pub use categories::CategoryService;
pub use products::{ProductQuery, ProductService};

/// Failure of a catalog operation.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The requested resource does not exist.
    #[error("{message}")]
    NotFound { code: &'static str, message: String },

    /// The request is well formed but breaks a business rule.
    #[error("{message}")]
    BusinessRule { code: &'static str, message: String },

    /// The request refers to something that does not exist.
    #[error("{message}")]
    BadRequest { code: &'static str, message: String },

    /// Stored data references something that is missing.
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// The store failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl CatalogError {
    /// Application error code, when the failure has one.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::NotFound { code, .. }
            | Self::BusinessRule { code, .. }
            | Self::BadRequest { code, .. } => Some(*code),
            Self::DataIntegrity(_) | Self::Repository(_) => None,
        }
    }

    pub(crate) fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            message: message.into(),
        }
    }

    pub(crate) fn business_rule(code: &'static str, message: impl Into<String>) -> Self {
        Self::BusinessRule {
            code,
            message: message.into(),
        }
    }

    pub(crate) fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            CatalogError::not_found("API-GPD-01", "missing").code(),
            Some("API-GPD-01")
        );
        assert_eq!(CatalogError::DataIntegrity("x".to_string()).code(), None);
    }

    #[test]
    fn test_display_is_message() {
        let err = CatalogError::business_rule("ATI-CC-01", "duplicate");
        assert_eq!(err.to_string(), "duplicate");
    }
}
