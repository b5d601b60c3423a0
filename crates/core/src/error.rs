//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Two kinds live here: validation failures (bad constructor or setter
/// arguments) and business-rule failures raised while purchasing or looking
/// up products. Use [`DomainError::is_validation`] to tell them apart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (empty name, negative price or quantity).
    #[error("{0}")]
    Validation(String),

    /// Purchase attempted on a deactivated product.
    #[error("Cannot buy {name} as it is currently inactive.")]
    ProductInactive { name: String },

    /// Purchase quantity was zero or negative.
    #[error("Purchase quantity must be a positive number.")]
    InvalidPurchaseQuantity(i64),

    /// Purchase quantity exceeded the available stock.
    #[error("Not enough stock for {name}. Available: {available}, Requested: {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// A product was not found in the store.
    #[error("{0} not found in the store.")]
    NotFound(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn inactive(name: impl Into<String>) -> Self {
        Self::ProductInactive { name: name.into() }
    }

    pub fn insufficient_stock(name: impl Into<String>, available: i64, requested: i64) -> Self {
        Self::InsufficientStock {
            name: name.into(),
            available,
            requested,
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// True for bad-argument failures, false for business-rule failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
