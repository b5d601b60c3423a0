//! Value objects: equality by value, not identity.
//!
//! Two values with the same contents are equal. They are immutable: "changing"
//! one means building a new one.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Unit price of a product.
///
/// Always finite and non-negative. No currency is attached.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    pub const ZERO: Price = Price(0.0);

    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::validation("Product price must be a finite number."));
        }
        if value < 0.0 {
            return Err(DomainError::validation("Product price cannot be negative."));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Total cost of `quantity` units at this price.
    pub fn times(self, quantity: i64) -> f64 {
        quantity as f64 * self.0
    }
}

impl TryFrom<f64> for Price {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

/// Whole amounts keep one decimal (`1450.0`); everything else prints in
/// shortest round-trip form (`499.99`).
impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.0.fract() == 0.0 && self.0.abs() < 1e16 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}
