//! Static range table and the fail-fast validator that applies it.

use super::valuation::{Feature, ValuationRequest};
use std::fmt;
use thiserror::Error;

/// Inclusive bounds for a single feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationRule {
    pub key: &'static str,
    pub feature: Feature,
    pub minimum: f64,
    pub maximum: f64,
    pub label: &'static str,
}

impl ValidationRule {
    pub fn permits(&self, value: f64) -> bool {
        (self.minimum..=self.maximum).contains(&value)
    }

    pub fn field_name(&self) -> &'static str {
        self.feature.field_name()
    }

    /// HTML `step` attribute for the input bound to this rule.
    pub fn step(&self) -> &'static str {
        if self.feature.is_integer() {
            "1"
        } else {
            "any"
        }
    }
}

/// Checked in declaration order; the first failing entry is the one reported.
pub static RANGE_TABLE: [ValidationRule; 6] = [
    ValidationRule {
        key: "sq_ft",
        feature: Feature::SquareFeet,
        minimum: 500.0,
        maximum: 10_000.0,
        label: "Living Area (SqFt)",
    },
    ValidationRule {
        key: "beds",
        feature: Feature::Bedrooms,
        minimum: 1.0,
        maximum: 10.0,
        label: "Total Bedrooms",
    },
    ValidationRule {
        key: "baths",
        feature: Feature::Bathrooms,
        minimum: 1.0,
        maximum: 8.0,
        label: "Total Bathrooms",
    },
    ValidationRule {
        key: "age",
        feature: Feature::AgeYears,
        minimum: 0.0,
        maximum: 100.0,
        label: "House Age",
    },
    ValidationRule {
        key: "parking",
        feature: Feature::GarageSpaces,
        minimum: 0.0,
        maximum: 4.0,
        label: "Garage Capacity",
    },
    ValidationRule {
        key: "rank",
        feature: Feature::LocationScore,
        minimum: 1.0,
        maximum: 10.0,
        label: "Neighborhood Rating",
    },
];

#[derive(Debug, Clone, PartialEq, Error)]
pub struct ValidationError {
    pub key: &'static str,
    pub label: &'static str,
    pub minimum: f64,
    pub maximum: f64,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is outside permissible range ({}-{})",
            self.label,
            Bound(self.minimum),
            Bound(self.maximum)
        )
    }
}

/// Prints integral bounds without a trailing `.0`.
struct Bound(f64);

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 && self.0.abs() < 1e15 {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

pub fn validate(request: &ValuationRequest) -> Result<(), ValidationError> {
    match RANGE_TABLE
        .iter()
        .find(|rule| !rule.permits(request.value(rule.feature)))
    {
        Some(rule) => Err(ValidationError {
            key: rule.key,
            label: rule.label,
            minimum: rule.minimum,
            maximum: rule.maximum,
        }),
        None => Ok(()),
    }
}
