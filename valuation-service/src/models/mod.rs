pub mod validation;
pub mod valuation;

pub use validation::{validate, ValidationError, ValidationRule, RANGE_TABLE};
pub use valuation::{Feature, ValuationRequest, ValuationResult, CURRENCY_UNIT, FEATURES};
