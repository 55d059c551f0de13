use serde::{Deserialize, Serialize};

/// Currency every estimate is quoted in.
pub const CURRENCY_UNIT: &str = "USD";

/// The six house attributes, in the order the model consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    SquareFeet,
    Bedrooms,
    Bathrooms,
    AgeYears,
    GarageSpaces,
    LocationScore,
}

pub const FEATURES: [Feature; 6] = [
    Feature::SquareFeet,
    Feature::Bedrooms,
    Feature::Bathrooms,
    Feature::AgeYears,
    Feature::GarageSpaces,
    Feature::LocationScore,
];

impl Feature {
    /// JSON key of the feature in requests and in the echoed `meta` object.
    pub fn field_name(self) -> &'static str {
        match self {
            Feature::SquareFeet => "square_feet",
            Feature::Bedrooms => "bedrooms",
            Feature::Bathrooms => "bathrooms",
            Feature::AgeYears => "age_years",
            Feature::GarageSpaces => "garage_spaces",
            Feature::LocationScore => "location_score",
        }
    }

    /// Integer features are truncated on input; the others keep fractions.
    pub fn is_integer(self) -> bool {
        !matches!(self, Feature::SquareFeet | Feature::Bathrooms)
    }
}

/// Parsed house attributes. Missing fields default to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationRequest {
    pub square_feet: f64,
    pub bedrooms: i64,
    pub bathrooms: f64,
    pub age_years: i64,
    pub garage_spaces: i64,
    pub location_score: i64,
}

impl ValuationRequest {
    pub fn value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::SquareFeet => self.square_feet,
            Feature::Bedrooms => self.bedrooms as f64,
            Feature::Bathrooms => self.bathrooms,
            Feature::AgeYears => self.age_years as f64,
            Feature::GarageSpaces => self.garage_spaces as f64,
            Feature::LocationScore => self.location_score as f64,
        }
    }

    pub fn features(&self) -> [f64; 6] {
        FEATURES.map(|feature| self.value(feature))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ValuationResult {
    pub estimated_price: f64,
    pub unit: &'static str,
    pub meta: ValuationRequest,
}

impl ValuationResult {
    pub fn new(predicted_price: f64, meta: ValuationRequest) -> Self {
        Self {
            estimated_price: round_cents(predicted_price),
            unit: CURRENCY_UNIT,
            meta,
        }
    }
}

/// Rounds to two decimals, half to even, judged on the exact binary value
/// (so `0.125` becomes `0.12` while `0.135`, stored slightly above, becomes `0.14`).
fn round_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }

    // Exact error of the multiplication; tells true ties from products that only rounded onto .5.
    let residual = value.mul_add(100.0, -scaled);
    let rounded = if (scaled - scaled.trunc()).abs() == 0.5 && residual != 0.0 {
        if residual > 0.0 {
            scaled.ceil()
        } else {
            scaled.floor()
        }
    } else {
        scaled.round_ties_even()
    };

    rounded / 100.0
}
