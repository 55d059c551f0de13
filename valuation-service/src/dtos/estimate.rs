use crate::models::{Feature, ValuationRequest, ValuationResult, FEATURES};
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::num::IntErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed JSON body: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("request body must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("invalid value for {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub success: bool,
    pub results: ValuationResult,
}

impl EstimateResponse {
    pub fn new(results: ValuationResult) -> Self {
        Self {
            success: true,
            results,
        }
    }
}

/// Parses an untrusted request body into typed attributes.
///
/// A `null` body counts as an empty object; an empty body is malformed JSON.
/// Missing keys default to zero. Integer features truncate fractional numbers
/// toward zero and saturate out-of-range magnitudes; numeric strings and
/// booleans are coerced. Range checks happen later, in `validate`.
pub fn parse_payload(body: &[u8]) -> Result<ValuationRequest, ParseError> {
    let payload: Value = serde_json::from_slice(body)?;

    let fields = match payload {
        Value::Null => Map::new(),
        Value::Object(map) => map,
        other => return Err(ParseError::NotAnObject(kind_of(&other))),
    };

    let mut request = ValuationRequest::default();
    for feature in FEATURES {
        let Some(raw) = fields.get(feature.field_name()) else {
            continue;
        };
        match feature {
            Feature::SquareFeet => request.square_feet = coerce_float(feature, raw)?,
            Feature::Bedrooms => request.bedrooms = coerce_int(feature, raw)?,
            Feature::Bathrooms => request.bathrooms = coerce_float(feature, raw)?,
            Feature::AgeYears => request.age_years = coerce_int(feature, raw)?,
            Feature::GarageSpaces => request.garage_spaces = coerce_int(feature, raw)?,
            Feature::LocationScore => request.location_score = coerce_int(feature, raw)?,
        }
    }

    Ok(request)
}

fn coerce_float(feature: Feature, raw: &Value) -> Result<f64, ParseError> {
    match raw {
        Value::Number(n) => Ok(number_to_f64(n)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(feature, format!("could not convert string to float: '{}'", s))),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        other => Err(invalid(
            feature,
            format!("expected a number, got {}", kind_of(other)),
        )),
    }
}

/// Integer coercion saturates at the `i64` limits. Every saturated value is
/// far outside the range table, so it is reported by `validate` rather than here.
fn coerce_int(feature: Feature, raw: &Value) -> Result<i64, ParseError> {
    match raw {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if n.is_u64() {
                Ok(i64::MAX)
            } else {
                saturate(number_to_f64(n))
                    .ok_or_else(|| invalid(feature, format!("cannot convert {} to integer", n)))
            }
        }
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(i) => Ok(i),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Ok(i64::MAX),
                IntErrorKind::NegOverflow => Ok(i64::MIN),
                _ => Err(invalid(
                    feature,
                    format!("invalid literal for int(): '{}'", s),
                )),
            },
        },
        Value::Bool(b) => Ok(i64::from(*b)),
        other => Err(invalid(
            feature,
            format!("expected a number, got {}", kind_of(other)),
        )),
    }
}

/// Literals beyond the `f64` range (kept verbatim by `arbitrary_precision`)
/// become signed infinity.
fn number_to_f64(n: &Number) -> f64 {
    n.as_f64()
        .or_else(|| n.to_string().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

fn saturate(value: f64) -> Option<i64> {
    if value.is_nan() {
        None
    } else {
        // Float to int `as` casts saturate at the integer bounds.
        Some(value.trunc() as i64)
    }
}

fn invalid(feature: Feature, reason: String) -> ParseError {
    ParseError::InvalidField {
        field: feature.field_name(),
        reason,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
