//! Wire formats for the valuation endpoint.

pub mod estimate;

pub use estimate::{parse_payload, EstimateResponse, ParseError};
