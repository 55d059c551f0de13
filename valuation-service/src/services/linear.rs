//! Ordinary least squares house price regressor.

use super::model::{ModelError, PriceModel};
use crate::models::{Feature, ValuationRequest, FEATURES, RANGE_TABLE};
use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const MODEL_NAME: &str = "linear-regression";
const MODEL_VERSION: &str = "1.0.0";

/// Intercept followed by one weight per feature.
const PARAMETERS: usize = FEATURES.len() + 1;

/// Price formula the synthetic training market is generated from.
const MARKET_INTERCEPT: f64 = 40_000.0;
const MARKET_WEIGHTS: [f64; 6] = [120.0, 8_000.0, 12_500.0, -900.0, 6_500.0, 15_000.0];
const MARKET_NOISE: f64 = 10_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeights {
    pub square_feet: f64,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub age_years: f64,
    pub garage_spaces: f64,
    pub location_score: f64,
}

impl FeatureWeights {
    fn from_array(w: [f64; 6]) -> Self {
        Self {
            square_feet: w[0],
            bedrooms: w[1],
            bathrooms: w[2],
            age_years: w[3],
            garage_spaces: w[4],
            location_score: w[5],
        }
    }

    pub fn to_array(&self) -> [f64; 6] {
        [
            self.square_feet,
            self.bedrooms,
            self.bathrooms,
            self.age_years,
            self.garage_spaces,
            self.location_score,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearPriceModel {
    pub version: String,
    pub trained_at: DateTime<Utc>,
    pub training_samples: usize,
    pub intercept: f64,
    pub coefficients: FeatureWeights,
}

impl LinearPriceModel {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let raw = match fs::read(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ModelError::NotFound(path.to_path_buf()))
            }
            Err(e) => return Err(ModelError::Io(e)),
        };
        let model: Self = serde_json::from_slice(&raw)?;

        let all_finite = model.intercept.is_finite()
            && model.coefficients.to_array().iter().all(|w| w.is_finite());
        if !all_finite {
            return Err(ModelError::Training(format!(
                "artefact at {} contains non-finite weights",
                path.display()
            )));
        }

        Ok(model)
    }

    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }

    /// Fits a model to `samples` synthetic houses drawn from the permissible ranges.
    ///
    /// The same `seed` always yields the same weights.
    pub fn train(samples: usize, seed: u64) -> Result<Self, ModelError> {
        if samples < PARAMETERS {
            return Err(ModelError::Training(format!(
                "need at least {} samples, got {}",
                PARAMETERS, samples
            )));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut xtx = [[0.0_f64; PARAMETERS]; PARAMETERS];
        let mut xty = [0.0_f64; PARAMETERS];

        for _ in 0..samples {
            let house = synthetic_house(&mut rng);
            let noise = rng.gen_range(-MARKET_NOISE..=MARKET_NOISE);
            let price = market_price(&house) + noise;

            let mut row = [1.0_f64; PARAMETERS];
            row[1..].copy_from_slice(&house.features());

            for i in 0..PARAMETERS {
                xty[i] += row[i] * price;
                for j in 0..PARAMETERS {
                    xtx[i][j] += row[i] * row[j];
                }
            }
        }

        let beta = solve(xtx, xty)?;
        let mut weights = [0.0; 6];
        weights.copy_from_slice(&beta[1..]);

        Ok(Self {
            version: MODEL_VERSION.to_string(),
            trained_at: Utc::now(),
            training_samples: samples,
            intercept: beta[0],
            coefficients: FeatureWeights::from_array(weights),
        })
    }
}

impl PriceModel for LinearPriceModel {
    fn predict(&self, input: &ValuationRequest) -> Result<f64, ModelError> {
        let price = self.intercept
            + self
                .coefficients
                .to_array()
                .iter()
                .zip(input.features())
                .map(|(w, x)| w * x)
                .sum::<f64>();

        if price.is_finite() {
            Ok(price)
        } else {
            Err(ModelError::NonFinite(price))
        }
    }

    fn name(&self) -> &str {
        MODEL_NAME
    }

    fn version(&self) -> &str {
        &self.version
    }
}

fn synthetic_house(rng: &mut StdRng) -> ValuationRequest {
    let mut house = ValuationRequest::default();
    for rule in RANGE_TABLE.iter() {
        match rule.feature {
            Feature::SquareFeet => house.square_feet = rng.gen_range(rule.minimum..=rule.maximum),
            // Half-bath granularity
            Feature::Bathrooms => {
                house.bathrooms = (rng.gen_range(rule.minimum..=rule.maximum) * 2.0).round() / 2.0
            }
            Feature::Bedrooms => house.bedrooms = int_in(rng, rule.minimum, rule.maximum),
            Feature::AgeYears => house.age_years = int_in(rng, rule.minimum, rule.maximum),
            Feature::GarageSpaces => house.garage_spaces = int_in(rng, rule.minimum, rule.maximum),
            Feature::LocationScore => house.location_score = int_in(rng, rule.minimum, rule.maximum),
        }
    }
    house
}

fn int_in(rng: &mut StdRng, minimum: f64, maximum: f64) -> i64 {
    rng.gen_range(minimum as i64..=maximum as i64)
}

fn market_price(house: &ValuationRequest) -> f64 {
    MARKET_INTERCEPT
        + MARKET_WEIGHTS
            .iter()
            .zip(house.features())
            .map(|(w, x)| w * x)
            .sum::<f64>()
}

/// Solves `a * x = b` by Gaussian elimination with partial pivoting.
fn solve(
    mut a: [[f64; PARAMETERS]; PARAMETERS],
    mut b: [f64; PARAMETERS],
) -> Result<[f64; PARAMETERS], ModelError> {
    let scale = a
        .iter()
        .flatten()
        .fold(0.0_f64, |acc, v| acc.max(v.abs()))
        .max(1.0);

    for col in 0..PARAMETERS {
        let pivot = (col..PARAMETERS)
            .max_by(|&r1, &r2| a[r1][col].abs().total_cmp(&a[r2][col].abs()))
            .unwrap_or(col);

        if a[pivot][col].abs() <= scale * 1e-12 {
            return Err(ModelError::Training(
                "normal equations are singular".to_string(),
            ));
        }

        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..PARAMETERS {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..PARAMETERS {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0; PARAMETERS];
    for row in (0..PARAMETERS).rev() {
        let tail: f64 = (row + 1..PARAMETERS).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }

    Ok(x)
}
