use serde::Deserialize;
use service_core::config::{self as core_config, get_env};
use service_core::error::AppError;
use std::path::PathBuf;

const DEFAULT_MODEL_PATH: &str = "models/house_price_model.json";
const DEFAULT_TRAINING_SAMPLES: usize = 5_000;
const DEFAULT_TRAINING_SEED: u64 = 42;

#[derive(Debug, Clone, Deserialize)]
pub struct ValuationConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub model: ModelSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    /// Location of the serialized model artefact.
    pub path: PathBuf,
    /// Train and persist a fresh model when `path` does not exist.
    pub train_if_missing: bool,
    pub training_samples: usize,
    pub training_seed: u64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_MODEL_PATH),
            train_if_missing: true,
            training_samples: DEFAULT_TRAINING_SAMPLES,
            training_seed: DEFAULT_TRAINING_SEED,
        }
    }
}

impl ValuationConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env, APP__ prefix and PORT)
        let common_config = core_config::Config::load()?;
        let is_prod = common_config.is_prod();

        let model = ModelSettings {
            path: PathBuf::from(get_env("MODEL_PATH", Some(DEFAULT_MODEL_PATH), is_prod)?),
            train_if_missing: parse_env(get_env(
                "MODEL_TRAIN_IF_MISSING",
                Some("true"),
                false,
            )?)?,
            training_samples: parse_env(get_env(
                "MODEL_TRAINING_SAMPLES",
                Some(&DEFAULT_TRAINING_SAMPLES.to_string()),
                false,
            )?)?,
            training_seed: parse_env(get_env(
                "MODEL_TRAINING_SEED",
                Some(&DEFAULT_TRAINING_SEED.to_string()),
                false,
            )?)?,
        };

        Ok(ValuationConfig {
            common: common_config,
            model,
        })
    }
}

fn parse_env<T>(raw: String) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| {
        AppError::ConfigError(anyhow::anyhow!("invalid value '{}': {}", raw, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_accepts_padded_numbers() {
        let samples: usize = parse_env(" 250 ".to_string()).unwrap();
        assert_eq!(samples, 250);
    }

    #[test]
    fn parse_env_rejects_garbage() {
        let result: Result<bool, _> = parse_env("sometimes".to_string());
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn model_settings_default_to_training() {
        let settings = ModelSettings::default();
        assert!(settings.train_if_missing);
        assert_eq!(settings.training_samples, 5_000);
        assert_eq!(settings.path, PathBuf::from("models/house_price_model.json"));
    }
}
