#![allow(dead_code)]

use service_core::config::Config as CoreConfig;
use std::path::PathBuf;
use std::sync::Arc;
use valuation_service::config::{ModelSettings, ValuationConfig};
use valuation_service::models::ValuationRequest;
use valuation_service::services::{ModelError, PriceModel};
use valuation_service::Application;

/// Returns the same price for every house.
pub struct FixedPriceModel(pub f64);

impl PriceModel for FixedPriceModel {
    fn predict(&self, _input: &ValuationRequest) -> Result<f64, ModelError> {
        Ok(self.0)
    }

    fn name(&self) -> &str {
        "fixed"
    }

    fn version(&self) -> &str {
        "test"
    }
}

/// Prices a house at one dollar per square foot plus 1000 per bedroom.
pub struct AreaPriceModel;

impl PriceModel for AreaPriceModel {
    fn predict(&self, input: &ValuationRequest) -> Result<f64, ModelError> {
        Ok(input.square_feet + 1_000.0 * input.bedrooms as f64)
    }

    fn name(&self) -> &str {
        "area"
    }

    fn version(&self) -> &str {
        "test"
    }
}

/// Fails every inference.
pub struct BrokenModel;

impl PriceModel for BrokenModel {
    fn predict(&self, _input: &ValuationRequest) -> Result<f64, ModelError> {
        Err(ModelError::NonFinite(f64::NAN))
    }

    fn name(&self) -> &str {
        "broken"
    }

    fn version(&self) -> &str {
        "test"
    }
}

pub fn temp_model_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("valuation_test_{}", uuid::Uuid::new_v4()))
        .join("house_price_model.json")
}

pub fn test_config(model_path: PathBuf) -> ValuationConfig {
    ValuationConfig {
        common: CoreConfig {
            port: 0, // Random port
            ..CoreConfig::default()
        },
        model: ModelSettings {
            path: model_path,
            train_if_missing: true,
            training_samples: 1_000,
            training_seed: 42,
        },
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub model_path: PathBuf,
}

impl TestApp {
    /// Spawn the service around the given model.
    pub async fn spawn_with_model(model: Arc<dyn PriceModel>) -> Self {
        let model_path = temp_model_path();
        let app = Application::build_with_model(test_config(model_path.clone()), model)
            .await
            .expect("Failed to build test application");
        Self::start(app, model_path).await
    }

    /// Spawn the service the way `main` does, training a model into a temp directory.
    pub async fn spawn_trained() -> Self {
        let model_path = temp_model_path();
        let app = Application::build(test_config(model_path.clone()))
            .await
            .expect("Failed to build test application");
        Self::start(app, model_path).await
    }

    async fn start(app: Application, model_path: PathBuf) -> Self {
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            model_path,
        }
    }

    pub async fn post_estimate(&self, body: impl Into<reqwest::Body>) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/estimate-price", self.address))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json(&self, body: &serde_json::Value) -> reqwest::Response {
        self.post_estimate(body.to_string()).await
    }

    /// Remove any model artefact written during the test.
    pub fn cleanup(&self) {
        if let Some(dir) = self.model_path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}
