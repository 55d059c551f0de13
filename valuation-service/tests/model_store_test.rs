mod common;

use common::{temp_model_path, TestApp};
use serde_json::{json, Value};
use valuation_service::config::ModelSettings;
use valuation_service::services::{load_or_train, LinearPriceModel, ModelError, PriceModel};

fn settings(train_if_missing: bool) -> ModelSettings {
    ModelSettings {
        path: temp_model_path(),
        train_if_missing,
        training_samples: 1_000,
        training_seed: 3,
    }
}

fn cleanup(settings: &ModelSettings) {
    if let Some(dir) = settings.path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}

#[test]
fn missing_artefact_is_trained_and_persisted() {
    let settings = settings(true);
    assert!(!settings.path.exists());

    let model = load_or_train(&settings).expect("training should succeed");
    assert!(settings.path.exists());
    assert_eq!(model.training_samples, 1_000);

    // The second load reads the persisted artefact rather than retraining
    let reloaded = load_or_train(&settings).expect("reload should succeed");
    assert_eq!(reloaded, model);

    cleanup(&settings);
}

#[test]
fn missing_artefact_without_training_fails() {
    let settings = settings(false);

    let err = load_or_train(&settings).unwrap_err();
    assert!(matches!(err, ModelError::NotFound(_)));
    assert!(!settings.path.exists());
}

#[test]
fn corrupt_artefact_is_reported() {
    let settings = settings(true);
    std::fs::create_dir_all(settings.path.parent().unwrap()).unwrap();
    std::fs::write(&settings.path, b"{ not a model").unwrap();

    let err = load_or_train(&settings).unwrap_err();
    assert!(matches!(err, ModelError::Corrupt(_)));

    cleanup(&settings);
}

#[test]
fn saved_model_round_trips_predictions() {
    let settings = settings(true);
    let model = LinearPriceModel::train(2_000, 9).unwrap();
    model.save(&settings.path).unwrap();

    let loaded = LinearPriceModel::load(&settings.path).unwrap();
    let house = valuation_service::models::ValuationRequest {
        square_feet: 2400.0,
        bedrooms: 4,
        bathrooms: 3.0,
        age_years: 20,
        garage_spaces: 2,
        location_score: 6,
    };
    assert_eq!(loaded.predict(&house).unwrap(), model.predict(&house).unwrap());

    cleanup(&settings);
}

#[tokio::test]
async fn trained_service_prices_bigger_houses_higher() {
    let app = TestApp::spawn_trained().await;
    assert!(app.model_path.exists());

    let small = app
        .post_json(&json!({
            "square_feet": 900, "bedrooms": 2, "bathrooms": 1,
            "age_years": 40, "garage_spaces": 0, "location_score": 3
        }))
        .await;
    assert_eq!(small.status().as_u16(), 200);
    let small: Value = small.json().await.unwrap();

    let large: Value = app
        .post_json(&json!({
            "square_feet": 4200, "bedrooms": 5, "bathrooms": 4,
            "age_years": 2, "garage_spaces": 3, "location_score": 9
        }))
        .await
        .json()
        .await
        .unwrap();

    let small_price = small["results"]["estimated_price"].as_f64().unwrap();
    let large_price = large["results"]["estimated_price"].as_f64().unwrap();
    assert!(small_price > 0.0);
    assert!(large_price > small_price);
    // Two decimal places at most
    assert_eq!((large_price * 100.0).round() / 100.0, large_price);

    app.cleanup();
}
