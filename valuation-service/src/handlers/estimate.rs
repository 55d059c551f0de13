use crate::dtos::{parse_payload, EstimateResponse};
use crate::models::{validate, ValuationResult};
use crate::services::record_valuation;
use crate::startup::AppState;
use axum::{body::Bytes, extract::State, Json};
use service_core::error::AppError;

/// `POST /estimate-price`
///
/// Parse, range-check, infer, respond. Range failures are 400s; every other
/// failure (bad JSON, coercion, inference) surfaces as a 500.
#[tracing::instrument(name = "estimate_price", skip_all)]
pub async fn estimate_price(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<EstimateResponse>, AppError> {
    match run_valuation(&state, &body).await {
        Ok(result) => {
            tracing::info!(
                estimated_price = result.estimated_price,
                "Valuation completed"
            );
            record_valuation("success", Some(result.estimated_price));
            Ok(Json(EstimateResponse::new(result)))
        }
        Err(err) => {
            let outcome = match &err {
                AppError::Validation(reason) => {
                    tracing::info!(%reason, "Valuation rejected");
                    "validation_error"
                }
                _ => "error",
            };
            record_valuation(outcome, None);
            Err(err)
        }
    }
}

async fn run_valuation(state: &AppState, body: &[u8]) -> Result<ValuationResult, AppError> {
    let request = parse_payload(body).map_err(anyhow::Error::from)?;

    validate(&request).map_err(|e| AppError::Validation(e.to_string()))?;

    let model = state.model.clone();
    let input = request.clone();
    let predicted = tokio::task::spawn_blocking(move || model.predict(&input))
        .await
        .map_err(|e| anyhow::anyhow!("inference task failed: {}", e))?
        .map_err(anyhow::Error::from)?;

    Ok(ValuationResult::new(predicted, request))
}
