use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// `None` when the recorder could not be installed; requests are still served.
pub static METRICS_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

/// Installs the global Prometheus recorder. Safe to call more than once.
pub fn init_metrics() {
    METRICS_HANDLE.get_or_init(|| match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::error!("Failed to install Prometheus recorder: {}", e);
            None
        }
    });
}

pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .and_then(Option::as_ref)
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Record the outcome of a valuation request, plus the price when one was produced.
pub fn record_valuation(outcome: &'static str, estimated_price: Option<f64>) {
    counter!("valuation_requests_total", "outcome" => outcome).increment(1);
    if let Some(price) = estimated_price {
        histogram!("valuation_estimated_price_usd").record(price);
    }
}
