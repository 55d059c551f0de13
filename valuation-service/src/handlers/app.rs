use crate::models::{ValidationRule, RANGE_TABLE};
use askama::Template;
use axum::response::Html;
use service_core::error::AppError;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub rules: &'static [ValidationRule],
    pub version: &'static str,
}

pub async fn index() -> Result<Html<String>, AppError> {
    let page = IndexTemplate {
        rules: &RANGE_TABLE,
        version: env!("CARGO_PKG_VERSION"),
    };
    let rendered = page
        .render()
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("template rendering failed: {}", e)))?;
    Ok(Html(rendered))
}
