//! Error types for configuration and mounting.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Configuration problems detected before the widget mounts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`{0}` must list at least one image")]
    EmptyAssetList(&'static str),
    #[error("`tuning.{0}` must be greater than zero")]
    NotPositive(&'static str),
    #[error("`tuning.{0}` must not be negative")]
    Negative(&'static str),
    #[error("`tuning.{field}` must be at least {min}")]
    TooSmall { field: &'static str, min: f64 },
    #[error("`tuning.{field}` must be at most {max}")]
    TooLarge { field: &'static str, max: f64 },
    #[error("unknown log level `{0}`")]
    LogLevel(String),
    #[cfg(feature = "serde_json")]
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures while mounting or driving the DOM view.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("2d canvas context unavailable")]
    NoCanvasContext,
    #[error("widget already mounted")]
    AlreadyMounted,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for AppError {
    fn from(value: JsValue) -> Self {
        AppError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<AppError> for JsValue {
    fn from(err: AppError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
