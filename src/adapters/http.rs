use crate::adapters::page::{self, PageView};
use crate::core::engine::PredictionEngine;
use crate::utils::error::PredictorError;
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

type SharedEngine = Arc<PredictionEngine>;

pub fn router(engine: PredictionEngine) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict_form))
        .route("/api/predict", post(predict_json))
        .route("/health", get(health))
        .with_state(Arc::new(engine))
}

async fn index(State(engine): State<SharedEngine>) -> Html<String> {
    Html(page::render(&PageView {
        model_loaded: engine.model_loaded(),
        ..Default::default()
    }))
}

async fn predict_form(
    State(engine): State<SharedEngine>,
    form: std::result::Result<Form<HashMap<String, String>>, FormRejection>,
) -> (StatusCode, Html<String>) {
    let Form(fields) = match form {
        Ok(form) => form,
        Err(rejection) => {
            let message = format!("Error processing input: {}", rejection.body_text());
            tracing::info!("Rejected form body: {}", rejection.body_text());
            return (
                rejection.status(),
                Html(page::render(&PageView {
                    model_loaded: engine.model_loaded(),
                    result: None,
                    error: Some(message),
                })),
            );
        }
    };

    match engine.run(&fields) {
        Ok(result) => (
            StatusCode::OK,
            Html(page::render(&PageView {
                model_loaded: true,
                result: Some(&result),
                error: None,
            })),
        ),
        Err(e) => {
            log_rejection(&e);
            (
                status_for(&e),
                Html(page::render(&PageView {
                    model_loaded: engine.model_loaded(),
                    result: None,
                    error: Some(e.user_friendly_message()),
                })),
            )
        }
    }
}

async fn predict_json(
    State(engine): State<SharedEngine>,
    Json(body): Json<Map<String, Value>>,
) -> Response {
    let fields = fields_from_json(body);
    match engine.run(&fields) {
        Ok(result) => Json(result).into_response(),
        Err(e) => {
            log_rejection(&e);
            (
                status_for(&e),
                Json(json!({ "error": e.user_friendly_message() })),
            )
                .into_response()
        }
    }
}

async fn health(State(engine): State<SharedEngine>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model_loaded": engine.model_loaded(),
    }))
}

/// JSON numbers are accepted alongside strings; `null` counts as missing.
fn fields_from_json(body: Map<String, Value>) -> HashMap<String, String> {
    body.into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key, s)),
            Value::Number(n) => Some((key, number_text(&n))),
            other => Some((key, other.to_string())),
        })
        .collect()
}

/// Whole-valued floats such as `1.0` are written as integers so they still
/// parse for integer fields.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

fn status_for(error: &PredictorError) -> StatusCode {
    match error {
        PredictorError::Encoding(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PredictorError::PredictorUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn log_rejection(error: &PredictorError) {
    match error.category() {
        crate::utils::error::ErrorCategory::Input => {
            tracing::info!("Rejected submission: {}", error)
        }
        category => tracing::error!(
            "Prediction failed: {} (Category: {:?}, Severity: {:?})",
            error,
            category,
            error.severity()
        ),
    }
}
