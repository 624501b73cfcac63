//! HTTP handlers for the detector form and JSON API

use askama_axum::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::inference::{SpamDetector, Verdict};

/// Shared application state
pub struct AppState {
    pub detector: SpamDetector,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    email_text: String,
    result: String,
    error: String,
}

#[derive(Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    email_text: String,
}

/// API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(msg: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub verdict: Verdict,
    pub message: String,
    /// 1 = spam, 0 = ham; absent for empty input
    pub label: Option<u8>,
    pub spam_probability: Option<f64>,
}

// Form page (GET)
pub async fn index() -> impl IntoResponse {
    IndexTemplate {
        email_text: String::new(),
        result: String::new(),
        error: String::new(),
    }
}

// Form submission (POST)
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AnalyzeForm>,
) -> Response {
    match state.detector.classify(&form.email_text) {
        Ok(prediction) => IndexTemplate {
            email_text: form.email_text,
            result: prediction.verdict.message().to_string(),
            error: String::new(),
        }
        .into_response(),
        Err(e) => {
            error!("Prediction failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                IndexTemplate {
                    email_text: form.email_text,
                    result: String::new(),
                    error: format!("Prediction failed: {}", e),
                },
            )
                .into_response()
        }
    }
}

/// Classify one email (JSON)
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PredictRequest>,
) -> (StatusCode, Json<ApiResponse<PredictResponse>>) {
    match state.detector.classify(&req.text) {
        Ok(prediction) => (
            StatusCode::OK,
            Json(ApiResponse::success(PredictResponse {
                verdict: prediction.verdict,
                message: prediction.verdict.message().to_string(),
                label: prediction.verdict.label().map(|l| l.as_u8()),
                spam_probability: prediction.spam_probability,
            })),
        ),
        Err(e) => {
            error!("Prediction failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(&format!("Prediction failed: {}", e))),
            )
        }
    }
}

pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let bundle = state.detector.bundle();
    Json(json!({
        "status": "ok",
        "bundle_id": bundle.bundle_id,
        "trained_at": bundle.trained_at.to_rfc3339(),
        "vocabulary_size": bundle.vectorizer.vocabulary_len(),
    }))
}
