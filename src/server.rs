//! HTTP relay service.
//!
//! Exposes the cleanup and generation pipeline over JSON endpoints. Client
//! errors get a specific message; upstream failures are logged and answered
//! with a generic one.

use crate::config::Settings;
use crate::error::{Result, TubeSeoError};
use crate::pipeline::{ContentPipeline, SeoContent};
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Shared application state.
pub struct AppState {
    pipeline: ContentPipeline,
}

impl AppState {
    pub fn new(pipeline: ContentPipeline) -> Self {
        Self { pipeline }
    }
}

/// Room for the JSON envelope and the video title around the transcript.
const BODY_OVERHEAD_BYTES: usize = 64 * 1024;

/// Largest request body accepted for a transcript of `max_chars` characters.
pub fn request_body_limit(max_chars: usize) -> usize {
    max_chars
        .saturating_mul(4)
        .saturating_add(BODY_OVERHEAD_BYTES)
}

/// Build the relay router.
pub fn router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    let body_limit = request_body_limit(state.pipeline.max_transcript_chars());

    Router::new()
        .route("/health", get(health))
        .route("/api/clean-transcript", post(clean_transcript))
        .route("/api/generate-content", post(generate_content))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(state)
}

/// CORS policy from settings. No configured origins means any origin.
pub fn cors_layer(settings: &Settings) -> Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if settings.server.allowed_origins.is_empty() {
        return Ok(cors.allow_origin(Any));
    }

    let origins = settings
        .server
        .allowed_origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o)
                .map_err(|e| TubeSeoError::Config(format!("Invalid CORS origin {:?}: {}", o, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(cors.allow_origin(AllowOrigin::list(origins)))
}

// === Request/Response Types ===

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanRequest {
    #[serde(default)]
    pub transcript: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanResponse {
    pub cleaned_transcript: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub video_title: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse<'a> {
    status: &'a str,
    provider: &'a str,
    model: &'a str,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Map a pipeline failure to a response. `generic` hides upstream details.
fn failure_response(request_id: Uuid, err: TubeSeoError, generic: &str) -> Response {
    match err {
        TubeSeoError::InvalidInput(msg) => {
            warn!(%request_id, "Rejected request: {}", msg);
            error_response(StatusCode::BAD_REQUEST, msg)
        }
        err @ TubeSeoError::TranscriptTooLong { .. } => {
            warn!(%request_id, "Rejected request: {}", err);
            error_response(StatusCode::PAYLOAD_TOO_LARGE, err.to_string())
        }
        err => {
            error!(%request_id, error = %err, "{}", generic);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, generic)
        }
    }
}

/// Map a body extraction failure. Bodies over the size limit are 413.
fn rejection_response(request_id: Uuid, rejection: JsonRejection) -> Response {
    let message = rejection.body_text();
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!(%request_id, "Request body too large: {}", message);
        return error_response(StatusCode::PAYLOAD_TOO_LARGE, "Transcript is too long");
    }

    warn!(%request_id, "Invalid request body: {}", message);
    error_response(StatusCode::BAD_REQUEST, message)
}

fn require_transcript(transcript: Option<String>) -> std::result::Result<String, Response> {
    transcript
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "Transcript is required"))
}

// === Handlers ===

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let provider = state.pipeline.provider();
    Json(HealthResponse {
        status: "ok",
        provider: provider.name(),
        model: provider.model(),
    })
    .into_response()
}

async fn clean_transcript(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<CleanRequest>, JsonRejection>,
) -> Response {
    let request_id = Uuid::new_v4();

    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejection_response(request_id, rejection),
    };
    let transcript = match require_transcript(req.transcript) {
        Ok(t) => t,
        Err(resp) => return resp,
    };

    info!(%request_id, chars = transcript.len(), "Clean transcript request");

    match state.pipeline.clean_transcript(&transcript).await {
        Ok(cleaned_transcript) => {
            info!(%request_id, chars = cleaned_transcript.len(), "Transcript cleaned");
            Json(CleanResponse { cleaned_transcript }).into_response()
        }
        Err(e) => failure_response(request_id, e, "Failed to clean transcript"),
    }
}

async fn generate_content(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let request_id = Uuid::new_v4();

    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejection_response(request_id, rejection),
    };
    let transcript = match require_transcript(req.transcript) {
        Ok(t) => t,
        Err(resp) => return resp,
    };

    info!(
        %request_id,
        chars = transcript.len(),
        title = req.video_title.as_deref().unwrap_or(""),
        "Generate content request"
    );

    match state
        .pipeline
        .generate_content(&transcript, req.video_title.as_deref())
        .await
    {
        Ok(content) => {
            info!(%request_id, title = %content.title, "Content generated");
            Json::<SeoContent>(content).into_response()
        }
        Err(e) => failure_response(request_id, e, "Failed to generate content"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{ChatProvider, CompletionRequest};
    use crate::pipeline::PipelineOptions;
    use async_trait::async_trait;
    use axum::body::to_bytes;

    struct FixedProvider(std::result::Result<&'static str, u16>);

    #[async_trait]
    impl ChatProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn model(&self) -> &str {
            "fixed-1"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
            match self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(status) => Err(TubeSeoError::Provider {
                    status,
                    message: "secret upstream detail".to_string(),
                }),
            }
        }
    }

    fn state(provider: FixedProvider) -> Arc<AppState> {
        let pipeline = ContentPipeline::new(Arc::new(provider)).with_options(PipelineOptions {
            max_transcript_chars: 20,
            ..PipelineOptions::default()
        });
        Arc::new(AppState::new(pipeline))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_clean_ok() {
        let state = state(FixedProvider(Ok("Clean text.")));
        let response = clean_transcript(
            State(state),
            Ok(Json(CleanRequest {
                transcript: Some("raw text".to_string()),
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["cleanedTranscript"], "Clean text.");
    }

    #[tokio::test]
    async fn test_missing_transcript_is_bad_request() {
        let state = state(FixedProvider(Ok("unused")));

        let response = clean_transcript(
            State(state.clone()),
            Ok(Json(CleanRequest { transcript: None })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Transcript is required");

        let response = generate_content(
            State(state),
            Ok(Json(GenerateRequest {
                transcript: Some("   ".to_string()),
                video_title: None,
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_oversized_transcript() {
        let state = state(FixedProvider(Ok("unused")));
        let response = clean_transcript(
            State(state),
            Ok(Json(CleanRequest {
                transcript: Some("x".repeat(21)),
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_generic() {
        let state = state(FixedProvider(Err(529)));
        let response = generate_content(
            State(state),
            Ok(Json(GenerateRequest {
                transcript: Some("text".to_string()),
                video_title: Some("Title".to_string()),
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Failed to generate content");
        assert!(!body.to_string().contains("secret"));
    }

    #[tokio::test]
    async fn test_generate_ok() {
        let state = state(FixedProvider(Ok(
            r#"{"title": "T", "description": "D", "keyPoints": ["k"]}"#,
        )));
        let response = generate_content(
            State(state),
            Ok(Json(GenerateRequest {
                transcript: Some("text".to_string()),
                video_title: None,
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["title"], "T");
        assert_eq!(body["keyPoints"][0], "k");
    }

    #[tokio::test]
    async fn test_unparseable_content_is_generic_error() {
        let state = state(FixedProvider(Ok("no json here")));
        let response = generate_content(
            State(state),
            Ok(Json(GenerateRequest {
                transcript: Some("text".to_string()),
                video_title: None,
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Failed to generate content");
    }

    #[test]
    fn test_request_body_limit_covers_multibyte_transcript() {
        assert!(request_body_limit(1000) >= 4000);
        assert_eq!(request_body_limit(usize::MAX), usize::MAX);
    }

    #[test]
    fn test_cors_layer_rejects_bad_origin() {
        let mut settings = Settings::default();
        assert!(cors_layer(&settings).is_ok());

        settings.server.allowed_origins = vec!["https://example.com".to_string()];
        assert!(cors_layer(&settings).is_ok());

        settings.server.allowed_origins = vec!["bad\norigin".to_string()];
        assert!(matches!(cors_layer(&settings), Err(TubeSeoError::Config(_))));
    }
}
