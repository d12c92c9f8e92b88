//! HTTP surface of speechgate.
//!
//! Routes:
//! - `GET /`         - `{message}` banner
//! - `POST /api/tts` - JSON `{text, engine?, language?, speaker?}`, answers
//!   with `audio/mpeg` (cloud) or `audio/wav` (local) bytes
//!
//! Failures are JSON `{detail}` with status 400 for caller errors and 500
//! for server-side ones.

use std::future::Future;
use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use speechgate_engine::{Handler, SynthesisResult, TtsError, TtsRequest};

/// Message returned by `GET /`.
pub const ROOT_MESSAGE: &str = "TTS server is running. Use the /api/tts endpoint.";

#[derive(Debug, Serialize)]
struct Message {
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

/// A JSON error response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<TtsError> for ApiError {
    fn from(err: TtsError) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            detail: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: format!("invalid request body: {}", rejection.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}

/// Builds the application router.
pub fn router(handler: Arc<Handler>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/tts", post(tts))
        .layer(TraceLayer::new_for_http())
        .with_state(handler)
}

/// Serves `router` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("server: listening on http://{}", addr);
        info!("  - GET  /         status message");
        info!("  - POST /api/tts  synthesize speech");
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn root() -> Json<Message> {
    Json(Message {
        message: ROOT_MESSAGE,
    })
}

async fn tts(
    State(handler): State<Arc<Handler>>,
    payload: Result<Json<TtsRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    debug!(engine = ?request.engine, "server: tts request");

    let result = handler.handle(request).await?;
    Ok(audio_response(result))
}

fn audio_response(result: SynthesisResult) -> Response {
    let mut response = (
        [(header::CONTENT_TYPE, result.media_type.as_str())],
        Body::from(result.audio),
    )
        .into_response();
    if let Some(rate) = result.sample_rate {
        response
            .headers_mut()
            .insert("x-sample-rate", rate.into());
    }
    response
}
