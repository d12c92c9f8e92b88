use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use speechgate_gtts::http::BATCHEXECUTE_PATH;
use speechgate_gtts::{Client, Error, SpeechRequest};

#[derive(Clone)]
struct MockState {
    calls: Arc<AtomicUsize>,
    status: StatusCode,
    with_audio: bool,
}

impl MockState {
    fn new(status: StatusCode, with_audio: bool) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            status,
            with_audio,
        }
    }
}

/// Answers like the real endpoint, with "audio" equal to `<lang>:<text>|`.
async fn batchexecute(
    State(state): State<MockState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.calls.fetch_add(1, Ordering::SeqCst);
    if state.status != StatusCode::OK {
        return state.status.into_response();
    }
    if !state.with_audio {
        return ")]}'\n\n25\n[[\"e\",4,null,null,140]]\n".into_response();
    }

    let rpc: serde_json::Value = serde_json::from_str(&form["f.req"]).expect("f.req json");
    let params: serde_json::Value =
        serde_json::from_str(rpc[0][0][1].as_str().expect("params")).expect("params json");
    let text = params[0].as_str().expect("text");
    let lang = params[1].as_str().expect("lang");

    let audio = BASE64.encode(format!("{lang}:{text}|"));
    format!(
        ")]}}'\n\n104\n[[\"wrb.fr\",\"jQ1olc\",\"[\\\"{audio}\\\"]\",null,null,null,\"generic\"]]\n"
    )
    .into_response()
}

async fn spawn_mock(state: MockState) -> String {
    let app = Router::new()
        .route(BATCHEXECUTE_PATH, post(batchexecute))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock");
    let addr = listener.local_addr().expect("mock addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock");
    });
    format!("http://{addr}")
}

fn client_for(base_url: &str) -> Client {
    Client::builder()
        .base_url(base_url)
        .build()
        .expect("build client")
}

#[tokio::test]
async fn test_synthesize_single_part() {
    let state = MockState::new(StatusCode::OK, true);
    let base = spawn_mock(state.clone()).await;

    let resp = client_for(&base)
        .speech()
        .synthesize(&SpeechRequest::new("Hello", "EN"))
        .await
        .expect("synthesize");

    assert_eq!(resp.audio, b"en:Hello|");
    assert_eq!(resp.parts, 1);
    assert_eq!(resp.lang, "en");
    assert_eq!(state.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_synthesize_concatenates_parts_in_order() {
    let state = MockState::new(StatusCode::OK, true);
    let base = spawn_mock(state.clone()).await;

    let sentence = "The quick brown fox jumps over the lazy dog.";
    let text = [sentence; 3].join(" ");
    let resp = client_for(&base)
        .speech()
        .synthesize(&SpeechRequest::new(text, "en"))
        .await
        .expect("synthesize");

    assert_eq!(resp.parts, 2);
    let expected = format!("en:{sentence} {sentence}|en:{sentence}|");
    assert_eq!(String::from_utf8(resp.audio).expect("utf8"), expected);
    assert_eq!(state.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_unsupported_language_skips_network() {
    let state = MockState::new(StatusCode::OK, true);
    let base = spawn_mock(state.clone()).await;

    let err = client_for(&base)
        .speech()
        .synthesize(&SpeechRequest::new("Hello", "carrier-pigeon"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UnsupportedLanguage(_)));
    assert!(err.is_invalid_input());
    assert_eq!(state.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_text_rejected() {
    let state = MockState::new(StatusCode::OK, true);
    let base = spawn_mock(state.clone()).await;

    let err = client_for(&base)
        .speech()
        .synthesize(&SpeechRequest::new(" ... ", "en"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::EmptyText));
    assert_eq!(state.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_forbidden_status() {
    let base = spawn_mock(MockState::new(StatusCode::FORBIDDEN, true)).await;

    let err = client_for(&base)
        .speech()
        .synthesize(&SpeechRequest::new("Hello", "en"))
        .await
        .unwrap_err();

    match err {
        Error::Api { status, cause } => {
            assert_eq!(status, 403);
            assert!(cause.contains("Bad token"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_response_without_audio() {
    let base = spawn_mock(MockState::new(StatusCode::OK, false)).await;

    let err = client_for(&base)
        .speech()
        .synthesize(&SpeechRequest::new("Hello", "en"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NoAudio { .. }));
    assert!(!err.is_invalid_input());
}

#[tokio::test]
#[ignore]
async fn test_live_google_translate() {
    let resp = Client::new()
        .expect("build client")
        .speech()
        .synthesize(&SpeechRequest::new("Hello", "en"))
        .await
        .expect("live synthesize");
    assert!(!resp.audio.is_empty());
}
