use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use speechgate_engine::{
    AdapterError, AudioSpec, CloudSynthesizer, Handler, HandlerConfig, LocalModel, ModelLoader,
    Synthesized, VoiceOptions, Waveform,
};
use speechgate_server::{ROOT_MESSAGE, router, serve};

const MP3: &[u8] = &[0xff, 0xf3, 0x44, 0xc4, 0x00, 0x00];

struct FixedCloud;

#[async_trait]
impl CloudSynthesizer for FixedCloud {
    async fn synthesize(&self, _text: &str, _language: &str) -> Result<Vec<u8>, AdapterError> {
        Ok(MP3.to_vec())
    }
}

struct Tone;

impl LocalModel for Tone {
    fn synthesize(&self, _text: &str, _options: &VoiceOptions) -> Result<Synthesized, AdapterError> {
        Ok(Synthesized {
            spec: AudioSpec::mono(16000),
            waveform: Waveform::Chunks(vec![vec![0, 1000, 0, -1000], vec![0, 500]]),
        })
    }
}

async fn start(loader: ModelLoader) -> SocketAddr {
    let handler = Arc::new(Handler::new(
        Arc::new(FixedCloud),
        Arc::new(loader),
        HandlerConfig::default(),
    ));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(serve(listener, router(handler), std::future::pending()));
    addr
}

async fn start_ok() -> SocketAddr {
    start(ModelLoader::new(|| -> Result<Arc<dyn LocalModel>, AdapterError> {
        Ok(Arc::new(Tone))
    }))
    .await
}

async fn post_tts(addr: SocketAddr, body: Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("http://{addr}/api/tts"))
        .json(&body)
        .send()
        .await
        .expect("request")
}

async fn detail(response: reqwest::Response) -> String {
    let body: Value = response.json().await.expect("json body");
    body["detail"].as_str().expect("detail").to_string()
}

#[tokio::test]
async fn test_root_message() {
    let addr = start_ok().await;
    let response = reqwest::get(format!("http://{addr}/")).await.expect("request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("json");
    assert_eq!(body["message"], ROOT_MESSAGE);
}

#[tokio::test]
async fn test_cloud_returns_mpeg() {
    let addr = start_ok().await;
    let response = post_tts(addr, json!({"text": "안녕하세요", "engine": "cloud"})).await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["content-type"], "audio/mpeg");
    let bytes = response.bytes().await.expect("body");
    assert_eq!(bytes.as_ref(), MP3);
}

#[tokio::test]
async fn test_local_returns_wav() {
    let addr = start_ok().await;
    let response = post_tts(addr, json!({"text": "Hello", "engine": "local"})).await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["content-type"], "audio/wav");
    assert_eq!(response.headers()["x-sample-rate"], "16000");

    let bytes = response.bytes().await.expect("body");
    let mut reader = hound::WavReader::new(Cursor::new(bytes.to_vec())).expect("wav");
    assert_eq!(reader.spec().sample_rate, 16000);
    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.expect("sample")).collect();
    assert_eq!(samples, vec![0, 1000, 0, -1000, 0, 500]);
}

#[tokio::test]
async fn test_empty_text_is_bad_request() {
    let addr = start_ok().await;

    for body in [
        json!({"text": "", "engine": "cloud"}),
        json!({"text": "   ", "engine": "local"}),
        json!({"engine": "cloud"}),
    ] {
        let response = post_tts(addr, body).await;
        assert_eq!(response.status(), 400);
        assert!(!detail(response).await.is_empty());
    }
}

#[tokio::test]
async fn test_unknown_engine_is_bad_request() {
    let addr = start_ok().await;
    let response = post_tts(addr, json!({"text": "hello", "engine": "carrier-pigeon"})).await;

    assert_eq!(response.status(), 400);
    assert!(detail(response).await.contains("carrier-pigeon"));
}

#[tokio::test]
async fn test_blank_engine_is_bad_request() {
    let addr = start_ok().await;
    let response = post_tts(addr, json!({"text": "Hi", "engine": ""})).await;

    assert_eq!(response.status(), 400);
    assert!(detail(response).await.contains("unsupported engine"));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let addr = start_ok().await;
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/api/tts"))
        .header("content-type", "application/json")
        .body("{\"text\": ")
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 400);
    assert!(!detail(response).await.is_empty());
}

#[tokio::test]
async fn test_model_failure_is_server_error() {
    let addr = start(ModelLoader::new(|| -> Result<Arc<dyn LocalModel>, AdapterError> {
        Err(AdapterError::Backend("espeak-ng not found".into()))
    }))
    .await;

    for _ in 0..2 {
        let response = post_tts(addr, json!({"text": "hello", "engine": "local"})).await;
        assert_eq!(response.status(), 500);
        assert!(detail(response).await.contains("espeak-ng not found"));
    }

    // Still serving.
    let response = post_tts(addr, json!({"text": "hello", "engine": "cloud"})).await;
    assert_eq!(response.status(), 200);
}
