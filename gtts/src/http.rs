//! HTTP plumbing for the Google Translate `batchexecute` endpoint.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{
    Client as ReqwestClient,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue, REFERER, USER_AGENT},
};
use serde_json::{Value, json};

use super::error::{Error, Result};

/// Path of the RPC endpoint relative to the base URL.
pub const BATCHEXECUTE_PATH: &str = "/_/TranslateWebServerUi/data/batchexecute";

/// RPC id of the text-to-speech call.
pub const TTS_RPC_ID: &str = "jQ1olc";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/47.0.2526.106 Safari/537.36";

static AUDIO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"jQ1olc","\[\\"(.*)\\"]"#).expect("valid regex"));

/// HTTP client for the TTS endpoint.
pub struct HttpClient {
    client: ReqwestClient,
    base_url: String,
    tld: String,
}

impl HttpClient {
    /// Creates a new HTTP client.
    pub fn new(base_url: String, tld: String, timeout: Duration) -> Result<Self> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            tld,
        })
    }

    /// Sends one TTS RPC and returns the decoded MP3 bytes.
    pub async fn speak(&self, text: &str, lang: &str, slow: bool) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, BATCHEXECUTE_PATH);
        let payload = rpc_payload(text, lang, slow)?;

        let response = self
            .client
            .post(&url)
            .headers(default_headers())
            .form(&[("f.req", payload)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::api(status.as_u16(), &self.tld));
        }

        let body = response.text().await?;
        parse_audio(&body, lang)
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        REFERER,
        HeaderValue::from_static("http://translate.google.com/"),
    );
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded;charset=utf-8"),
    );
    headers
}

/// Builds the `f.req` form value for one text part.
///
/// The inner parameter list is itself JSON-encoded into a string, as the
/// endpoint expects.
pub fn rpc_payload(text: &str, lang: &str, slow: bool) -> Result<String> {
    let speed = if slow { Value::Bool(true) } else { Value::Null };
    let parameter = serde_json::to_string(&json!([text, lang, speed, "null"]))?;
    let rpc = json!([[[TTS_RPC_ID, parameter, Value::Null, "generic"]]]);
    Ok(serde_json::to_string(&rpc)?)
}

/// Extracts the base64 audio from a `batchexecute` response body.
pub fn parse_audio(body: &str, lang: &str) -> Result<Vec<u8>> {
    for line in body.lines() {
        if !line.contains(TTS_RPC_ID) {
            continue;
        }
        return match AUDIO_RE.captures(line) {
            Some(caps) => Ok(BASE64.decode(caps[1].as_bytes())?),
            None => Err(Error::NoAudio {
                lang: lang.to_string(),
            }),
        };
    }

    Err(Error::NoAudio {
        lang: lang.to_string(),
    })
}
