//! # Advisor Client
//!
//! The [`Advisor`] trait is what the rest of the site sees: give it the
//! visitor's message and the current catalog, get back an ordered stream of
//! text fragments. [`GeminiClient`] implements it over the Gemini
//! `streamGenerateContent` endpoint.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stream_reply(message, products)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  session lock ──► ChatSession::for_catalog ──► request body             │
//! │       │            (history + system instruction + new user turn)       │
//! │       ▼                                                                 │
//! │  POST {endpoint}/models/{model}:streamGenerateContent?alt=sse           │
//! │       │   x-goog-api-key: ...                                           │
//! │       ▼                                                                 │
//! │  non-2xx ──► Err(Status)                                                │
//! │  2xx     ──► ReplyStream                                                │
//! │                bytes ──► SseDecoder ──► candidates[0].parts[*].text     │
//! │                end of body ──► exchange recorded in the session         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dropping the [`ReplyStream`] drops the response body, which aborts the
//! request. An exchange that did not finish is not added to the history.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream};
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use sanivita_core::{ChatRole, Product};

use crate::config::AdvisorConfig;
use crate::error::{AdvisorError, AdvisorResult};
use crate::session::{CatalogFingerprint, ChatSession};
use crate::sse::SseDecoder;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Ordered reply fragments. Ends after the last fragment or the first error.
pub type ReplyStream = BoxStream<'static, AdvisorResult<String>>;

// =============================================================================
// Advisor Trait
// =============================================================================

/// Produces streamed replies grounded in the product catalog.
#[async_trait]
pub trait Advisor: Send + Sync {
    /// Starts a reply to `message`.
    ///
    /// Errors before the first fragment (no key, connection refused, non-2xx
    /// status) are returned directly; later errors arrive as the stream's
    /// last item.
    async fn stream_reply(&self, message: &str, products: &[Product])
        -> AdvisorResult<ReplyStream>;
}

#[async_trait]
impl<A: Advisor + ?Sized> Advisor for Arc<A> {
    async fn stream_reply(
        &self,
        message: &str,
        products: &[Product],
    ) -> AdvisorResult<ReplyStream> {
        (**self).stream_reply(message, products).await
    }
}

// =============================================================================
// Wire Format
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: WireContent<'a>,
    contents: Vec<WireContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct WireContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<ChatRole>,
    parts: [WirePart<'a>; 1],
}

impl<'a> WireContent<'a> {
    fn new(role: Option<ChatRole>, text: &'a str) -> Self {
        WireContent {
            role,
            parts: [WirePart { text }],
        }
    }
}

#[derive(Debug, Serialize)]
struct WirePart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

fn request_body(session: &ChatSession, message: &str, temperature: f32) -> AdvisorResult<Vec<u8>> {
    let mut contents: Vec<WireContent<'_>> = session
        .history()
        .iter()
        .map(|turn| WireContent::new(Some(turn.role), &turn.text))
        .collect();
    contents.push(WireContent::new(Some(ChatRole::User), message));

    let request = GenerateRequest {
        system_instruction: WireContent::new(None, session.system_instruction()),
        contents,
        generation_config: GenerationConfig { temperature },
    };

    Ok(serde_json::to_vec(&request)?)
}

/// Extracts the text of one streamed event. `Ok(None)` for events that carry
/// no text (safety metadata, usage counts).
fn chunk_text(payload: &str) -> AdvisorResult<Option<String>> {
    let chunk: StreamChunk = serde_json::from_str(payload)?;

    if let Some(error) = chunk.error {
        return Err(AdvisorError::Api(error.message));
    }

    let text: String = chunk
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    Ok((!text.is_empty()).then_some(text))
}

// =============================================================================
// Gemini Client
// =============================================================================

/// [`Advisor`] backed by the Gemini API. Clones share the chat session.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: AdvisorConfig,
    session: Arc<Mutex<Option<ChatSession>>>,
}

impl GeminiClient {
    /// Creates a client. Fails only on invalid configuration.
    pub fn new(config: AdvisorConfig) -> AdvisorResult<Self> {
        config.validate()?;

        // A reply may stream for longer than the timeout; only stalls count.
        let http = reqwest::Client::builder()
            .connect_timeout(config.timeout())
            .read_timeout(config.timeout())
            .build()?;

        info!(model = %config.model, "Advisor client ready");

        Ok(GeminiClient {
            http,
            config,
            session: Arc::new(Mutex::new(None)),
        })
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Number of turns remembered by the current session.
    pub async fn history_len(&self) -> usize {
        self.session
            .lock()
            .await
            .as_ref()
            .map_or(0, |s| s.history().len())
    }
}

#[async_trait]
impl Advisor for GeminiClient {
    async fn stream_reply(
        &self,
        message: &str,
        products: &[Product],
    ) -> AdvisorResult<ReplyStream> {
        let api_key = self.config.api_key().ok_or(AdvisorError::MissingApiKey)?;

        let (body, fingerprint, history) = {
            let mut slot = self.session.lock().await;
            let session = ChatSession::for_catalog(&mut slot, products);
            (
                request_body(session, message, self.config.temperature)?,
                session.fingerprint(),
                session.history().len(),
            )
        };

        debug!(model = %self.config.model, history, "Requesting advisor reply");

        let response = self
            .http
            .post(self.config.stream_url())
            .header(API_KEY_HEADER, api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Advisor request rejected");
            return Err(AdvisorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let state = StreamState {
            body: response
                .bytes_stream()
                .map(|chunk| chunk.map(|bytes| bytes.to_vec()))
                .boxed(),
            decoder: SseDecoder::new(),
            pending: VecDeque::new(),
            body_ended: false,
            finished: false,
            user_text: message.to_string(),
            reply: String::new(),
            fingerprint,
            session: Arc::clone(&self.session),
        };

        Ok(stream::unfold(state, next_fragment).boxed())
    }
}

// =============================================================================
// Reply Stream
// =============================================================================

struct StreamState {
    body: BoxStream<'static, reqwest::Result<Vec<u8>>>,
    decoder: SseDecoder,
    pending: VecDeque<String>,
    body_ended: bool,
    finished: bool,
    user_text: String,
    reply: String,
    fingerprint: CatalogFingerprint,
    session: Arc<Mutex<Option<ChatSession>>>,
}

impl StreamState {
    fn fail(mut self, err: AdvisorError) -> Option<(AdvisorResult<String>, StreamState)> {
        warn!(error = %err, "Advisor stream failed");
        self.finished = true;
        self.pending.clear();
        Some((Err(err), self))
    }

    /// Adds the finished exchange to the session it was asked in. Skipped if
    /// the catalog changed meanwhile (that session is already gone).
    async fn commit(&mut self) {
        let mut slot = self.session.lock().await;
        if let Some(session) = slot.as_mut().filter(|s| s.fingerprint() == self.fingerprint) {
            session.record(
                std::mem::take(&mut self.user_text),
                std::mem::take(&mut self.reply),
            );
        }
    }
}

async fn next_fragment(mut state: StreamState) -> Option<(AdvisorResult<String>, StreamState)> {
    loop {
        if state.finished {
            return None;
        }

        if let Some(payload) = state.pending.pop_front() {
            match chunk_text(&payload) {
                Ok(Some(text)) => {
                    state.reply.push_str(&text);
                    return Some((Ok(text), state));
                }
                Ok(None) => continue,
                Err(e) => return state.fail(e),
            }
        }

        if state.body_ended {
            state.finished = true;
            debug!(chars = state.reply.chars().count(), "Advisor reply complete");
            state.commit().await;
            return None;
        }

        match state.body.next().await {
            Some(Ok(chunk)) => {
                let events = state.decoder.push(&chunk);
                state.pending.extend(events);
            }
            Some(Err(e)) => return state.fail(e.into()),
            None => {
                state.body_ended = true;
                if let Some(tail) = state.decoder.finish() {
                    state.pending.push_back(tail);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn products() -> Vec<Product> {
        vec![Product {
            id: "1".to_string(),
            name: "ابسيمارتا شراب".to_string(),
            category: "صحة الجهاز التنفسي".to_string(),
            description: "مذيب للبلغم".to_string(),
            benefits: vec!["يهدئ السعال".to_string()],
            image: String::new(),
            price: Some("55 ج.م".to_string()),
            icon: "wind".to_string(),
        }]
    }

    /// Serves one canned HTTP response and hands back the raw request.
    async fn serve_once(status_line: &str, body: &str) -> (String, tokio::task::JoinHandle<String>) {
        serve_paced(status_line, vec![body.to_string()], Duration::ZERO).await
    }

    /// Like [`serve_once`], but writes the body in parts with `gap` between them.
    async fn serve_paced(
        status_line: &str,
        parts: Vec<String>,
        gap: Duration,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let head = format!(
            "{status_line}\r\nContent-Type: text/event-stream\r\nConnection: close\r\n\r\n"
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|l| {
                            l.to_ascii_lowercase()
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap())
                        })
                        .unwrap_or(0);
                    if request.len() >= end + 4 + length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            socket.write_all(head.as_bytes()).await.unwrap();
            for (i, part) in parts.iter().enumerate() {
                if i > 0 {
                    tokio::time::sleep(gap).await;
                }
                socket.write_all(part.as_bytes()).await.unwrap();
                socket.flush().await.unwrap();
            }
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{addr}/v1beta"), handle)
    }

    fn client(endpoint: String) -> GeminiClient {
        GeminiClient::new(AdvisorConfig {
            endpoint,
            api_key: Some("test-key".to_string()),
            ..AdvisorConfig::default()
        })
        .unwrap()
    }

    fn event(text: &str) -> String {
        format!(
            "data: {}\r\n\r\n",
            serde_json::json!({"candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]})
        )
    }

    #[test]
    fn test_chunk_text_concatenates_parts() {
        let payload = r#"{"candidates":[{"content":{"parts":[{"text":"a"},{"text":"b"}]}}]}"#;
        assert_eq!(chunk_text(payload).unwrap().as_deref(), Some("ab"));
        assert_eq!(chunk_text(r#"{"candidates":[]}"#).unwrap(), None);
        assert!(matches!(
            chunk_text(r#"{"error":{"message":"quota"}}"#),
            Err(AdvisorError::Api(m)) if m == "quota"
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let mut session = ChatSession::new(&products());
        session.record("hi", "hello");
        let body = request_body(&session, "cough?", 0.7).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert!(json["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("ابسيمارتا"));
        assert!(json["systemInstruction"].get("role").is_none());
        assert_eq!(json["contents"].as_array().unwrap().len(), 3);
        assert_eq!(json["contents"][1]["role"], "model");
        assert_eq!(json["contents"][2]["parts"][0]["text"], "cough?");
        assert!((json["generationConfig"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_request() {
        let client = GeminiClient::new(AdvisorConfig::default()).unwrap();
        let err = client.stream_reply("hi", &products()).await.err().unwrap();
        assert!(matches!(err, AdvisorError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_streams_fragments_and_records_exchange() {
        let body = format!("{}{}", event("أهلاً "), event("بك"));
        let (endpoint, server) = serve_once("HTTP/1.1 200 OK", &body).await;
        let client = client(endpoint);

        let stream = client.stream_reply("مرحبا", &products()).await.unwrap();
        let fragments: Vec<String> = stream.map(|f| f.unwrap()).collect().await;
        assert_eq!(fragments, vec!["أهلاً ", "بك"]);
        assert_eq!(client.history_len().await, 2);

        let request = server.await.unwrap();
        assert!(request.starts_with(
            "POST /v1beta/models/gemini-2.5-flash:streamGenerateContent?alt=sse"
        ));
        assert!(request.to_ascii_lowercase().contains("x-goog-api-key: test-key"));
    }

    #[tokio::test]
    async fn test_error_status_is_returned() {
        let (endpoint, _server) = serve_once("HTTP/1.1 403 Forbidden", "denied").await;
        let client = client(endpoint);

        let err = client.stream_reply("hi", &products()).await.err().unwrap();
        assert!(matches!(err, AdvisorError::Status { status: 403, .. }));
        assert_eq!(client.history_len().await, 0);
    }

    #[tokio::test]
    async fn test_malformed_event_ends_stream_with_error() {
        let body = format!("{}data: not-json\n\n{}", event("a"), event("b"));
        let (endpoint, _server) = serve_once("HTTP/1.1 200 OK", &body).await;
        let client = client(endpoint);

        let items: Vec<_> = client
            .stream_reply("hi", &products())
            .await
            .unwrap()
            .collect()
            .await;
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(matches!(items[1], Err(AdvisorError::Decode(_))));
        assert_eq!(client.history_len().await, 0);
    }

    #[tokio::test]
    async fn test_slow_reply_outlasting_timeout_still_completes() {
        // Each gap fits in the timeout; the whole reply does not.
        let parts = vec![event("أ"), event("ب"), event("ت"), event("ث")];
        let (endpoint, _server) =
            serve_paced("HTTP/1.1 200 OK", parts, Duration::from_millis(500)).await;
        let client = GeminiClient::new(AdvisorConfig {
            endpoint,
            api_key: Some("test-key".to_string()),
            timeout_secs: 1,
            ..AdvisorConfig::default()
        })
        .unwrap();

        let stream = client.stream_reply("hi", &products()).await.unwrap();
        let fragments: Vec<String> = stream.map(|f| f.unwrap()).collect().await;
        assert_eq!(fragments, vec!["أ", "ب", "ت", "ث"]);
        assert_eq!(client.history_len().await, 2);
    }
}
