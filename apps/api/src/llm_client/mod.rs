/// LLM Client — the single point of entry for all Claude API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// Everything else talks to a `LanguageModel`; `LlmClient` is the production one.
///
/// Failures are surfaced to the caller as-is. There is no retry.
use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::conversation::session::ConversationMessage;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls.
pub const MODEL: &str = "claude-3-5-sonnet-20241022";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Applies to non-streaming calls only; a stream may legitimately stay open longer.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("stream error: {0}")]
    Stream(String),

    #[error("stream ended before message_stop")]
    IncompleteStream,

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Ordered text fragments of one streamed reply. Ends after the last fragment,
/// or with a single `Err` if the service fails mid-stream.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send>>;

/// One request to the language model: instruction block plus ordered history.
#[derive(Debug, Clone, Copy)]
pub struct ModelRequest<'a> {
    pub system: &'a str,
    pub messages: &'a [ConversationMessage],
    pub max_tokens: u32,
}

/// The language model service boundary. Implement this to swap backends
/// (or script replies in tests) without touching the chat bot.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// One complete reply.
    async fn complete(&self, request: ModelRequest<'_>) -> Result<String, LlmError>;

    /// A reply as incremental fragments. Errors before the first fragment are returned
    /// directly; later ones arrive inside the stream.
    async fn stream(&self, request: ModelRequest<'_>) -> Result<TextStream, LlmError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

impl<'a> AnthropicRequest<'a> {
    fn new(request: &ModelRequest<'a>, stream: bool) -> Self {
        Self {
            model: MODEL,
            max_tokens: request.max_tokens,
            system: request.system,
            messages: request
                .messages
                .iter()
                .map(|m| AnthropicMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            stream: stream.then_some(true),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// One server-sent event payload of the Messages streaming API.
/// Only the fields needed to extract text are modelled.
#[derive(Debug, Deserialize)]
struct StreamEvent {
    #[serde(rename = "type")]
    event_type: String,
    delta: Option<StreamDelta>,
    error: Option<AnthropicErrorBody>,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    #[serde(rename = "type")]
    delta_type: Option<String>,
    text: Option<String>,
}

/// Wraps the Anthropic Messages API for whole and streamed replies.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        let client = Client::builder().connect_timeout(CONNECT_TIMEOUT).build()?;
        Ok(Self { client, api_key })
    }

    async fn send(
        &self,
        body: &AnthropicRequest<'_>,
        timeout: Option<Duration>,
    ) -> Result<reqwest::Response, LlmError> {
        let mut builder = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(body);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!("LLM API returned {}: {}", status, body);
        Err(LlmError::Api {
            status: status.as_u16(),
            message: api_error_message(body),
        })
    }
}

#[async_trait]
impl LanguageModel for LlmClient {
    async fn complete(&self, request: ModelRequest<'_>) -> Result<String, LlmError> {
        let body = AnthropicRequest::new(&request, false);
        let response = self.send(&body, Some(REQUEST_TIMEOUT)).await?;
        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        llm_response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }

    async fn stream(&self, request: ModelRequest<'_>) -> Result<TextStream, LlmError> {
        let body = AnthropicRequest::new(&request, true);
        let response = self.send(&body, None).await?;
        Ok(sse_text_stream(response.bytes_stream()))
    }
}

/// What one SSE line means for the text stream.
#[derive(Debug, PartialEq)]
enum SseLine {
    Text(String),
    Stop,
    Failed(String),
    Skip,
}

fn parse_sse_line(line: &[u8]) -> SseLine {
    let line = String::from_utf8_lossy(line);
    let Some(data) = line.trim().strip_prefix("data:") else {
        return SseLine::Skip;
    };

    let event = match serde_json::from_str::<StreamEvent>(data.trim()) {
        Ok(event) => event,
        Err(e) => {
            debug!("Skipping unparseable SSE payload: {e}");
            return SseLine::Skip;
        }
    };

    match event.event_type.as_str() {
        "content_block_delta" => match event.delta {
            Some(StreamDelta {
                delta_type,
                text: Some(text),
            }) if delta_type.as_deref() == Some("text_delta") => SseLine::Text(text),
            _ => SseLine::Skip,
        },
        "message_stop" => SseLine::Stop,
        "error" => SseLine::Failed(
            event
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| "unknown stream error".to_string()),
        ),
        _ => SseLine::Skip,
    }
}

/// Turns a raw SSE byte stream from the Messages API into text fragments.
///
/// Lines are split on raw bytes so a multi-byte character cut across two
/// chunks is decoded intact. The stream ends cleanly only on `message_stop`;
/// an `error` event or EOF before it yields one error and ends.
pub fn sse_text_stream<S, B, E>(bytes: S) -> TextStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Send + 'static,
    LlmError: From<E>,
{
    Box::pin(async_stream::stream! {
        let mut bytes = Box::pin(bytes);
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk) = bytes.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    yield Err(LlmError::from(e));
                    return;
                }
            };
            buffer.extend_from_slice(chunk.as_ref());

            while let Some(line_end) = buffer.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=line_end).collect();
                match parse_sse_line(&line) {
                    SseLine::Text(text) => {
                        yield Ok(text);
                    }
                    SseLine::Stop => return,
                    SseLine::Failed(message) => {
                        yield Err(LlmError::Stream(message));
                        return;
                    }
                    SseLine::Skip => {}
                }
            }
        }

        // The last line may arrive without a trailing newline.
        match parse_sse_line(&buffer) {
            SseLine::Text(text) => {
                yield Ok(text);
            }
            SseLine::Stop => return,
            SseLine::Failed(message) => {
                yield Err(LlmError::Stream(message));
                return;
            }
            SseLine::Skip => {}
        }

        yield Err(LlmError::IncompleteStream);
    })
}

/// Message to surface for a failed API call: the `error.message` of an
/// Anthropic error body, or the raw body when it is anything else.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<AnthropicError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}
