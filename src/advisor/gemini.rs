//! Gemini HTTP Backend
//!
//! reqwest implementation of [`AdvisorBackend`] against the Google
//! generative-language API: `generateContent` for one-shot calls and
//! `streamGenerateContent` with SSE framing for chat streaming.

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::{json, Value};

use super::backend::{AdvisorBackend, ChunkStream};
use super::AdvisorError;
use crate::types::{ChatMessage, ChatRole};

/// HTTP client for the Gemini generative-language endpoint.
pub struct GeminiBackend {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiBackend {
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    fn endpoint(&self, verb: &str) -> String {
        format!(
            "{}/models/{}:{verb}?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    fn request_body(system_instruction: &str, history: &[ChatMessage]) -> Value {
        let contents: Vec<Value> = history
            .iter()
            .map(|m| {
                json!({
                    "role": match m.role {
                        ChatRole::User => "user",
                        ChatRole::Assistant => "model",
                    },
                    "parts": [{ "text": m.content }],
                })
            })
            .collect();

        json!({
            "system_instruction": { "parts": [{ "text": system_instruction }] },
            "contents": contents,
        })
    }

    async fn post_one_shot(&self, body: Value) -> Result<String, AdvisorError> {
        let resp = self
            .http
            .post(self.endpoint("generateContent"))
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(AdvisorError::Status(resp.status()));
        }

        let payload: Value = resp.json().await?;
        candidate_text(&payload)
            .ok_or_else(|| AdvisorError::Parse("response carried no candidate text".to_string()))
    }
}

#[async_trait]
impl AdvisorBackend for GeminiBackend {
    async fn stream_chat(
        &self,
        system_instruction: &str,
        history: &[ChatMessage],
    ) -> Result<ChunkStream, AdvisorError> {
        let body = Self::request_body(system_instruction, history);
        let resp = self
            .http
            .post(format!("{}&alt=sse", self.endpoint("streamGenerateContent")))
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(AdvisorError::Status(resp.status()));
        }

        tracing::debug!(model = %self.model, turns = history.len(), "Advisor stream opened");
        Ok(sse_chunk_stream(resp))
    }

    async fn generate(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> Result<String, AdvisorError> {
        let body = Self::request_body(system_instruction, &[ChatMessage::user(prompt)]);
        self.post_one_shot(body).await
    }

    async fn generate_json(
        &self,
        system_instruction: &str,
        prompt: &str,
        schema: Option<Value>,
    ) -> Result<String, AdvisorError> {
        let mut body = Self::request_body(system_instruction, &[ChatMessage::user(prompt)]);

        let mut config = json!({ "response_mime_type": "application/json" });
        if let Some(schema) = schema {
            config["response_schema"] = schema;
        }
        body["generationConfig"] = config;

        self.post_one_shot(body).await
    }

    fn backend_name(&self) -> &'static str {
        "gemini"
    }
}

// ============================================================================
// SSE Framing
// ============================================================================

/// Convert an SSE response body into a stream of text chunks.
///
/// Frames are `data: {json}` lines; each carries a partial candidate whose
/// parts are concatenated. Transport errors surface once and end the
/// stream on the consumer side.
fn sse_chunk_stream(resp: reqwest::Response) -> ChunkStream {
    let body = resp.bytes_stream();

    Box::pin(futures::stream::unfold(
        (body, String::new()),
        |(mut body, mut buf)| async move {
            loop {
                if let Some(pos) = buf.find('\n') {
                    let line: String = buf.drain(..=pos).collect();
                    let line = line.trim();

                    if let Some(payload) = line.strip_prefix("data:") {
                        let payload = payload.trim();
                        if payload == "[DONE]" {
                            return None;
                        }
                        match serde_json::from_str::<Value>(payload) {
                            Ok(frame) => {
                                if let Some(text) = candidate_text(&frame) {
                                    if !text.is_empty() {
                                        return Some((Ok(text), (body, buf)));
                                    }
                                }
                            }
                            Err(err) => {
                                return Some((
                                    Err(AdvisorError::Parse(format!(
                                        "malformed stream frame: {err}"
                                    ))),
                                    (body, buf),
                                ));
                            }
                        }
                    }
                    continue;
                }

                match body.next().await {
                    Some(Ok(bytes)) => buf.push_str(&String::from_utf8_lossy(&bytes)),
                    Some(Err(err)) => {
                        return Some((
                            Err(AdvisorError::Stream(err.to_string())),
                            (body, buf),
                        ));
                    }
                    None => return None,
                }
            }
        },
    ))
}

/// Concatenated text of the first candidate's parts.
fn candidate_text(payload: &Value) -> Option<String> {
    let parts = payload
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_text_concatenates_parts() {
        let payload = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Sol" }, { "text": "aris" }] }
            }]
        });
        assert_eq!(candidate_text(&payload).as_deref(), Some("Solaris"));
    }

    #[test]
    fn test_candidate_text_missing_candidates() {
        assert!(candidate_text(&json!({ "promptFeedback": {} })).is_none());
    }

    #[test]
    fn test_request_body_maps_roles() {
        let history = [
            ChatMessage::user("status?"),
            ChatMessage::assistant("nominal"),
        ];
        let body = GeminiBackend::request_body("persona", &history);

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][1]["role"], "model");
        assert_eq!(
            body["system_instruction"]["parts"][0]["text"],
            "persona"
        );
    }
}
