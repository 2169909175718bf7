//! Advisor Chat Session
//!
//! Owns the conversation transcript and its streaming state machine:
//! `NoSession → Open` when a run's summary seeds the session, then
//! `Open → AwaitingResponse → Streaming → Open` per exchange. A stream
//! failure replaces the in-flight assistant message with a fixed error
//! string and leaves the rest of the transcript untouched.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::backend::AdvisorBackend;
use super::AdvisorError;
use crate::types::{ChatMessage, ChatRole, SessionPhase};

/// Shown in place of an assistant reply when its stream fails.
pub const STREAM_ERROR_REPLY: &str = "Error: Could not retrieve response.";

/// Persona every session is seeded with.
const SYSTEM_INSTRUCTION: &str = "You are 'SOLARIS', the AI Mission Advisor aboard a deep \
space solar observatory. Your tone is professional, technical, and slightly futuristic. \
Keep reports concise and mission-focused.";

/// First user turn of a fresh session, wrapping the acquisition summary.
fn initial_prompt(summary: &str) -> String {
    format!(
        "Analyze the following mission-critical solar data summary and provide a concise \
         report for the crew. Include: 1. a brief high-level summary of the current solar \
         state; 2. key observations or anomalies; 3. recommendations for the crew.\n\n\
         Data Summary:\n---\n{summary}\n---"
    )
}

#[derive(Debug, Default)]
struct SessionInner {
    phase: SessionPhase,
    transcript: Vec<ChatMessage>,
}

/// Streaming chat session against an injected advisor backend.
///
/// Cloneable handle; all clones share the same transcript. The session is
/// the transcript's only writer.
#[derive(Clone)]
pub struct AdvisorSession {
    backend: Arc<dyn AdvisorBackend>,
    inner: Arc<RwLock<SessionInner>>,
}

impl AdvisorSession {
    pub fn new(backend: Arc<dyn AdvisorBackend>) -> Self {
        Self {
            backend,
            inner: Arc::new(RwLock::new(SessionInner::default())),
        }
    }

    pub async fn phase(&self) -> SessionPhase {
        self.inner.read().await.phase
    }

    pub async fn is_open(&self) -> bool {
        self.inner.read().await.phase != SessionPhase::NoSession
    }

    /// Full transcript snapshot for the display layer.
    pub async fn transcript(&self) -> Vec<ChatMessage> {
        self.inner.read().await.transcript.clone()
    }

    /// Drop the session and its transcript. Called when a new acquisition
    /// run starts so the next summary seeds a fresh context.
    pub async fn close(&self) {
        let mut inner = self.inner.write().await;
        inner.phase = SessionPhase::NoSession;
        inner.transcript.clear();
        debug!("Advisor session closed");
    }

    /// Open a fresh session seeded with a run summary and stream the
    /// automatic first report.
    ///
    /// Rejects an empty summary ([`AdvisorError::NoSession`]) and an open
    /// session with a response still in flight ([`AdvisorError::Busy`]).
    pub async fn open(&self, summary: &str) -> Result<(), AdvisorError> {
        if summary.trim().is_empty() {
            return Err(AdvisorError::NoSession);
        }

        {
            let mut inner = self.inner.write().await;
            if matches!(
                inner.phase,
                SessionPhase::AwaitingResponse | SessionPhase::Streaming
            ) {
                return Err(AdvisorError::Busy);
            }
            inner.transcript.clear();
            inner.phase = SessionPhase::Open;
        }

        debug!(backend = self.backend.backend_name(), "Advisor session opened");
        self.exchange(initial_prompt(summary)).await
    }

    /// Send a crew message and stream the reply into the transcript.
    ///
    /// The user message is appended immediately; only one exchange may be
    /// in flight at a time.
    pub async fn send(&self, text: &str) -> Result<(), AdvisorError> {
        if !self.is_open().await {
            return Err(AdvisorError::NoSession);
        }
        self.exchange(text.to_string()).await
    }

    async fn exchange(&self, user_text: String) -> Result<(), AdvisorError> {
        // Optimistic append of the user turn plus an empty assistant
        // placeholder, under one lock so the busy guard is atomic.
        let history = {
            let mut inner = self.inner.write().await;
            if matches!(
                inner.phase,
                SessionPhase::AwaitingResponse | SessionPhase::Streaming
            ) {
                return Err(AdvisorError::Busy);
            }
            inner.phase = SessionPhase::AwaitingResponse;
            inner.transcript.push(ChatMessage::user(user_text));
            let history = inner.transcript.clone();
            inner.transcript.push(ChatMessage::assistant(""));
            history
        };

        let mut stream = match self.backend.stream_chat(SYSTEM_INSTRUCTION, &history).await {
            Ok(stream) => stream,
            Err(err) => {
                warn!(error = %err, "Advisor stream failed to open");
                self.fail_placeholder().await;
                return Err(err);
            }
        };

        while let Some(item) = stream.next().await {
            match item {
                Ok(chunk) => {
                    let mut inner = self.inner.write().await;
                    inner.phase = SessionPhase::Streaming;
                    if let Some(last) = inner.transcript.last_mut() {
                        last.content.push_str(&chunk);
                    }
                }
                Err(err) => {
                    warn!(error = %err, "Advisor stream interrupted");
                    self.fail_placeholder().await;
                    return Err(err);
                }
            }
        }

        self.inner.write().await.phase = SessionPhase::Open;
        Ok(())
    }

    /// Replace the in-flight assistant placeholder with the fixed error
    /// string. The user's message stays; nothing is rolled back.
    async fn fail_placeholder(&self) {
        let mut inner = self.inner.write().await;
        if let Some(last) = inner.transcript.last_mut() {
            if last.role == ChatRole::Assistant {
                last.content = STREAM_ERROR_REPLY.to_string();
            }
        }
        inner.phase = SessionPhase::Error;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::backend::ChunkStream;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Backend replaying a scripted chunk sequence per call.
    struct ScriptedBackend {
        script: Mutex<VecDeque<Vec<Result<String, AdvisorError>>>>,
    }

    impl ScriptedBackend {
        fn new(script: Vec<Vec<Result<String, AdvisorError>>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
            })
        }
    }

    #[async_trait]
    impl AdvisorBackend for ScriptedBackend {
        async fn stream_chat(
            &self,
            _system_instruction: &str,
            _history: &[ChatMessage],
        ) -> Result<ChunkStream, AdvisorError> {
            let chunks = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| AdvisorError::Stream("script exhausted".to_string()))?;
            Ok(Box::pin(futures::stream::iter(chunks)))
        }

        async fn generate(&self, _s: &str, _p: &str) -> Result<String, AdvisorError> {
            Ok(String::new())
        }

        async fn generate_json(
            &self,
            _s: &str,
            _p: &str,
            _schema: Option<serde_json::Value>,
        ) -> Result<String, AdvisorError> {
            Ok(String::new())
        }

        fn backend_name(&self) -> &'static str {
            "scripted"
        }
    }

    /// Backend whose stream never yields; keeps a session in flight.
    struct StalledBackend;

    #[async_trait]
    impl AdvisorBackend for StalledBackend {
        async fn stream_chat(
            &self,
            _s: &str,
            _h: &[ChatMessage],
        ) -> Result<ChunkStream, AdvisorError> {
            Ok(Box::pin(futures::stream::pending()))
        }

        async fn generate(&self, _s: &str, _p: &str) -> Result<String, AdvisorError> {
            Ok(String::new())
        }

        async fn generate_json(
            &self,
            _s: &str,
            _p: &str,
            _schema: Option<serde_json::Value>,
        ) -> Result<String, AdvisorError> {
            Ok(String::new())
        }

        fn backend_name(&self) -> &'static str {
            "stalled"
        }
    }

    fn chunks(parts: &[&str]) -> Vec<Result<String, AdvisorError>> {
        parts.iter().map(|p| Ok((*p).to_string())).collect()
    }

    #[tokio::test]
    async fn test_open_rejects_empty_summary() {
        let session = AdvisorSession::new(ScriptedBackend::new(vec![]));
        assert!(matches!(
            session.open("  ").await,
            Err(AdvisorError::NoSession)
        ));
        assert_eq!(session.phase().await, SessionPhase::NoSession);
    }

    #[tokio::test]
    async fn test_send_requires_open_session() {
        let session = AdvisorSession::new(ScriptedBackend::new(vec![]));
        assert!(matches!(
            session.send("status?").await,
            Err(AdvisorError::NoSession)
        ));
    }

    #[tokio::test]
    async fn test_open_streams_first_report() {
        let backend = ScriptedBackend::new(vec![chunks(&["All ", "systems ", "nominal."])]);
        let session = AdvisorSession::new(backend);

        session.open("Kp index is 3.").await.unwrap();

        let transcript = session.transcript().await;
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].role, ChatRole::User);
        assert!(transcript[0].content.contains("Kp index is 3."));
        assert_eq!(transcript[1].role, ChatRole::Assistant);
        assert_eq!(transcript[1].content, "All systems nominal.");
        assert_eq!(session.phase().await, SessionPhase::Open);
    }

    #[tokio::test]
    async fn test_followup_preserves_prior_messages() {
        let backend = ScriptedBackend::new(vec![
            chunks(&["Report one."]),
            chunks(&["Report ", "two."]),
        ]);
        let session = AdvisorSession::new(backend);

        session.open("summary").await.unwrap();
        session.send("And the proton flux?").await.unwrap();

        let transcript = session.transcript().await;
        assert_eq!(transcript.len(), 4);
        assert_eq!(transcript[1].content, "Report one.");
        assert_eq!(transcript[2].content, "And the proton flux?");
        assert_eq!(transcript[3].content, "Report two.");
    }

    #[tokio::test]
    async fn test_stream_error_replaces_placeholder_only() {
        let backend = ScriptedBackend::new(vec![
            chunks(&["Report one."]),
            vec![
                Ok("Par".to_string()),
                Err(AdvisorError::Stream("connection reset".to_string())),
            ],
        ]);
        let session = AdvisorSession::new(backend);

        session.open("summary").await.unwrap();
        let result = session.send("query").await;
        assert!(matches!(result, Err(AdvisorError::Stream(_))));

        let transcript = session.transcript().await;
        assert_eq!(transcript.len(), 4);
        // The user's message is not rolled back.
        assert_eq!(transcript[2].content, "query");
        assert_eq!(transcript[3].content, STREAM_ERROR_REPLY);
        assert_eq!(session.phase().await, SessionPhase::Error);

        // The session remains usable after an error.
        assert!(matches!(
            session.send("again").await,
            Err(AdvisorError::Stream(_))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_send_rejected() {
        let session = AdvisorSession::new(Arc::new(StalledBackend));

        let opener = {
            let session = session.clone();
            tokio::spawn(async move { session.open("summary").await })
        };

        // Let the opener reach its (never-ending) stream.
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert!(matches!(
            session.send("impatient").await,
            Err(AdvisorError::Busy)
        ));
        opener.abort();
    }
}
