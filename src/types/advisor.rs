//! AI advisor conversation types

use serde::{Deserialize, Serialize};

/// Author of a transcript message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One message in the advisor transcript.
///
/// The content of the final message may still be growing while a response
/// streams in; every earlier message is frozen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into() }
    }
}

/// Conversation lifecycle of the advisor session.
///
/// `NoSession → Open` once a non-empty data summary is available;
/// `Open → AwaitingResponse → Streaming → Open` per exchange, with `Error`
/// reachable from the two in-flight states.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    NoSession,
    Open,
    AwaitingResponse,
    Streaming,
    Error,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionPhase::NoSession => write!(f, "NoSession"),
            SessionPhase::Open => write!(f, "Open"),
            SessionPhase::AwaitingResponse => write!(f, "AwaitingResponse"),
            SessionPhase::Streaming => write!(f, "Streaming"),
            SessionPhase::Error => write!(f, "Error"),
        }
    }
}
