//! AI Mission Advisor
//!
//! Conversational layer on top of the acquisition pipeline: a streaming
//! chat session seeded from each run's data summary, plus the shared
//! backend trait and response-parsing rules used by the forecast and
//! mission-planning features.
//!
//! The backend client is injected as an explicit dependency everywhere a
//! call is made, so tests substitute scripted implementations.

use thiserror::Error;

pub mod backend;
pub mod gemini;
pub mod parsing;
pub mod session;

pub use backend::{AdvisorBackend, ChunkStream};
pub use gemini::GeminiBackend;
pub use session::{AdvisorSession, STREAM_ERROR_REPLY};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("advisor request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("advisor endpoint returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("response stream interrupted: {0}")]
    Stream(String),

    #[error("response parse failed: {0}")]
    Parse(String),

    #[error("a request is already in flight")]
    Busy,

    #[error("no advisor session is open")]
    NoSession,
}
