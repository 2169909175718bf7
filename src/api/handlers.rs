//! Dashboard endpoint handlers
//!
//! The display layer's only access to the core: read-only views of the
//! acquisition state and advisor transcript, plus the engage/chat/forecast/
//! mission commands. Handlers never mutate acquisition state directly; all
//! writes go through the engine and session.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::advisor::AdvisorError;
use crate::forecast::FORECAST_UNAVAILABLE;
use crate::mission::MISSION_PLAN_UNAVAILABLE;
use crate::types::{
    AcquisitionSnapshot, ChatMessage, InstrumentSelection, MissionRequest, SpectralBand,
    StatusEntry,
};

use super::envelope::{ApiErrorResponse, ApiResponse};
use super::DashboardState;

// ============================================================================
// Health & Status
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// GET /api/v1/health - Service liveness and process state
pub async fn get_health(State(state): State<DashboardState>) -> Json<HealthResponse> {
    let observatory = state.engine.state();
    let st = observatory.read().await;

    Json(HealthResponse {
        status: st.process_state.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Acquisition lifecycle state
    pub process_state: String,
    /// Whether a snapshot from a completed run is available
    pub snapshot_available: bool,
    /// Timestamped status feed for the current/most recent run
    pub status_feed: Vec<StatusFeedLine>,
}

#[derive(Debug, Serialize)]
pub struct StatusFeedLine {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub message: String,
    /// Pre-rendered "[HH:MM:SS] message" form for plain feeds
    pub rendered: String,
}

impl From<&StatusEntry> for StatusFeedLine {
    fn from(entry: &StatusEntry) -> Self {
        Self {
            timestamp: entry.timestamp,
            message: entry.message.clone(),
            rendered: entry.to_string(),
        }
    }
}

/// GET /api/v1/status - Process state and status feed
pub async fn get_status(State(state): State<DashboardState>) -> Json<StatusResponse> {
    let observatory = state.engine.state();
    let st = observatory.read().await;

    Json(StatusResponse {
        process_state: st.process_state.to_string(),
        snapshot_available: st.snapshot.is_some(),
        status_feed: st.status_log.iter().map(StatusFeedLine::from).collect(),
    })
}

/// GET /api/v1/snapshot - Latest acquisition snapshot
///
/// Returns 204 No Content until a run has completed.
pub async fn get_snapshot(State(state): State<DashboardState>) -> Response {
    let observatory = state.engine.state();
    let st = observatory.read().await;

    match &st.snapshot {
        Some(snapshot) => (StatusCode::OK, Json(snapshot.clone())).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

// ============================================================================
// Engage
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct EngageRequest {
    pub selection: InstrumentSelection,
    #[serde(default)]
    pub band: SpectralBand,
}

/// POST /api/v1/engage - Start an acquisition run
///
/// The engine itself treats a busy or empty-selection engage as a silent
/// no-op; the response reports whether a run actually started. Starting a
/// run closes the advisor session so the next summary seeds a fresh one.
pub async fn post_engage(
    State(state): State<DashboardState>,
    Json(req): Json<EngageRequest>,
) -> Response {
    let started = state.engine.engage(req.selection, req.band).await;
    if started {
        state.session.close().await;
    }

    ApiResponse::ok(json!({ "started": started }))
}

// ============================================================================
// Advisor
// ============================================================================

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub phase: String,
    pub messages: Vec<ChatMessage>,
}

/// GET /api/v1/advisor/transcript - Current conversation
pub async fn get_transcript(State(state): State<DashboardState>) -> Json<TranscriptResponse> {
    Json(TranscriptResponse {
        phase: state.session.phase().await.to_string(),
        messages: state.session.transcript().await,
    })
}

#[derive(Debug, Deserialize)]
pub struct AdvisorMessageRequest {
    /// Crew message; empty requests only open the session and stream the
    /// automatic first report
    #[serde(default)]
    pub message: String,
}

/// POST /api/v1/advisor/message - Talk to the mission advisor
///
/// Opens the session from the latest snapshot summary when necessary. A
/// failed stream leaves its fixed error reply in the transcript, which is
/// returned either way; only guard violations surface as HTTP errors.
pub async fn post_advisor_message(
    State(state): State<DashboardState>,
    Json(req): Json<AdvisorMessageRequest>,
) -> Response {
    if !state.session.is_open().await {
        let summary = {
            let observatory = state.engine.state();
            let st = observatory.read().await;
            st.snapshot.as_ref().map(|s| s.summary.clone())
        };

        let Some(summary) = summary else {
            return ApiErrorResponse::bad_request(
                "no acquisition summary available; engage the observatory first",
            );
        };

        match state.session.open(&summary).await {
            Ok(()) | Err(AdvisorError::Stream(_) | AdvisorError::Parse(_)) => {}
            Err(AdvisorError::Busy) => {
                return ApiErrorResponse::conflict("a response is already streaming")
            }
            Err(err) => return ApiErrorResponse::internal(err.to_string()),
        }
    }

    if !req.message.trim().is_empty() {
        match state.session.send(&req.message).await {
            // Stream failures already surfaced in the transcript.
            Ok(()) | Err(AdvisorError::Stream(_) | AdvisorError::Parse(_)) => {}
            Err(AdvisorError::Busy) => {
                return ApiErrorResponse::conflict("a response is already streaming")
            }
            Err(err) => return ApiErrorResponse::internal(err.to_string()),
        }
    }

    ApiResponse::ok(TranscriptResponse {
        phase: state.session.phase().await.to_string(),
        messages: state.session.transcript().await,
    })
}

// ============================================================================
// Forecast & Mission
// ============================================================================

async fn current_summary(state: &DashboardState) -> Option<String> {
    let observatory = state.engine.state();
    let st = observatory.read().await;
    st.snapshot.as_ref().map(|s: &AcquisitionSnapshot| s.summary.clone())
}

/// POST /api/v1/forecast/storm - 48h storm outlook + threat matrix
pub async fn post_storm_outlook(State(state): State<DashboardState>) -> Response {
    let Some(summary) = current_summary(&state).await else {
        return ApiErrorResponse::bad_request("engage the observatory to generate a forecast");
    };

    match state.forecast.storm_outlook(&summary).await {
        Ok(outlook) => ApiResponse::ok(outlook),
        Err(err) => {
            tracing::warn!(error = %err, "Storm outlook failed");
            ApiErrorResponse::internal(FORECAST_UNAVAILABLE)
        }
    }
}

/// POST /api/v1/forecast/outlook - 7-day markdown outlook
pub async fn post_seven_day_outlook(State(state): State<DashboardState>) -> Response {
    let Some(summary) = current_summary(&state).await else {
        return ApiErrorResponse::bad_request("engage the observatory to generate a forecast");
    };

    match state.forecast.seven_day_outlook(&summary).await {
        Ok(outlook) => ApiResponse::ok(json!({ "outlook": outlook })),
        Err(err) => {
            tracing::warn!(error = %err, "Seven-day outlook failed");
            ApiErrorResponse::internal(FORECAST_UNAVAILABLE)
        }
    }
}

/// POST /api/v1/mission/plan - Generate a flight plan
pub async fn post_mission_plan(
    State(state): State<DashboardState>,
    Json(req): Json<MissionRequest>,
) -> Response {
    match state.mission.plan(&req).await {
        Ok(plan) => ApiResponse::ok(plan),
        Err(err) => {
            tracing::warn!(error = %err, "Mission plan failed");
            ApiErrorResponse::internal(MISSION_PLAN_UNAVAILABLE)
        }
    }
}
