//! API route definitions
//!
//! Organizes endpoints for the observatory dashboard:
//! - /api/v1/health - Service liveness
//! - /api/v1/status - Process state and status feed
//! - /api/v1/snapshot - Latest acquisition snapshot
//! - /api/v1/engage - Start an acquisition run
//! - /api/v1/advisor/* - Mission advisor chat
//! - /api/v1/forecast/* - Storm and 7-day outlooks
//! - /api/v1/mission/plan - Flight plan generation

use axum::{
    routing::{get, post},
    Router,
};

use super::{handlers, DashboardState};

/// Create all API routes for the dashboard
pub fn api_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route("/status", get(handlers::get_status))
        .route("/snapshot", get(handlers::get_snapshot))
        .route("/engage", post(handlers::post_engage))
        // Mission advisor
        .route("/advisor/transcript", get(handlers::get_transcript))
        .route("/advisor/message", post(handlers::post_advisor_message))
        // Forecasting
        .route("/forecast/storm", post(handlers::post_storm_outlook))
        .route("/forecast/outlook", post(handlers::post_seven_day_outlook))
        // Mission planning
        .route("/mission/plan", post(handlers::post_mission_plan))
        .with_state(state)
}
