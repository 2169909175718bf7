//! Dashboard API
//!
//! HTTP boundary between the core and the display layer. The display layer
//! only reads acquisition and advisor state through these endpoints and
//! forwards user intent (engage, chat, forecast, mission) back in.

pub mod envelope;
pub mod handlers;
pub mod routes;

use std::time::Instant;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::acquisition::AcquisitionEngine;
use crate::advisor::AdvisorSession;
use crate::forecast::ForecastService;
use crate::mission::MissionPlanner;

/// Shared handles behind every dashboard endpoint.
#[derive(Clone)]
pub struct DashboardState {
    pub engine: AcquisitionEngine,
    pub session: AdvisorSession,
    pub forecast: ForecastService,
    pub mission: MissionPlanner,
    pub started_at: Instant,
}

/// Build the complete dashboard application.
pub fn create_app(state: DashboardState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
