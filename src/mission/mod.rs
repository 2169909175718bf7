//! Mission Planning
//!
//! Generates a satellite maneuver flight plan plus headline mission metrics
//! from operator parameters, using the same structured-generation and
//! fenced-JSON parse rule as the forecast features. Parse or transport
//! failure surfaces one fixed message; no partial plan is recovered.

use std::sync::Arc;

use tracing::info;

use crate::advisor::parsing::parse_fenced_json;
use crate::advisor::{AdvisorBackend, AdvisorError};
use crate::types::{MissionPlan, MissionRequest};

/// Fixed user-facing message for any flight-plan generation failure.
pub const MISSION_PLAN_UNAVAILABLE: &str =
    "Failed to generate flight plan. The AI advisor might be offline or returned an invalid format.";

const MISSION_SYSTEM_INSTRUCTION: &str = "You are 'SOLARIS', an AI Mission Advisor. Generate \
a flight plan and key mission metrics for a solar observatory satellite. Respond with a \
single JSON object holding two top-level keys: 'flight_plan_log' (a detailed, realistic \
Markdown flight plan with '## Mission Overview', '## Flight Plan Details' and \
'## Risk Assessment' sections) and 'mission_metrics' (an object with 'delta_v' holding \
'insertion'/'station_keeping'/'return_burn' values in m/s, 'fuel_consumption_pct' as the \
percentage of fuel used, 'max_radiation_exposure_msv' in mSv, and 'telemetry' holding \
baseline 'altitude_km', 'velocity_km_s', 'signal_strength_dbm' and 'temperature_c').";

/// Flight-plan generation over an injected advisor backend.
#[derive(Clone)]
pub struct MissionPlanner {
    backend: Arc<dyn AdvisorBackend>,
}

impl MissionPlanner {
    pub fn new(backend: Arc<dyn AdvisorBackend>) -> Self {
        Self { backend }
    }

    /// Generate the flight plan and metrics for one mission request.
    pub async fn plan(&self, request: &MissionRequest) -> Result<MissionPlan, AdvisorError> {
        let prompt = format!(
            "Generate the mission data for the following parameters:\n\
             - Mission Name: {}\n\
             - Mission Type: {}\n\
             - Duration: {} hours\n\
             - Orbital Trajectory: {}\n\
             - Mission Notes: {}",
            request.name,
            request.mission_type.display_name(),
            request.duration_hours,
            request.trajectory.display_name(),
            request.notes,
        );

        let raw = self
            .backend
            .generate_json(MISSION_SYSTEM_INSTRUCTION, &prompt, None)
            .await?;

        let plan: MissionPlan = parse_fenced_json(&raw)?;
        info!(
            mission = %request.name,
            trajectory = request.trajectory.display_name(),
            "Flight plan generated"
        );
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::backend::ChunkStream;
    use crate::types::{ChatMessage, MissionType, Trajectory};
    use async_trait::async_trait;

    struct CannedBackend {
        payload: String,
    }

    #[async_trait]
    impl AdvisorBackend for CannedBackend {
        async fn stream_chat(
            &self,
            _s: &str,
            _h: &[ChatMessage],
        ) -> Result<ChunkStream, AdvisorError> {
            Err(AdvisorError::Stream("not scripted".to_string()))
        }

        async fn generate(&self, _s: &str, _p: &str) -> Result<String, AdvisorError> {
            Ok(self.payload.clone())
        }

        async fn generate_json(
            &self,
            _s: &str,
            _p: &str,
            _schema: Option<serde_json::Value>,
        ) -> Result<String, AdvisorError> {
            Ok(self.payload.clone())
        }

        fn backend_name(&self) -> &'static str {
            "canned"
        }
    }

    fn request() -> MissionRequest {
        MissionRequest {
            name: "Solar Flare Observation Alpha".to_string(),
            mission_type: MissionType::FlareObservation,
            duration_hours: 12,
            trajectory: Trajectory::Heliostationary,
            notes: "Prioritize observation of active region AR3745.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_plan_parses_metrics() {
        let payload = r###"{
            "flight_plan_log": "## Mission Overview\nStationkeeping at L1.",
            "mission_metrics": {
                "delta_v": { "insertion": 120.0, "station_keeping": 35.5, "return_burn": 210.0 },
                "fuel_consumption_pct": 41.0,
                "max_radiation_exposure_msv": 12.5,
                "telemetry": {
                    "altitude_km": 1500000.0,
                    "velocity_km_s": 29.8,
                    "signal_strength_dbm": -92.0,
                    "temperature_c": 4.5
                }
            }
        }"###;
        let planner = MissionPlanner::new(Arc::new(CannedBackend {
            payload: payload.to_string(),
        }));

        let plan = planner.plan(&request()).await.unwrap();
        assert!(plan.flight_plan_log.contains("Mission Overview"));
        assert!((plan.mission_metrics.delta_v.station_keeping - 35.5).abs() < f64::EPSILON);
        assert!((plan.mission_metrics.telemetry.signal_strength_dbm - (-92.0)).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_plan_malformed_payload_is_parse_error() {
        let planner = MissionPlanner::new(Arc::new(CannedBackend {
            payload: "## Not JSON".to_string(),
        }));
        assert!(matches!(
            planner.plan(&request()).await,
            Err(AdvisorError::Parse(_))
        ));
    }
}
