//! Solar Forecast & Threat Analysis
//!
//! AI-generated predictions derived from the current acquisition summary:
//! a 48-hour geomagnetic storm outlook with a per-region threat matrix
//! (schema-constrained JSON), and a free-form 7-day markdown outlook.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::advisor::parsing::parse_fenced_json;
use crate::advisor::{AdvisorBackend, AdvisorError};
use crate::types::StormOutlook;

/// Fixed user-facing message for any outlook generation/parse failure.
pub const FORECAST_UNAVAILABLE: &str =
    "Failed to generate forecast. The AI advisor might be offline or returned an invalid format.";

const STORM_SYSTEM_INSTRUCTION: &str = "You are a space weather forecasting AI. Analyze the \
provided solar data summary and return a single JSON object with two keys: \
'storm_probability' (integer 0-100, the chance of a G1 or greater geomagnetic storm in the \
next 48 hours) and 'threat_matrix' (an array with one entry per active region mentioned, \
each carrying 'region', 'magnetic_class', 'flare_probability' with integer 'c'/'m'/'x' keys \
0-100, and 'cme_risk' as one of Low, Moderate, High, VeryHigh). Base the forecast only on \
the provided data; return an empty array when no active regions are mentioned.";

const OUTLOOK_SYSTEM_INSTRUCTION: &str = "You are a senior space weather forecaster. Based \
on the current solar data, generate a 7-day forecast in Markdown. Start with \
'## 7-Day Solar Weather Outlook' and use a '### Day N' heading per day, each summarizing \
expected solar activity, geomagnetic conditions, and aurora sighting potential.";

/// Forecast generation over an injected advisor backend.
#[derive(Clone)]
pub struct ForecastService {
    backend: Arc<dyn AdvisorBackend>,
}

impl ForecastService {
    pub fn new(backend: Arc<dyn AdvisorBackend>) -> Self {
        Self { backend }
    }

    /// 48-hour storm probability and active-region threat matrix.
    pub async fn storm_outlook(&self, summary: &str) -> Result<StormOutlook, AdvisorError> {
        let raw = self
            .backend
            .generate_json(
                STORM_SYSTEM_INSTRUCTION,
                &format!("Analyze this data: {summary}"),
                Some(storm_schema()),
            )
            .await?;

        let outlook: StormOutlook = parse_fenced_json(&raw)?;
        info!(
            storm_probability = outlook.storm_probability,
            regions = outlook.threat_matrix.len(),
            "Storm outlook generated"
        );
        Ok(outlook)
    }

    /// Free-form 7-day markdown outlook.
    pub async fn seven_day_outlook(&self, summary: &str) -> Result<String, AdvisorError> {
        self.backend
            .generate(
                OUTLOOK_SYSTEM_INSTRUCTION,
                &format!("Current data: {summary}"),
            )
            .await
    }
}

/// Response schema constraining the storm outlook call.
fn storm_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "storm_probability": { "type": "INTEGER" },
            "threat_matrix": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "region": { "type": "STRING" },
                        "magnetic_class": { "type": "STRING" },
                        "flare_probability": {
                            "type": "OBJECT",
                            "properties": {
                                "c": { "type": "INTEGER" },
                                "m": { "type": "INTEGER" },
                                "x": { "type": "INTEGER" }
                            }
                        },
                        "cme_risk": { "type": "STRING" }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::backend::ChunkStream;
    use crate::types::{ChatMessage, CmeRisk};
    use async_trait::async_trait;

    /// Backend returning a canned one-shot payload.
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

    #[tokio::test]
    async fn test_storm_outlook_parses_fenced_payload() {
        let payload = r#"```json
{
  "storm_probability": 62,
  "threat_matrix": [{
    "region": "AR3745",
    "magnetic_class": "Beta-Gamma",
    "flare_probability": { "c": 90, "m": 40, "x": 10 },
    "cme_risk": "High"
  }]
}
```"#;
        let service = ForecastService::new(Arc::new(CannedBackend {
            payload: payload.to_string(),
        }));

        let outlook = service.storm_outlook("summary").await.unwrap();
        assert_eq!(outlook.storm_probability, 62);
        assert_eq!(outlook.threat_matrix.len(), 1);
        assert_eq!(outlook.threat_matrix[0].cme_risk, CmeRisk::High);
        assert_eq!(outlook.threat_matrix[0].flare_probability.m, 40);
    }

    #[tokio::test]
    async fn test_storm_outlook_malformed_payload_is_parse_error() {
        let service = ForecastService::new(Arc::new(CannedBackend {
            payload: "sorry, no forecast today".to_string(),
        }));
        assert!(matches!(
            service.storm_outlook("summary").await,
            Err(AdvisorError::Parse(_))
        ));
    }
}
