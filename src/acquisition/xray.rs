//! GOES X-ray Flux Feed
//!
//! The single real network call in the acquisition pipeline: fetches the
//! NOAA per-minute X-ray flux series, subsamples it down to charting size
//! and reformats timestamps to clock-only labels. Everything else in the
//! pipeline is synthetic.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::types::XrayFluxPoint;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum XrayFeedError {
    #[error("GOES feed request failed with status {0}")]
    Status(reqwest::StatusCode),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

// ============================================================================
// Feed Trait
// ============================================================================

/// Source of the GOES X-ray flux series.
///
/// Trait seam so the engine can run against a scripted feed in tests; the
/// production implementation is [`NoaaXrayFeed`].
#[async_trait]
pub trait XrayFeed: Send + Sync {
    async fn fetch(&self) -> Result<Vec<XrayFluxPoint>, XrayFeedError>;
}

// ============================================================================
// NOAA Implementation
// ============================================================================

/// Raw per-minute sample as served by the NOAA JSON feed.
#[derive(Debug, Deserialize)]
struct RawXraySample {
    time_tag: String,
    flux: f64,
}

/// HTTP client for the NOAA GOES primary X-ray feed.
pub struct NoaaXrayFeed {
    http: reqwest::Client,
    url: String,
    stride: usize,
}

impl NoaaXrayFeed {
    pub fn new(url: &str, stride: usize) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            http,
            url: url.to_string(),
            stride: stride.max(1),
        }
    }
}

#[async_trait]
impl XrayFeed for NoaaXrayFeed {
    async fn fetch(&self) -> Result<Vec<XrayFluxPoint>, XrayFeedError> {
        let resp = self.http.get(&self.url).send().await?;
        if !resp.status().is_success() {
            return Err(XrayFeedError::Status(resp.status()));
        }

        let raw: Vec<RawXraySample> = resp.json().await?;
        let points = subsample(&raw, self.stride);

        tracing::info!(
            raw_samples = raw.len(),
            charted = points.len(),
            stride = self.stride,
            "GOES X-ray flux retrieved"
        );

        Ok(points)
    }
}

/// Keep every Nth sample and reduce timestamps to "HH:MM".
///
/// The feed delivers ~1440 per-minute points over 24h; a stride of 15
/// yields ~96, which is what the dashboard charts comfortably.
fn subsample(raw: &[RawXraySample], stride: usize) -> Vec<XrayFluxPoint> {
    raw.iter()
        .enumerate()
        .filter(|(i, _)| i % stride == 0)
        .map(|(_, s)| XrayFluxPoint {
            time: clock_label(&s.time_tag),
            flux: s.flux,
        })
        .collect()
}

/// "2025-03-01T09:15:00Z" → "09:15"; anything unexpectedly short passes
/// through unchanged.
fn clock_label(time_tag: &str) -> String {
    time_tag
        .get(11..16)
        .map_or_else(|| time_tag.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(minute: usize) -> RawXraySample {
        RawXraySample {
            time_tag: format!("2025-03-01T{:02}:{:02}:00Z", minute / 60, minute % 60),
            flux: 1e-7 * (minute as f64 + 1.0),
        }
    }

    #[test]
    fn test_subsample_stride() {
        let raw: Vec<RawXraySample> = (0..1440).map(sample).collect();
        let points = subsample(&raw, 15);
        assert_eq!(points.len(), 96);
        assert_eq!(points[0].time, "00:00");
        assert_eq!(points[1].time, "00:15");
    }

    #[test]
    fn test_clock_label() {
        assert_eq!(clock_label("2025-03-01T09:15:00Z"), "09:15");
        assert_eq!(clock_label("bogus"), "bogus");
    }

    #[test]
    fn test_stride_one_keeps_everything() {
        let raw: Vec<RawXraySample> = (0..10).map(sample).collect();
        assert_eq!(subsample(&raw, 1).len(), 10);
    }
}
