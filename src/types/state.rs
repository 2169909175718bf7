//! Acquisition run state: process state, status feed, snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::channels::{
    CoronalHole, Filament, ImfBzPoint, InstrumentSelection, KpIndex, ProtonFluxPoint, RadioBurst,
    SolarWind, SpectralBand, SunspotRegion, XrayFluxPoint,
};

// ============================================================================
// Process State
// ============================================================================

/// Lifecycle state of the acquisition engine.
///
/// Transitions: `Idle → Processing` on engage, `Processing → Complete`
/// always (success, degraded, or total failure). A completed run never
/// reverts to `Idle` on its own; only the next engage resets the cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ProcessState {
    #[default]
    Idle,
    Processing,
    Complete,
}

impl std::fmt::Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessState::Idle => write!(f, "Idle"),
            ProcessState::Processing => write!(f, "Processing"),
            ProcessState::Complete => write!(f, "Complete"),
        }
    }
}

// ============================================================================
// Status Feed
// ============================================================================

/// One timestamped line in the acquisition status feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl StatusEntry {
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for StatusEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.timestamp.format("%H:%M:%S"), self.message)
    }
}

// ============================================================================
// Acquisition Snapshot
// ============================================================================

/// The aggregate result of one acquisition run.
///
/// Created exactly once per run and never mutated afterwards; the next run
/// replaces it wholesale. Per-instrument batches are optional: a channel may
/// be absent because it was not selected, or because its fetch failed and
/// the run completed degraded. Environmental batches are always present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquisitionSnapshot {
    /// Instrument selection this run was started with
    pub selection: InstrumentSelection,
    /// Spectral filter chosen for AIA imagery
    pub band: SpectralBand,

    /// GOES X-ray flux series (absent unless selected and fetched)
    pub xray_flux: Option<Vec<XrayFluxPoint>>,
    /// HMI sunspot analysis (absent unless selected)
    pub sunspot_regions: Option<Vec<SunspotRegion>>,

    /// Natural-language digest seeding the AI advisor
    pub summary: String,

    // === Environmental channels, acquired unconditionally ===
    pub solar_wind: SolarWind,
    pub proton_flux: Vec<ProtonFluxPoint>,
    pub kp_index: KpIndex,
    pub coronal_holes: Vec<CoronalHole>,
    pub filaments: Vec<Filament>,
    pub radio_bursts: Vec<RadioBurst>,
    pub imf_bz: Vec<ImfBzPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_state_display() {
        assert_eq!(format!("{}", ProcessState::Idle), "Idle");
        assert_eq!(format!("{}", ProcessState::Processing), "Processing");
        assert_eq!(format!("{}", ProcessState::Complete), "Complete");
    }

    #[test]
    fn test_status_entry_render() {
        let entry = StatusEntry {
            timestamp: DateTime::parse_from_rfc3339("2025-03-01T09:15:42Z")
                .unwrap()
                .with_timezone(&Utc),
            message: "Authenticating with SDO & NOAA...".to_string(),
        };
        assert_eq!(
            format!("{entry}"),
            "[09:15:42] Authenticating with SDO & NOAA..."
        );
    }
}
