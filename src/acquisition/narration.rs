//! Narration Track
//!
//! The scripted sequence of status messages played back while an acquisition
//! run is in flight. The track is cosmetic pacing: it simulates a
//! multi-second deep-space data pull and never gates the real fetch, which
//! is scheduled independently after the track's total delay. Steps carry
//! relative delays; the scheduler accumulates them so messages land at
//! strictly increasing absolute offsets and can never interleave.

use std::time::Duration;

use crate::types::{InstrumentSelection, SpectralBand};

/// One scripted status message and the delay since the previous step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationStep {
    pub delay: Duration,
    pub message: String,
}

impl NarrationStep {
    fn new(delay_ms: u64, message: impl Into<String>) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            message: message.into(),
        }
    }
}

/// Build the narration track for a run.
///
/// Shared stages (network init, auth, preprocessing, environment queries,
/// visualization generation) are always present; instrument-specific stages
/// appear only when that channel is selected.
pub fn narration_track(selection: &InstrumentSelection, band: SpectralBand) -> Vec<NarrationStep> {
    let mut steps = vec![
        NarrationStep::new(500, "Initializing deep space network connection..."),
        NarrationStep::new(1000, "Authenticating with SDO & NOAA..."),
    ];

    if selection.aia {
        steps.push(NarrationStep::new(
            1500,
            format!("Requesting AIA data for {band}..."),
        ));
    }
    if selection.hmi {
        steps.push(NarrationStep::new(1500, "Downloading HMI magnetogram..."));
    }
    if selection.goes {
        steps.push(NarrationStep::new(
            1500,
            "Fetching live GOES X-ray flux data...",
        ));
    }

    steps.push(NarrationStep::new(
        2000,
        "Data stream inbound. Beginning preprocessing...",
    ));

    if selection.aia {
        steps.push(NarrationStep::new(1200, "Calibrating AIA spectral imagery..."));
    }
    if selection.hmi {
        steps.push(NarrationStep::new(
            1200,
            "Analyzing magnetic field topology...",
        ));
    }
    if selection.goes {
        steps.push(NarrationStep::new(1200, "Cross-referencing flare events..."));
    }

    steps.push(NarrationStep::new(
        800,
        "Querying ACE & DSCOVR for solar wind data...",
    ));
    steps.push(NarrationStep::new(800, "Assessing geomagnetic Kp-index..."));
    steps.push(NarrationStep::new(2500, "Generating visualizations..."));

    steps
}

/// Sum of all step delays: the offset at which the real acquisition starts.
pub fn total_delay(track: &[NarrationStep]) -> Duration {
    track.iter().map(|s| s.delay).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_stages_always_present() {
        let track = narration_track(&InstrumentSelection { hmi: true, ..Default::default() }, SpectralBand::A171);
        let messages: Vec<&str> = track.iter().map(|s| s.message.as_str()).collect();

        assert!(messages[0].starts_with("Initializing deep space"));
        assert!(messages.iter().any(|m| m.contains("Authenticating")));
        assert!(messages.iter().any(|m| m.contains("preprocessing")));
        assert!(messages.iter().any(|m| m.contains("solar wind")));
        assert!(messages.iter().any(|m| m.contains("Kp-index")));
        assert!(messages.last().unwrap().contains("visualizations"));
    }

    #[test]
    fn test_instrument_stages_follow_selection() {
        let goes_only = InstrumentSelection { goes: true, ..Default::default() };
        let track = narration_track(&goes_only, SpectralBand::A171);
        let joined: String = track.iter().map(|s| s.message.clone()).collect();

        assert!(joined.contains("GOES X-ray flux"));
        assert!(joined.contains("flare events"));
        assert!(!joined.contains("AIA"));
        assert!(!joined.contains("magnetogram"));
    }

    #[test]
    fn test_band_appears_in_aia_stage() {
        let aia_only = InstrumentSelection { aia: true, ..Default::default() };
        let track = narration_track(&aia_only, SpectralBand::A304);
        assert!(track.iter().any(|s| s.message.contains("304Å")));
    }

    #[test]
    fn test_total_delay_grows_with_selection() {
        let none_extra = narration_track(&InstrumentSelection { aia: true, ..Default::default() }, SpectralBand::A171);
        let all = narration_track(&InstrumentSelection::all(), SpectralBand::A171);
        assert!(total_delay(&all) > total_delay(&none_extra));

        // Full selection: 500+1000+3*1500+2000+3*1200+800+800+2500 = 15.7s
        assert_eq!(total_delay(&all), Duration::from_millis(15_700));
    }
}
