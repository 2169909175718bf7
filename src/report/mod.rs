//! Observation Summary Builder
//!
//! Folds the channel batches of one acquisition run into the
//! natural-language digest that seeds every downstream advisor prompt.
//! Deterministic given its inputs: the randomness lives in the batches,
//! never in the builder. Sentence order follows a fixed channel priority,
//! not selection order, so identical data always reads identically.

use crate::types::{
    Filament, FilamentStability, ImfBzPoint, InstrumentSelection, KpIndex, ProtonFluxPoint,
    SolarWind, SpectralBand, SunspotRegion, XrayFluxPoint,
};

/// Returned when no channel produced any data at all.
pub const NO_DATA_SUMMARY: &str = "No data selected for analysis.";

/// Proton flux level above which a radiation storm is called out (pfu).
const RADIATION_STORM_THRESHOLD_PFU: f64 = 10.0;

// ============================================================================
// Flare Classification
// ============================================================================

/// GOES flare class for a peak X-ray flux in W/m².
///
/// Fixed NOAA decade thresholds: X ≥ 1e-4, M ≥ 1e-5, C ≥ 1e-6, B ≥ 1e-7,
/// A below.
pub fn flare_class(peak_flux: f64) -> char {
    if peak_flux >= 1e-4 {
        'X'
    } else if peak_flux >= 1e-5 {
        'M'
    } else if peak_flux >= 1e-6 {
        'C'
    } else if peak_flux >= 1e-7 {
        'B'
    } else {
        'A'
    }
}

// ============================================================================
// Summary Builder
// ============================================================================

/// Channel batches available to one summary. Every field is optional:
/// deselected channels and degraded completions both surface as `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryInputs<'a> {
    pub sunspot_regions: Option<&'a [SunspotRegion]>,
    pub xray_flux: Option<&'a [XrayFluxPoint]>,
    pub solar_wind: Option<&'a SolarWind>,
    pub proton_flux: Option<&'a [ProtonFluxPoint]>,
    pub kp_index: Option<&'a KpIndex>,
    pub imf_bz: Option<&'a [ImfBzPoint]>,
    pub filaments: Option<&'a [Filament]>,
}

/// Build the digest for one run.
///
/// One sentence per available channel in fixed priority order; the AIA
/// sentence only needs the selection flag since imagery carries no numeric
/// batch. Returns [`NO_DATA_SUMMARY`] when nothing contributed.
pub fn build_summary(
    selection: &InstrumentSelection,
    band: SpectralBand,
    inputs: &SummaryInputs<'_>,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    if selection.aia {
        parts.push(format!(
            "AIA imaging at {} indicates standard coronal activity for a temperature of ~{}.",
            band,
            band.temperature()
        ));
    }

    if selection.hmi {
        if let Some(regions) = inputs.sunspot_regions {
            let total_spots: u32 = regions.iter().map(|r| r.spots).sum();
            parts.push(format!(
                "HMI magnetogram shows {} active regions with a total of {} sunspots (simulated).",
                regions.len(),
                total_spots
            ));
        }
    }

    if selection.goes {
        if let Some(series) = inputs.xray_flux {
            if let Some(peak) = peak_flux(series.iter().map(|p| p.flux)) {
                parts.push(format!(
                    "Live GOES satellite data reports a peak 24-hour X-ray flux of {:.2e}, \
                     corresponding to a {}-class solar flare event.",
                    peak,
                    flare_class(peak)
                ));
            } else {
                parts.push(
                    "Live GOES satellite data is currently unavailable or shows no significant events."
                        .to_string(),
                );
            }
        }
    }

    if let Some(wind) = inputs.solar_wind {
        parts.push(format!(
            "Solar wind measured at {:.0} km/s with a density of {:.1} p/cm³.",
            wind.speed, wind.density
        ));
    }

    if let Some(kp) = inputs.kp_index {
        parts.push(format!(
            "Current planetary K-index is {}, indicating {} geomagnetic activity.",
            kp.value, kp.level
        ));
    }

    if let Some(series) = inputs.proton_flux {
        if let Some(peak) = peak_flux(series.iter().map(|p| p.flux)) {
            if peak > RADIATION_STORM_THRESHOLD_PFU {
                parts.push(format!(
                    "Elevated proton flux detected, peaking at {:.1e} pfu, indicating a \
                     potential Solar Radiation Storm.",
                    peak
                ));
            }
        }
    }

    if let Some(series) = inputs.imf_bz {
        if let Some(headline) = imf_headline(series) {
            parts.push(headline);
        }
    }

    if let Some(filaments) = inputs.filaments {
        let unstable = filaments
            .iter()
            .filter(|f| f.stability == FilamentStability::Unstable)
            .count();
        if unstable > 0 {
            parts.push(format!(
                "{unstable} filament channel(s) show signs of instability and possible eruption."
            ));
        }
    }

    if parts.is_empty() {
        return NO_DATA_SUMMARY.to_string();
    }

    parts.join(" ")
}

/// Largest finite flux in the series, if any.
fn peak_flux(series: impl Iterator<Item = f64>) -> Option<f64> {
    series.filter(|f| f.is_finite()).fold(None, |acc, f| {
        Some(acc.map_or(f, |a: f64| a.max(f)))
    })
}

/// Dominant IMF Bz orientation with the strongest reading of that sign.
fn imf_headline(series: &[ImfBzPoint]) -> Option<String> {
    if series.is_empty() {
        return None;
    }

    let southward = series.iter().filter(|p| p.bz < 0.0).count();
    let dominant_south = southward * 2 > series.len();
    let extreme = series
        .iter()
        .map(|p| p.bz)
        .fold(0.0f64, |acc, bz| {
            if dominant_south {
                acc.min(bz)
            } else {
                acc.max(bz)
            }
        });

    Some(if dominant_south {
        format!(
            "IMF Bz has been predominantly southward, reaching {:.1} nT, favoring \
             geomagnetic coupling.",
            extreme
        )
    } else {
        format!(
            "IMF Bz has been predominantly northward, up to {:.1} nT, limiting \
             geomagnetic coupling.",
            extreme
        )
    })
}
