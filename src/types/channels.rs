//! Instrument channels and per-channel measurement batches

use serde::{Deserialize, Serialize};

// ============================================================================
// Instrument Selection
// ============================================================================

/// Which primary observatory instruments participate in an acquisition run.
///
/// The three secondary environmental channels (solar wind, proton flux,
/// Kp index) are always acquired and have no toggle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct InstrumentSelection {
    /// Atmospheric Imaging Assembly (spectral imagery)
    pub aia: bool,
    /// Helioseismic and Magnetic Imager (sunspot analysis)
    pub hmi: bool,
    /// GOES X-ray Sensor (live flux feed)
    pub goes: bool,
}

impl InstrumentSelection {
    /// True when at least one instrument is enabled.
    pub fn any(&self) -> bool {
        self.aia || self.hmi || self.goes
    }

    pub fn all() -> Self {
        Self { aia: true, hmi: true, goes: true }
    }
}

// ============================================================================
// Spectral Bands (AIA)
// ============================================================================

/// AIA spectral filter bands, each imaging plasma at a characteristic
/// temperature.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SpectralBand {
    A94,
    A131,
    #[default]
    A171,
    A193,
    A211,
    A304,
    A335,
}

impl SpectralBand {
    /// Wavelength in angstroms.
    pub fn angstroms(&self) -> u16 {
        match self {
            SpectralBand::A94 => 94,
            SpectralBand::A131 => 131,
            SpectralBand::A171 => 171,
            SpectralBand::A193 => 193,
            SpectralBand::A211 => 211,
            SpectralBand::A304 => 304,
            SpectralBand::A335 => 335,
        }
    }

    /// Characteristic plasma temperature imaged by this band.
    pub fn temperature(&self) -> &'static str {
        match self {
            SpectralBand::A94 => "6,300,000 K",
            SpectralBand::A131 => "10,000,000 K",
            SpectralBand::A171 => "630,000 K",
            SpectralBand::A193 => "1,250,000 K",
            SpectralBand::A211 => "2,000,000 K",
            SpectralBand::A304 => "50,000 K",
            SpectralBand::A335 => "2,500,000 K",
        }
    }
}

impl std::fmt::Display for SpectralBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}Å", self.angstroms())
    }
}

// ============================================================================
// Channel Batches
// ============================================================================

/// One subsampled GOES X-ray flux reading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct XrayFluxPoint {
    /// Clock-only label, "HH:MM"
    pub time: String,
    /// Flux in W/m²
    pub flux: f64,
}

/// One active sunspot region from HMI magnetogram analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SunspotRegion {
    /// NOAA-style designator, e.g. "AR3721"
    pub region: String,
    /// Spot count within the region
    pub spots: u32,
}

/// Bulk solar wind measurement at L1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SolarWind {
    /// Speed in km/s
    pub speed: f64,
    /// Proton density in p/cm³
    pub density: f64,
}

/// One integral proton flux reading (>=10 MeV).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProtonFluxPoint {
    /// Clock-only label, "HH:MM"
    pub time: String,
    /// Flux in pfu
    pub flux: f64,
}

/// Planetary K-index with its NOAA activity category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct KpIndex {
    /// Integer scale value, 0-9
    pub value: u8,
    pub level: GeomagneticLevel,
}

/// NOAA geomagnetic activity categories keyed off the Kp scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GeomagneticLevel {
    Quiet,
    Unsettled,
    Active,
    MinorStorm,
    ModerateStorm,
    StrongStorm,
    SevereStorm,
    ExtremeStorm,
}

impl GeomagneticLevel {
    /// Fixed bucket table mapping a Kp value to its category.
    ///
    /// Values above 9 saturate at `ExtremeStorm`; the generators never
    /// produce them but feed data might.
    pub fn from_kp(value: u8) -> Self {
        match value {
            0..=2 => GeomagneticLevel::Quiet,
            3 => GeomagneticLevel::Unsettled,
            4 => GeomagneticLevel::Active,
            5 => GeomagneticLevel::MinorStorm,
            6 => GeomagneticLevel::ModerateStorm,
            7 => GeomagneticLevel::StrongStorm,
            8 => GeomagneticLevel::SevereStorm,
            _ => GeomagneticLevel::ExtremeStorm,
        }
    }

    /// Display name used in summaries and the dashboard.
    pub fn display_name(&self) -> &'static str {
        match self {
            GeomagneticLevel::Quiet => "Quiet",
            GeomagneticLevel::Unsettled => "Unsettled",
            GeomagneticLevel::Active => "Active",
            GeomagneticLevel::MinorStorm => "Minor Storm",
            GeomagneticLevel::ModerateStorm => "Moderate Storm",
            GeomagneticLevel::StrongStorm => "Strong Storm",
            GeomagneticLevel::SevereStorm => "Severe Storm",
            GeomagneticLevel::ExtremeStorm => "Extreme Storm",
        }
    }
}

impl std::fmt::Display for GeomagneticLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One coronal hole outline on the 512x512 disk projection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoronalHole {
    /// Feature designator, e.g. "CH-2"
    pub id: String,
    /// SVG path outline on the disk projection
    pub outline: String,
    /// Peak outflow wind speed attributed to the hole, km/s
    pub max_wind_speed: f64,
}

/// One filament channel traced across the disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Filament {
    /// Feature designator, e.g. "FIL-1"
    pub id: String,
    /// SVG path outline on the disk projection
    pub outline: String,
    pub stability: FilamentStability,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FilamentStability {
    Stable,
    Unstable,
}

impl std::fmt::Display for FilamentStability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilamentStability::Stable => write!(f, "Stable"),
            FilamentStability::Unstable => write!(f, "Unstable"),
        }
    }
}

/// One solar radio burst event on the daily spectrogram.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RadioBurst {
    /// Minute of the observation day, 0-1439
    pub minute_of_day: u32,
    /// Emission frequency in MHz
    pub frequency_mhz: f64,
    /// Burst intensity in SFU
    pub intensity_sfu: f64,
    pub burst_type: RadioBurstType,
}

/// Classified burst drivers: Type II (shock fronts) and Type III
/// (electron beams).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RadioBurstType {
    TypeII,
    TypeIII,
}

/// One interplanetary magnetic field Bz reading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImfBzPoint {
    /// Clock-only label, "HH:MM"
    pub time: String,
    /// North-south field component in nT (negative = southward)
    pub bz: f64,
}
