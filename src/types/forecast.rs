//! Forecast and mission-planning types produced by structured generation

use serde::{Deserialize, Serialize};

// ============================================================================
// Storm Outlook
// ============================================================================

/// 48-hour geomagnetic storm outlook with per-region threat assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StormOutlook {
    /// Probability (0-100) of a G1+ geomagnetic storm within 48 hours
    pub storm_probability: u8,
    /// One entry per active region referenced in the data summary
    pub threat_matrix: Vec<ThreatMatrixEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatMatrixEntry {
    /// Region designator, e.g. "AR3745"
    pub region: String,
    /// Magnetic complexity class, e.g. "Beta-Gamma"
    pub magnetic_class: String,
    pub flare_probability: FlareProbability,
    pub cme_risk: CmeRisk,
}

/// Flare probabilities (0-100) per GOES class.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FlareProbability {
    pub c: u8,
    pub m: u8,
    pub x: u8,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CmeRisk {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl std::fmt::Display for CmeRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CmeRisk::Low => write!(f, "Low"),
            CmeRisk::Moderate => write!(f, "Moderate"),
            CmeRisk::High => write!(f, "High"),
            CmeRisk::VeryHigh => write!(f, "Very High"),
        }
    }
}

// ============================================================================
// Mission Planning
// ============================================================================

/// Operator input for a satellite maneuver plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionRequest {
    pub name: String,
    pub mission_type: MissionType,
    /// Planned duration in hours, 1-24
    pub duration_hours: u32,
    pub trajectory: Trajectory,
    /// Free-form operator notes folded into the prompt
    pub notes: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MissionType {
    FlareObservation,
    CoronalLoopAnalysis,
    SolarWindSampling,
    MagneticFieldMapping,
}

impl MissionType {
    pub fn display_name(&self) -> &'static str {
        match self {
            MissionType::FlareObservation => "Solar Flare Observation",
            MissionType::CoronalLoopAnalysis => "Coronal Loop Analysis",
            MissionType::SolarWindSampling => "Solar Wind Sampling",
            MissionType::MagneticFieldMapping => "Magnetic Field Mapping",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Trajectory {
    Heliostationary,
    PolarOrbit,
}

impl Trajectory {
    pub fn display_name(&self) -> &'static str {
        match self {
            Trajectory::Heliostationary => "Heliostationary",
            Trajectory::PolarOrbit => "Polar Orbit",
        }
    }
}

/// Generated flight plan plus headline mission metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionPlan {
    /// Markdown flight plan (overview, phases, risk assessment)
    pub flight_plan_log: String,
    pub mission_metrics: MissionMetrics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionMetrics {
    pub delta_v: DeltaVBudget,
    /// Total fuel consumed over the mission, percent of capacity
    pub fuel_consumption_pct: f64,
    /// Worst-case radiation exposure in mSv
    pub max_radiation_exposure_msv: f64,
    pub telemetry: TelemetryBaseline,
}

/// Delta-v budget per maneuver phase, m/s.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeltaVBudget {
    pub insertion: f64,
    pub station_keeping: f64,
    pub return_burn: f64,
}

/// Baseline telemetry the dashboard animates around.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TelemetryBaseline {
    pub altitude_km: f64,
    pub velocity_km_s: f64,
    pub signal_strength_dbm: f64,
    pub temperature_c: f64,
}
