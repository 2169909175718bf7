//! Core domain types for the observatory pipeline

pub mod advisor;
pub mod channels;
pub mod forecast;
pub mod state;

pub use advisor::{ChatMessage, ChatRole, SessionPhase};
pub use channels::{
    CoronalHole, Filament, FilamentStability, GeomagneticLevel, ImfBzPoint, InstrumentSelection,
    KpIndex, ProtonFluxPoint, RadioBurst, RadioBurstType, SolarWind, SpectralBand, SunspotRegion,
    XrayFluxPoint,
};
pub use forecast::{
    CmeRisk, DeltaVBudget, FlareProbability, MissionMetrics, MissionPlan, MissionRequest,
    MissionType, StormOutlook, TelemetryBaseline, ThreatMatrixEntry, Trajectory,
};
pub use state::{AcquisitionSnapshot, ProcessState, StatusEntry};
