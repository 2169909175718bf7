//! SOLARIS-OS: Solar Observatory Intelligence
//!
//! Staged space-weather data acquisition with an AI mission advisor.
//!
//! ## Architecture
//!
//! - **Acquisition Engine**: one-run-at-a-time state machine replaying a
//!   scripted narration track while the real data work runs behind it
//! - **Simulation**: bounded synthetic generators for every channel without
//!   a live public feed
//! - **Report**: deterministic summary builder seeding every advisor prompt
//! - **Advisor**: streaming chat session plus structured forecast and
//!   mission-planning generation over an injected backend

pub mod acquisition;
pub mod advisor;
pub mod api;
pub mod config;
pub mod forecast;
pub mod mission;
pub mod report;
pub mod simulation;
pub mod types;

// Re-export configuration
pub use config::ObservatoryConfig;

// Re-export commonly used types
pub use types::{
    AcquisitionSnapshot, ChatMessage, ChatRole, InstrumentSelection, KpIndex, ProcessState,
    SessionPhase, SolarWind, SpectralBand, StatusEntry,
};

// Re-export core components
pub use acquisition::{AcquisitionEngine, NoaaXrayFeed, XrayFeed};
pub use advisor::{AdvisorBackend, AdvisorSession, GeminiBackend};
pub use forecast::ForecastService;
pub use mission::MissionPlanner;
pub use report::build_summary;
