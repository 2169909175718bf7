//! Staged Data Acquisition
//!
//! The acquisition workflow: a user-triggered run replays a scripted
//! narration track while the real data work (one live NOAA fetch plus the
//! synthetic generators) is scheduled after the track's total delay, then
//! folds everything into one immutable snapshot.

pub mod engine;
pub mod narration;
pub mod xray;

pub use engine::{AcquisitionEngine, ObservatoryState, SharedState};
pub use narration::{narration_track, total_delay, NarrationStep};
pub use xray::{NoaaXrayFeed, XrayFeed, XrayFeedError};
