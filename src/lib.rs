//! Real-time liveness scoring from a remote-photoplethysmography signal.
//!
//! A capture collaborator supplies one mean skin brightness per frame (or
//! reports that no face was found). [`ThreatScoreEngine`] buffers those
//! samples, and once its window is full runs each tick through outlier
//! suppression, normalization, a zero-phase pulse-band Butterworth filter and
//! an energy heuristic, then smooths the result into a displayed score.
//!
//! ```no_run
//! use rppg_sentinel::{EngineConfig, EngineOutput, ThreatScoreEngine};
//!
//! let mut engine = ThreatScoreEngine::new(EngineConfig::default())?;
//! match engine.tick(Some(131.4)) {
//!     EngineOutput::Calibrating { percent } => println!("calibrating {percent}%"),
//!     EngineOutput::Scored { score, .. } => println!("score {score}"),
//!     EngineOutput::Obscured => println!("no face"),
//! }
//! # Ok::<(), rppg_sentinel::PulseError>(())
//! ```
pub mod config;
pub mod drivers;
pub mod engine;
pub mod session;
pub mod types;
pub use config::EngineConfig;
pub use drivers::{PulseError, Reading, SampleSource};
pub use engine::ThreatScoreEngine;
pub use session::{
    run_session, spawn_capture, Feed, FixedDelayTicker, ImmediateTicker, SampleSlot, SessionSummary,
    SourceFeed, TickFeed, Ticker,
};
pub use types::{AlertBand, EngineOutput, StatusLabel};
