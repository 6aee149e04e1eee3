//! Cumulative reward curves from RL training status files
//!
//! Each run writes `<base_dir>/<run>/run_logs/training_status.json`. [`report::collect`] reads the
//! configured runs, extracts the checkpoint rewards of one behavior, and returns a
//! [`Report`](report::Report) that can be drawn in the terminal ([`viz`]) or saved as an image
//! ([`export`]).

/// Run selection and defaults
pub mod config;

/// Error types
pub mod error;

/// Loading runs into a report
pub mod report;

/// Reward series derived from checkpoints
pub mod series;

/// Training status documents
pub mod status;

/// Terminal chart
#[cfg(feature = "viz")]
pub mod viz;

/// Image export
#[cfg(feature = "png")]
pub mod export;

pub use error::{Error, Result};
