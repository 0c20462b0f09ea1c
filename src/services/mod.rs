//! Service layer: sweep orchestration.

pub mod sweep;

pub use sweep::{SweepError, SweepReport, SweepService, DIGEST_CHANNEL_KEY};
