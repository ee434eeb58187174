//! Scan module
//!
//! This module contains the discovery pipeline:
//! - `ScanPhase`: the two-wave state machine of a scan
//! - `ScanAccumulator`: mutex-guarded icons, metadata and phase-2 queue
//! - `Scanner`: builds operations, runs both waves, returns `ScanResults`

mod accumulator;
mod phase;
mod scanner;

pub use accumulator::{ScanAccumulator, ScanResults};
pub use phase::ScanPhase;
pub use scanner::{scan_url, Scanner};
