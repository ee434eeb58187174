//! Shared scan state
//!
//! Handlers of concurrently completing operations all write into one
//! [`ScanAccumulator`]. The icon list, the metadata map and the phase-2
//! queue live behind a single mutex because the HTML handler updates all
//! three at once.

use crate::executor::Operation;
use crate::icon::DetectedIcon;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Final output of a scan
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanResults {
    /// Every icon discovered, in completion order; may contain duplicate URLs
    pub icons: Vec<DetectedIcon>,

    /// `<meta>` name/content pairs of the scanned HTML document
    pub metadata: HashMap<String, String>,
}

impl ScanResults {
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty() && self.metadata.is_empty()
    }
}

#[derive(Debug, Default)]
struct ScanState {
    icons: Vec<DetectedIcon>,
    metadata: HashMap<String, String>,
    follow_ups: Vec<Operation>,
}

/// Cloneable handle to the mutex-guarded state of one scan
#[derive(Debug, Clone, Default)]
pub struct ScanAccumulator {
    state: Arc<Mutex<ScanState>>,
}

impl ScanAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the state; a handler that panicked mid-update leaves the data usable
    fn lock(&self) -> MutexGuard<'_, ScanState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_icon(&self, icon: DetectedIcon) {
        self.lock().icons.push(icon);
    }

    pub fn add_icons(&self, icons: impl IntoIterator<Item = DetectedIcon>) {
        self.lock().icons.extend(icons);
    }

    /// Records the results of parsing an HTML document in one critical section
    ///
    /// The metadata map is replaced wholesale.
    pub fn record_document(
        &self,
        icons: Vec<DetectedIcon>,
        metadata: HashMap<String, String>,
        follow_ups: Vec<Operation>,
    ) {
        let mut state = self.lock();
        state.icons.extend(icons);
        state.metadata = metadata;
        state.follow_ups.extend(follow_ups);
    }

    /// Removes and returns every queued phase-2 operation
    pub fn take_follow_ups(&self) -> Vec<Operation> {
        std::mem::take(&mut self.lock().follow_ups)
    }

    pub fn icon_count(&self) -> usize {
        self.lock().icons.len()
    }

    /// Snapshot of the accumulated icons and metadata
    pub fn results(&self) -> ScanResults {
        let state = self.lock();
        ScanResults {
            icons: state.icons.clone(),
            metadata: state.metadata.clone(),
        }
    }
}
