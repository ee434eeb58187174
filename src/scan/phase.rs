/// Scan phase definitions
///
/// A scan moves through at most two waves of concurrent operations:
///
/// ```text
/// Init ──► Phase1Running ──► Phase2Running ──► Done
///   │             │                              ▲
///   └─────────────┴──────────────────────────────┘
/// ```
///
/// `Init → Done` happens when no source is enabled; `Phase1Running → Done`
/// when phase 1 discovered no follow-up documents.
use std::fmt;

/// Represents the current phase of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanPhase {
    /// Building the phase-1 operation set
    Init,

    /// Well-known paths, HTML download and icon services are running
    Phase1Running,

    /// Manifest and browser configuration downloads are running
    Phase2Running,

    /// Results have been handed back to the caller
    Done,
}

impl ScanPhase {
    /// Returns true if the scan has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if the transition from `self` to `next` is allowed
    pub fn can_transition_to(&self, next: ScanPhase) -> bool {
        matches!(
            (self, next),
            (Self::Init, Self::Phase1Running)
                | (Self::Init, Self::Done)
                | (Self::Phase1Running, Self::Phase2Running)
                | (Self::Phase1Running, Self::Done)
                | (Self::Phase2Running, Self::Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Phase1Running => "phase1_running",
            Self::Phase2Running => "phase2_running",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
