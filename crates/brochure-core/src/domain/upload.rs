//! Upload task record and its state machine.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::file::FileDescriptor;
use super::ids::UploadId;

/// Upload state.
///
/// State transitions:
/// - Pending -> Validating -> Rejected
/// - Pending -> Validating -> Uploading -> Completed
///
/// Cancellation is not a state: the manager drops the task entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadState {
    /// Accepted by the drop zone, not yet checked.
    Pending,

    /// Size and extension checks in progress.
    Validating,

    /// Failed validation; siblings are unaffected.
    Rejected,

    /// Progress timer is running.
    Uploading,

    /// Reached 100%.
    Completed,
}

impl UploadState {
    /// Is this a terminal state (no further transitions)?
    pub fn is_terminal(self) -> bool {
        matches!(self, UploadState::Rejected | UploadState::Completed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UploadState::Pending => "pending",
            UploadState::Validating => "validating",
            UploadState::Rejected => "rejected",
            UploadState::Uploading => "uploading",
            UploadState::Completed => "completed",
        }
    }
}

/// One file moving through the widget.
///
/// All state transitions happen here; the manager only stores records and
/// owns their timers.
#[derive(Debug, Clone)]
pub struct UploadTask {
    pub id: UploadId,
    pub file: FileDescriptor,
    pub state: UploadState,

    /// 0.0..=100.0, never decreases.
    pub progress: f64,

    /// Rejection message (if any).
    pub last_error: Option<String>,

    pub created_at: Instant,
    pub updated_at: Instant,
}

impl UploadTask {
    pub fn new(id: UploadId, file: FileDescriptor) -> Self {
        let now = Instant::now();
        Self {
            id,
            file,
            state: UploadState::Pending,
            progress: 0.0,
            last_error: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn start_validation(&mut self) {
        if self.state == UploadState::Pending {
            self.state = UploadState::Validating;
            self.updated_at = Instant::now();
        }
    }

    pub fn reject(&mut self, message: String) {
        if self.state == UploadState::Validating {
            self.state = UploadState::Rejected;
            self.last_error = Some(message);
            self.updated_at = Instant::now();
        }
    }

    pub fn start_upload(&mut self) {
        if self.state == UploadState::Validating {
            self.state = UploadState::Uploading;
            self.updated_at = Instant::now();
        }
    }

    /// Add `delta` percent. Negative or NaN deltas are ignored and the
    /// result is clamped at exactly 100. Returns true once 100 is reached.
    pub fn advance(&mut self, delta: f64) -> bool {
        if self.state != UploadState::Uploading {
            return false;
        }
        if delta.is_finite() && delta > 0.0 {
            self.progress = (self.progress + delta).min(100.0);
            self.updated_at = Instant::now();
        }
        self.progress >= 100.0
    }

    pub fn mark_completed(&mut self) {
        if self.state == UploadState::Uploading && self.progress >= 100.0 {
            self.progress = 100.0;
            self.state = UploadState::Completed;
            self.updated_at = Instant::now();
        }
    }
}
