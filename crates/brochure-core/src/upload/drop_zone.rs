//! DropZone - the upload area as an explicit state machine.
//!
//! Host drag events are delivered as [`DropZoneEvent`]s. The zone tracks
//! only its highlight; each drop or selection yields a [`DropOutcome`]
//! that the caller hands to the upload manager.

use crate::domain::FileDescriptor;

use super::policy::{Rejection, UploadPolicy};

#[derive(Debug, Clone, PartialEq)]
pub enum DropZoneEvent {
    DragEnter,
    DragOver,
    /// `left_zone` is false when the pointer only moved onto a child element.
    DragLeave { left_zone: bool },
    Drop(Vec<FileDescriptor>),
    /// Files picked through the file input.
    Select(Vec<FileDescriptor>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropOutcome {
    pub accepted: Vec<FileDescriptor>,
    pub rejections: Vec<Rejection>,
}

impl DropOutcome {
    fn rejected(rejection: Rejection) -> Self {
        Self {
            accepted: Vec::new(),
            rejections: vec![rejection],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty() && self.rejections.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct DropZone {
    id: String,
    multiple: bool,
    highlighted: bool,
    policy: UploadPolicy,
}

impl DropZone {
    pub fn new(id: impl Into<String>, multiple: bool, policy: UploadPolicy) -> Self {
        Self {
            id: id.into(),
            multiple,
            highlighted: false,
            policy,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// Whether the dragover styling is on.
    pub fn highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    pub fn handle(&mut self, event: DropZoneEvent) -> DropOutcome {
        match event {
            DropZoneEvent::DragEnter | DropZoneEvent::DragOver => {
                self.highlighted = true;
                DropOutcome::default()
            }
            DropZoneEvent::DragLeave { left_zone } => {
                if left_zone {
                    self.highlighted = false;
                }
                DropOutcome::default()
            }
            DropZoneEvent::Drop(files) => {
                self.highlighted = false;
                if files.is_empty() {
                    return DropOutcome::rejected(Rejection::NoFiles);
                }
                if !self.multiple && files.len() > 1 {
                    tracing::debug!(zone = %self.id, count = files.len(), "multi-file drop on single-file zone");
                    return DropOutcome::rejected(Rejection::TooManyFiles);
                }
                self.process(files)
            }
            DropZoneEvent::Select(files) => self.process(files),
        }
    }

    fn process(&self, files: Vec<FileDescriptor>) -> DropOutcome {
        let mut outcome = DropOutcome::default();
        for file in files {
            match self.policy.validate(&file) {
                Ok(()) => outcome.accepted.push(file),
                Err(rejection) => outcome.rejections.push(rejection),
            }
        }
        tracing::debug!(
            zone = %self.id,
            accepted = outcome.accepted.len(),
            rejected = outcome.rejections.len(),
            "files processed"
        );
        outcome
    }
}
