//! Events - ドメインイベント
//!
//! DOM の CustomEvent（`storage-change`, `uploadComplete`, `itemReorder`）に
//! 相当するものを型付きで表現します。送信先は `ports::EventSink`。

use serde::Serialize;

use super::ids::UploadId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageAction {
    Set,
    Remove,
    Clear,
    Import,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A prefixed entry was written, removed or bulk-replaced.
    StorageChanged {
        action: StorageAction,
        key: Option<String>,
        at_ms: i64,
    },

    UploadStarted {
        id: UploadId,
        file_name: String,
    },

    UploadProgress {
        id: UploadId,
        progress: f64,
    },

    UploadCompleted {
        id: UploadId,
        file_name: String,
    },

    /// The active set drained.
    AllUploadsComplete,

    UploadCancelled {
        id: UploadId,
        file_name: String,
    },

    FileRejected {
        file_name: Option<String>,
        message: String,
    },

    ItemReordered {
        list_id: String,
        order: Vec<String>,
    },

    /// User-facing toast, only sent when notifications are enabled.
    Notification {
        message: String,
    },
}

impl DomainEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::StorageChanged { .. } => "storage-change",
            DomainEvent::UploadStarted { .. } => "upload-started",
            DomainEvent::UploadProgress { .. } => "upload-progress",
            DomainEvent::UploadCompleted { .. } => "upload-completed",
            DomainEvent::AllUploadsComplete => "upload-complete",
            DomainEvent::UploadCancelled { .. } => "upload-cancelled",
            DomainEvent::FileRejected { .. } => "file-rejected",
            DomainEvent::ItemReordered { .. } => "item-reorder",
            DomainEvent::Notification { .. } => "notification",
        }
    }
}
