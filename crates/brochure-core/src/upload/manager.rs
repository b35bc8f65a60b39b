//! UploadManager - active upload set
//!
//! # 責務
//! - ファイルごとに UploadTask を作成し、Pending → Validating → Uploading へ進める
//! - 進捗 tick を受けて 100% 到達で Completed にし、アクティブ集合から外す
//! - キャンセル時はタイマーを abort し、エントリを削除する
//!
//! # 並行性
//! Manager 自体は同期。シミュレーションタイマーは `Arc<Mutex<UploadManager>>`
//! を短時間だけロックして `tick` を呼ぶ（ロックを await 越しに保持しない）。

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domain::{DomainEvent, FileDescriptor, UploadId, UploadState, UploadTask};
use crate::ports::{EventSink, IdGenerator};

use super::policy::{Rejection, UploadPolicy};

struct ActiveUpload {
    task: UploadTask,
    timer: Option<JoinHandle<()>>,
}

pub struct UploadManager {
    policy: UploadPolicy,
    ids: Arc<dyn IdGenerator>,
    events: Arc<dyn EventSink>,
    active: BTreeMap<UploadId, ActiveUpload>,
    /// Completed and rejected tasks, in the order they finished.
    finished: Vec<UploadTask>,
}

impl UploadManager {
    pub fn new(policy: UploadPolicy, ids: Arc<dyn IdGenerator>, events: Arc<dyn EventSink>) -> Self {
        Self {
            policy,
            ids,
            events,
            active: BTreeMap::new(),
            finished: Vec::new(),
        }
    }

    /// Validate `file` and, when it passes, put it in the active set.
    pub fn submit(&mut self, file: FileDescriptor) -> Result<UploadId, Rejection> {
        let mut task = UploadTask::new(self.ids.generate_upload_id(), file);
        task.start_validation();

        if let Err(rejection) = self.policy.validate(&task.file) {
            task.reject(rejection.to_string());
            tracing::info!(id = %task.id, file = %task.file.name, reason = %rejection, "file rejected");
            self.events.emit(DomainEvent::FileRejected {
                file_name: Some(task.file.name.clone()),
                message: rejection.to_string(),
            });
            self.finished.push(task);
            return Err(rejection);
        }

        task.start_upload();
        let id = task.id;
        tracing::info!(%id, file = %task.file.name, size = task.file.size, "upload started");
        self.events.emit(DomainEvent::UploadStarted {
            id,
            file_name: task.file.name.clone(),
        });
        self.active.insert(id, ActiveUpload { task, timer: None });
        Ok(id)
    }

    pub fn submit_all(&mut self, files: Vec<FileDescriptor>) -> (Vec<UploadId>, Vec<Rejection>) {
        let mut ids = Vec::new();
        let mut rejections = Vec::new();
        for file in files {
            match self.submit(file) {
                Ok(id) => ids.push(id),
                Err(rejection) => rejections.push(rejection),
            }
        }
        (ids, rejections)
    }

    /// Remember the timer driving `id` so `cancel` can stop it.
    /// A timer for a task that already left the active set is aborted.
    pub fn attach_timer(&mut self, id: UploadId, timer: JoinHandle<()>) {
        match self.active.get_mut(&id) {
            Some(entry) => entry.timer = Some(timer),
            None => timer.abort(),
        }
    }

    /// Apply one progress step. `None` means the task is no longer active
    /// (completed earlier or cancelled) and the tick was ignored.
    pub fn tick(&mut self, id: UploadId, delta: f64) -> Option<UploadState> {
        let entry = self.active.get_mut(&id)?;
        let reached = entry.task.advance(delta);
        let progress = entry.task.progress;
        self.events.emit(DomainEvent::UploadProgress { id, progress });

        if !reached {
            return Some(entry.task.state);
        }

        let ActiveUpload { mut task, .. } = self.active.remove(&id)?;
        task.mark_completed();
        tracing::info!(%id, file = %task.file.name, "upload completed");
        self.events.emit(DomainEvent::UploadCompleted {
            id,
            file_name: task.file.name.clone(),
        });
        let state = task.state;
        self.finished.push(task);

        if self.active.is_empty() {
            tracing::info!("all uploads complete");
            self.events.emit(DomainEvent::AllUploadsComplete);
        }
        Some(state)
    }

    /// Stop the timer and forget the task. Returns false when `id` is not active.
    pub fn cancel(&mut self, id: UploadId) -> bool {
        let Some(entry) = self.active.remove(&id) else {
            return false;
        };
        if let Some(timer) = entry.timer {
            timer.abort();
        }
        tracing::info!(%id, file = %entry.task.file.name, progress = entry.task.progress, "upload cancelled");
        self.events.emit(DomainEvent::UploadCancelled {
            id,
            file_name: entry.task.file.name,
        });
        true
    }

    /// Mean progress over the active set, 0 when idle.
    pub fn overall_progress(&self) -> f64 {
        if self.active.is_empty() {
            return 0.0;
        }
        let total: f64 = self.active.values().map(|a| a.task.progress).sum();
        total / self.active.len() as f64
    }

    pub fn is_uploading(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn active_ids(&self) -> Vec<UploadId> {
        self.active.keys().copied().collect()
    }

    pub fn task(&self, id: UploadId) -> Option<&UploadTask> {
        self.active
            .get(&id)
            .map(|a| &a.task)
            .or_else(|| self.finished.iter().find(|t| t.id == id))
    }

    pub fn finished(&self) -> &[UploadTask] {
        &self.finished
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }
}

impl Drop for UploadManager {
    fn drop(&mut self) {
        for entry in self.active.values_mut() {
            if let Some(timer) = entry.timer.take() {
                timer.abort();
            }
        }
    }
}
