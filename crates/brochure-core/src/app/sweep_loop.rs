//! SweepLoop - 期限切れエントリの定期削除
//!
//! # フロー
//! 1. `interval` ごとに `Storage::cleanup_expired` を呼ぶ
//! 2. shutdown（watch チャネル）が来たらループを抜ける
//!
//! ストレージが無効な Site では何もせずに終了します。

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::site::Site;

/// Handle to the background sweep.
/// - `request_shutdown()` stops it after the current pass
/// - `shutdown_and_join()` also waits and reports the total removed
pub struct SweepLoop {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<usize>,
}

impl SweepLoop {
    /// Must be called inside a tokio runtime.
    pub fn spawn(site: Arc<Site>, interval: Duration) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let join = tokio::spawn(sweep_loop(site, interval, shutdown_rx));
        Self { shutdown_tx, join }
    }

    pub fn request_shutdown(&self) {
        // receiver may already be gone
        let _ = self.shutdown_tx.send(true);
    }

    pub async fn shutdown_and_join(self) -> usize {
        self.request_shutdown();
        match self.join.await {
            Ok(removed) => removed,
            Err(err) => {
                tracing::warn!(error = %err, "sweep task ended abnormally");
                0
            }
        }
    }
}

async fn sweep_loop(site: Arc<Site>, interval: Duration, mut shutdown_rx: watch::Receiver<bool>) -> usize {
    if site.storage().is_none() {
        tracing::debug!("storage disabled, sweep not started");
        return 0;
    }

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // boot already swept once
    ticker.tick().await;

    let mut removed_total = 0;
    loop {
        if *shutdown_rx.borrow() {
            break;
        }
        tokio::select! {
            _ = shutdown_rx.changed() => continue,
            _ = ticker.tick() => {}
        }

        let Some(storage) = site.storage() else {
            break;
        };
        match storage.cleanup_expired() {
            Ok(0) => {}
            Ok(removed) => {
                removed_total += removed;
                tracing::info!(removed, "expired entries swept");
            }
            Err(err) => tracing::warn!(error = %err, "periodic cleanup failed"),
        }
    }
    removed_total
}
