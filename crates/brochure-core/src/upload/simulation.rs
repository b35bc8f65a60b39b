//! Simulated transfer: a per-file timer adds random progress until 100.
//!
//! There is no transport. Each task gets a random period in
//! `tick_min..=tick_max` and adds a random step in `[0, max_step)` per tick.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::task::JoinHandle;

use crate::config::UploadConfig;
use crate::domain::{UploadId, UploadState};

use super::manager::UploadManager;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSettings {
    pub tick_min: Duration,
    pub tick_max: Duration,
    pub max_step: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self::from(&UploadConfig::default())
    }
}

impl From<&UploadConfig> for SimulationSettings {
    fn from(config: &UploadConfig) -> Self {
        Self {
            tick_min: Duration::from_millis(config.tick_min_ms),
            tick_max: Duration::from_millis(config.tick_max_ms),
            max_step: config.max_step,
        }
    }
}

/// Drive one task until it completes or leaves the active set.
pub fn spawn_simulation(
    manager: Arc<Mutex<UploadManager>>,
    id: UploadId,
    settings: SimulationSettings,
    seed: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut rng = StdRng::seed_from_u64(seed);
        // interval() panics on a zero period
        let min = millis(settings.tick_min).max(1);
        let max = millis(settings.tick_max).max(min);
        let period = Duration::from_millis(rng.gen_range(min..=max));
        let mut interval = tokio::time::interval(period);
        // first tick of a tokio interval fires immediately
        interval.tick().await;

        loop {
            interval.tick().await;
            let delta = if settings.max_step > 0.0 {
                rng.gen_range(0.0..settings.max_step)
            } else {
                0.0
            };
            match manager.lock().tick(id, delta) {
                Some(UploadState::Uploading) => continue,
                Some(state) => {
                    tracing::trace!(%id, state = state.as_str(), "simulation finished");
                    break;
                }
                None => {
                    tracing::trace!(%id, "simulation stopped, task no longer active");
                    break;
                }
            }
        }
    })
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Start a timer for every id and register it with the manager.
pub fn start_simulations<R: Rng + ?Sized>(
    manager: &Arc<Mutex<UploadManager>>,
    ids: &[UploadId],
    settings: SimulationSettings,
    rng: &mut R,
) {
    for &id in ids {
        let timer = spawn_simulation(Arc::clone(manager), id, settings, rng.r#gen());
        manager.lock().attach_timer(id, timer);
    }
}
