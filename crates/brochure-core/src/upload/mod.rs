//! Upload widget: validation policy, drop-zone state machine, the active
//! upload set with its simulated progress timers, and sortable lists.

mod drop_zone;
mod manager;
mod policy;
mod simulation;
mod sortable;

pub use drop_zone::{DropOutcome, DropZone, DropZoneEvent};
pub use manager::UploadManager;
pub use policy::{FileCategory, Rejection, UploadPolicy, is_previewable};
pub use simulation::{SimulationSettings, spawn_simulation, start_simulations};
pub use sortable::{SortableList, drag_after_index};

#[cfg(test)]
pub(crate) use manager::test_support;
