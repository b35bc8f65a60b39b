//! Drop zones wired to the site's upload manager.

use rand::Rng;

use crate::domain::{DomainEvent, UploadId};
use crate::upload::{DropZone, DropZoneEvent, SimulationSettings, start_simulations};

use super::site::Site;

impl Site {
    /// A drop zone using the configured `multiple` flag.
    pub fn drop_zone(&self, id: &str) -> DropZone {
        self.drop_zone_with(id, self.config.upload.multiple)
    }

    pub fn drop_zone_with(&self, id: &str, multiple: bool) -> DropZone {
        let policy = self.uploads.lock().policy().clone();
        DropZone::new(id, multiple, policy)
    }

    /// Feed one host event to `zone`. Accepted files start uploading right
    /// away; their ids are returned. Must run inside a tokio runtime.
    pub fn handle_drop<R: Rng + ?Sized>(
        &self,
        zone: &mut DropZone,
        event: DropZoneEvent,
        rng: &mut R,
    ) -> Vec<UploadId> {
        let outcome = zone.handle(event);
        for rejection in &outcome.rejections {
            tracing::debug!(zone = zone.id(), kind = ?rejection.kind(), %rejection, "file rejected");
            self.events.emit(DomainEvent::FileRejected {
                file_name: rejection.file_name().map(str::to_string),
                message: rejection.to_string(),
            });
        }
        if outcome.accepted.is_empty() {
            return Vec::new();
        }

        let (ids, _) = self.uploads.lock().submit_all(outcome.accepted);
        start_simulations(
            &self.uploads,
            &ids,
            SimulationSettings::from(&self.config.upload),
            rng,
        );
        ids
    }

    pub fn cancel_upload(&self, id: UploadId) -> bool {
        self.uploads.lock().cancel(id)
    }
}
