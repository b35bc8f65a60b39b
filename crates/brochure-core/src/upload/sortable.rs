//! Drag-to-reorder lists.
//!
//! The host reports the vertical midpoint of every item in the current
//! order; the dragged item is placed before the first item whose midpoint
//! lies below the pointer, or at the end when there is none.

use crate::domain::DomainEvent;

/// Index (into `midpoints`) of the item the dragged one goes in front of.
///
/// Picks the item whose midpoint is below `pointer_y` and closest to it.
/// `None` means "append at the end".
pub fn drag_after_index(midpoints: &[f64], pointer_y: f64) -> Option<usize> {
    midpoints
        .iter()
        .enumerate()
        .filter_map(|(i, mid)| {
            let offset = pointer_y - mid;
            (offset < 0.0).then_some((i, offset))
        })
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortableList {
    id: String,
    items: Vec<String>,
}

impl SortableList {
    pub fn new(id: impl Into<String>, items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            id: id.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Drop `dragged` at `pointer_y`. `midpoints[i]` belongs to `items()[i]`;
    /// the dragged item's own midpoint is ignored.
    ///
    /// Returns the reorder event, or `None` when `dragged` is not in the list
    /// or the midpoints do not line up with the items.
    pub fn move_item(&mut self, dragged: &str, pointer_y: f64, midpoints: &[f64]) -> Option<DomainEvent> {
        if midpoints.len() != self.items.len() {
            tracing::warn!(
                list = %self.id,
                items = self.items.len(),
                midpoints = midpoints.len(),
                "midpoint count does not match item count"
            );
            return None;
        }
        let from = self.items.iter().position(|item| item == dragged)?;

        let (others, other_mids): (Vec<String>, Vec<f64>) = self
            .items
            .iter()
            .zip(midpoints)
            .enumerate()
            .filter(|(i, _)| *i != from)
            .map(|(_, (item, mid))| (item.clone(), *mid))
            .unzip();

        let mut order = others;
        let at = drag_after_index(&other_mids, pointer_y).unwrap_or(order.len());
        order.insert(at, self.items[from].clone());
        self.items = order;

        tracing::debug!(list = %self.id, item = dragged, position = at, "item reordered");
        Some(DomainEvent::ItemReordered {
            list_id: self.id.clone(),
            order: self.items.clone(),
        })
    }
}
