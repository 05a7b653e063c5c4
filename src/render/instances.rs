//! Adapter between pure layout output and a persistent instanced renderer.
//!
//! Layout recomputes whole transform arrays; the renderer owns long-lived
//! instance buffers. [`apply_batch_diff`] pushes only what changed.

use crate::{
    foundation::core::{InstanceTransform, Point, Rect, Vec2, YearRange},
    layout::columns::ColumnLayout,
    layout::events::ProcessedEventGroup,
    records::grouper::GroupedRecords,
};

/// Parallel position/scale arrays for one instanced draw.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct InstanceBatch {
    /// Instance centers.
    pub positions: Vec<Point>,
    /// Instance sizes.
    pub scales: Vec<Vec2>,
}

impl InstanceBatch {
    /// Split a transform list into parallel arrays.
    pub fn from_transforms(transforms: &[InstanceTransform]) -> Self {
        Self {
            positions: transforms.iter().map(|t| t.position).collect(),
            scales: transforms.iter().map(|t| t.scale).collect(),
        }
    }

    /// Thumbnail batch of a column layout.
    pub fn from_layout(layout: &ColumnLayout) -> Self {
        Self::from_transforms(&layout.instances)
    }

    /// Pill batch: one instance per placed event, centered on its lane.
    pub fn from_event_groups(groups: &[ProcessedEventGroup], pill_size: Vec2) -> Self {
        let transforms: Vec<InstanceTransform> = groups
            .iter()
            .flat_map(|g| {
                g.processed_events.iter().map(move |ev| InstanceTransform {
                    position: Point::new(ev.start_pos, g.y_offset),
                    scale: pill_size,
                })
            })
            .collect();
        Self::from_transforms(&transforms)
    }

    /// Number of instances to draw.
    pub fn instance_count(&self) -> usize {
        self.positions.len().min(self.scales.len())
    }

    /// Transform of instance `idx`.
    pub fn get(&self, idx: usize) -> Option<InstanceTransform> {
        Some(InstanceTransform {
            position: *self.positions.get(idx)?,
            scale: *self.scales.get(idx)?,
        })
    }

    /// Index of the topmost instance containing `p`, scanning back to front.
    pub fn hit_test(&self, p: Point) -> Option<usize> {
        (0..self.instance_count())
            .rev()
            .find(|&idx| self.get(idx).is_some_and(|t| contains(t.bounds(), p)))
    }
}

fn contains(r: Rect, p: Point) -> bool {
    p.x >= r.x0 && p.x <= r.x1 && p.y >= r.y0 && p.y <= r.y1
}

/// Indices whose transform differs between `prev` and `next`, plus every index
/// that exists only in `next`.
pub fn diff_batches(prev: &InstanceBatch, next: &InstanceBatch) -> Vec<usize> {
    (0..next.instance_count())
        .filter(|&idx| prev.get(idx) != next.get(idx))
        .collect()
}

/// A renderer holding persistent instance buffers.
pub trait InstanceSink {
    /// Resize the instance buffer.
    fn set_instance_count(&mut self, count: usize);
    /// Overwrite one instance.
    fn set_instance(&mut self, idx: usize, transform: InstanceTransform);
}

/// Bring `sink` from `prev` to `next`, writing only changed instances.
/// Returns the number of instances written.
pub fn apply_batch_diff(
    sink: &mut impl InstanceSink,
    prev: &InstanceBatch,
    next: &InstanceBatch,
) -> usize {
    if prev.instance_count() != next.instance_count() {
        sink.set_instance_count(next.instance_count());
    }
    let changed = diff_batches(prev, next);
    for &idx in &changed {
        if let Some(t) = next.get(idx) {
            sink.set_instance(idx, t);
        }
    }
    changed.len()
}

/// What a renderer hit index refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum HitTarget {
    /// A thumbnail: year and index within that year's sorted records.
    Record {
        /// Record year.
        year: i32,
        /// Index within the year.
        index: usize,
    },
    /// An event pill.
    Event {
        /// Track index.
        group_index: usize,
        /// Event index within the track.
        event_index: usize,
    },
}

/// Map a thumbnail instance index back to its record.
pub fn record_for_instance(
    records: &GroupedRecords,
    range: YearRange,
    instance: usize,
) -> Option<HitTarget> {
    records
        .iter_in(range)
        .nth(instance)
        .map(|(year, index, _)| HitTarget::Record { year, index })
}

/// Map a pill instance index (see [`InstanceBatch::from_event_groups`]) back
/// to its event.
pub fn event_for_instance(groups: &[ProcessedEventGroup], instance: usize) -> Option<HitTarget> {
    let mut remaining = instance;
    for (group_index, g) in groups.iter().enumerate() {
        if remaining < g.len() {
            return Some(HitTarget::Event {
                group_index,
                event_index: remaining,
            });
        }
        remaining -= g.len();
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/render/instances.rs"]
mod tests;
