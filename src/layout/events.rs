use crate::{
    foundation::core::{Rect, RgbColor},
    layout::year_index::YearPositionIndex,
    records::date::year_of,
    records::model::{EventRecord, EventTrack},
};

/// One event placed on the year axis.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ProcessedEvent {
    /// Stable `"{track index}-{event index}"` key; the event index counts from the source track.
    pub id: String,
    /// X position of the event's year.
    pub start_pos: f64,
    /// Calendar year of the start date.
    pub start_year: i32,
    /// Source event.
    pub event: EventRecord,
}

/// A track with its placed events and vertical lane offset.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ProcessedEventGroup {
    /// Track name.
    pub name: String,
    /// Track color.
    pub color: RgbColor,
    /// Events that carried a usable date, in source order.
    pub processed_events: Vec<ProcessedEvent>,
    /// `track index * group gap`.
    pub y_offset: f64,
    /// Events dropped because their date had no calendar year.
    pub dropped: usize,
}

impl ProcessedEventGroup {
    /// Number of placed events.
    pub fn len(&self) -> usize {
        self.processed_events.len()
    }

    /// Whether the group has no placed events.
    pub fn is_empty(&self) -> bool {
        self.processed_events.is_empty()
    }

    /// Placed event at `idx`.
    pub fn event(&self, idx: usize) -> Option<&ProcessedEvent> {
        self.processed_events.get(idx)
    }
}

/// Pill geometry used for group outlines.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PillMetrics {
    /// Pill width at scale 1.
    pub width: f64,
    /// Pill height at scale 1.
    pub height: f64,
    /// Largest scale a pill reaches (hovered / active).
    pub active_scale: f64,
    /// Horizontal outline padding.
    pub padding_x: f64,
    /// Vertical outline padding.
    pub padding_y: f64,
}

/// Place every event of every track on the year axis.
///
/// Track order is preserved; lane offsets follow it.
#[tracing::instrument(skip(tracks, years), fields(tracks = tracks.len()))]
pub fn process_event_tracks(
    tracks: &[EventTrack],
    years: &YearPositionIndex,
    group_gap: f64,
) -> Vec<ProcessedEventGroup> {
    tracks
        .iter()
        .enumerate()
        .map(|(track_idx, track)| process_track(track_idx, track, years, group_gap))
        .collect()
}

fn process_track(
    track_idx: usize,
    track: &EventTrack,
    years: &YearPositionIndex,
    group_gap: f64,
) -> ProcessedEventGroup {
    let mut processed_events = Vec::with_capacity(track.events.len());
    let mut dropped = 0usize;

    for (event_idx, event) in track.events.iter().enumerate() {
        let Some(start_year) = year_of(&event.start_date) else {
            dropped += 1;
            tracing::warn!(
                track = %track.name,
                start_date = %event.start_date,
                "dropping event without a calendar year"
            );
            continue;
        };
        processed_events.push(ProcessedEvent {
            id: format!("{track_idx}-{event_idx}"),
            start_pos: years.position_of(start_year),
            start_year,
            event: event.clone(),
        });
    }

    ProcessedEventGroup {
        name: track.name.clone(),
        color: track.color,
        processed_events,
        y_offset: track_idx as f64 * group_gap,
        dropped,
    }
}

/// Outline box enclosing every pill of `group` at its active scale.
///
/// Returns `None` for a group without events.
pub fn group_bounds(group: &ProcessedEventGroup, pill: &PillMetrics) -> Option<Rect> {
    if group.is_empty() {
        return None;
    }

    let half_w = pill.width * pill.active_scale * 0.5;
    let half_h = pill.height * pill.active_scale * 0.5;
    let cy = group.y_offset;

    let (mut x0, mut y0) = (f64::INFINITY, f64::INFINITY);
    let (mut x1, mut y1) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for ev in &group.processed_events {
        x0 = x0.min(ev.start_pos - half_w);
        x1 = x1.max(ev.start_pos + half_w);
        y0 = y0.min(cy - half_h);
        y1 = y1.max(cy + half_h);
    }

    Some(Rect::new(
        x0 - pill.padding_x,
        y0 - pill.padding_y,
        x1 + pill.padding_x,
        y1 + pill.padding_y,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/events.rs"]
mod tests;
