use std::time::Duration;

use crate::{
    config::model::TimelineConfig,
    foundation::core::YearRange,
    foundation::error::{TimelineError, TimelineResult},
    interaction::camera::{Camera, CameraRequest},
    interaction::focus::{FocusedYear, FocusedYearTracker, GalleryMode, ScrollDirection},
    interaction::selection::{
        KeyInput, ResolvedSelection, SelectionChange, SelectionController, SelectionSource,
        SelectionState,
    },
    interaction::zoom::{ZoomAnimationState, ZoomAnimator},
    layout::columns::{ColumnLayout, ColumnLayoutConfig, layout_columns},
    layout::events::{ProcessedEventGroup, group_bounds, process_event_tracks},
    layout::year_index::{YearIndexParams, YearPositionIndex},
    records::grouper::{GroupedRecords, group_by_year},
    records::model::{EventTrack, TimelineRecord},
    render::instances::HitTarget,
};

/// Something the engine wants the host (camera owner, sidebar) to know.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum TimelineEvent {
    /// The event selection changed.
    SelectionChanged(SelectionChange),
    /// Move the camera.
    CameraRequest(CameraRequest),
    /// The gallery should show a new year.
    FocusedYear(FocusedYear),
    /// The user pinned a thumbnail column.
    ColumnSelected {
        /// Year of the clicked thumbnail.
        year: i32,
        /// Index within that year.
        index: usize,
    },
    /// Camera travel direction changed.
    ScrollDirection(ScrollDirection),
}

/// Everything one [`TimelineEngine::frame`] produced.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameOutput {
    /// Emitted events, in emission order.
    pub events: Vec<TimelineEvent>,
    /// Whether positions were recomputed this frame.
    pub relayout: bool,
    /// Zoom state after the frame.
    pub zoom: ZoomAnimationState,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct LayoutKey {
    years: YearIndexParams,
    columns: ColumnLayoutConfig,
}

/// Derived positions for one layout key. Replaced wholesale, never patched.
#[derive(Clone, Debug)]
struct LayoutSnapshot {
    key: LayoutKey,
    years: YearPositionIndex,
    columns: ColumnLayout,
    groups: Vec<ProcessedEventGroup>,
}

/// Frame-driven owner of the layout core and its interaction state.
///
/// Hosts feed it data once, then call [`Self::frame`] every rendered frame and
/// the input methods as input arrives. Layout is recomputed only when the zoom
/// state changes the layout inputs.
#[derive(Clone, Debug)]
pub struct TimelineEngine {
    config: TimelineConfig,
    records: GroupedRecords,
    tracks: Vec<EventTrack>,
    zoom: ZoomAnimator,
    selection: SelectionController,
    focus: FocusedYearTracker,
    clock: Duration,
    snapshot: LayoutSnapshot,
}

impl TimelineEngine {
    /// Validate `config`, group `records` and lay everything out.
    #[tracing::instrument(skip_all, fields(records = records.len(), tracks = tracks.len()))]
    pub fn new(
        config: TimelineConfig,
        records: &[TimelineRecord],
        tracks: Vec<EventTrack>,
    ) -> TimelineResult<Self> {
        config.validate()?;
        let zoom = ZoomAnimator::new(config.zoom_multiplier, config.zoom_speed, config.zoom_epsilon)?;
        let records = group_by_year(records);
        let key = layout_key(&config, &zoom);
        let snapshot = build_snapshot(key, &records, &tracks, config.group_gap)?;

        Ok(Self {
            selection: SelectionController::new(config.suppression()),
            focus: FocusedYearTracker::new(config.scroll_deadzone),
            config,
            records,
            tracks,
            zoom,
            clock: Duration::ZERO,
            snapshot,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// Grouped artworks.
    pub fn records(&self) -> &GroupedRecords {
        &self.records
    }

    /// Current year index.
    pub fn year_index(&self) -> &YearPositionIndex {
        &self.snapshot.years
    }

    /// Current thumbnail layout.
    pub fn layout(&self) -> &ColumnLayout {
        &self.snapshot.columns
    }

    /// Current placed event tracks.
    pub fn event_groups(&self) -> &[ProcessedEventGroup] {
        &self.snapshot.groups
    }

    /// Outline of track `group_index` at active pill scale.
    pub fn group_outline(&self, group_index: usize) -> Option<crate::foundation::core::Rect> {
        group_bounds(self.snapshot.groups.get(group_index)?, &self.config.pill)
    }

    /// Years covered by the layout.
    pub fn year_range(&self) -> YearRange {
        self.config.year_range
    }

    /// Zoom animation snapshot.
    pub fn zoom_state(&self) -> ZoomAnimationState {
        self.zoom.state()
    }

    /// Stored selection (may be stale until resolved).
    pub fn selection(&self) -> Option<SelectionState> {
        self.selection.state()
    }

    /// Selection clamped against the current tracks.
    pub fn resolved_selection(&self) -> Option<ResolvedSelection<'_>> {
        self.selection.resolve(&self.snapshot.groups)
    }

    /// Year under the camera at the last frame.
    pub fn focused_year(&self) -> Option<i32> {
        self.focus.current_year()
    }

    /// Time accumulated from frame deltas.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Replace the artworks and relayout.
    pub fn set_records(&mut self, records: &[TimelineRecord]) -> TimelineResult<()> {
        self.records = group_by_year(records);
        self.rebuild()
    }

    /// Replace the event tracks and relayout. Existing selections are clamped
    /// on their next read.
    pub fn set_tracks(&mut self, tracks: Vec<EventTrack>) -> TimelineResult<()> {
        self.tracks = tracks;
        self.rebuild()
    }

    /// Zoom toward `target` in `[0, 1]`.
    pub fn set_zoom_target(&mut self, target: f64) {
        self.zoom.set_target(target);
    }

    /// Switch between following the focused year and a pinned gallery.
    pub fn set_gallery_mode(&mut self, mode: GalleryMode) {
        self.focus.set_mode(mode);
    }

    /// Advance one frame of `dt` seconds.
    ///
    /// Order: zoom step (may move the camera), relayout if zoom inputs
    /// changed, proximity auto-select, focused-year tracking.
    pub fn frame(&mut self, dt: f64, camera: &mut impl Camera) -> TimelineResult<FrameOutput> {
        let dt_secs = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.clock = self
            .clock
            .saturating_add(Duration::try_from_secs_f64(dt_secs).unwrap_or(Duration::ZERO));

        self.zoom.step(dt_secs, camera);
        let relayout = self.refresh_layout()?;

        let mut events = Vec::new();
        let camera_x = camera.x();

        if let Some(change) = self.selection.auto_select(
            camera_x,
            &self.snapshot.groups,
            self.zoom.is_zooming(),
            self.clock,
        ) {
            events.extend(change_events(change));
        }

        let focus = self.focus.update(
            camera_x,
            &self.snapshot.years,
            &self.records,
            &self.snapshot.groups,
        );
        if let Some(dir) = focus.direction {
            events.push(TimelineEvent::ScrollDirection(dir));
        }
        if let Some(year) = focus.focused {
            events.push(TimelineEvent::FocusedYear(year));
        }

        Ok(FrameOutput {
            events,
            relayout,
            zoom: self.zoom.state(),
        })
    }

    /// Arrow-key input.
    pub fn key(&mut self, input: KeyInput) -> Vec<TimelineEvent> {
        self.selection
            .handle_key(input, &self.snapshot.groups, self.clock)
            .map(change_events)
            .unwrap_or_default()
    }

    /// Click on the pill `event_index` of track `track_name`.
    pub fn click_event(
        &mut self,
        track_name: &str,
        event_index: usize,
    ) -> TimelineResult<Vec<TimelineEvent>> {
        let change = self
            .selection
            .click(track_name, event_index, &self.snapshot.groups, self.clock)?;
        Ok(change_events(change))
    }

    /// Click reported by the renderer, already mapped to a target.
    pub fn click_instance(&mut self, target: HitTarget) -> TimelineResult<Vec<TimelineEvent>> {
        match target {
            HitTarget::Event {
                group_index,
                event_index,
            } => {
                let name = self
                    .snapshot
                    .groups
                    .get(group_index)
                    .map(|g| g.name.clone())
                    .ok_or_else(|| {
                        TimelineError::selection(format!("no track at index {group_index}"))
                    })?;
                self.click_event(&name, event_index)
            }
            HitTarget::Record { year, index } => {
                self.focus.set_mode(GalleryMode::Manual);
                Ok(vec![TimelineEvent::ColumnSelected { year, index }])
            }
        }
    }

    /// Programmatic selection; centers when `state.center_on_select`.
    pub fn select(&mut self, state: SelectionState) -> Vec<TimelineEvent> {
        self.selection
            .select(state, &self.snapshot.groups, self.clock, SelectionSource::Api)
            .map(change_events)
            .unwrap_or_default()
    }

    /// Drop the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn refresh_layout(&mut self) -> TimelineResult<bool> {
        let key = layout_key(&self.config, &self.zoom);
        if key == self.snapshot.key {
            return Ok(false);
        }
        self.snapshot = build_snapshot(key, &self.records, &self.tracks, self.config.group_gap)?;
        Ok(true)
    }

    fn rebuild(&mut self) -> TimelineResult<()> {
        let key = layout_key(&self.config, &self.zoom);
        self.snapshot = build_snapshot(key, &self.records, &self.tracks, self.config.group_gap)?;
        Ok(())
    }
}

fn layout_key(config: &TimelineConfig, zoom: &ZoomAnimator) -> LayoutKey {
    let scale = zoom.scale();
    LayoutKey {
        years: config.year_index_params(zoom.origin_x(), zoom.progress(), scale),
        columns: config.column_layout(scale),
    }
}

fn build_snapshot(
    key: LayoutKey,
    records: &GroupedRecords,
    tracks: &[EventTrack],
    group_gap: f64,
) -> TimelineResult<LayoutSnapshot> {
    let years = YearPositionIndex::build(&key.years)?;
    let columns = layout_columns(records, &years, &key.columns)?;
    let groups = process_event_tracks(tracks, &years, group_gap);
    Ok(LayoutSnapshot {
        key,
        years,
        columns,
        groups,
    })
}

fn change_events(change: SelectionChange) -> Vec<TimelineEvent> {
    let mut out = vec![TimelineEvent::SelectionChanged(change)];
    if let Some(req) = change.camera_request {
        out.push(TimelineEvent::CameraRequest(req));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/engine/timeline.rs"]
mod tests;
