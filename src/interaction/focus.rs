use crate::{
    layout::events::ProcessedEventGroup,
    layout::year_index::YearPositionIndex,
    records::grouper::GroupedRecords,
    records::model::TimelineRecord,
};

/// How the gallery sidebar picks what to show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GalleryMode {
    /// Follow the year under the camera.
    #[default]
    FocusedYear,
    /// The user pinned something else; focus updates are withheld.
    Manual,
}

/// Direction of horizontal camera travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ScrollDirection {
    /// Toward earlier years.
    Left,
    /// Toward later years.
    Right,
}

/// Reference to an event happening in the focused year.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FocusedEvent {
    /// Track index.
    pub group_index: usize,
    /// Event index within the track.
    pub event_index: usize,
    /// Stable event id.
    pub id: String,
    /// Event description.
    pub description: String,
}

/// Payload pushed to the gallery sidebar when the centered year changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FocusedYear {
    /// Year nearest to the camera.
    pub year: i32,
    /// Events of every track in that year.
    pub events: Vec<FocusedEvent>,
    /// Artworks of that year, in layout order.
    pub images: Vec<TimelineRecord>,
}

/// What the tracker emitted this frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FocusFrame {
    /// New focused year, if it changed and the gallery follows focus.
    pub focused: Option<FocusedYear>,
    /// New scroll direction, if it changed.
    pub direction: Option<ScrollDirection>,
}

/// Tracks the year under the camera and the direction of travel.
#[derive(Clone, Debug)]
pub struct FocusedYearTracker {
    current: Option<i32>,
    emitted: Option<i32>,
    last_camera_x: Option<f64>,
    direction: Option<ScrollDirection>,
    mode: GalleryMode,
    deadzone: f64,
}

impl Default for FocusedYearTracker {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DEADZONE)
    }
}

impl FocusedYearTracker {
    /// Camera movement below this is treated as rest.
    pub const DEFAULT_DEADZONE: f64 = 0.01;

    /// Tracker with a custom scroll deadzone.
    pub fn new(deadzone: f64) -> Self {
        Self {
            current: None,
            emitted: None,
            last_camera_x: None,
            direction: None,
            mode: GalleryMode::FocusedYear,
            deadzone: deadzone.abs(),
        }
    }

    /// Year nearest to the camera at the last update.
    pub fn current_year(&self) -> Option<i32> {
        self.current
    }

    /// Last emitted scroll direction.
    pub fn direction(&self) -> Option<ScrollDirection> {
        self.direction
    }

    /// Current gallery mode.
    pub fn mode(&self) -> GalleryMode {
        self.mode
    }

    /// Switch gallery mode. Returning to [`GalleryMode::FocusedYear`] makes the
    /// next update re-emit the current year.
    pub fn set_mode(&mut self, mode: GalleryMode) {
        if mode == GalleryMode::FocusedYear && self.mode != mode {
            self.emitted = None;
        }
        self.mode = mode;
    }

    /// Run once per frame.
    pub fn update(
        &mut self,
        camera_x: f64,
        years: &YearPositionIndex,
        records: &GroupedRecords,
        groups: &[ProcessedEventGroup],
    ) -> FocusFrame {
        let mut frame = FocusFrame::default();

        if let Some(prev) = self.last_camera_x {
            let dx = camera_x - prev;
            if dx.abs() > self.deadzone {
                let dir = if dx > 0.0 {
                    ScrollDirection::Right
                } else {
                    ScrollDirection::Left
                };
                if self.direction != Some(dir) {
                    self.direction = Some(dir);
                    frame.direction = Some(dir);
                }
            }
        }
        self.last_camera_x = Some(camera_x);

        let year = years.closest_year(camera_x);
        self.current = Some(year);
        if self.mode == GalleryMode::FocusedYear && self.emitted != Some(year) {
            self.emitted = Some(year);
            frame.focused = Some(collect_year(year, records, groups));
        }

        frame
    }
}

fn collect_year(year: i32, records: &GroupedRecords, groups: &[ProcessedEventGroup]) -> FocusedYear {
    let events = groups
        .iter()
        .enumerate()
        .flat_map(|(gi, g)| {
            g.processed_events
                .iter()
                .enumerate()
                .filter(move |(_, ev)| ev.start_year == year)
                .map(move |(ei, ev)| FocusedEvent {
                    group_index: gi,
                    event_index: ei,
                    id: ev.id.clone(),
                    description: ev.event.description.clone(),
                })
        })
        .collect();

    FocusedYear {
        year,
        events,
        images: records.year(year).to_vec(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/focus.rs"]
mod tests;
