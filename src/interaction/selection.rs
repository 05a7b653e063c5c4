use std::time::Duration;

use crate::{
    foundation::error::{TimelineError, TimelineResult},
    foundation::math::nearest_index,
    interaction::camera::CameraRequest,
    layout::events::{ProcessedEvent, ProcessedEventGroup},
};

/// Which event is selected, by track and event index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SelectionState {
    /// Track index.
    pub group_index: usize,
    /// Event index within the track's placed events.
    pub event_index: usize,
    /// Whether the camera should re-center on the selection.
    pub center_on_select: bool,
}

/// A selection resolved against the current event groups.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedSelection<'a> {
    /// Clamped track index.
    pub group_index: usize,
    /// Clamped event index.
    pub event_index: usize,
    /// The selected event.
    pub event: &'a ProcessedEvent,
}

/// Who wrote a selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum SelectionSource {
    /// Camera proximity.
    Auto,
    /// Arrow keys.
    Keyboard,
    /// Pointer click on a pill.
    Click,
    /// Direct API call.
    Api,
}

/// Arrow keys understood by keyboard navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum NavKey {
    /// Previous event.
    ArrowLeft,
    /// Next event.
    ArrowRight,
    /// Previous track.
    ArrowUp,
    /// Next track.
    ArrowDown,
}

/// Modifier keys held during a key press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Modifiers {
    /// Shift.
    pub shift: bool,
    /// Control.
    pub ctrl: bool,
    /// Alt / option.
    pub alt: bool,
    /// Meta / command.
    pub meta: bool,
}

/// One key press routed to the selection controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct KeyInput {
    /// Pressed key.
    pub key: NavKey,
    /// Held modifiers.
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Focus is inside a text field.
    #[serde(default)]
    pub in_text_input: bool,
}

impl KeyInput {
    /// Plain key press without modifiers.
    pub fn plain(key: NavKey) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
            in_text_input: false,
        }
    }

    fn is_ignored(&self) -> bool {
        self.in_text_input || self.modifiers.meta || self.modifiers.ctrl || self.modifiers.alt
    }
}

/// A selection write that took effect.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SelectionChange {
    /// New (clamped) selection.
    pub state: SelectionState,
    /// Writer.
    pub source: SelectionSource,
    /// Camera re-center request, present when `center_on_select` is set.
    pub camera_request: Option<CameraRequest>,
}

/// Reconciles auto-select, keyboard and click writers into one selection.
///
/// Writes that re-center the camera open a suppression window during which
/// auto-select stays quiet, so the camera move is not fought by proximity
/// reselection.
#[derive(Clone, Debug)]
pub struct SelectionController {
    state: Option<SelectionState>,
    suppress_until: Option<Duration>,
    suppression: Duration,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SUPPRESSION)
    }
}

impl SelectionController {
    /// Auto-select quiet period after a centering write.
    pub const DEFAULT_SUPPRESSION: Duration = Duration::from_millis(800);

    /// Empty controller with a custom suppression window.
    pub fn new(suppression: Duration) -> Self {
        Self {
            state: None,
            suppress_until: None,
            suppression,
        }
    }

    /// Stored selection, possibly stale; see [`Self::resolve`].
    pub fn state(&self) -> Option<SelectionState> {
        self.state
    }

    /// Drop the selection.
    pub fn clear(&mut self) {
        self.state = None;
    }

    /// Whether auto-select is currently suppressed.
    pub fn is_suppressed(&self, now: Duration) -> bool {
        self.suppress_until.is_some_and(|until| now < until)
    }

    /// Resolve the stored selection against `groups`, clamping stale indices.
    pub fn resolve<'a>(&self, groups: &'a [ProcessedEventGroup]) -> Option<ResolvedSelection<'a>> {
        let state = clamp_selection(self.state?, groups)?;
        let event = groups[state.group_index].event(state.event_index)?;
        Some(ResolvedSelection {
            group_index: state.group_index,
            event_index: state.event_index,
            event,
        })
    }

    /// Write a selection. Indices are clamped; a selection that cannot resolve
    /// to any event is ignored.
    pub fn select(
        &mut self,
        next: SelectionState,
        groups: &[ProcessedEventGroup],
        now: Duration,
        source: SelectionSource,
    ) -> Option<SelectionChange> {
        let state = clamp_selection(next, groups)?;
        let start_pos = groups[state.group_index]
            .event(state.event_index)?
            .start_pos;

        self.state = Some(state);
        if state.center_on_select {
            self.suppress_until = Some(now + self.suppression);
        }
        tracing::trace!(?state, ?source, "selection changed");

        Some(SelectionChange {
            state,
            source,
            camera_request: state.center_on_select.then_some(CameraRequest {
                target_x: start_pos,
            }),
        })
    }

    /// Select the clicked pill of track `track_name`. Always re-centers.
    pub fn click(
        &mut self,
        track_name: &str,
        event_index: usize,
        groups: &[ProcessedEventGroup],
        now: Duration,
    ) -> TimelineResult<SelectionChange> {
        let group_index = groups
            .iter()
            .position(|g| g.name == track_name)
            .ok_or_else(|| TimelineError::selection(format!("unknown track '{track_name}'")))?;
        let next = SelectionState {
            group_index,
            event_index,
            center_on_select: true,
        };
        self.select(next, groups, now, SelectionSource::Click)
            .ok_or_else(|| TimelineError::selection(format!("track '{track_name}' has no events")))
    }

    /// Arrow-key navigation. Returns `None` when the key is ignored or the
    /// selection is already at the boundary.
    pub fn handle_key(
        &mut self,
        input: KeyInput,
        groups: &[ProcessedEventGroup],
        now: Duration,
    ) -> Option<SelectionChange> {
        if input.is_ignored() {
            return None;
        }

        let next = match self.resolve(groups) {
            None => initial_selection(input.key, groups)?,
            Some(current) => navigate(current, input.key, groups)?,
        };
        self.select(
            SelectionState {
                group_index: next.0,
                event_index: next.1,
                center_on_select: true,
            },
            groups,
            now,
            SelectionSource::Keyboard,
        )
    }

    /// Move the selection to the event of the selected track nearest to
    /// `camera_x`. Never starts a selection from nothing.
    pub fn auto_select(
        &mut self,
        camera_x: f64,
        groups: &[ProcessedEventGroup],
        is_zooming: bool,
        now: Duration,
    ) -> Option<SelectionChange> {
        if is_zooming || self.is_suppressed(now) {
            return None;
        }
        let current = self.resolve(groups)?;
        let group = &groups[current.group_index];
        let nearest = nearest_index(group.processed_events.iter().map(|e| e.start_pos), camera_x)?;
        if nearest == current.event_index {
            return None;
        }
        self.select(
            SelectionState {
                group_index: current.group_index,
                event_index: nearest,
                center_on_select: false,
            },
            groups,
            now,
            SelectionSource::Auto,
        )
    }
}

/// Clamp both indices into bounds.
///
/// A group index landing on an empty track moves to the nearest earlier
/// non-empty track, or the nearest later one when none precedes it. `None`
/// only when every track is empty.
pub fn clamp_selection(
    state: SelectionState,
    groups: &[ProcessedEventGroup],
) -> Option<SelectionState> {
    let clamped = state.group_index.min(groups.len().checked_sub(1)?);
    let group_index = (0..=clamped)
        .rev()
        .find(|&i| !groups[i].is_empty())
        .or_else(|| (clamped + 1..groups.len()).find(|&i| !groups[i].is_empty()))?;
    let len = groups[group_index].len();
    let event_index = state.event_index.min(len.checked_sub(1)?);
    Some(SelectionState {
        group_index,
        event_index,
        ..state
    })
}

fn initial_selection(key: NavKey, groups: &[ProcessedEventGroup]) -> Option<(usize, usize)> {
    let (group_index, group) = groups.iter().enumerate().find(|(_, g)| !g.is_empty())?;
    let event_index = match key {
        NavKey::ArrowRight | NavKey::ArrowDown => 0,
        NavKey::ArrowLeft | NavKey::ArrowUp => group.len() - 1,
    };
    Some((group_index, event_index))
}

fn navigate(
    current: ResolvedSelection<'_>,
    key: NavKey,
    groups: &[ProcessedEventGroup],
) -> Option<(usize, usize)> {
    let g = current.group_index;
    let e = current.event_index;
    match key {
        NavKey::ArrowLeft => (e > 0).then(|| (g, e - 1)),
        NavKey::ArrowRight => (e + 1 < groups[g].len()).then(|| (g, e + 1)),
        NavKey::ArrowUp | NavKey::ArrowDown => {
            let target = if key == NavKey::ArrowDown {
                (g + 1..groups.len()).find(|&i| !groups[i].is_empty())
            } else {
                (0..g).rev().find(|&i| !groups[i].is_empty())
            }?;
            let from = current.event.start_pos;
            let event_index = nearest_index(
                groups[target].processed_events.iter().map(|ev| ev.start_pos),
                from,
            )?;
            Some((target, event_index))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/selection.rs"]
mod tests;
