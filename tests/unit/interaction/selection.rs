use super::*;
use crate::{foundation::core::RgbColor, records::model::EventRecord};

fn group(name: &str, track_idx: usize, positions: &[f64]) -> ProcessedEventGroup {
    ProcessedEventGroup {
        name: name.to_string(),
        color: RgbColor::new(0, 0, 0),
        processed_events: positions
            .iter()
            .enumerate()
            .map(|(i, &p)| ProcessedEvent {
                id: format!("{track_idx}-{i}"),
                start_pos: p,
                start_year: 1500 + i as i32,
                event: EventRecord::new("1500", "e"),
            })
            .collect(),
        y_offset: track_idx as f64 * 10.0,
        dropped: 0,
    }
}

fn groups() -> Vec<ProcessedEventGroup> {
    vec![
        group("A", 0, &[0.0, 10.0, 30.0]),
        group("B", 1, &[2.0, 9.0, 20.0]),
        group("C", 2, &[]),
        group("D", 3, &[100.0]),
    ]
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn sel(g: usize, e: usize, center: bool) -> SelectionState {
    SelectionState {
        group_index: g,
        event_index: e,
        center_on_select: center,
    }
}

#[test]
fn arrow_down_picks_closest_event_in_next_track() {
    let gs = groups();
    let mut c = SelectionController::default();
    c.select(sel(0, 1, false), &gs, ms(0), SelectionSource::Api);
    let change = c
        .handle_key(KeyInput::plain(NavKey::ArrowDown), &gs, ms(0))
        .unwrap();
    assert_eq!(change.state, sel(1, 1, true));
    assert_eq!(change.source, SelectionSource::Keyboard);
    assert_eq!(change.camera_request, Some(CameraRequest { target_x: 9.0 }));
}

#[test]
fn vertical_navigation_skips_empty_tracks_and_stops_at_edges() {
    let gs = groups();
    let mut c = SelectionController::default();
    c.select(sel(1, 2, false), &gs, ms(0), SelectionSource::Api);
    let change = c
        .handle_key(KeyInput::plain(NavKey::ArrowDown), &gs, ms(0))
        .unwrap();
    assert_eq!(change.state, sel(3, 0, true));
    assert!(
        c.handle_key(KeyInput::plain(NavKey::ArrowDown), &gs, ms(0))
            .is_none()
    );
    let change = c
        .handle_key(KeyInput::plain(NavKey::ArrowUp), &gs, ms(0))
        .unwrap();
    assert_eq!(change.state, sel(1, 2, true));
}

#[test]
fn horizontal_navigation_clamps_within_track() {
    let gs = groups();
    let mut c = SelectionController::default();
    c.select(sel(0, 0, false), &gs, ms(0), SelectionSource::Api);
    assert!(
        c.handle_key(KeyInput::plain(NavKey::ArrowLeft), &gs, ms(0))
            .is_none()
    );
    let change = c
        .handle_key(KeyInput::plain(NavKey::ArrowRight), &gs, ms(0))
        .unwrap();
    assert_eq!(change.state.event_index, 1);
    c.handle_key(KeyInput::plain(NavKey::ArrowRight), &gs, ms(0));
    assert!(
        c.handle_key(KeyInput::plain(NavKey::ArrowRight), &gs, ms(0))
            .is_none()
    );
    assert_eq!(c.state().unwrap().event_index, 2);
}

#[test]
fn keyboard_initializes_from_nothing() {
    let gs = vec![group("empty", 0, &[]), group("B", 1, &[1.0, 2.0, 3.0])];
    let mut c = SelectionController::default();
    let change = c
        .handle_key(KeyInput::plain(NavKey::ArrowDown), &gs, ms(0))
        .unwrap();
    assert_eq!(change.state, sel(1, 0, true));

    let mut c = SelectionController::default();
    let change = c
        .handle_key(KeyInput::plain(NavKey::ArrowUp), &gs, ms(0))
        .unwrap();
    assert_eq!(change.state, sel(1, 2, true));
}

#[test]
fn modifiers_and_text_focus_suppress_keys() {
    let gs = groups();
    let mut c = SelectionController::default();
    let mut input = KeyInput::plain(NavKey::ArrowRight);
    input.modifiers.ctrl = true;
    assert!(c.handle_key(input, &gs, ms(0)).is_none());
    let mut input = KeyInput::plain(NavKey::ArrowRight);
    input.in_text_input = true;
    assert!(c.handle_key(input, &gs, ms(0)).is_none());
    let mut input = KeyInput::plain(NavKey::ArrowRight);
    input.modifiers.shift = true;
    assert!(c.handle_key(input, &gs, ms(0)).is_some());
}

#[test]
fn click_resolves_track_by_name_and_centers() {
    let gs = groups();
    let mut c = SelectionController::default();
    let change = c.click("B", 2, &gs, ms(0)).unwrap();
    assert_eq!(change.state, sel(1, 2, true));
    assert_eq!(change.camera_request, Some(CameraRequest { target_x: 20.0 }));
    assert!(c.click("nope", 0, &gs, ms(0)).is_err());
    assert!(c.click("C", 0, &gs, ms(0)).is_err());
}

#[test]
fn auto_select_is_suppressed_after_centering_write() {
    let gs = groups();
    let mut c = SelectionController::default();
    c.click("A", 0, &gs, ms(1_000)).unwrap();

    for t in [1_000, 1_200, 1_500, 1_799] {
        assert!(c.auto_select(29.0, &gs, false, ms(t)).is_none());
        assert_eq!(c.state().unwrap().event_index, 0);
    }

    let change = c.auto_select(29.0, &gs, false, ms(1_800)).unwrap();
    assert_eq!(change.state, sel(0, 2, false));
    assert_eq!(change.camera_request, None);
}

#[test]
fn auto_select_never_initiates_and_waits_for_zoom() {
    let gs = groups();
    let mut c = SelectionController::default();
    assert!(c.auto_select(10.0, &gs, false, ms(0)).is_none());
    assert!(c.state().is_none());

    c.select(sel(0, 0, false), &gs, ms(0), SelectionSource::Api);
    assert!(c.auto_select(10.0, &gs, true, ms(0)).is_none());
    let change = c.auto_select(10.0, &gs, false, ms(0)).unwrap();
    assert_eq!(change.state.event_index, 1);
    assert!(c.auto_select(11.0, &gs, false, ms(0)).is_none());
}

#[test]
fn auto_select_changes_do_not_open_suppression() {
    let gs = groups();
    let mut c = SelectionController::default();
    c.select(sel(0, 0, false), &gs, ms(0), SelectionSource::Api);
    c.auto_select(10.0, &gs, false, ms(0)).unwrap();
    assert!(!c.is_suppressed(ms(1)));
    assert!(c.auto_select(30.0, &gs, false, ms(1)).is_some());
}

#[test]
fn stale_indices_clamp_instead_of_failing() {
    let gs = groups();
    let mut c = SelectionController::default();
    let change = c
        .select(sel(99, 99, false), &gs, ms(0), SelectionSource::Api)
        .unwrap();
    assert_eq!(change.state, sel(3, 0, false));

    assert_eq!(clamp_selection(sel(0, 50, true), &gs), Some(sel(0, 2, true)));
    assert_eq!(clamp_selection(sel(2, 0, true), &gs), Some(sel(1, 0, true)));
    assert_eq!(clamp_selection(sel(0, 0, true), &[]), None);
}

#[test]
fn resolve_clamps_after_data_shrinks() {
    let gs = groups();
    let mut c = SelectionController::default();
    c.select(sel(1, 2, false), &gs, ms(0), SelectionSource::Api);
    let smaller = vec![group("A", 0, &[0.0]), group("B", 1, &[5.0])];
    let r = c.resolve(&smaller).unwrap();
    assert_eq!((r.group_index, r.event_index), (1, 0));
    assert_eq!(r.event.start_pos, 5.0);
    assert!(c.resolve(&[]).is_none());
}

#[test]
fn empty_last_track_falls_back_to_earlier_track() {
    let gs = vec![
        group("A", 0, &[0.0, 10.0]),
        group("B", 1, &[5.0]),
        group("C", 2, &[8.0]),
    ];
    let mut c = SelectionController::default();
    c.select(sel(2, 0, false), &gs, ms(0), SelectionSource::Api)
        .unwrap();

    let reloaded = vec![group("A", 0, &[0.0, 10.0]), group("B", 1, &[])];
    let r = c.resolve(&reloaded).unwrap();
    assert_eq!((r.group_index, r.event_index), (0, 0));

    let change = c.auto_select(10.0, &reloaded, false, ms(5_000)).unwrap();
    assert_eq!(change.state, sel(0, 1, false));
}

#[test]
fn leading_empty_tracks_fall_forward() {
    let gs = vec![group("A", 0, &[]), group("B", 1, &[]), group("C", 2, &[4.0])];
    assert_eq!(clamp_selection(sel(0, 3, false), &gs), Some(sel(2, 0, false)));
    let empty = vec![group("A", 0, &[]), group("B", 1, &[])];
    assert_eq!(clamp_selection(sel(1, 0, false), &empty), None);
}
