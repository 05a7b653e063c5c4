use super::*;
use crate::interaction::camera::CameraState;

fn animator() -> ZoomAnimator {
    ZoomAnimator::new(4.0, ZoomAnimator::DEFAULT_SPEED, ZoomAnimator::DEFAULT_EPSILON).unwrap()
}

#[test]
fn progress_rises_monotonically_and_never_exceeds_one() {
    let mut zoom = animator();
    let mut cam = CameraState::at(12.0);
    zoom.set_target(1.0);

    let mut last = zoom.progress();
    let mut frames = 0;
    while zoom.is_zooming() {
        let step = zoom.step(1.0 / 60.0, &mut cam);
        assert!(step.progress >= last);
        assert!(step.progress <= 1.0);
        last = step.progress;
        frames += 1;
        assert!(frames < 10_000, "animation never settled");
    }
    assert_eq!(zoom.progress(), 1.0);
    assert_eq!(zoom.origin_x(), Some(12.0));
}

#[test]
fn origin_is_captured_once_and_survives_retargeting() {
    let mut zoom = animator();
    let mut cam = CameraState::at(5.0);
    zoom.set_target(1.0);
    zoom.step(0.016, &mut cam);
    assert_eq!(zoom.origin_x(), Some(5.0));

    cam.x = 50.0;
    zoom.set_target(0.5);
    zoom.step(0.016, &mut cam);
    assert_eq!(zoom.origin_x(), Some(5.0));
}

#[test]
fn origin_is_released_only_at_rest_at_zero() {
    let mut zoom = animator();
    let mut cam = CameraState::at(0.0);
    zoom.set_target(1.0);
    for _ in 0..600 {
        zoom.step(0.016, &mut cam);
    }
    assert!(!zoom.is_zooming());
    assert!(zoom.origin_x().is_some());

    zoom.set_target(0.0);
    zoom.step(0.016, &mut cam);
    assert!(zoom.origin_x().is_some());
    for _ in 0..600 {
        zoom.step(0.016, &mut cam);
    }
    assert_eq!(zoom.progress(), 0.0);
    assert_eq!(zoom.origin_x(), None);
}

#[test]
fn camera_offset_scales_about_origin() {
    let mut zoom = animator();
    let mut cam = CameraState::at(10.0);
    zoom.set_target(1.0);
    zoom.step(0.0, &mut cam);
    assert_eq!(zoom.origin_x(), Some(10.0));

    cam.x = 14.0;
    let before = zoom.scale();
    zoom.step(0.05, &mut cam);
    let after = zoom.scale();
    assert!((cam.x - (10.0 + 4.0 * after / before)).abs() < 1e-12);
}

#[test]
fn camera_at_origin_does_not_drift() {
    let mut zoom = animator();
    let mut cam = CameraState::at(-33.0);
    zoom.set_target(1.0);
    for _ in 0..200 {
        zoom.step(0.016, &mut cam);
        assert!((cam.x + 33.0).abs() < 1e-9);
    }
}

#[test]
fn huge_frame_delta_is_clamped() {
    let mut zoom = animator();
    let mut cam = CameraState::at(0.0);
    zoom.set_target(0.4);
    let step = zoom.step(1_000.0, &mut cam);
    assert_eq!(step.progress, 0.4);
    assert!(step.settled);
    assert!(!zoom.is_zooming());

    zoom.set_target(1.0);
    let step = zoom.step(f64::INFINITY, &mut cam);
    assert_eq!(step.progress, 0.4);
    let step = zoom.step(-5.0, &mut cam);
    assert_eq!(step.progress, 0.4);
}

#[test]
fn targets_are_clamped() {
    let mut zoom = animator();
    zoom.set_target(3.0);
    assert_eq!(zoom.target(), 1.0);
    zoom.set_target(-1.0);
    assert_eq!(zoom.target(), 0.0);
    zoom.set_target(f64::NAN);
    assert_eq!(zoom.target(), 0.0);
}

#[test]
fn state_reports_zooming_flag() {
    let mut zoom = animator();
    assert!(!zoom.state().is_zooming);
    zoom.set_target(1.0);
    assert!(zoom.state().is_zooming);
}

#[test]
fn invalid_parameters_are_rejected() {
    assert!(ZoomAnimator::new(0.5, 5.0, 0.001).is_err());
    assert!(ZoomAnimator::new(2.0, 0.0, 0.001).is_err());
    assert!(ZoomAnimator::new(2.0, 5.0, 0.0).is_err());
}

#[test]
fn snapping_to_a_nearby_target_anchors_at_the_camera() {
    let mut zoom = animator();
    let mut cam = CameraState::at(42.0);
    zoom.set_target(ZoomAnimator::DEFAULT_EPSILON * 0.5);
    let step = zoom.step(0.016, &mut cam);
    assert!(step.settled);
    assert_eq!(zoom.progress(), ZoomAnimator::DEFAULT_EPSILON * 0.5);
    assert_eq!(zoom.origin_x(), Some(42.0));
    assert_eq!(cam.x, 42.0);
}
