use super::*;

fn range(a: i32, b: i32) -> YearRange {
    YearRange::new(a, b).unwrap()
}

#[test]
fn unzoomed_positions_are_relative_to_reference_year() {
    let idx = YearPositionIndex::build(&YearIndexParams::new(range(1498, 1502), 2.0, 1500)).unwrap();
    assert_eq!(idx.position_of(1498), -4.0);
    assert_eq!(idx.position_of(1500), 0.0);
    assert_eq!(idx.position_of(1502), 4.0);
    assert_eq!(idx.len(), 5);
}

#[test]
fn positions_are_strictly_increasing() {
    for spacing in [0.01, 1.0, 7.5, 300.0] {
        for (progress, origin) in [(0.0, None), (0.3, Some(-40.0)), (1.0, Some(125.0))] {
            let params = YearIndexParams::new(range(1400, 1700), spacing * (1.0 + 2.0 * progress), 1550)
                .with_zoom(origin, progress, 3.0);
            let idx = YearPositionIndex::build(&params).unwrap();
            let xs: Vec<f64> = idx.iter().map(|(_, x)| x).collect();
            assert!(xs.windows(2).all(|w| w[1] > w[0]), "spacing {spacing} progress {progress}");
        }
    }
}

#[test]
fn zoom_origin_is_a_fixed_point() {
    let base = 10.0;
    let multiplier = 4.0;
    let origin = 35.0;
    let unzoomed = YearPositionIndex::build(&YearIndexParams::new(range(1490, 1510), base, 1500)).unwrap();
    let origin_year = 1500.0 + origin / base;
    assert!((unzoomed.position_at(origin_year) - origin).abs() < 1e-9);

    for progress in [0.1, 0.5, 0.9, 1.0] {
        let scale = 1.0 + (multiplier - 1.0) * progress;
        let params = YearIndexParams::new(range(1490, 1510), base * scale, 1500)
            .with_zoom(Some(origin), progress, multiplier);
        let idx = YearPositionIndex::build(&params).unwrap();
        assert!(
            (idx.position_at(origin_year) - origin).abs() < 1e-9,
            "anchor drifted at progress {progress}"
        );
        let d = idx.position_of(1501) - idx.position_of(1500);
        assert!((d - base * scale).abs() < 1e-9);
    }
}

#[test]
fn zero_progress_ignores_origin() {
    let params = YearIndexParams::new(range(1500, 1502), 2.0, 1500).with_zoom(Some(99.0), 0.0, 5.0);
    let idx = YearPositionIndex::build(&params).unwrap();
    assert_eq!(idx.position_of(1502), 4.0);
}

#[test]
fn sparse_lookup_interpolates_between_known_years() {
    let idx = YearPositionIndex::from_positions([(1504, 8.0), (1502, 4.0)]).unwrap();
    assert_eq!(idx.position_of(1503), 6.0);
    assert_eq!(idx.position_at(1502.5), 5.0);
}

#[test]
fn lookups_outside_the_index_clamp() {
    let idx = YearPositionIndex::from_positions([(1502, 4.0), (1504, 8.0)]).unwrap();
    assert_eq!(idx.position_of(1400), 4.0);
    assert_eq!(idx.position_of(1600), 8.0);
    assert_eq!(idx.extrapolate(1506.0), 12.0);
    assert_eq!(idx.extrapolate(1500.0), 0.0);
}

#[test]
fn single_year_index_returns_its_position() {
    let idx = YearPositionIndex::build(&YearIndexParams::new(range(1500, 1500), 2.0, 1490)).unwrap();
    assert_eq!(idx.position_of(1200), 20.0);
    assert_eq!(idx.position_of(1800), 20.0);
    assert_eq!(idx.extrapolate(1800.0), 20.0);
    assert_eq!(idx.closest_year(-1e9), 1500);
}

#[test]
fn closest_year_picks_nearest_and_earlier_on_tie() {
    let idx = YearPositionIndex::build(&YearIndexParams::new(range(1498, 1502), 2.0, 1500)).unwrap();
    assert_eq!(idx.closest_year(0.4), 1500);
    assert_eq!(idx.closest_year(1.0), 1500);
    assert_eq!(idx.closest_year(1.1), 1501);
    assert_eq!(idx.closest_year(-100.0), 1498);
    assert_eq!(idx.closest_year(100.0), 1502);
}

#[test]
fn decade_marks_round_outward() {
    let idx = YearPositionIndex::build(&YearIndexParams::new(range(1495, 1512), 1.0, 1500)).unwrap();
    let marks = idx.decade_marks(10);
    assert_eq!(
        marks,
        vec![(1490, -10.0), (1500, 0.0), (1510, 10.0), (1520, 20.0)]
    );
}

#[test]
fn invalid_params_are_rejected() {
    let r = range(1500, 1510);
    assert!(YearPositionIndex::build(&YearIndexParams::new(r, 0.0, 1500)).is_err());
    assert!(YearPositionIndex::build(&YearIndexParams::new(r, f64::NAN, 1500)).is_err());
    assert!(
        YearPositionIndex::build(&YearIndexParams::new(r, 1.0, 1500).with_zoom(None, 0.5, 0.5))
            .is_err()
    );
    assert!(YearPositionIndex::from_positions(Vec::<(i32, f64)>::new()).is_err());
    assert!(YearPositionIndex::from_positions([(1500, 1.0), (1501, 1.0)]).is_err());
    assert!(YearPositionIndex::from_positions([(1500, 1.0), (1500, 2.0)]).is_err());
}
