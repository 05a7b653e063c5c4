/// Unclamped linear interpolation.
#[inline]
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Index of the value closest to `target`; ties keep the earliest index.
pub(crate) fn nearest_index<I>(values: I, target: f64) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for (idx, v) in values.into_iter().enumerate() {
        let d = (v - target).abs();
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((idx, d)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Scale factor for a zoom progress in `[0, 1]`.
#[inline]
pub(crate) fn zoom_scale(multiplier: f64, progress: f64) -> f64 {
    1.0 + (multiplier - 1.0) * progress.clamp(0.0, 1.0)
}
