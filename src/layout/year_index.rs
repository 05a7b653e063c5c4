use crate::{
    foundation::core::YearRange,
    foundation::error::{TimelineError, TimelineResult},
    foundation::math::{lerp, zoom_scale},
};

/// Inputs of a [`YearPositionIndex`] build.
///
/// The index is a pure function of this tuple; two equal parameter sets always
/// produce bit-identical indices, which is what the engine memoizes on.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct YearIndexParams {
    /// Years to index.
    pub range: YearRange,
    /// Current (already zoom-scaled) distance between consecutive years.
    pub year_spacing: f64,
    /// Year mapped to x = 0 when no zoom anchor is active.
    pub reference_year: i32,
    /// Fixed point of the zoom transform, if an animation has anchored one.
    pub zoom_origin_x: Option<f64>,
    /// Zoom progress in `[0, 1]`.
    pub zoom_progress: f64,
    /// Scale reached at progress 1.
    pub zoom_multiplier: f64,
}

impl YearIndexParams {
    /// Unzoomed parameters.
    pub fn new(range: YearRange, year_spacing: f64, reference_year: i32) -> Self {
        Self {
            range,
            year_spacing,
            reference_year,
            zoom_origin_x: None,
            zoom_progress: 0.0,
            zoom_multiplier: 1.0,
        }
    }

    /// Attach a zoom state.
    pub fn with_zoom(mut self, origin_x: Option<f64>, progress: f64, multiplier: f64) -> Self {
        self.zoom_origin_x = origin_x;
        self.zoom_progress = progress;
        self.zoom_multiplier = multiplier;
        self
    }

    fn validate(&self) -> TimelineResult<()> {
        if !self.year_spacing.is_finite() || self.year_spacing <= 0.0 {
            return Err(TimelineError::validation(
                "year_spacing must be finite and > 0",
            ));
        }
        if !self.zoom_multiplier.is_finite() || self.zoom_multiplier < 1.0 {
            return Err(TimelineError::validation(
                "zoom_multiplier must be finite and >= 1",
            ));
        }
        if !self.zoom_progress.is_finite() {
            return Err(TimelineError::validation("zoom_progress must be finite"));
        }
        if self.zoom_origin_x.is_some_and(|x| !x.is_finite()) {
            return Err(TimelineError::validation("zoom_origin_x must be finite"));
        }
        if self.range.start > self.range.end {
            return Err(TimelineError::validation("year range start must be <= end"));
        }
        Ok(())
    }
}

/// Strictly increasing mapping from year to x coordinate.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct YearPositionIndex {
    years: Vec<i32>,
    positions: Vec<f64>,
}

impl YearPositionIndex {
    /// Build the index for every year of `params.range`.
    ///
    /// With an active zoom anchor the unzoomed spacing is recovered from the
    /// current one and every position is scaled about the anchor, so the anchor
    /// itself never moves while the zoom progresses.
    #[tracing::instrument(level = "trace")]
    pub fn build(params: &YearIndexParams) -> TimelineResult<Self> {
        params.validate()?;

        let progress = params.zoom_progress.clamp(0.0, 1.0);
        let scale = zoom_scale(params.zoom_multiplier, progress);
        debug_assert!(scale >= 1.0, "zoom scale must stay >= 1");
        let scale = scale.max(f64::EPSILON);

        let anchor = params.zoom_origin_x.filter(|_| progress > 0.0);
        let unzoomed_spacing = params.year_spacing / scale;

        let len = params.range.len();
        let mut years = Vec::with_capacity(len);
        let mut positions = Vec::with_capacity(len);
        for year in params.range.years() {
            let steps = f64::from(year) - f64::from(params.reference_year);
            let pos = match anchor {
                Some(origin) => {
                    let base = steps * unzoomed_spacing;
                    origin + (base - origin) * scale
                }
                None => steps * params.year_spacing,
            };
            years.push(year);
            positions.push(pos);
        }

        Ok(Self { years, positions })
    }

    /// Build a sparse index from explicit `(year, x)` pairs.
    ///
    /// Pairs are sorted by year; the result must be non-empty and strictly
    /// increasing in both year and position.
    pub fn from_positions<I>(pairs: I) -> TimelineResult<Self>
    where
        I: IntoIterator<Item = (i32, f64)>,
    {
        let mut pairs: Vec<(i32, f64)> = pairs.into_iter().collect();
        if pairs.is_empty() {
            return Err(TimelineError::validation(
                "year index needs at least one year",
            ));
        }
        pairs.sort_by_key(|&(y, _)| y);
        for w in pairs.windows(2) {
            let ((y0, x0), (y1, x1)) = (w[0], w[1]);
            if y0 == y1 {
                return Err(TimelineError::validation(format!(
                    "year {y0} appears twice in year index"
                )));
            }
            if x1.partial_cmp(&x0) != Some(std::cmp::Ordering::Greater) {
                return Err(TimelineError::validation(format!(
                    "year index positions must be strictly increasing ({y0} -> {y1})"
                )));
            }
        }
        if pairs.iter().any(|&(_, x)| !x.is_finite()) {
            return Err(TimelineError::validation(
                "year index positions must be finite",
            ));
        }
        let (years, positions) = pairs.into_iter().unzip();
        Ok(Self { years, positions })
    }

    /// Number of indexed years (always >= 1).
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Never true; indices are built non-empty.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// First and last indexed year.
    pub fn span(&self) -> (i32, i32) {
        (
            self.years.first().copied().unwrap_or_default(),
            self.years.last().copied().unwrap_or_default(),
        )
    }

    /// Indexed `(year, x)` pairs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.years.iter().copied().zip(self.positions.iter().copied())
    }

    /// Exact position for an indexed year.
    pub fn get(&self, year: i32) -> Option<f64> {
        self.years
            .binary_search(&year)
            .ok()
            .map(|idx| self.positions[idx])
    }

    /// Position of `year`: exact when indexed, interpolated between the
    /// bracketing years otherwise, clamped to the extremes outside the index.
    pub fn position_of(&self, year: i32) -> f64 {
        match self.get(year) {
            Some(x) => x,
            None => self.position_at(f64::from(year)),
        }
    }

    /// Fractional-year variant of [`Self::position_of`].
    pub fn position_at(&self, year: f64) -> f64 {
        let (Some(&first_x), Some(&last_x)) = (self.positions.first(), self.positions.last())
        else {
            return 0.0;
        };
        if self.years.len() < 2 {
            return first_x;
        }
        let (first, last) = self.span();
        if year <= f64::from(first) {
            return first_x;
        }
        if year >= f64::from(last) {
            return last_x;
        }
        let hi = self.years.partition_point(|&y| f64::from(y) < year);
        let lo = hi - 1;
        if f64::from(self.years[hi]) == year {
            return self.positions[hi];
        }
        self.interpolate(lo, hi, year)
    }

    /// Like [`Self::position_at`] but continues the edge slopes beyond the
    /// indexed span. Meant for grid lines that extend past the data.
    pub fn extrapolate(&self, year: f64) -> f64 {
        let n = self.years.len();
        if n < 2 {
            return self.positions.first().copied().unwrap_or_default();
        }
        let (first, last) = self.span();
        if year < f64::from(first) {
            self.interpolate(0, 1, year)
        } else if year > f64::from(last) {
            self.interpolate(n - 2, n - 1, year)
        } else {
            self.position_at(year)
        }
    }

    /// Indexed year whose position is nearest to `x`; ties pick the earlier year.
    pub fn closest_year(&self, x: f64) -> i32 {
        let hi = self.positions.partition_point(|&p| p < x);
        let candidates = [hi.checked_sub(1), Some(hi)];
        let mut best: Option<(i32, f64)> = None;
        for idx in candidates.into_iter().flatten() {
            let Some(&pos) = self.positions.get(idx) else {
                continue;
            };
            let d = (pos - x).abs();
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((self.years[idx], d));
            }
        }
        best.map(|(y, _)| y).unwrap_or_default()
    }

    /// Grid-line positions for every multiple of `step` covering the span,
    /// rounded outward to whole steps.
    pub fn decade_marks(&self, step: i32) -> Vec<(i32, f64)> {
        let step = step.max(1);
        let (first, last) = self.span();
        let start = first.div_euclid(step) * step;
        let end = if last.rem_euclid(step) == 0 {
            last
        } else {
            (last.div_euclid(step) + 1) * step
        };
        (start..=end)
            .step_by(usize::try_from(step).unwrap_or(1))
            .map(|y| (y, self.extrapolate(f64::from(y))))
            .collect()
    }

    fn interpolate(&self, lo: usize, hi: usize, year: f64) -> f64 {
        let (y0, y1) = (f64::from(self.years[lo]), f64::from(self.years[hi]));
        let t = (year - y0) / (y1 - y0);
        lerp(self.positions[lo], self.positions[hi], t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/year_index.rs"]
mod tests;
