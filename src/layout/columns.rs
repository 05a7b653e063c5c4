use crate::{
    foundation::core::{InstanceTransform, Point, Vec2, YearRange},
    foundation::error::{TimelineError, TimelineResult},
    layout::year_index::YearPositionIndex,
    records::grouper::GroupedRecords,
    records::model::TimelineRecord,
};

/// Column/row placement parameters for thumbnails.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColumnLayoutConfig {
    /// Thumbnails per row inside one year.
    pub columns_per_year: u32,
    /// Gap between columns and between rows.
    pub row_spacing: f64,
    /// Thumbnail box width.
    pub thumbnail_width: f64,
    /// Thumbnail box height.
    pub thumbnail_height: f64,
    /// Fit each record's native aspect ratio inside the box instead of filling it.
    pub preserve_aspect_ratio: bool,
}

impl ColumnLayoutConfig {
    /// Range-check every field.
    pub fn validate(&self) -> TimelineResult<()> {
        if self.columns_per_year == 0 {
            return Err(TimelineError::validation("columns_per_year must be > 0"));
        }
        if !self.row_spacing.is_finite() || self.row_spacing < 0.0 {
            return Err(TimelineError::validation(
                "row_spacing must be finite and >= 0",
            ));
        }
        for (name, value) in [
            ("thumbnail_width", self.thumbnail_width),
            ("thumbnail_height", self.thumbnail_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TimelineError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }

    /// Final size of `record` under this configuration.
    pub fn fit(&self, record: &TimelineRecord) -> (f64, f64) {
        let (bw, bh) = (self.thumbnail_width, self.thumbnail_height);
        if !self.preserve_aspect_ratio {
            return (bw, bh);
        }
        let Some(aspect) = record.aspect_ratio() else {
            return (bw, bh);
        };
        if aspect >= bw / bh {
            (bw, bw / aspect)
        } else {
            (bh * aspect, bh)
        }
    }
}

/// Where a year's label sits on the x axis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct YearLabel {
    /// Calendar year.
    pub year: i32,
    /// Year position.
    pub x: f64,
}

/// Output of [`layout_columns`].
///
/// `instances` is parallel to [`GroupedRecords::iter_in`] over [`Self::range`]:
/// the n-th transform belongs to the n-th record of that iteration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ColumnLayout {
    /// Per-record transforms.
    pub instances: Vec<InstanceTransform>,
    /// One label per year of the range, including years without records.
    pub year_labels: Vec<YearLabel>,
    /// Years that were laid out.
    pub range: Option<YearRange>,
}

/// Place every grouped record into per-year columns.
///
/// Columns are packed by each record's fitted width. The centered span of a
/// year is derived from its first row only; later rows reuse the same left
/// edge, so a short final row hangs left of center.
#[tracing::instrument(skip(grouped, years), fields(records = grouped.len()))]
pub fn layout_columns(
    grouped: &GroupedRecords,
    years: &YearPositionIndex,
    config: &ColumnLayoutConfig,
) -> TimelineResult<ColumnLayout> {
    config.validate()?;

    let (first, last) = years.span();
    let range = YearRange::new(first, last)?;
    let cols = usize::try_from(config.columns_per_year).unwrap_or(1).max(1);
    let gap = config.row_spacing;

    let mut instances = Vec::with_capacity(grouped.len());
    let mut year_labels = Vec::with_capacity(range.len());

    for year in range.years() {
        let year_x = years.position_of(year);
        year_labels.push(YearLabel { year, x: year_x });

        let records = grouped.year(year);
        if records.is_empty() {
            continue;
        }

        let fitted: Vec<(f64, f64)> = records.iter().map(|r| config.fit(r)).collect();
        let first_row = &fitted[..cols.min(fitted.len())];
        let first_row_w = first_row.iter().map(|&(w, _)| w).sum::<f64>()
            + (first_row.len() - 1) as f64 * gap;
        let left = year_x - first_row_w * 0.5;

        let mut cursor = left;
        for (idx, &(w, h)) in fitted.iter().enumerate() {
            if idx % cols == 0 {
                cursor = left;
            }
            let row = (idx / cols) as f64;
            instances.push(InstanceTransform {
                position: Point::new(cursor + w * 0.5, row * (h + gap)),
                scale: Vec2::new(w, h),
            });
            cursor += w + gap;
        }
    }

    let outside = grouped.len() - grouped.iter_in(range).count();
    if outside > 0 {
        tracing::debug!(outside, "records outside the indexed year range were not laid out");
    }

    Ok(ColumnLayout {
        instances,
        year_labels,
        range: Some(range),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/columns.rs"]
mod tests;
