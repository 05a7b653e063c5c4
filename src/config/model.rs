use std::time::Duration;

use crate::{
    foundation::core::YearRange,
    foundation::error::{TimelineError, TimelineResult},
    interaction::focus::FocusedYearTracker,
    interaction::selection::SelectionController,
    interaction::zoom::ZoomAnimator,
    layout::columns::ColumnLayoutConfig,
    layout::events::PillMetrics,
    layout::year_index::YearIndexParams,
};

/// Every tunable of the timeline in one typed, validated struct.
///
/// Deserializes from JSON with per-field defaults, so a host only needs to
/// spell out what it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineConfig {
    /// Years covered by the axis.
    #[serde(default = "default_year_range")]
    pub year_range: YearRange,
    /// Year at x = 0.
    #[serde(default = "default_reference_year")]
    pub reference_year: i32,
    /// Unzoomed distance between consecutive years.
    #[serde(default = "default_year_spacing")]
    pub year_spacing: f64,
    /// Scale reached when fully zoomed in.
    #[serde(default = "default_zoom_multiplier")]
    pub zoom_multiplier: f64,
    /// Zoom integrator speed.
    #[serde(default = "default_zoom_speed")]
    pub zoom_speed: f64,
    /// Zoom settling threshold.
    #[serde(default = "default_zoom_epsilon")]
    pub zoom_epsilon: f64,
    /// Thumbnails per row inside one year.
    #[serde(default = "default_columns_per_year")]
    pub columns_per_year: u32,
    /// Gap between thumbnail rows/columns.
    #[serde(default = "default_row_spacing")]
    pub row_spacing: f64,
    /// Unzoomed thumbnail box width.
    #[serde(default = "default_thumbnail_width")]
    pub thumbnail_width: f64,
    /// Unzoomed thumbnail box height.
    #[serde(default = "default_thumbnail_height")]
    pub thumbnail_height: f64,
    /// Fit native aspect ratios inside the box.
    #[serde(default = "default_true")]
    pub preserve_aspect_ratio: bool,
    /// Vertical distance between event lanes.
    #[serde(default = "default_group_gap")]
    pub group_gap: f64,
    /// Event pill geometry.
    #[serde(default = "default_pill")]
    pub pill: PillMetrics,
    /// Auto-select quiet period after a centering selection, in milliseconds.
    #[serde(default = "default_suppression_ms")]
    pub auto_select_suppression_ms: u64,
    /// Camera movement treated as rest when deriving scroll direction.
    #[serde(default = "default_scroll_deadzone")]
    pub scroll_deadzone: f64,
}

fn default_year_range() -> YearRange {
    YearRange {
        start: 1400,
        end: 1600,
    }
}

fn default_reference_year() -> i32 {
    1500
}

fn default_year_spacing() -> f64 {
    2.0
}

fn default_zoom_multiplier() -> f64 {
    4.0
}

fn default_zoom_speed() -> f64 {
    ZoomAnimator::DEFAULT_SPEED
}

fn default_zoom_epsilon() -> f64 {
    ZoomAnimator::DEFAULT_EPSILON
}

fn default_columns_per_year() -> u32 {
    1
}

fn default_row_spacing() -> f64 {
    0.1
}

fn default_thumbnail_width() -> f64 {
    1.6
}

fn default_thumbnail_height() -> f64 {
    1.2
}

fn default_true() -> bool {
    true
}

fn default_group_gap() -> f64 {
    1.5
}

fn default_pill() -> PillMetrics {
    PillMetrics {
        width: 1.2,
        height: 0.4,
        active_scale: 1.3,
        padding_x: 0.3,
        padding_y: 0.2,
    }
}

fn default_suppression_ms() -> u64 {
    SelectionController::DEFAULT_SUPPRESSION.as_millis() as u64
}

fn default_scroll_deadzone() -> f64 {
    FocusedYearTracker::DEFAULT_DEADZONE
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            year_range: default_year_range(),
            reference_year: default_reference_year(),
            year_spacing: default_year_spacing(),
            zoom_multiplier: default_zoom_multiplier(),
            zoom_speed: default_zoom_speed(),
            zoom_epsilon: default_zoom_epsilon(),
            columns_per_year: default_columns_per_year(),
            row_spacing: default_row_spacing(),
            thumbnail_width: default_thumbnail_width(),
            thumbnail_height: default_thumbnail_height(),
            preserve_aspect_ratio: default_true(),
            group_gap: default_group_gap(),
            pill: default_pill(),
            auto_select_suppression_ms: default_suppression_ms(),
            scroll_deadzone: default_scroll_deadzone(),
        }
    }
}

impl TimelineConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(s: &str) -> TimelineResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Pretty JSON rendition.
    pub fn to_json_string(&self) -> TimelineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Range-check every field.
    pub fn validate(&self) -> TimelineResult<()> {
        if self.year_range.start > self.year_range.end {
            return Err(TimelineError::validation(
                "year_range.start must be <= year_range.end",
            ));
        }
        if !self.zoom_multiplier.is_finite() || self.zoom_multiplier < 1.0 {
            return Err(TimelineError::validation(
                "zoom_multiplier must be finite and >= 1",
            ));
        }
        if !self.zoom_epsilon.is_finite() || self.zoom_epsilon <= 0.0 || self.zoom_epsilon >= 1.0
        {
            return Err(TimelineError::validation("zoom_epsilon must be in (0, 1)"));
        }
        for (name, value) in [
            ("year_spacing", self.year_spacing),
            ("zoom_speed", self.zoom_speed),
            ("pill.width", self.pill.width),
            ("pill.height", self.pill.height),
            ("pill.active_scale", self.pill.active_scale),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TimelineError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("group_gap", self.group_gap),
            ("pill.padding_x", self.pill.padding_x),
            ("pill.padding_y", self.pill.padding_y),
            ("scroll_deadzone", self.scroll_deadzone),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TimelineError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        self.column_layout(1.0).validate()
    }

    /// Column layout parameters at zoom `scale`; box size and spacing grow
    /// with the zoom.
    pub fn column_layout(&self, scale: f64) -> ColumnLayoutConfig {
        ColumnLayoutConfig {
            columns_per_year: self.columns_per_year,
            row_spacing: self.row_spacing * scale,
            thumbnail_width: self.thumbnail_width * scale,
            thumbnail_height: self.thumbnail_height * scale,
            preserve_aspect_ratio: self.preserve_aspect_ratio,
        }
    }

    /// Year index parameters for a zoom state.
    pub fn year_index_params(
        &self,
        zoom_origin_x: Option<f64>,
        zoom_progress: f64,
        scale: f64,
    ) -> YearIndexParams {
        YearIndexParams::new(self.year_range, self.year_spacing * scale, self.reference_year)
            .with_zoom(zoom_origin_x, zoom_progress, self.zoom_multiplier)
    }

    /// Auto-select suppression window.
    pub fn suppression(&self) -> Duration {
        Duration::from_millis(self.auto_select_suppression_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
