use crate::foundation::error::{TimelineError, TimelineResult};

pub use kurbo::{Point, Rect, Vec2};

/// Inclusive range of calendar years covered by the timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct YearRange {
    /// First year (inclusive).
    pub start: i32,
    /// Last year (inclusive).
    pub end: i32,
}

impl YearRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: i32, end: i32) -> TimelineResult<Self> {
        if start > end {
            return Err(TimelineError::validation("YearRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of years in the range.
    pub fn len(self) -> usize {
        usize::try_from(i64::from(self.end) - i64::from(self.start) + 1).unwrap_or(0)
    }

    /// Always false for a validated range; kept for symmetry with `len`.
    pub fn is_empty(self) -> bool {
        self.start > self.end
    }

    /// Whether `year` lies inside the range.
    pub fn contains(self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    /// Clamp `year` into the range.
    pub fn clamp(self, year: i32) -> i32 {
        year.clamp(self.start, self.end.max(self.start))
    }

    /// Ascending iterator over every year.
    pub fn years(self) -> impl DoubleEndedIterator<Item = i32> {
        self.start..=self.end
    }
}

/// Track color, straight (non-premultiplied) 8-bit RGB.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RgbColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl RgbColor {
    /// Build a color from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` / `rrggbb`.
    pub fn from_hex(s: &str) -> TimelineResult<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(TimelineError::validation(format!(
                "color '{s}' must be #rrggbb"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| TimelineError::validation(format!("color '{s}' is not hex")))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Where and how large one instanced visual is drawn.
///
/// `position` is the center of the quad in timeline space; `scale` is its final
/// width/height (the renderer's unit quad is multiplied by it).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InstanceTransform {
    /// Quad center.
    pub position: Point,
    /// Final quad size.
    pub scale: Vec2,
}

impl InstanceTransform {
    /// Axis-aligned bounds of the quad.
    pub fn bounds(self) -> Rect {
        Rect::from_center_size(self.position, (self.scale.x, self.scale.y))
    }
}
