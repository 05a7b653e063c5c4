use crate::foundation::core::RgbColor;

/// One artwork thumbnail as delivered by the data source.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineRecord {
    /// Lexicographically sortable key; the first four characters encode the year.
    pub sorting_key: String,
    /// Source pixel width.
    pub width: f64,
    /// Source pixel height.
    pub height: f64,
    /// Full-resolution image location, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
}

impl TimelineRecord {
    /// Build a record without an original url.
    pub fn new(sorting_key: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            sorting_key: sorting_key.into(),
            width,
            height,
            original_url: None,
        }
    }

    /// Year encoded in the first four characters of the sort key.
    pub fn year(&self) -> Option<i32> {
        let prefix = self.sorting_key.get(..4)?;
        if !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        prefix.parse().ok()
    }

    /// Width / height, or `None` when either dimension is unusable.
    pub fn aspect_ratio(&self) -> Option<f64> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        (ok(self.width) && ok(self.height)).then(|| self.width / self.height)
    }
}

/// A point-in-time historical event.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EventRecord {
    /// ISO 8601 date or datetime.
    pub start_date: String,
    /// Human readable description.
    pub description: String,
}

impl EventRecord {
    /// Build an event.
    pub fn new(start_date: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            description: description.into(),
        }
    }
}

/// A named, colored lane of events. Tracks keep their configured order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EventTrack {
    /// Track name, also used to resolve clicks.
    pub name: String,
    /// Lane color.
    pub color: RgbColor,
    /// Events in authoring order.
    pub events: Vec<EventRecord>,
}

impl EventTrack {
    /// Build a track.
    pub fn new(name: impl Into<String>, color: RgbColor, events: Vec<EventRecord>) -> Self {
        Self {
            name: name.into(),
            color,
            events,
        }
    }
}
