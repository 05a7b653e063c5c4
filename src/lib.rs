//! Artline is the spatial layout and interaction core of a zoomable art-history
//! timeline.
//!
//! It turns chronological records (artworks keyed by year, events keyed by
//! date) into deterministic, zoom-aware 2D positions and keeps those positions
//! reconciled with camera, selection and zoom animation state. Rendering, data
//! loading and UI chrome are external: the engine emits plain transform arrays
//! and events and never owns a camera, a GPU object or a DOM node.
//!
//! # Pipeline overview
//!
//! 1. **Group**: `TimelineRecord[] -> GroupedRecords` (by year, sorted by key)
//! 2. **Index**: `YearIndexParams -> YearPositionIndex` (year -> x, zoom anchored)
//! 3. **Layout**: thumbnails into per-year columns, events into lanes
//! 4. **Interact**: per frame, step the zoom animation, auto-select near the
//!    camera and track the focused year
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure recompute**: layout functions are deterministic and replace their
//!   output wholesale; [`TimelineEngine`] memoizes them on their input tuple.
//! - **Dirty data degrades**: unparseable keys and dates are dropped and
//!   counted, never raised as errors.
//! - **Single-threaded, frame-driven**: no locks; all state lives in one owner.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod engine;
mod foundation;
mod interaction;
mod layout;
mod records;
mod render;
mod store;

pub use config::model::TimelineConfig;
pub use engine::timeline::{FrameOutput, TimelineEngine, TimelineEvent};
pub use foundation::core::{InstanceTransform, Point, Rect, RgbColor, Vec2, YearRange};
pub use foundation::error::{TimelineError, TimelineResult};
pub use interaction::camera::{Camera, CameraRequest, CameraState};
pub use interaction::focus::{
    FocusFrame, FocusedEvent, FocusedYear, FocusedYearTracker, GalleryMode, ScrollDirection,
};
pub use interaction::selection::{
    KeyInput, Modifiers, NavKey, ResolvedSelection, SelectionChange, SelectionController,
    SelectionSource, SelectionState, clamp_selection,
};
pub use interaction::zoom::{ZoomAnimationState, ZoomAnimator, ZoomStep};
pub use layout::columns::{ColumnLayout, ColumnLayoutConfig, YearLabel, layout_columns};
pub use layout::events::{
    PillMetrics, ProcessedEvent, ProcessedEventGroup, group_bounds, process_event_tracks,
};
pub use layout::year_index::{YearIndexParams, YearPositionIndex};
pub use records::date::year_of;
pub use records::grouper::{GroupedRecords, group_by_year};
pub use records::model::{EventRecord, EventTrack, TimelineRecord};
pub use render::instances::{
    HitTarget, InstanceBatch, InstanceSink, apply_batch_diff, diff_batches, event_for_instance,
    record_for_instance,
};
pub use store::kv::{ImageLoadTracker, KeyValueStore, MemoryStore};
