//! Collision-free display layout for a day view.
//!
//! - [`layout_columns`]: overlapping intervals side by side
//! - [`layout_lanes`]: point-in-time markers with a minimum gap
//! - [`layout_day`]: both, for everything touching one calendar day
//!
//! Layouts are recomputed per render and never persisted.

mod columns;
mod day;
mod lanes;
mod packer;

pub use columns::{clip_to_day, layout_columns};
pub use day::{layout_day, DayLayout, DEFAULT_LOG_LANE_GAP_MINUTES};
pub use lanes::layout_lanes;
pub use packer::{pack, pack_assignments, LayoutAssignment, TrackAssignment};
