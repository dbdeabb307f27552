//! Lanes for point-in-time markers that need a minimum visual gap.

use tracing::debug;

use super::packer::{pack_assignments, LayoutAssignment};
use crate::clock::MS_PER_MINUTE;
use crate::interval::Interval;

/// Assign lanes to markers placed at their `start_at`.
///
/// A lane is free again `min_gap_minutes` after the last marker placed on
/// it. Negative gaps count as zero.
pub fn layout_lanes(markers: &[Interval], min_gap_minutes: i64) -> LayoutAssignment {
    let gap_ms = min_gap_minutes.max(0).saturating_mul(MS_PER_MINUTE);
    let layout = pack_assignments(
        markers,
        |m| m.id.as_str(),
        |m| m.start_at,
        |m| m.start_at.saturating_add(gap_ms),
    );
    debug!(markers = markers.len(), lanes = layout.track_count, "lane layout");
    layout
}
