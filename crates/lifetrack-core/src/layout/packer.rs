//! Greedy first-fit track packing.
//!
//! Column layout and lane layout are the same algorithm with a different
//! notion of how long an item occupies its track, so both go through
//! [`pack`].

use serde::{Deserialize, Serialize};

/// Track index for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackAssignment {
    pub id: String,
    pub index: usize,
}

/// Tracks assigned to one day's worth of items.
///
/// Assignments are listed in the caller's input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutAssignment {
    pub assignments: Vec<TrackAssignment>,
    pub track_count: usize,
}

impl LayoutAssignment {
    /// Track of the item with `id`.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.assignments
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.index)
    }

    /// Track count to divide the available width by; at least 1.
    pub fn display_tracks(&self) -> usize {
        self.track_count.max(1)
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Assign each item the first track that is free at its start.
///
/// Items are visited in ascending `start` order (stable, so ties keep input
/// order). A track is free when the `occupied_until` of the last item placed
/// on it is `<=` the new item's start; otherwise a new track opens. Returns
/// one track index per input item, in input order, and the track count.
///
/// Runs in O(n·k) for k tracks.
pub fn pack<T, S, O>(items: &[T], start: S, occupied_until: O) -> (Vec<usize>, usize)
where
    S: Fn(&T) -> i64,
    O: Fn(&T) -> i64,
{
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by_key(|&i| start(&items[i]));

    let mut free_at: Vec<i64> = Vec::new();
    let mut tracks = vec![0; items.len()];

    for i in order {
        let item = &items[i];
        let begins = start(item);
        let until = occupied_until(item);
        match free_at.iter().position(|&free| free <= begins) {
            Some(track) => {
                free_at[track] = until;
                tracks[i] = track;
            }
            None => {
                tracks[i] = free_at.len();
                free_at.push(until);
            }
        }
    }

    (tracks, free_at.len())
}

/// Run [`pack`] and label the result with item ids.
pub fn pack_assignments<T, I, S, O>(items: &[T], id: I, start: S, occupied_until: O) -> LayoutAssignment
where
    I: Fn(&T) -> &str,
    S: Fn(&T) -> i64,
    O: Fn(&T) -> i64,
{
    let (tracks, track_count) = pack(items, start, occupied_until);
    let assignments = items
        .iter()
        .zip(tracks)
        .map(|(item, index)| TrackAssignment {
            id: id(item).to_string(),
            index,
        })
        .collect();
    LayoutAssignment {
        assignments,
        track_count,
    }
}
