//! Lap progress tracking.
//!
//! A [`LapState`] is owned by one race session and passed by `&mut` into collision calls.
//! Every broad-phase overlap marks its segment visited and records it as the last
//! overlapped segment. The lap is complete once every segment has been visited and the last
//! overlapped segment is the finish segment.

use std::collections::HashMap;

use crate::track::{SegmentId, Track};

/// Observable state of the tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LapProgress {
    InProgress,
    Complete,
}

/// Visited flags per segment plus the most recently overlapped segment.
#[derive(Clone, Debug)]
pub struct LapState {
    visited: HashMap<SegmentId, bool>,
    last_overlapped: Option<SegmentId>,
    finish: SegmentId,
}

impl LapState {
    /// Tracker for `track` with every segment unvisited.
    pub fn new(track: &Track, finish: SegmentId) -> Self {
        let mut lap = Self {
            visited: HashMap::with_capacity(track.segments().len()),
            last_overlapped: None,
            finish,
        };
        lap.setup_tagged_segments(track);
        lap
    }

    /// (Re)initialize the tracker for `track`: one unvisited entry per segment.
    pub fn setup_tagged_segments(&mut self, track: &Track) {
        self.visited.clear();
        self.visited
            .extend(track.segments().iter().map(|s| (s.id().clone(), false)));
        self.last_overlapped = None;
    }

    /// Record a broad-phase overlap with `id`.
    ///
    /// Identifiers the tracker was not set up with are ignored.
    pub fn mark_overlapped(&mut self, id: &SegmentId) {
        if let Some(flag) = self.visited.get_mut(id) {
            *flag = true;
            if self.last_overlapped.as_ref() != Some(id) {
                self.last_overlapped = Some(id.clone());
            }
        }
    }

    /// Every segment visited and the last overlapped one is the finish segment.
    pub fn lap_done(&self) -> bool {
        self.all_visited() && self.last_overlapped.as_ref() == Some(&self.finish)
    }

    #[inline]
    pub fn progress(&self) -> LapProgress {
        if self.lap_done() {
            LapProgress::Complete
        } else {
            LapProgress::InProgress
        }
    }

    /// Clear every visited flag and the last overlapped record.
    pub fn reset(&mut self) {
        self.visited.values_mut().for_each(|v| *v = false);
        self.last_overlapped = None;
    }

    pub fn all_visited(&self) -> bool {
        !self.visited.is_empty() && self.visited.values().all(|v| *v)
    }

    pub fn is_visited(&self, id: &SegmentId) -> bool {
        self.visited.get(id).copied().unwrap_or(false)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.values().filter(|v| **v).count()
    }

    pub fn segment_count(&self) -> usize {
        self.visited.len()
    }

    #[inline]
    pub fn last_overlapped(&self) -> Option<&SegmentId> {
        self.last_overlapped.as_ref()
    }

    #[inline]
    pub fn finish(&self) -> &SegmentId {
        &self.finish
    }
}
