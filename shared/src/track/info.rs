use serde::{Deserialize, Serialize};

use super::SegmentId;
use crate::{collision::types::Point3, constants::FINISH_SEGMENT};

/// Per-track race metadata: where cars start and which segment closes a lap.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackInfo {
    pub name: String,
    pub start_position: Point3,
    pub finish_segment: SegmentId,
}

impl TrackInfo {
    pub fn new(name: impl Into<String>, start_position: Point3, finish_segment: SegmentId) -> Self {
        Self {
            name: name.into(),
            start_position,
            finish_segment,
        }
    }

    pub fn track01() -> Self {
        Self::new(
            "track01",
            Point3::new(370.0, 50.0, -120.0),
            SegmentId::from(FINISH_SEGMENT),
        )
    }

    pub fn track02() -> Self {
        Self::new(
            "track02",
            Point3::new(340.0, 50.0, -380.0),
            SegmentId::from(FINISH_SEGMENT),
        )
    }

    /// Look a preset up by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "track01" => Some(Self::track01()),
            "track02" => Some(Self::track02()),
            _ => None,
        }
    }
}
