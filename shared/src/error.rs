//! Error types for track loading and mesh-info decoding.
//!
//! Geometric edge cases during simulation are never errors; everything here fails fast
//! before the first tick.

use thiserror::Error;

use crate::track::SegmentId;

/// Result type for track construction.
pub type TrackResult<T> = Result<T, TrackError>;

/// Configuration errors detected while building a [`crate::track::Track`].
#[derive(Debug, Error)]
pub enum TrackError {
    /// The track has no segments at all.
    #[error("track has no segments")]
    Empty,

    /// Two segments share an identifier.
    #[error("duplicate segment identifier `{0}`")]
    DuplicateSegment(SegmentId),

    /// A segment points at a bone that the transform table does not have.
    #[error("segment `{segment}` references bone {bone} but the track has {bones} bones")]
    BoneOutOfRange {
        /// Offending segment.
        segment: SegmentId,
        /// Requested bone index.
        bone: usize,
        /// Size of the transform table.
        bones: usize,
    },

    /// A segment was delivered without its preprocessed triangle data.
    #[error("segment `{0}` has no mesh data attached")]
    MissingMeshData(SegmentId),

    /// The finish segment named by the track info is not on the track.
    #[error("finish segment `{0}` is not part of the track")]
    UnknownFinishSegment(SegmentId),
}

/// Result type for mesh-info and track-bundle I/O.
pub type MeshInfoResult<T> = Result<T, MeshInfoError>;

/// Errors that can occur while reading or writing mesh-info records and track bundles.
#[derive(Debug, Error)]
pub enum MeshInfoError {
    /// I/O error from the standard library, including truncated input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The triangle count prefix is negative.
    #[error("invalid triangle count: {0}")]
    NegativeCount(i32),

    /// More triangles than the `i32` count prefix can describe.
    #[error("too many triangles to encode: {0}")]
    TooManyTriangles(usize),

    /// A segment name is not valid UTF-8.
    #[error("segment name is not valid UTF-8: {0}")]
    InvalidName(#[from] std::string::FromUtf8Error),

    /// The input does not start with the track bundle magic.
    #[error("not a track bundle")]
    BadMagic,

    /// The bundle was written by an unknown format version.
    #[error("unsupported track bundle version {0}")]
    UnsupportedVersion(u32),

    /// The decoded bundle does not form a valid track.
    #[error(transparent)]
    Track(#[from] TrackError),
}
