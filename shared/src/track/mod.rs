//! Track data model: named terrain segments placed by a bone transform table.
//!
//! A [`Track`] is built once from preprocessed [`MeshInfo`] records and never mutated
//! afterwards, so it can be shared freely between wheels, sessions and threads.
//!
//! # Model
//! - Triangles are already in world space (the preprocessor baked the mesh transforms in).
//! - Each mesh-info box is in mesh-local space. At load, its min and max corners are each
//!   pushed through the segment's bone transform. The result is a world-space box whose
//!   corners may be swapped on some axes; the broad phase normalizes it.

pub mod bundle;
pub mod demo;
pub mod info;
pub mod mesh_info;

use std::{borrow::Borrow, collections::HashSet, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    collision::types::{Aabb, Mat4, Triangle, aabb_from_corners},
    error::{TrackError, TrackResult},
};

pub use bundle::TrackBundle;
pub use info::TrackInfo;
pub use mesh_info::MeshInfo;

/// Strongly-typed name of a track segment (e.g. `"c_02"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(String);

impl SegmentId {
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SegmentId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for SegmentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for SegmentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One named terrain piece: world-space triangles, a world-space box and its bone.
#[derive(Clone, Debug)]
pub struct Segment {
    id: SegmentId,
    triangles: Vec<Triangle>,
    bounds: Aabb,
    bone: usize,
}

impl Segment {
    #[inline]
    pub fn id(&self) -> &SegmentId {
        &self.id
    }

    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// World-space box as transformed from the authored corners (possibly unordered).
    #[inline]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Index into the track's transform table.
    #[inline]
    pub fn bone(&self) -> usize {
        self.bone
    }
}

/// A segment as delivered by the mesh loader, before validation.
#[derive(Clone, Debug)]
pub struct SegmentSource {
    pub id: SegmentId,
    pub bone: usize,
    /// Preprocessed per-mesh data; `None` when the loader found nothing attached.
    pub mesh: Option<MeshInfo>,
}

/// Ordered collection of segments plus the transform table used to place them.
#[derive(Clone, Debug)]
pub struct Track {
    bones: Vec<Mat4>,
    segments: Vec<Segment>,
}

impl Track {
    /// Validate the loader output and build an immutable track.
    ///
    /// Fails on an empty segment list, duplicate identifiers, bone indices outside the
    /// transform table, and segments without mesh data.
    pub fn build(bones: Vec<Mat4>, sources: Vec<SegmentSource>) -> TrackResult<Self> {
        if sources.is_empty() {
            return Err(TrackError::Empty);
        }

        let mut seen: HashSet<SegmentId> = HashSet::with_capacity(sources.len());
        let mut segments = Vec::with_capacity(sources.len());

        for src in sources {
            if !seen.insert(src.id.clone()) {
                return Err(TrackError::DuplicateSegment(src.id));
            }
            let Some(transform) = bones.get(src.bone) else {
                return Err(TrackError::BoneOutOfRange {
                    segment: src.id,
                    bone: src.bone,
                    bones: bones.len(),
                });
            };
            let Some(mesh) = src.mesh else {
                return Err(TrackError::MissingMeshData(src.id));
            };

            let local = mesh.bounds;
            let bounds = aabb_from_corners(
                transform.transform_point(&local.mins),
                transform.transform_point(&local.maxs),
            );

            segments.push(Segment {
                id: src.id,
                triangles: mesh.triangles,
                bounds,
                bone: src.bone,
            });
        }

        let triangles: usize = segments.iter().map(|s| s.triangles.len()).sum();
        log::info!(
            "track built: {} segments, {} triangles, {} bones",
            segments.len(),
            triangles,
            bones.len()
        );

        Ok(Self { bones, segments })
    }

    /// Segments in load order.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Look a segment up by identifier.
    pub fn segment<Q>(&self, id: &Q) -> Option<&Segment>
    where
        SegmentId: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.segments
            .iter()
            .find(|s| Borrow::<Q>::borrow(&s.id) == id)
    }

    #[inline]
    pub fn contains(&self, id: &SegmentId) -> bool {
        self.segment(id).is_some()
    }

    /// Absolute transform of bone `index`.
    #[inline]
    pub fn bone(&self, index: usize) -> Option<&Mat4> {
        self.bones.get(index)
    }

    #[inline]
    pub fn bones(&self) -> &[Mat4] {
        &self.bones
    }

    /// Fail fast if `info` names a finish segment this track does not have.
    pub fn validate_info(&self, info: &TrackInfo) -> TrackResult<()> {
        if self.contains(&info.finish_segment) {
            Ok(())
        } else {
            Err(TrackError::UnknownFinishSegment(info.finish_segment.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::types::{Point3, Vec3};
    use nalgebra as na;

    fn quad_mesh() -> MeshInfo {
        MeshInfo::new(
            vec![Triangle::new(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(1.0, 0.0, 0.0),
            )],
            Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 1.0)),
        )
    }

    fn source(name: &str, bone: usize) -> SegmentSource {
        SegmentSource {
            id: SegmentId::from(name),
            bone,
            mesh: Some(quad_mesh()),
        }
    }

    #[test]
    fn bounds_are_placed_by_the_bone_transform() {
        let bones = vec![Mat4::new_translation(&Vec3::new(10.0, 2.0, -5.0))];
        let track = Track::build(bones, vec![source("c_01", 0)]).unwrap();
        let seg = track.segment("c_01").unwrap();
        assert_eq!(seg.bounds().mins, Point3::new(10.0, 2.0, -5.0));
        assert_eq!(seg.bounds().maxs, Point3::new(11.0, 2.0, -4.0));
    }

    #[test]
    fn rotated_bone_can_leave_bounds_unordered() {
        // Half turn about Y swaps min and max on X and Z.
        let rot = na::Rotation3::from_axis_angle(&Vec3::y_axis(), std::f32::consts::PI);
        let bones = vec![rot.to_homogeneous()];
        let track = Track::build(bones, vec![source("c_01", 0)]).unwrap();
        let b = track.segment("c_01").unwrap().bounds();
        assert!(b.mins.x > b.maxs.x);
        assert!(b.mins.z > b.maxs.z);
    }

    #[test]
    fn lookup_by_identifier() {
        let track = Track::build(
            vec![Mat4::identity()],
            vec![source("c_01", 0), source("c_02", 0)],
        )
        .unwrap();
        assert_eq!(track.segments().len(), 2);
        assert_eq!(track.segment(&SegmentId::from("c_02")).unwrap().id().as_str(), "c_02");
        assert!(track.segment("c_99").is_none());
        assert!(track.bone(0).is_some());
        assert!(track.bone(1).is_none());
    }

    #[test]
    fn missing_mesh_data_fails_fast() {
        let mut s = source("c_01", 0);
        s.mesh = None;
        let err = Track::build(vec![Mat4::identity()], vec![s]).unwrap_err();
        assert!(matches!(err, TrackError::MissingMeshData(id) if id.as_str() == "c_01"));
    }

    #[test]
    fn invalid_layouts_are_rejected() {
        assert!(matches!(
            Track::build(vec![Mat4::identity()], vec![]),
            Err(TrackError::Empty)
        ));
        assert!(matches!(
            Track::build(vec![Mat4::identity()], vec![source("a", 0), source("a", 0)]),
            Err(TrackError::DuplicateSegment(_))
        ));
        assert!(matches!(
            Track::build(vec![Mat4::identity()], vec![source("a", 3)]),
            Err(TrackError::BoneOutOfRange { bone: 3, bones: 1, .. })
        ));
    }

    #[test]
    fn finish_segment_must_exist() {
        let track = Track::build(vec![Mat4::identity()], vec![source("c_01", 0)]).unwrap();
        let mut info = TrackInfo::track01();
        info.finish_segment = SegmentId::from("c_01");
        assert!(track.validate_info(&info).is_ok());
        info.finish_segment = SegmentId::from("c_02");
        assert!(matches!(
            track.validate_info(&info),
            Err(TrackError::UnknownFinishSegment(_))
        ));
    }
}
