//! Small built-in track for smoke runs: a flat square ring of four straight segments.
//!
//! Each segment's box is authored around its own origin and placed by a translation bone,
//! the same way exported tracks are laid out.

use super::{
    MeshInfo, SegmentId, TrackInfo,
    bundle::{BundleSegment, TrackBundle},
};
use crate::{
    FINISH_SEGMENT,
    collision::types::{Aabb, Mat4, Point3, Triangle, Vec3},
};

/// Outer half size of the ring.
pub const RING_HALF_SIZE: f32 = 200.0;

/// Width of each straight.
pub const RING_WIDTH: f32 = 40.0;

/// Flat rectangle at height 0 as two triangles, plus its box relative to the center.
fn slab(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> (MeshInfo, Vec3) {
    let triangles = vec![
        Triangle::new(
            Point3::new(min_x, 0.0, min_z),
            Point3::new(min_x, 0.0, max_z),
            Point3::new(max_x, 0.0, min_z),
        ),
        Triangle::new(
            Point3::new(max_x, 0.0, min_z),
            Point3::new(min_x, 0.0, max_z),
            Point3::new(max_x, 0.0, max_z),
        ),
    ];
    let center = Vec3::new((min_x + max_x) * 0.5, 0.0, (min_z + max_z) * 0.5);
    let half = Vec3::new((max_x - min_x) * 0.5, 0.0, (max_z - min_z) * 0.5);
    let local = Aabb::new(Point3::from(-half), Point3::from(half));
    (MeshInfo::new(triangles, local), center)
}

/// Counter-clockwise ring (seen from above): east, north (finish), west, south.
pub fn demo_ring() -> TrackBundle {
    let outer = RING_HALF_SIZE;
    let inner = RING_HALF_SIZE - RING_WIDTH;

    let layout = [
        ("c_01", slab(inner, outer, -inner, inner)),
        (FINISH_SEGMENT, slab(-outer, outer, -outer, -inner)),
        ("c_03", slab(-outer, -inner, -inner, inner)),
        ("c_04", slab(-outer, outer, inner, outer)),
    ];

    let mut bundle = TrackBundle::default();
    for (bone, (name, (mesh, center))) in layout.into_iter().enumerate() {
        bundle.bones.push(Mat4::new_translation(&center));
        bundle.segments.push(BundleSegment {
            id: SegmentId::from(name),
            bone: bone as u32,
            mesh,
        });
    }
    bundle
}

/// Start on the east straight, heading north toward the finish.
pub fn demo_info() -> TrackInfo {
    let x = RING_HALF_SIZE - RING_WIDTH * 0.5;
    TrackInfo::new(
        "demo-ring",
        Point3::new(x, 5.0, RING_HALF_SIZE * 0.5),
        SegmentId::from(FINISH_SEGMENT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_boxes_land_on_their_slabs() {
        let track = demo_ring().into_track().unwrap();
        assert_eq!(track.segments().len(), 4);
        track.validate_info(&demo_info()).unwrap();

        let north = track.segment(FINISH_SEGMENT).unwrap().bounds();
        assert_eq!(north.mins, Point3::new(-200.0, 0.0, -200.0));
        assert_eq!(north.maxs, Point3::new(200.0, 0.0, -160.0));
    }
}
