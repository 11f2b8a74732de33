use nalgebra as na;

use crate::{
    collision::types::{Aabb, Point3},
    track::{Segment, Track},
};

/// Reorder an AABB so that `mins <= maxs` on every axis.
///
/// Segment boxes are produced by transforming the authored min and max corners separately,
/// so a rotated or mirrored bone can leave them swapped.
pub fn normalized(a: &Aabb) -> Aabb {
    let min = na::Point3::new(
        a.mins.x.min(a.maxs.x),
        a.mins.y.min(a.maxs.y),
        a.mins.z.min(a.maxs.z),
    );
    let max = na::Point3::new(
        a.mins.x.max(a.maxs.x),
        a.mins.y.max(a.maxs.y),
        a.mins.z.max(a.maxs.z),
    );
    Aabb {
        mins: min,
        maxs: max,
    }
}

/// Strict containment of `corner` in `bounds` on X and Z, and on Y after padding `bounds`
/// by `vertical_padding` above and below. `bounds` must already be normalized.
#[inline]
fn corner_inside(corner: &Point3, bounds: &Aabb, vertical_padding: f32) -> bool {
    (corner.x > bounds.mins.x && corner.x < bounds.maxs.x)
        && (corner.z > bounds.mins.z && corner.z < bounds.maxs.z)
        && (corner.y > bounds.mins.y - vertical_padding
            && corner.y < bounds.maxs.y + vertical_padding)
}

/// Broad-phase pretest between a wheel box and a segment box.
///
/// Any of the wheel box's eight corners lying inside the (normalized, vertically padded)
/// segment box makes the segment a candidate. This is deliberately conservative: a wheel
/// box that fully encloses a small segment is not reported, but everything the wheel can
/// touch in practice is.
pub fn wheel_overlaps_segment(wheel_box: &Aabb, segment_box: &Aabb, vertical_padding: f32) -> bool {
    let bounds = normalized(segment_box);
    wheel_box
        .vertices()
        .iter()
        .any(|corner| corner_inside(corner, &bounds, vertical_padding))
}

/// Query the segments of `track` whose box overlaps `wheel_box`, in track order.
pub fn query_candidates<'a>(
    track: &'a Track,
    wheel_box: &'a Aabb,
    vertical_padding: f32,
) -> impl Iterator<Item = &'a Segment> + 'a {
    track
        .segments()
        .iter()
        .filter(move |s| wheel_overlaps_segment(wheel_box, s.bounds(), vertical_padding))
}
