/*!
Collision root module.

This module re-exports submodules that implement wheel-versus-terrain contact for the
vehicle. Terrain is a set of immutable triangle segments; wheels are boxes with a single
contact point. The code is split for clarity:

- types:        shared data types (Triangle, Plane, Aabb, math aliases)
- settings:     clearance and broad-phase tolerances
- broad:        wheel box vs. segment box pretest
- narrow_phase: ray/triangle distance along a movement vector
- contact:      contact policy turning a distance into a wheel translation

Per wheel and tick the pipeline is: broad phase selects candidate segments, every candidate
is marked on the lap tracker, the narrow phase finds the minimum travel distance, and the
contact resolver turns that distance into a translation.
*/

pub mod broad;
pub mod contact;
pub mod narrow_phase;
pub mod settings;
pub mod types;

// Re-export commonly used types and functions.
pub use contact::{ContactResolution, ResolvedMove, resolve_contact};
pub use settings::CollisionSettings;
pub use types::{Aabb, Mat4, Plane, Point3, Quat, Triangle, Vec3};

use crate::{lap::LapState, track::Track, vehicle::Wheel};

/// Narrow-phase contact distance for one wheel against the whole track.
///
/// Every segment whose box passes the broad phase is marked visited on `lap` (and becomes
/// its last overlapped segment), whether or not the narrow phase then finds a hit.
///
/// Returns the minimum travel distance along `movement` to a triangle of any candidate
/// segment, or `None` when no candidate triangle is hit.
pub fn check_wheel_track_collision(
    wheel: &Wheel,
    track: &Track,
    movement: &Vec3,
    lap: &mut LapState,
    settings: &CollisionSettings,
) -> Option<f32> {
    let mut best: Option<f32> = None;

    for segment in broad::query_candidates(track, wheel.bounds(), settings.vertical_padding) {
        lap.mark_overlapped(segment.id());

        if let Some(d) =
            narrow_phase::min_distance_to_triangles(segment.triangles(), wheel.position(), movement)
        {
            if best.map_or(true, |b| d < b) {
                best = Some(d);
            }
        }
    }

    best
}

/// Run the full pipeline for one wheel and apply the resulting translation to it.
pub fn move_wheel(
    wheel: &mut Wheel,
    track: &Track,
    movement: &Vec3,
    lap: &mut LapState,
    settings: &CollisionSettings,
) -> (Option<f32>, ResolvedMove) {
    let contact = check_wheel_track_collision(wheel, track, movement, lap, settings);
    let resolved = resolve_contact(contact, movement, settings.clearance_tolerance);
    wheel.translate(&resolved.translation);
    log::trace!(
        "wheel contact {:?} -> {:?} {:?}",
        contact,
        resolved.resolution,
        resolved.translation
    );
    (contact, resolved)
}
