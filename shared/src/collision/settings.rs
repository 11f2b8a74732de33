/*!
Wheel/terrain collision settings and tolerances.

Defaults for the broad phase and the contact resolver, plus the serde-backed
`CollisionSettings` that carries them into a session.

Notes
- Distances are in track units.
- The defaults reproduce the tuned behavior of the shipped tracks. Whether they should scale
  with wheel radius or track scale is undecided; override them per session instead of editing
  the defaults.
*/

use serde::{Deserialize, Serialize};

/// Margin subtracted from a measured contact distance before resolving the wheel height.
/// Too large creates visible gaps; too small lets wheels jitter on the surface.
pub const DEFAULT_CLEARANCE_TOLERANCE: f32 = 2.0;

/// Vertical padding added above and below a segment box during the broad phase.
/// Wheel height is imprecise before vertical resolution, so the pretest is loosened on Y.
pub const DEFAULT_VERTICAL_PADDING: f32 = 10.0;

/// Ray/plane denominators at or below this magnitude are treated as parallel.
pub const PARALLEL_EPS: f32 = 1.0e-6;

/// Runtime-overridable collision tolerances.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionSettings {
    /// See [`DEFAULT_CLEARANCE_TOLERANCE`].
    pub clearance_tolerance: f32,
    /// See [`DEFAULT_VERTICAL_PADDING`].
    pub vertical_padding: f32,
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self {
            clearance_tolerance: DEFAULT_CLEARANCE_TOLERANCE,
            vertical_padding: DEFAULT_VERTICAL_PADDING,
        }
    }
}
