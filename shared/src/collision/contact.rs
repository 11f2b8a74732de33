use super::types::Vec3;

/// Which branch of the contact policy produced a wheel translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactResolution {
    /// No surface along the movement ray: the full movement is applied.
    Free,
    /// A surface exists but stays beyond this tick's travel: the full movement is applied.
    Clear,
    /// The surface is within this tick's travel: the wheel drops by the remaining gap only.
    Settle,
    /// The wheel is inside the clearance band: it is pushed up by the overlap.
    PushOut,
    /// The wheel sits exactly on the clearance band: nothing moves.
    Hold,
}

impl ContactResolution {
    /// Whether this branch means the wheel is supported by the ground this tick.
    #[inline]
    pub fn is_grounded(self) -> bool {
        matches!(self, Self::Settle | Self::PushOut | Self::Hold)
    }
}

/// Translation to apply to a wheel after contact resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedMove {
    pub translation: Vec3,
    pub resolution: ContactResolution,
}

/// Turn a narrow-phase contact distance into a wheel translation.
///
/// `clearance` is subtracted from a found distance before branching:
/// - no contact: move by `movement`
/// - distance > |movement|: move by `movement`
/// - 0 < distance <= |movement|: move by `(0, -distance, 0)`
/// - distance < 0: move by `(0, |distance|, 0)`
/// - distance == 0: stay
///
/// Corrections are vertical only, so a wheel never overshoots into the surface and never
/// gets pushed past the clearance band.
pub fn resolve_contact(contact: Option<f32>, movement: &Vec3, clearance: f32) -> ResolvedMove {
    let Some(raw) = contact else {
        return ResolvedMove {
            translation: *movement,
            resolution: ContactResolution::Free,
        };
    };

    let distance = raw - clearance;
    let (translation, resolution) = if distance > movement.norm() {
        (*movement, ContactResolution::Clear)
    } else if distance > 0.0 {
        (Vec3::new(0.0, -distance, 0.0), ContactResolution::Settle)
    } else if distance < 0.0 {
        (Vec3::new(0.0, distance.abs(), 0.0), ContactResolution::PushOut)
    } else {
        (Vec3::zeros(), ContactResolution::Hold)
    };

    ResolvedMove {
        translation,
        resolution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn down() -> Vec3 {
        Vec3::new(0.0, -1.0, 0.0)
    }

    #[test]
    fn no_contact_applies_full_movement() {
        let m = Vec3::new(0.3, -1.0, 0.2);
        let r = resolve_contact(None, &m, 2.0);
        assert_eq!(r.translation, m);
        assert_eq!(r.resolution, ContactResolution::Free);
        assert!(!r.resolution.is_grounded());
    }

    #[test]
    fn distant_contact_applies_full_movement() {
        let r = resolve_contact(Some(10.0), &down(), 2.0);
        assert_eq!(r.translation, down());
        assert_eq!(r.resolution, ContactResolution::Clear);
    }

    #[test]
    fn near_contact_settles_vertically_by_the_remaining_gap() {
        // 2.5 - 2.0 = 0.5 left before the clearance band, less than one step of 1.0.
        let r = resolve_contact(Some(2.5), &Vec3::new(0.4, -1.0, 0.0), 2.0);
        assert_abs_diff_eq!(r.translation.x, 0.0);
        assert_abs_diff_eq!(r.translation.y, -0.5, epsilon = 1.0e-6);
        assert_eq!(r.resolution, ContactResolution::Settle);
        assert!(r.resolution.is_grounded());
    }

    #[test]
    fn settle_includes_the_exact_movement_length() {
        let r = resolve_contact(Some(3.0), &down(), 2.0);
        assert_eq!(r.resolution, ContactResolution::Settle);
        assert_abs_diff_eq!(r.translation.y, -1.0, epsilon = 1.0e-6);
    }

    #[test]
    fn interpenetrating_wheel_is_pushed_up_by_exactly_the_overlap() {
        // Wheel one unit below a surface, no clearance margin, no movement this call.
        let r = resolve_contact(Some(-1.0), &Vec3::zeros(), 0.0);
        assert_eq!(r.resolution, ContactResolution::PushOut);
        assert_abs_diff_eq!(r.translation.y, 1.0, epsilon = 1.0e-6);
        assert_abs_diff_eq!(r.translation.x, 0.0);
        assert_abs_diff_eq!(r.translation.z, 0.0);
    }

    #[test]
    fn wheel_inside_the_clearance_band_is_pushed_out_of_it() {
        let r = resolve_contact(Some(1.25), &down(), 2.0);
        assert_eq!(r.resolution, ContactResolution::PushOut);
        assert_abs_diff_eq!(r.translation.y, 0.75, epsilon = 1.0e-6);
    }

    #[test]
    fn wheel_on_the_clearance_band_holds() {
        let r = resolve_contact(Some(2.0), &down(), 2.0);
        assert_eq!(r.resolution, ContactResolution::Hold);
        assert_eq!(r.translation, Vec3::zeros());
    }
}
