//! Crash detection
//!
//! Only a landing can end a run: the bank is checked on ticks where the
//! vehicle touched the ground, never while airborne.

/// Outcome of a contact check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Landing {
    /// No ground contact this tick
    Airborne,
    /// Touched down within the safe bank range
    Safe,
    /// Touched down banked past the threshold
    Crash { angle: f32 },
}

/// Classify this tick's contact against the crash threshold (radians)
pub fn check_landing(contact: bool, angle: f32, crash_angle: f32) -> Landing {
    if !contact {
        Landing::Airborne
    } else if angle.abs() > crash_angle {
        Landing::Crash { angle }
    } else {
        Landing::Safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::CRASH_ANGLE;

    #[test]
    fn test_airborne_never_crashes() {
        let steep = 80f32.to_radians();
        assert_eq!(check_landing(false, steep, CRASH_ANGLE), Landing::Airborne);
    }

    #[test]
    fn test_steep_landing_crashes_either_way() {
        let steep = 80f32.to_radians();
        assert_eq!(
            check_landing(true, steep, CRASH_ANGLE),
            Landing::Crash { angle: steep }
        );
        assert_eq!(
            check_landing(true, -steep, CRASH_ANGLE),
            Landing::Crash { angle: -steep }
        );
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert_eq!(check_landing(true, CRASH_ANGLE, CRASH_ANGLE), Landing::Safe);
        assert_eq!(check_landing(true, 0.3, CRASH_ANGLE), Landing::Safe);
    }
}
