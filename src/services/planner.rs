//! Waypoint planning for closed walking loops.
//!
//! Pure arithmetic: an origin and a target distance produce three
//! intermediate waypoints forming a quadrilateral back to the origin. The
//! miles-per-degree conversions are fixed local approximations, so the legs
//! are not geodesically equal and the achieved total is never checked against
//! the target. That is the contract, not an oversight.

use crate::constants::{LEGS_PER_LOOP, MILES_PER_DEGREE_LATITUDE, MILES_PER_DEGREE_LONGITUDE};
use crate::models::Coordinates;

/// An ordered four-point loop plan: `[origin, wp1, wp2, wp3]`. The closing
/// point is the origin again, reused as leg 4's destination. Ephemeral:
/// recomputed on every submission, never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopPlan {
    points: [Coordinates; LEGS_PER_LOOP],
}

impl LoopPlan {
    pub fn origin(&self) -> Coordinates {
        self.points[0]
    }

    pub fn points(&self) -> &[Coordinates; LEGS_PER_LOOP] {
        &self.points
    }

    /// The four consecutive (source, destination) pairs, wrapping back to the
    /// origin. Each leg's endpoints are fully determined here; no leg depends
    /// on another leg's routing response.
    pub fn legs(&self) -> [(Coordinates, Coordinates); LEGS_PER_LOOP] {
        [
            (self.points[0], self.points[1]),
            (self.points[1], self.points[2]),
            (self.points[2], self.points[3]),
            (self.points[3], self.points[0]),
        ]
    }
}

/// Compute the loop plan for an origin and a target loop distance in miles.
///
/// Each leg is budgeted a quarter of the target. The three waypoints step due
/// south, due west, then due north (restoring the origin latitude); the
/// fourth leg closes the loop back to the origin. Deterministic for any
/// finite input; out-of-range coordinates are produced as-is rather than
/// clamped or rejected.
pub fn plan_loop(origin: Coordinates, target_distance_miles: f64) -> LoopPlan {
    let leg_miles = target_distance_miles / LEGS_PER_LOOP as f64;

    let wp1 = Coordinates {
        lat: origin.lat - leg_miles / MILES_PER_DEGREE_LATITUDE,
        lng: origin.lng,
    };
    let wp2 = Coordinates {
        lat: wp1.lat,
        lng: wp1.lng - leg_miles / MILES_PER_DEGREE_LONGITUDE,
    };
    let wp3 = Coordinates {
        lat: wp2.lat + leg_miles / MILES_PER_DEGREE_LATITUDE,
        lng: wp2.lng,
    };

    LoopPlan {
        points: [origin, wp1, wp2, wp3],
    }
}
