//! Planar joint geometry
//!
//! Angles are measured at a vertex joint between the two rays towards its
//! neighbours, the same way the keypoint processor measures knee or elbow
//! flexion.

use crate::models::JointPoint;

/// Angle at vertex `b` between rays `b→a` and `b→c`, in degrees within [0, 180].
///
/// Computed from the difference of the two ray headings and folded onto the
/// non-reflex side. If either ray has zero length (`a` or `c` coincides with
/// `b`) the angle is undefined and `0.0` is returned.
pub fn angle(a: JointPoint, b: JointPoint, c: JointPoint) -> f64 {
    let (ax, ay) = (f64::from(a.x) - f64::from(b.x), f64::from(a.y) - f64::from(b.y));
    let (cx, cy) = (f64::from(c.x) - f64::from(b.x), f64::from(c.y) - f64::from(b.y));

    if (ax == 0.0 && ay == 0.0) || (cx == 0.0 && cy == 0.0) {
        return 0.0;
    }

    let radians = cy.atan2(cx) - ay.atan2(ax);
    let mut degrees = radians.to_degrees().abs();

    if degrees > 180.0 {
        degrees = 360.0 - degrees;
    }

    degrees.clamp(0.0, 180.0)
}

/// Horizontal distance between two joints in normalized units
pub fn horizontal_spread(a: JointPoint, b: JointPoint) -> f64 {
    (f64::from(a.x) - f64::from(b.x)).abs()
}

/// Vertical distance between two joints in normalized units
pub fn vertical_gap(a: JointPoint, b: JointPoint) -> f64 {
    (f64::from(a.y) - f64::from(b.y)).abs()
}
