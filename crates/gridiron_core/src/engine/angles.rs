//! Heading math
//!
//! Headings are radians everywhere in the pipeline and may be unbounded
//! (a model may hand us 7.0 or -4.2). Degrees only exist at the compact
//! wire boundary.

use std::f32::consts::{PI, TAU};

/// Wrap into (-PI, PI]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid maps +PI onto -PI; keep the upper bound inclusive.
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Signed turn from `from` to `to` along the shorter arc, in (-PI, PI]
pub fn shortest_delta(from: f32, to: f32) -> f32 {
    normalize_angle(to - from)
}

/// Blend two headings along the shorter arc.
///
/// The result is `from + delta * t`, not re-wrapped, so a sequence of
/// interpolated headings stays continuous for the renderer.
pub fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    from + shortest_delta(from, to) * t
}

/// Radians to whole degrees for the compact wire form
pub fn to_whole_degrees(radians: f32) -> i32 {
    radians.to_degrees().round() as i32
}

pub fn from_degrees(degrees: i32) -> f32 {
    (degrees as f32).to_radians()
}
