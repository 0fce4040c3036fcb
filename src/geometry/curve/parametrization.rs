//! Composite parametrization helpers.
//!
//! Element `i` of a continuous curve owns the global interval `[2i, 2i+1]`.
//! Its local range is first mapped onto `[0, 1]` ("unit segment"), using an
//! arctangent mapping for infinite bounds so that rays and lines also get a
//! finite global range.
use std::f64::consts::{FRAC_2_PI, FRAC_1_PI, FRAC_PI_2, PI};

/// Maps a local parameter in `[t0, t1]` onto `[0, 1]`.
#[must_use]
pub fn to_unit_segment(t: f64, t0: f64, t1: f64) -> f64 {
    let u = match (t0.is_finite(), t1.is_finite()) {
        (true, true) => {
            let span = t1 - t0;
            if span <= 0.0 {
                0.0
            } else {
                (t - t0) / span
            }
        }
        (true, false) => (t - t0).atan() * FRAC_2_PI,
        (false, true) => 1.0 + (t - t1).atan() * FRAC_2_PI,
        (false, false) => 0.5 + t.atan() * FRAC_1_PI,
    };
    u.clamp(0.0, 1.0)
}

/// Inverse of [`to_unit_segment`].
#[must_use]
pub fn from_unit_segment(u: f64, t0: f64, t1: f64) -> f64 {
    if u <= 0.0 {
        return t0;
    }
    if u >= 1.0 {
        return t1;
    }
    match (t0.is_finite(), t1.is_finite()) {
        (true, true) => t0 + u * (t1 - t0),
        (true, false) => t0 + (u * FRAC_PI_2).tan(),
        (false, true) => t1 + ((u - 1.0) * FRAC_PI_2).tan(),
        (false, false) => ((u - 0.5) * PI).tan(),
    }
}

/// Global position of local parameter `t` on element `index`.
#[must_use]
pub fn global_position(index: usize, t: f64, t0: f64, t1: f64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let base = 2.0 * index as f64;
    base + to_unit_segment(t, t0, t1)
}

/// Element index owning global position `t`, clamped to `[0, count - 1]`.
#[must_use]
pub fn element_index(t: f64, count: usize) -> usize {
    if count == 0 || t <= 0.0 {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let i = (t / 2.0).floor() as usize;
    i.min(count - 1)
}

/// Unit fraction of global position `t` within element `index`.
#[must_use]
pub fn unit_fraction(t: f64, index: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let base = 2.0 * index as f64;
    (t - base).clamp(0.0, 1.0)
}
