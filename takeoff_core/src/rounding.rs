//! # Rounding Policy
//!
//! Two kinds of numbers come out of a takeoff and they round differently:
//!
//! - **Things you buy in whole units** (boards, bags, boxes, clips, posts):
//!   always rounded *up* with [`ceil_count`].
//! - **Continuous physical measures** (lengths, weights): rounded to 2
//!   decimals with [`round_measure`]. Fractional concrete bags stay exact and
//!   are only rounded for display.
//!
//! Every count goes through these helpers rather than calling
//! `ceil`/`round` directly.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::rounding::{ceil_count, round_measure};
//!
//! assert_eq!(ceil_count(60.0 * 1.1), 66);
//! assert_eq!(ceil_count(66.2), 67);
//! assert_eq!(round_measure(5.0 / 3.0), 1.67);
//! ```

/// Float drift tolerated before a value is pushed to the next whole unit.
const DRIFT_TOLERANCE: f64 = 1e-9;

/// Round a quantity up to the next whole purchasable unit.
///
/// Values within [`DRIFT_TOLERANCE`] of an integer snap to that integer, so
/// `60 × 1.1 = 66.00000000000001` counts as 66. Negative and non-finite
/// values count as zero.
pub fn ceil_count(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    (value - DRIFT_TOLERANCE).ceil().max(0.0) as u32
}

/// Round a quantity down to a whole count, with the same drift tolerance.
pub fn floor_count(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    (value + DRIFT_TOLERANCE).floor().max(0.0) as u32
}

/// Round a continuous measure to 2 decimal places.
pub fn round_measure(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
