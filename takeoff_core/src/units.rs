//! # Unit Types
//!
//! Thin newtype wrappers for the handful of units a fence takeoff deals in.
//! They serialize as bare numbers so JSON output stays clean.
//!
//! ## Metric Units
//!
//! All user input is in millimetres, matching how UK fencing products are
//! sold and specified:
//! - Length: millimetres (mm), metres (m)
//! - Mass: kilograms (kg)
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::units::{Metres, Millimetres};
//!
//! let run = Millimetres(6000.0);
//! let run_m: Metres = run.into();
//! assert_eq!(run_m.0, 6.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Mul;

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimetres(pub f64);

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metres(pub f64);

impl Metres {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<Millimetres> for Metres {
    fn from(mm: Millimetres) -> Self {
        Metres(mm.0 / 1000.0)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

impl Mul<f64> for Kilograms {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Kilograms(self.0 * rhs)
    }
}

impl Kilograms {
    pub fn value(self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millimetres_to_metres() {
        let mm = Millimetres(2400.0);
        let m: Metres = mm.into();
        assert_eq!(m.0, 2.4);
    }

    #[test]
    fn test_kilograms_per_post() {
        // 10 kg of gravel under each of 7 posts
        let gravel = Kilograms(10.0) * 7.0;
        assert_eq!(gravel.value(), 70.0);
    }

    #[test]
    fn test_serialization() {
        let mm = Millimetres(1830.0);
        let json = serde_json::to_string(&mm).unwrap();
        assert_eq!(json, "1830.0");

        let roundtrip: Millimetres = serde_json::from_str(&json).unwrap();
        assert_eq!(mm, roundtrip);
    }
}
