//! # Takeoff Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Raw user input (JSON/TOML-serializable, leniently coerced)
//! - a result type (JSON-serializable)
//! - a pure `compute_*(input) -> Option<result>` function that returns `None`
//!   when the input describes nothing measurable
//!
//! ## Available Calculations
//!
//! - [`fence`] - Panel, featheredge and hit & miss fence runs over 1-4 sides

pub mod fence;

// Re-export commonly used types
pub use fence::{compute_fence_bom, BillOfQuantities, FenceInput};
