//! # takeoff_core - Fence Quantity-Takeoff Engine
//!
//! `takeoff_core` is the computational heart of Groundwork. It turns a fence
//! perimeter and specification into a bill of quantities: posts, panels or
//! boards, rails, postcrete, gravel and fixings. All inputs and outputs are
//! serde-serializable, so the engine can sit behind a form, a CLI or an API.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: `compute_fence_bom` is a pure function of its input
//! - **Total**: missing or junk numbers coerce to 0, and meaningless input
//!   yields `None` rather than NaN or a panic
//! - **Centralised rounding**: whole-unit purchases round up, measures round
//!   to 2 decimals (see [`rounding`])
//! - **Traceable**: every bill carries its per-side layouts
//!
//! ## Quick Start
//!
//! ```rust
//! use takeoff_core::{compute_fence_bom, FenceInput};
//!
//! let input = FenceInput::example();
//! let bom = compute_fence_bom(&input).expect("example has one 6 m side");
//!
//! assert_eq!(bom.net_posts, 5);
//! assert_eq!(bom.total_panels, 4);
//!
//! let json = serde_json::to_string_pretty(&bom).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Fence layout and takeoff
//! - [`input`] - Lenient input coercion and JSON/TOML loading
//! - [`rounding`] - Whole-unit and measure rounding policies
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod input;
pub mod rounding;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{compute_fence_bom, BillOfQuantities, FenceInput};
pub use errors::{TakeoffError, TakeoffResult};
pub use input::load_input;
