//! Single-side layout
//!
//! Lays out one straight run of fence. Panel fences are divided into fixed
//! bays with at most one cut panel at the end; board fences get evenly
//! redistributed posts with boards and rails counted across the whole run.
//!
//! The resolver knows nothing about neighbouring sides. Corner sharing is the
//! perimeter aggregator's job.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FenceSpecification, FenceType};
use crate::rounding::{ceil_count, floor_count, round_measure};

/// Narrowest cut panel worth fitting (mm).
pub const MIN_CUT_PANEL_MM: f64 = 100.0;

/// Most bays or boards a single run may need before it is rejected.
///
/// Keeps every later count and sum well inside `u32`.
pub const MAX_UNITS_PER_SIDE: f64 = 1_000_000.0;

/// Layout of one side of the fence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideLayout {
    /// Posts needed for this run, including both end posts
    pub posts: u32,

    /// Post centre spacing actually achieved
    pub actual_spacing_mm: f64,

    /// Panel or board breakdown
    #[serde(flatten)]
    pub detail: LayoutDetail,
}

/// Fence-type-specific part of a [`SideLayout`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutDetail {
    Panels {
        full_panel_count: u32,
        /// Width of the single cut panel, 0 if the run needs none
        cut_panel_width_mm: f64,
        /// Every panel left to right: full widths, then the cut width
        panel_widths_mm: Vec<f64>,
    },
    Boards {
        board_count: u32,
        rail_count: u32,
    },
}

impl SideLayout {
    /// Full panels on this side (0 for board fences).
    pub fn full_panel_count(&self) -> u32 {
        match &self.detail {
            LayoutDetail::Panels { full_panel_count, .. } => *full_panel_count,
            LayoutDetail::Boards { .. } => 0,
        }
    }

    /// Cut panel width on this side, 0 when there is none.
    pub fn cut_panel_width_mm(&self) -> f64 {
        match &self.detail {
            LayoutDetail::Panels { cut_panel_width_mm, .. } => *cut_panel_width_mm,
            LayoutDetail::Boards { .. } => 0.0,
        }
    }

    /// Whether this side ends in a cut panel.
    pub fn has_cut_panel(&self) -> bool {
        self.cut_panel_width_mm() > 0.0
    }

    /// Panel widths in order (empty for board fences).
    pub fn panel_widths_mm(&self) -> &[f64] {
        match &self.detail {
            LayoutDetail::Panels { panel_widths_mm, .. } => panel_widths_mm,
            LayoutDetail::Boards { .. } => &[],
        }
    }

    /// Boards on this side before waste (0 for panel fences).
    pub fn board_count(&self) -> u32 {
        match &self.detail {
            LayoutDetail::Boards { board_count, .. } => *board_count,
            LayoutDetail::Panels { .. } => 0,
        }
    }

    /// Rails on this side (0 for panel fences).
    pub fn rail_count(&self) -> u32 {
        match &self.detail {
            LayoutDetail::Boards { rail_count, .. } => *rail_count,
            LayoutDetail::Panels { .. } => 0,
        }
    }
}

/// Lay out a single run.
///
/// `length_mm` must be positive and `spec` must pass
/// [`FenceSpecification::is_computable`]; the caller filters both. Returns
/// `None` when the run would need more than [`MAX_UNITS_PER_SIDE`] bays or
/// boards, or more rails than fit in a `u32`.
///
/// # Example
///
/// ```rust
/// use takeoff_core::calculations::fence::{layout_side, FenceInput};
///
/// let spec = FenceInput::example().user_specification();
/// let side = layout_side(6000.0, &spec).unwrap();
///
/// assert_eq!(side.posts, 5);
/// assert_eq!(side.panel_widths_mm(), &[1830.0, 1830.0, 1830.0, 110.0]);
/// ```
pub fn layout_side(length_mm: f64, spec: &FenceSpecification) -> Option<SideLayout> {
    let layout = match spec.fence_type {
        FenceType::Panel => layout_panels(length_mm, spec),
        FenceType::Featheredge | FenceType::HitMiss => layout_boards(length_mm, spec),
    };
    let Some(layout) = layout else {
        debug!("Side {:.0} mm ({:?}) too large to count", length_mm, spec.fence_type);
        return None;
    };
    debug!(
        "Side {:.0} mm ({:?}): {} posts at {:.1} mm",
        length_mm, spec.fence_type, layout.posts, layout.actual_spacing_mm
    );
    Some(layout)
}

/// Panel bays: whole panels first, then at most one cut panel.
fn layout_panels(length_mm: f64, spec: &FenceSpecification) -> Option<SideLayout> {
    let panel_width = spec.panel_size.width_mm;
    let post_width = spec.post_type.width_mm;
    let bay = spec.bay_width_mm();

    if length_mm / bay > MAX_UNITS_PER_SIDE {
        return None;
    }

    let full_bays = floor_count(length_mm / bay);
    let remainder = length_mm - full_bays as f64 * bay;

    let (full_panels, cut_width, posts) = if remainder > post_width + MIN_CUT_PANEL_MM {
        let cut = remainder - post_width;
        (full_bays, cut, full_bays + 2)
    } else if full_bays > 0 {
        // Too little left over for its own panel: give up one full bay and
        // cut from the combined leftover instead.
        let reduced = full_bays - 1;
        let cut = length_mm - reduced as f64 * bay - post_width;
        if cut < MIN_CUT_PANEL_MM {
            (full_bays, 0.0, full_bays + 1)
        } else {
            (reduced, cut, reduced + 2)
        }
    } else {
        // Shorter than a bay: one panel between two end posts.
        let cut = (length_mm - 2.0 * post_width).max(0.0);
        (0, cut, 2)
    };

    let cut_width = round_measure(cut_width);
    let mut panel_widths_mm = vec![panel_width; full_panels as usize];
    if cut_width > 0.0 {
        panel_widths_mm.push(cut_width);
    }

    Some(SideLayout {
        posts,
        actual_spacing_mm: bay,
        detail: LayoutDetail::Panels {
            full_panel_count: full_panels,
            cut_panel_width_mm: cut_width,
            panel_widths_mm,
        },
    })
}

/// Board-and-rail runs: posts evenly spread so no gap exceeds the target.
fn layout_boards(length_mm: f64, spec: &FenceSpecification) -> Option<SideLayout> {
    let raw_bays = length_mm / spec.post_spacing_target_mm;
    let raw_boards = match spec.fence_type {
        FenceType::HitMiss => {
            let boards_per_metre = 1000.0 / spec.board_pitch_mm();
            length_mm / 1000.0 * boards_per_metre * 2.0
        }
        _ => length_mm / spec.board_pitch_mm(),
    };
    if raw_bays > MAX_UNITS_PER_SIDE || raw_boards > MAX_UNITS_PER_SIDE {
        return None;
    }

    let bays = ceil_count(raw_bays).max(1);
    let posts = bays + 1;
    let actual_spacing_mm = round_measure(length_mm / bays as f64);

    Some(SideLayout {
        posts,
        actual_spacing_mm,
        detail: LayoutDetail::Boards {
            board_count: ceil_count(raw_boards),
            rail_count: bays.checked_mul(spec.rails_per_bay)?,
        },
    })
}
