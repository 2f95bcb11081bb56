//! # Fence Takeoff
//!
//! Turns a perimeter of up to four sides plus a fence specification into a
//! bill of quantities: posts, panels or boards, rails and fixings.
//!
//! ## Pipeline
//!
//! ```text
//! FenceInput
//!   ├── user_specification()          raw user values
//!   ├── tiers::resolve + tiers::merge DIY locking → effective specification
//!   ├── perimeter::aggregate          layout::layout_side per enabled side,
//!   │                                 shared corners, waste
//!   └── hardware::price_out           concrete, gravel, caps, fixings
//!        → BillOfQuantities
//! ```
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::fence::{compute_fence_bom, FenceInput, FenceType, Side};
//!
//! let mut input = FenceInput::example();
//! input.fence_type = FenceType::Featheredge;
//! input.sides = vec![Side::new(6000.0)];
//!
//! let bom = compute_fence_bom(&input).unwrap();
//! assert_eq!(bom.net_posts, 4);
//! assert_eq!(bom.sides[0].layout.actual_spacing_mm, 2000.0);
//! ```

pub mod hardware;
pub mod layout;
pub mod perimeter;
pub mod tiers;

pub use hardware::{price_out, BillOfQuantities, Hardware, MaterialLine, MaterialUnit};
pub use layout::{layout_side, LayoutDetail, SideLayout};
pub use perimeter::{aggregate, PerimeterTotals, SideBreakdown};
pub use tiers::{merge, resolve, BudgetTier, SkillTier, TierOverride};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::TakeoffResult;
use crate::input::{lenient_bool, lenient_enum, lenient_f64, lenient_u32};

/// Maximum number of sides a perimeter can have.
pub const MAX_SIDES: usize = 4;

/// Fence construction style.
///
/// Panel fences use pre-made panels between posts; featheredge and hit & miss
/// are built on site from boards nailed to rails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FenceType {
    /// Pre-made panels, one post per bay
    #[default]
    Panel,
    /// Tapered overlapping boards on rails
    Featheredge,
    /// Boards alternating on both faces of the rails
    HitMiss,
}

impl FenceType {
    /// All fence types for UI selection
    pub const ALL: [FenceType; 3] = [FenceType::Panel, FenceType::Featheredge, FenceType::HitMiss];

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            FenceType::Panel => "Panel",
            FenceType::Featheredge => "Featheredge",
            FenceType::HitMiss => "Hit & miss",
        }
    }

    /// Board fences are laid out by post spacing and built from boards and rails.
    pub fn is_board_fence(&self) -> bool {
        !matches!(self, FenceType::Panel)
    }
}

/// One side of the perimeter.
///
/// Only enabled sides with a positive length take part in the takeoff.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Side {
    /// End-to-end run length in millimetres
    #[serde(default, deserialize_with = "lenient_f64")]
    pub length_mm: f64,

    /// Whether this side is fenced
    #[serde(default, deserialize_with = "lenient_bool")]
    pub enabled: bool,
}

impl Side {
    /// An enabled side of the given length.
    pub fn new(length_mm: f64) -> Self {
        Side {
            length_mm,
            enabled: true,
        }
    }

    /// A side present in the input but switched off.
    pub fn disabled(length_mm: f64) -> Self {
        Side {
            length_mm,
            enabled: false,
        }
    }

    /// Whether this side contributes to the takeoff.
    pub fn participates(&self) -> bool {
        self.enabled && self.length_mm.is_finite() && self.length_mm > 0.0
    }
}

/// Pre-made panel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

/// Post cross-section (square posts).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PostType {
    pub width_mm: f64,
}

impl PostType {
    /// Label such as "100x100"
    pub fn section_label(&self) -> String {
        format!("{0:.0}x{0:.0}", self.width_mm)
    }
}

/// Fully resolved description of the fence being built.
///
/// Built from [`FenceInput::user_specification`] and then passed through
/// [`tiers::merge`] so DIY-locked values replace what the user typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FenceSpecification {
    pub fence_type: FenceType,
    pub fence_height_mm: f64,

    /// Target maximum post spacing (board fences only)
    pub post_spacing_target_mm: f64,

    /// Panel dimensions (panel fences only)
    pub panel_size: PanelSize,

    pub post_type: PostType,
    pub rails_per_bay: u32,
    pub rail_depth_mm: f64,
    pub rail_thickness_mm: f64,
    pub board_width_mm: f64,
    pub board_thickness_mm: f64,

    /// Overlap between adjacent boards (featheredge only)
    pub board_overlap_mm: f64,

    /// Embedded depth of each post below ground
    pub post_depth_mm: f64,

    /// Postcrete bags per post hole, may be fractional (thirds of a bag)
    pub concrete_bags_per_post: f64,

    /// Extra boards ordered for offcuts and splits, as a percentage
    pub waste_percent: f64,
}

impl FenceSpecification {
    /// Bay width of a panel fence: one panel plus its flanking post.
    pub fn bay_width_mm(&self) -> f64 {
        self.panel_size.width_mm + self.post_type.width_mm
    }

    /// Horizontal distance each board covers along the run.
    ///
    /// Featheredge boards lose their overlap. Hit & miss boards are counted in
    /// front/back pairs with a 20 mm gap either side.
    pub fn board_pitch_mm(&self) -> f64 {
        match self.fence_type {
            FenceType::Featheredge => self.board_width_mm - self.board_overlap_mm,
            FenceType::HitMiss => self.board_width_mm * 2.0 - HIT_MISS_GAP_MM,
            FenceType::Panel => 0.0,
        }
    }

    /// Multiplier applied to consumable boards.
    pub fn waste_multiplier(&self) -> f64 {
        1.0 + self.waste_percent / 100.0
    }

    /// Whether the layout would be meaningful with these values.
    ///
    /// A zero or negative panel width, post spacing or board pitch would
    /// divide by zero or count backwards.
    pub fn is_computable(&self) -> bool {
        match self.fence_type {
            FenceType::Panel => self.panel_size.width_mm > 0.0 && self.post_type.width_mm >= 0.0,
            FenceType::Featheredge | FenceType::HitMiss => {
                self.post_spacing_target_mm > 0.0 && self.board_pitch_mm() > 0.0
            }
        }
    }
}

/// Gap taken off a front/back board pair in a hit & miss fence.
pub const HIT_MISS_GAP_MM: f64 = 20.0;

/// Raw input record for a fence takeoff.
///
/// Every field is leniently coerced (see [`crate::input`]): numeric strings
/// are parsed and anything missing or unparseable becomes 0, flags accept
/// `"true"`-style strings, and unknown choices fall back to their defaults.
/// The engine then returns `None` rather than dividing by zero.
///
/// ## JSON Example
///
/// ```json
/// {
///   "fence_type": "featheredge",
///   "fence_height_mm": 1800,
///   "post_spacing_target_mm": 2400,
///   "post_width_mm": 100,
///   "rails_per_bay": 3,
///   "board_width_mm": 125,
///   "board_overlap_mm": 25,
///   "post_depth_mm": 600,
///   "concrete_bags_per_post": 2,
///   "waste_percent": 10,
///   "skill_tier": "pro",
///   "budget_tier": "full",
///   "sides": [
///     { "length_mm": 6000, "enabled": true },
///     { "length_mm": "4000", "enabled": true }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FenceInput {
    #[serde(default, deserialize_with = "lenient_enum")]
    pub fence_type: FenceType,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub fence_height_mm: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub post_spacing_target_mm: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub panel_width_mm: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub panel_height_mm: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub post_width_mm: f64,

    #[serde(default, deserialize_with = "lenient_u32")]
    pub rails_per_bay: u32,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub rail_depth_mm: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub rail_thickness_mm: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub board_width_mm: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub board_thickness_mm: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub board_overlap_mm: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub post_depth_mm: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub concrete_bags_per_post: f64,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub waste_percent: f64,

    #[serde(default, deserialize_with = "lenient_enum")]
    pub skill_tier: SkillTier,

    #[serde(default, deserialize_with = "lenient_enum")]
    pub budget_tier: BudgetTier,

    /// Perimeter sides in order; only the first four are used
    #[serde(default)]
    pub sides: Vec<Side>,
}

impl FenceInput {
    /// A ready-to-edit starting point: one 6 m run of 1.8 m panel fencing
    /// using common UK stock sizes.
    pub fn example() -> Self {
        FenceInput {
            fence_type: FenceType::Panel,
            fence_height_mm: 1800.0,
            post_spacing_target_mm: 2400.0,
            panel_width_mm: 1830.0,
            panel_height_mm: 1800.0,
            post_width_mm: 100.0,
            rails_per_bay: 3,
            rail_depth_mm: 90.0,
            rail_thickness_mm: 45.0,
            board_width_mm: 125.0,
            board_thickness_mm: 22.0,
            board_overlap_mm: 25.0,
            post_depth_mm: 600.0,
            concrete_bags_per_post: 2.0,
            waste_percent: 10.0,
            skill_tier: SkillTier::Pro,
            budget_tier: BudgetTier::Full,
            sides: vec![
                Side::new(6000.0),
                Side::disabled(0.0),
                Side::disabled(0.0),
                Side::disabled(0.0),
            ],
        }
    }

    /// Parse an input record from JSON.
    pub fn from_json_str(json: &str) -> TakeoffResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse an input record from TOML.
    pub fn from_toml_str(text: &str) -> TakeoffResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// The specification exactly as the user entered it, before tier locking.
    pub fn user_specification(&self) -> FenceSpecification {
        FenceSpecification {
            fence_type: self.fence_type,
            fence_height_mm: self.fence_height_mm,
            post_spacing_target_mm: self.post_spacing_target_mm,
            panel_size: PanelSize {
                width_mm: self.panel_width_mm,
                height_mm: self.panel_height_mm,
            },
            post_type: PostType {
                width_mm: self.post_width_mm,
            },
            rails_per_bay: self.rails_per_bay,
            rail_depth_mm: self.rail_depth_mm,
            rail_thickness_mm: self.rail_thickness_mm,
            board_width_mm: self.board_width_mm,
            board_thickness_mm: self.board_thickness_mm,
            board_overlap_mm: self.board_overlap_mm,
            post_depth_mm: self.post_depth_mm,
            concrete_bags_per_post: self.concrete_bags_per_post,
            waste_percent: self.waste_percent,
        }
    }

    /// The specification the layout actually uses, with any DIY tier
    /// override applied.
    pub fn effective_specification(&self) -> FenceSpecification {
        let tier = resolve(self.skill_tier, self.budget_tier, self.fence_height_mm);
        merge(&self.user_specification(), &tier)
    }

    /// The sides considered for layout: at most [`MAX_SIDES`], in order.
    pub fn perimeter(&self) -> &[Side] {
        if self.sides.len() > MAX_SIDES {
            warn!(
                "Input has {} sides; only the first {} are used",
                self.sides.len(),
                MAX_SIDES
            );
        }
        &self.sides[..self.sides.len().min(MAX_SIDES)]
    }
}

/// Compute the full bill of quantities for a fence.
///
/// Returns `None` when no enabled side has a positive length, when the
/// effective specification leaves nothing to lay out (zero panel width, post
/// spacing or board pitch), or when a side would need more than
/// [`layout::MAX_UNITS_PER_SIDE`] bays or boards. Never panics and never
/// returns NaN.
///
/// # Example
///
/// ```rust
/// use takeoff_core::calculations::fence::{compute_fence_bom, FenceInput, Side};
///
/// let mut input = FenceInput::example();
/// input.sides = vec![Side::new(6000.0), Side::new(4000.0)];
///
/// let bom = compute_fence_bom(&input).unwrap();
/// assert_eq!(bom.shared_corners, 1);
/// assert_eq!(bom.net_posts, bom.total_posts_raw - 1);
///
/// input.sides = vec![Side::disabled(6000.0)];
/// assert!(compute_fence_bom(&input).is_none());
/// ```
pub fn compute_fence_bom(input: &FenceInput) -> Option<BillOfQuantities> {
    let spec = input.effective_specification();
    if !spec.is_computable() {
        warn!(
            fence_type = ?spec.fence_type,
            "Specification has no usable panel width, post spacing or board pitch"
        );
        return None;
    }

    let totals = aggregate(input.perimeter(), &spec)?;
    Some(price_out(&totals, &spec))
}
