//! Hardware and consumables
//!
//! Converts structural totals into the materials actually bought: postcrete,
//! gravel, post caps and fixings. The result is the final
//! [`BillOfQuantities`].

use serde::{Deserialize, Serialize};

use super::perimeter::{PerimeterTotals, SideBreakdown};
use super::{FenceSpecification, FenceType};
use crate::rounding::{ceil_count, round_measure};
use crate::units::{Kilograms, Metres, Millimetres};

/// Drainage gravel under each post (kg).
pub const GRAVEL_KG_PER_POST: f64 = 10.0;

/// Clips fixing each panel to its posts.
pub const CLIPS_PER_PANEL: u32 = 4;

pub const NAILS_PER_BOARD: u32 = 6;
pub const SCREWS_PER_RAIL: u32 = 4;

/// Nails per retail box.
pub const NAILS_PER_BOX: u32 = 500;

/// Screws per retail box.
pub const SCREWS_PER_BOX: u32 = 200;

/// Fixings and consumables.
///
/// Panel fences only use clips; board fences only use nails and screws.
/// Fields that do not apply are 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hardware {
    pub post_caps: u32,

    /// Postcrete needed, unrounded (may be fractional)
    pub concrete_bags: f64,

    /// Whole bags to buy
    pub concrete_bags_to_buy: u32,

    pub gravel_kg: f64,
    pub panel_clips: u32,
    pub nails: u32,
    pub nail_boxes: u32,
    pub screws: u32,
    pub screw_boxes: u32,
}

/// Complete fence takeoff.
///
/// ## JSON Example (abridged)
///
/// ```json
/// {
///   "fence_type": "panel",
///   "total_length_m": 6.0,
///   "total_posts_raw": 5,
///   "shared_corners": 0,
///   "net_posts": 5,
///   "post_height_mm": 2400.0,
///   "full_panels": 3,
///   "cut_panels": 1,
///   "total_panels": 4,
///   "hardware": { "post_caps": 5, "concrete_bags": 10.0, "gravel_kg": 50.0, "panel_clips": 16 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillOfQuantities {
    pub fence_type: FenceType,

    /// Specification after tier locking
    pub specification: FenceSpecification,

    /// Per-side layouts, in input order
    pub sides: Vec<SideBreakdown>,

    pub total_length_m: f64,
    pub total_posts_raw: u32,
    pub shared_corners: u32,
    pub net_posts: u32,

    /// Above-ground height plus embedded depth
    pub post_height_mm: f64,

    pub full_panels: u32,
    pub cut_panels: u32,
    pub total_panels: u32,

    pub boards_before_waste: u32,
    pub total_boards: u32,
    pub total_rails: u32,

    pub hardware: Hardware,
}

/// Unit a [`MaterialLine`] is bought in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialUnit {
    Each,
    Bag,
    Kg,
    Box,
}

impl MaterialUnit {
    /// Short label for display
    pub fn label(&self) -> &'static str {
        match self {
            MaterialUnit::Each => "ea",
            MaterialUnit::Bag => "bag",
            MaterialUnit::Kg => "kg",
            MaterialUnit::Box => "box",
        }
    }
}

/// One purchasable line of the bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLine {
    pub description: String,
    pub quantity: f64,
    pub unit: MaterialUnit,
}

impl MaterialLine {
    fn new(description: impl Into<String>, quantity: f64, unit: MaterialUnit) -> Self {
        MaterialLine {
            description: description.into(),
            quantity,
            unit,
        }
    }
}

impl BillOfQuantities {
    /// Flatten the bill into purchasable lines. Zero quantities are left out.
    ///
    /// # Example
    ///
    /// ```rust
    /// use takeoff_core::calculations::fence::{compute_fence_bom, FenceInput};
    ///
    /// let bom = compute_fence_bom(&FenceInput::example()).unwrap();
    /// let lines = bom.line_items();
    /// assert!(lines.iter().any(|l| l.description.starts_with("Fence post")));
    /// ```
    pub fn line_items(&self) -> Vec<MaterialLine> {
        let spec = &self.specification;
        let hw = &self.hardware;
        let mut lines = vec![MaterialLine::new(
            format!(
                "Fence post {} x {:.0}mm",
                spec.post_type.section_label(),
                self.post_height_mm
            ),
            self.net_posts as f64,
            MaterialUnit::Each,
        )];

        match self.fence_type {
            FenceType::Panel => {
                lines.push(MaterialLine::new(
                    format!(
                        "Fence panel {:.0} x {:.0}mm",
                        spec.panel_size.width_mm, spec.panel_size.height_mm
                    ),
                    self.full_panels as f64,
                    MaterialUnit::Each,
                ));
                lines.push(MaterialLine::new(
                    "Fence panel (cut to width)",
                    self.cut_panels as f64,
                    MaterialUnit::Each,
                ));
                lines.push(MaterialLine::new(
                    "Panel clip",
                    hw.panel_clips as f64,
                    MaterialUnit::Each,
                ));
            }
            FenceType::Featheredge | FenceType::HitMiss => {
                lines.push(MaterialLine::new(
                    format!(
                        "{} board {:.0} x {:.0}mm",
                        self.fence_type.display_name(),
                        spec.board_width_mm,
                        spec.board_thickness_mm
                    ),
                    self.total_boards as f64,
                    MaterialUnit::Each,
                ));
                lines.push(MaterialLine::new(
                    format!("Rail {:.0} x {:.0}mm", spec.rail_depth_mm, spec.rail_thickness_mm),
                    self.total_rails as f64,
                    MaterialUnit::Each,
                ));
                lines.push(MaterialLine::new(
                    format!("Nails (box of {})", NAILS_PER_BOX),
                    hw.nail_boxes as f64,
                    MaterialUnit::Box,
                ));
                lines.push(MaterialLine::new(
                    format!("Screws (box of {})", SCREWS_PER_BOX),
                    hw.screw_boxes as f64,
                    MaterialUnit::Box,
                ));
            }
        }

        lines.push(MaterialLine::new("Post cap", hw.post_caps as f64, MaterialUnit::Each));
        lines.push(MaterialLine::new(
            "Postcrete",
            hw.concrete_bags_to_buy as f64,
            MaterialUnit::Bag,
        ));
        lines.push(MaterialLine::new("Drainage gravel", hw.gravel_kg, MaterialUnit::Kg));

        lines.retain(|line| line.quantity > 0.0);
        lines
    }
}

/// Turn structural totals into the final bill of quantities.
pub fn price_out(totals: &PerimeterTotals, spec: &FenceSpecification) -> BillOfQuantities {
    let net_posts = totals.net_posts;
    let total_panels = totals.total_panels();

    let concrete_bags = net_posts as f64 * spec.concrete_bags_per_post;
    let gravel = Kilograms(GRAVEL_KG_PER_POST) * net_posts as f64;

    let (panel_clips, nails, screws) = match totals.fence_type {
        FenceType::Panel => (total_panels.saturating_mul(CLIPS_PER_PANEL), 0, 0),
        FenceType::Featheredge | FenceType::HitMiss => (
            0,
            totals.total_boards.saturating_mul(NAILS_PER_BOARD),
            totals.total_rails.saturating_mul(SCREWS_PER_RAIL),
        ),
    };

    let hardware = Hardware {
        post_caps: net_posts,
        concrete_bags,
        concrete_bags_to_buy: ceil_count(concrete_bags),
        gravel_kg: round_measure(gravel.value()),
        panel_clips,
        nails,
        nail_boxes: ceil_count(nails as f64 / NAILS_PER_BOX as f64),
        screws,
        screw_boxes: ceil_count(screws as f64 / SCREWS_PER_BOX as f64),
    };

    let total_length: Metres = Millimetres(totals.total_length_mm).into();

    BillOfQuantities {
        fence_type: totals.fence_type,
        specification: spec.clone(),
        sides: totals.sides.clone(),
        total_length_m: round_measure(total_length.value()),
        total_posts_raw: totals.total_posts_raw,
        shared_corners: totals.shared_corners,
        net_posts,
        post_height_mm: round_measure(spec.fence_height_mm + spec.post_depth_mm),
        full_panels: totals.full_panels,
        cut_panels: totals.cut_panels,
        total_panels,
        boards_before_waste: totals.boards_before_waste,
        total_boards: totals.total_boards,
        total_rails: totals.total_rails,
        hardware,
    }
}
