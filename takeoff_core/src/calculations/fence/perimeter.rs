//! Perimeter aggregation
//!
//! Combines per-side layouts into structural totals for the whole fence.
//!
//! Sides are treated as an open chain: every side after the first shares one
//! corner post with the side before it. A closed four-sided rectangle really
//! shares four corners, not three, so a closed loop is over-counted by one
//! post. The chain rule is kept until closed perimeters are modelled
//! explicitly.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::layout::{layout_side, SideLayout};
use super::{FenceSpecification, FenceType, Side};
use crate::rounding::ceil_count;

/// One participating side with its layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideBreakdown {
    /// 1-based position of the side in the input, disabled sides included
    pub side_number: usize,
    pub length_mm: f64,
    pub layout: SideLayout,
}

/// Structural totals across all participating sides, before hardware.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerimeterTotals {
    pub fence_type: FenceType,
    pub sides: Vec<SideBreakdown>,

    /// Sum of participating side lengths
    pub total_length_mm: f64,

    /// Posts summed side by side, corners counted twice
    pub total_posts_raw: u32,

    /// Corner posts shared between consecutive sides
    pub shared_corners: u32,

    /// Posts to buy
    pub net_posts: u32,

    pub full_panels: u32,

    /// One per side that ends in a cut panel; never merged across sides
    pub cut_panels: u32,

    pub boards_before_waste: u32,

    /// Boards to buy, waste included
    pub total_boards: u32,

    pub total_rails: u32,
}

impl PerimeterTotals {
    /// Full and cut panels together.
    pub fn total_panels(&self) -> u32 {
        self.full_panels.saturating_add(self.cut_panels)
    }
}

/// Sum per-side counts, `None` on overflow.
fn checked_total(mut counts: impl Iterator<Item = u32>) -> Option<u32> {
    counts.try_fold(0u32, |acc, n| acc.checked_add(n))
}

/// Lay out every participating side and merge the results.
///
/// Returns `None` when no side is enabled with a positive length, or when a
/// side or a total is too large to count.
pub fn aggregate(sides: &[Side], spec: &FenceSpecification) -> Option<PerimeterTotals> {
    let breakdowns = sides
        .iter()
        .enumerate()
        .filter(|(_, side)| side.participates())
        .map(|(i, side)| {
            Some(SideBreakdown {
                side_number: i + 1,
                length_mm: side.length_mm,
                layout: layout_side(side.length_mm, spec)?,
            })
        })
        .collect::<Option<Vec<SideBreakdown>>>()?;

    if breakdowns.is_empty() {
        debug!("No enabled side with a positive length");
        return None;
    }

    let side_count = breakdowns.len() as u32;
    let total_posts_raw = checked_total(breakdowns.iter().map(|s| s.layout.posts))?;
    let shared_corners = side_count.saturating_sub(1);
    let net_posts = total_posts_raw.saturating_sub(shared_corners);

    let full_panels = checked_total(breakdowns.iter().map(|s| s.layout.full_panel_count()))?;
    let cut_panels = breakdowns.iter().filter(|s| s.layout.has_cut_panel()).count() as u32;

    let boards_before_waste = checked_total(breakdowns.iter().map(|s| s.layout.board_count()))?;
    let total_boards = ceil_count(boards_before_waste as f64 * spec.waste_multiplier());
    let total_rails = checked_total(breakdowns.iter().map(|s| s.layout.rail_count()))?;

    let total_length_mm = breakdowns.iter().map(|s| s.length_mm).sum();

    debug!(
        "Perimeter: {} sides, {} raw posts, {} shared, {} net",
        side_count, total_posts_raw, shared_corners, net_posts
    );

    Some(PerimeterTotals {
        fence_type: spec.fence_type,
        sides: breakdowns,
        total_length_mm,
        total_posts_raw,
        shared_corners,
        net_posts,
        full_panels,
        cut_panels,
        boards_before_waste,
        total_boards,
        total_rails,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::fence::FenceInput;

    fn panel_spec() -> FenceSpecification {
        FenceInput::example().user_specification()
    }

    fn featheredge_spec(waste_percent: f64) -> FenceSpecification {
        FenceSpecification {
            fence_type: FenceType::Featheredge,
            post_spacing_target_mm: 2400.0,
            board_width_mm: 125.0,
            board_overlap_mm: 25.0,
            rails_per_bay: 3,
            waste_percent,
            ..panel_spec()
        }
    }

    #[test]
    fn test_no_participating_sides() {
        let sides = [Side::disabled(6000.0), Side::new(0.0)];
        assert!(aggregate(&sides, &panel_spec()).is_none());
        assert!(aggregate(&[], &panel_spec()).is_none());
    }

    #[test]
    fn test_two_panel_sides() {
        // 6000 → 5 posts; 4000 = 2 × 1930 + 140 → recut 1970, 3 posts
        let sides = [Side::new(6000.0), Side::new(4000.0)];
        let totals = aggregate(&sides, &panel_spec()).unwrap();
        assert_eq!(totals.total_posts_raw, 8);
        assert_eq!(totals.shared_corners, 1);
        assert_eq!(totals.net_posts, 7);
        assert_eq!(totals.full_panels, 4);
        assert_eq!(totals.cut_panels, 2);
        assert_eq!(totals.total_panels(), 6);
        assert_eq!(totals.total_length_mm, 10000.0);
    }

    #[test]
    fn test_side_numbers_skip_disabled() {
        let sides = [Side::new(3000.0), Side::disabled(3000.0), Side::new(3000.0)];
        let totals = aggregate(&sides, &panel_spec()).unwrap();
        let numbers: Vec<usize> = totals.sides.iter().map(|s| s.side_number).collect();
        assert_eq!(numbers, vec![1, 3]);
        assert_eq!(totals.shared_corners, 1);
    }

    #[test]
    fn test_waste_applies_to_boards_only() {
        let sides = [Side::new(6000.0)];
        let plain = aggregate(&sides, &featheredge_spec(0.0)).unwrap();
        let wasted = aggregate(&sides, &featheredge_spec(10.0)).unwrap();

        assert_eq!(plain.total_boards, 60);
        assert_eq!(wasted.boards_before_waste, 60);
        assert_eq!(wasted.total_boards, 66);
        assert_eq!(wasted.net_posts, plain.net_posts);
        assert_eq!(wasted.total_rails, plain.total_rails);
    }

    #[test]
    fn test_corner_conservation() {
        let lengths = [6000.0, 4000.0, 2500.0, 900.0];
        for n in 1..=4 {
            let sides: Vec<Side> = lengths[..n].iter().map(|&l| Side::new(l)).collect();
            let totals = aggregate(&sides, &featheredge_spec(5.0)).unwrap();
            let raw: u32 = totals.sides.iter().map(|s| s.layout.posts).sum();
            assert_eq!(totals.net_posts, raw - (n as u32 - 1));
            assert!(totals.net_posts >= n as u32);
        }
    }

    #[test]
    fn test_oversized_side_rejects_perimeter() {
        let spec = FenceSpecification {
            board_width_mm: 25.000001,
            ..featheredge_spec(0.0)
        };
        let sides = [Side::new(6000.0), Side::new(6000.0)];
        assert!(aggregate(&sides, &spec).is_none());
    }

    #[test]
    fn test_rail_total_overflow_is_no_result() {
        // Each 2000 mm side is one bay; two of them overflow the rail total
        let spec = FenceSpecification {
            rails_per_bay: u32::MAX,
            ..featheredge_spec(0.0)
        };
        assert!(aggregate(&[Side::new(2000.0)], &spec).is_some());
        assert!(aggregate(&[Side::new(2000.0), Side::new(2000.0)], &spec).is_none());
    }

    #[test]
    fn test_rails_summed_without_waste() {
        // 6000 → 3 bays, 3000 → 2 bays; 5 bays × 3 rails
        let sides = [Side::new(6000.0), Side::new(3000.0)];
        let totals = aggregate(&sides, &featheredge_spec(25.0)).unwrap();
        assert_eq!(totals.total_rails, 15);
    }
}
