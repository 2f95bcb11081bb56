//! Skill and budget tiers
//!
//! In DIY mode a set of fields is locked to values derived from the fence
//! height and the chosen budget, whatever the user typed. Pro mode leaves the
//! user's values alone.
//!
//! Locking is two pure steps: [`resolve`] builds a [`TierOverride`], then
//! [`merge`] lays it over the user's specification.
//!
//! # Example
//! ```
//! use takeoff_core::calculations::fence::{resolve, BudgetTier, SkillTier};
//!
//! let tier = resolve(SkillTier::Diy, BudgetTier::Budget, 1800.0);
//! assert_eq!(tier.post_depth_mm, Some(600.0));
//! assert_eq!(tier.concrete_bags_per_post, Some(2.0));
//!
//! assert!(resolve(SkillTier::Pro, BudgetTier::Full, 1800.0).is_empty());
//! ```

use serde::{Deserialize, Serialize};

use super::FenceSpecification;
use crate::rounding::ceil_count;

/// Who is building the fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillTier {
    /// Homeowner build; dimensional fields are locked to safe presets
    Diy,
    /// Trade build; every field is taken as entered
    #[default]
    Pro,
}

/// Material quality the DIY presets are chosen from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    #[default]
    Full,
    Budget,
}

/// Fraction of the above-ground height sunk into the ground.
const POST_DEPTH_RATIO: f64 = 0.33;

/// Post depths are set in 50 mm steps.
const POST_DEPTH_STEP_MM: f64 = 50.0;

/// Depth of post hole one bag of postcrete fills.
const DEPTH_PER_BAG_MM: f64 = 300.0;

/// Concrete is metered in thirds of a bag.
const BAG_FRACTIONS: f64 = 3.0;

/// Rails per bay in every DIY preset.
const DIY_RAILS_PER_BAY: u32 = 3;

/// Dimensional constants locked by a DIY budget tier.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TierPreset {
    post_width_mm: f64,
    rail_depth_mm: f64,
    rail_thickness_mm: f64,
    board_thickness_mm: f64,
    board_overlap_mm: f64,
}

const FULL_PRESET: TierPreset = TierPreset {
    post_width_mm: 100.0,
    rail_depth_mm: 90.0,
    rail_thickness_mm: 45.0,
    board_thickness_mm: 22.0,
    board_overlap_mm: 30.0,
};

const BUDGET_PRESET: TierPreset = TierPreset {
    post_width_mm: 75.0,
    rail_depth_mm: 75.0,
    rail_thickness_mm: 38.0,
    board_thickness_mm: 16.0,
    board_overlap_mm: 25.0,
};

impl BudgetTier {
    fn preset(&self) -> TierPreset {
        match self {
            BudgetTier::Full => FULL_PRESET,
            BudgetTier::Budget => BUDGET_PRESET,
        }
    }
}

/// Values that replace user input while a tier is active.
///
/// `None` means "keep what the user entered".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TierOverride {
    pub post_depth_mm: Option<f64>,
    pub concrete_bags_per_post: Option<f64>,
    pub post_width_mm: Option<f64>,
    pub rail_depth_mm: Option<f64>,
    pub rail_thickness_mm: Option<f64>,
    pub board_thickness_mm: Option<f64>,
    pub board_overlap_mm: Option<f64>,
    pub rails_per_bay: Option<u32>,
}

impl TierOverride {
    /// True when nothing is overridden (pro mode).
    pub fn is_empty(&self) -> bool {
        *self == TierOverride::default()
    }
}

/// DIY post depth: a third of the fence height, to the nearest 50 mm.
pub fn diy_post_depth_mm(fence_height_mm: f64) -> f64 {
    let steps = (fence_height_mm * POST_DEPTH_RATIO / POST_DEPTH_STEP_MM).round();
    (steps * POST_DEPTH_STEP_MM).max(0.0)
}

/// Postcrete per hole for a given depth, rounded up to the next third of a bag.
pub fn concrete_bags_for_depth(post_depth_mm: f64) -> f64 {
    ceil_count(post_depth_mm / DEPTH_PER_BAG_MM * BAG_FRACTIONS) as f64 / BAG_FRACTIONS
}

/// Derive the tier override for a skill/budget combination.
pub fn resolve(skill: SkillTier, budget: BudgetTier, fence_height_mm: f64) -> TierOverride {
    match skill {
        SkillTier::Pro => TierOverride::default(),
        SkillTier::Diy => {
            let preset = budget.preset();
            let post_depth_mm = diy_post_depth_mm(fence_height_mm);
            TierOverride {
                post_depth_mm: Some(post_depth_mm),
                concrete_bags_per_post: Some(concrete_bags_for_depth(post_depth_mm)),
                post_width_mm: Some(preset.post_width_mm),
                rail_depth_mm: Some(preset.rail_depth_mm),
                rail_thickness_mm: Some(preset.rail_thickness_mm),
                board_thickness_mm: Some(preset.board_thickness_mm),
                board_overlap_mm: Some(preset.board_overlap_mm),
                rails_per_bay: Some(DIY_RAILS_PER_BAY),
            }
        }
    }
}

/// Lay a tier override over a user specification.
pub fn merge(user: &FenceSpecification, tier: &TierOverride) -> FenceSpecification {
    let mut spec = user.clone();
    if let Some(v) = tier.post_depth_mm {
        spec.post_depth_mm = v;
    }
    if let Some(v) = tier.concrete_bags_per_post {
        spec.concrete_bags_per_post = v;
    }
    if let Some(v) = tier.post_width_mm {
        spec.post_type.width_mm = v;
    }
    if let Some(v) = tier.rail_depth_mm {
        spec.rail_depth_mm = v;
    }
    if let Some(v) = tier.rail_thickness_mm {
        spec.rail_thickness_mm = v;
    }
    if let Some(v) = tier.board_thickness_mm {
        spec.board_thickness_mm = v;
    }
    if let Some(v) = tier.board_overlap_mm {
        spec.board_overlap_mm = v;
    }
    if let Some(v) = tier.rails_per_bay {
        spec.rails_per_bay = v;
    }
    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::fence::FenceInput;

    #[test]
    fn test_pro_is_empty() {
        for budget in [BudgetTier::Full, BudgetTier::Budget] {
            assert!(resolve(SkillTier::Pro, budget, 1800.0).is_empty());
        }
    }

    #[test]
    fn test_diy_budget_1800() {
        let tier = resolve(SkillTier::Diy, BudgetTier::Budget, 1800.0);
        // 1800 × 0.33 = 594 → 11.88 steps → 12 × 50 = 600
        assert_eq!(tier.post_depth_mm, Some(600.0));
        // 600 / 300 × 3 = 6 thirds
        assert_eq!(tier.concrete_bags_per_post, Some(2.0));
        assert_eq!(tier.post_width_mm, Some(75.0));
        assert_eq!(tier.rails_per_bay, Some(3));
        assert!(!tier.is_empty());
    }

    #[test]
    fn test_diy_full_preset() {
        let tier = resolve(SkillTier::Diy, BudgetTier::Full, 1200.0);
        // 1200 × 0.33 = 396 → 7.92 → 8 × 50 = 400
        assert_eq!(tier.post_depth_mm, Some(400.0));
        assert_eq!(tier.post_width_mm, Some(100.0));
        assert_eq!(tier.board_overlap_mm, Some(30.0));
    }

    #[test]
    fn test_concrete_rounds_up_to_thirds() {
        // 450 / 300 × 3 = 4.5 → 5 thirds
        assert!((concrete_bags_for_depth(450.0) - 5.0 / 3.0).abs() < 1e-12);
        // 200 / 300 × 3 = 2 thirds
        assert!((concrete_bags_for_depth(200.0) - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(concrete_bags_for_depth(0.0), 0.0);
    }

    #[test]
    fn test_post_depth_never_negative() {
        assert_eq!(diy_post_depth_mm(-900.0), 0.0);
        assert_eq!(diy_post_depth_mm(0.0), 0.0);
    }

    #[test]
    fn test_merge_applies_override() {
        let user = FenceInput::example().user_specification();
        let tier = resolve(SkillTier::Diy, BudgetTier::Budget, user.fence_height_mm);
        let merged = merge(&user, &tier);

        assert_eq!(merged.post_type.width_mm, 75.0);
        assert_eq!(merged.board_thickness_mm, 16.0);
        assert_eq!(merged.rail_thickness_mm, 38.0);
        // Not tier-controlled
        assert_eq!(merged.panel_size, user.panel_size);
        assert_eq!(merged.waste_percent, user.waste_percent);
    }

    #[test]
    fn test_merge_empty_is_identity() {
        let user = FenceInput::example().user_specification();
        assert_eq!(merge(&user, &TierOverride::default()), user);
    }

    #[test]
    fn test_tier_serialization() {
        assert_eq!(serde_json::to_string(&SkillTier::Diy).unwrap(), "\"diy\"");
        assert_eq!(serde_json::to_string(&BudgetTier::Budget).unwrap(), "\"budget\"");
    }
}
