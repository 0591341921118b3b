//! Experience and leveling
//!
//! The experience curve: how much XP a level needs before the next one.
//!
//! Every 5 levels form a tier. Tier 0 (levels 1-5) grows by the base factor
//! alone; each later tier adds a bonus to the growth factor, and the bonuses
//! accumulate as a geometric series so later tiers accelerate.

use serde::{Deserialize, Serialize};

use crate::error::ProgressionError;

/// Levels sharing one tier bonus
pub const LEVELS_PER_TIER: u32 = 5;

/// Relative tolerance for treating the tier multiplier as exactly 1
const MULTIPLIER_EPSILON: f64 = 1e-4;

/// Immutable tuning for the experience curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperienceCurve {
    /// XP needed for level 1 -> 2
    base_requirement: f64,
    /// Multiplicative growth applied per level
    base_growth_per_level: f64,
    /// Growth bonus added once tier 1 (levels 6-10) is reached
    first_tier_bonus: f64,
    /// How much stronger each tier's bonus is than the previous one
    tier_bonus_multiplier: f64,
}

impl ExperienceCurve {
    /// Create a validated curve
    pub fn new(
        base_requirement: f64,
        base_growth_per_level: f64,
        first_tier_bonus: f64,
        tier_bonus_multiplier: f64,
    ) -> Result<Self, ProgressionError> {
        let curve = Self {
            base_requirement,
            base_growth_per_level,
            first_tier_bonus,
            tier_bonus_multiplier,
        };
        curve.validate()?;
        Ok(curve)
    }

    /// Reject tuning that cannot produce a usable level 1 requirement.
    ///
    /// Growth factors at or below 1 and negative bonuses are allowed here;
    /// the controller guards against the runaway loops they can cause.
    pub fn validate(&self) -> Result<(), ProgressionError> {
        let params = [
            ("base_requirement", self.base_requirement),
            ("base_growth_per_level", self.base_growth_per_level),
            ("first_tier_bonus", self.first_tier_bonus),
            ("tier_bonus_multiplier", self.tier_bonus_multiplier),
        ];
        for (parameter, value) in params {
            if !value.is_finite() {
                return Err(ProgressionError::InvalidCurve { parameter, value });
            }
        }

        // Anything below 0.5 rounds to a zero requirement at level 1
        if self.base_requirement < 0.5 {
            return Err(ProgressionError::InvalidCurve {
                parameter: "base_requirement",
                value: self.base_requirement,
            });
        }
        if self.base_growth_per_level <= 0.0 {
            return Err(ProgressionError::InvalidCurve {
                parameter: "base_growth_per_level",
                value: self.base_growth_per_level,
            });
        }
        Ok(())
    }

    pub fn base_requirement(&self) -> f64 {
        self.base_requirement
    }

    pub fn base_growth_per_level(&self) -> f64 {
        self.base_growth_per_level
    }

    pub fn first_tier_bonus(&self) -> f64 {
        self.first_tier_bonus
    }

    pub fn tier_bonus_multiplier(&self) -> f64 {
        self.tier_bonus_multiplier
    }

    /// Total growth bonus accumulated by the given tier
    pub fn tier_bonus(&self, tier: u32) -> f64 {
        if tier == 0 {
            return 0.0;
        }

        let multiplier = self.tier_bonus_multiplier;
        if approximately_one(multiplier) {
            // Geometric series collapses to a linear sum
            f64::from(tier) * self.first_tier_bonus
        } else {
            let tier = i32::try_from(tier).unwrap_or(i32::MAX);
            self.first_tier_bonus * (multiplier.powi(tier) - 1.0) / (multiplier - 1.0)
        }
    }

    /// Per-level growth factor in effect at a level
    pub fn growth_for_level(&self, level: u32) -> f64 {
        self.base_growth_per_level + self.tier_bonus(tier_for_level(level))
    }

    /// XP needed to advance from `level` to `level + 1`.
    ///
    /// Levels below 1 are treated as level 1. The result is rounded half away
    /// from zero and saturates at `u32::MAX`; degenerate tuning can yield 0.
    pub fn required_experience(&self, level: u32) -> u32 {
        let level = level.max(1);
        let growth = self.growth_for_level(level);
        let raw = self.base_requirement * growth.powf(f64::from(level - 1));
        // Float-to-int casts saturate and map NaN to 0
        raw.round() as u32
    }
}

impl Default for ExperienceCurve {
    fn default() -> Self {
        Self {
            base_requirement: 20.0,
            base_growth_per_level: 1.8,
            first_tier_bonus: 0.1,
            tier_bonus_multiplier: 0.2,
        }
    }
}

/// Tier index for a level: levels 1-5 are tier 0, 6-10 tier 1, ...
pub fn tier_for_level(level: u32) -> u32 {
    (level.max(1) - 1) / LEVELS_PER_TIER
}

/// Calculate XP needed to go from `level` to the next level
pub fn required_experience(level: u32, curve: &ExperienceCurve) -> u32 {
    curve.required_experience(level)
}

fn approximately_one(value: f64) -> bool {
    (value - 1.0).abs() <= MULTIPLIER_EPSILON * value.abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn flat_curve() -> ExperienceCurve {
        ExperienceCurve::new(20.0, 1.8, 0.0, 1.0).unwrap()
    }

    #[test]
    fn test_required_experience_early_levels() {
        let curve = ExperienceCurve::default();
        assert_eq!(curve.required_experience(1), 20);
        assert_eq!(curve.required_experience(2), 36);
        // 64.8 rounds up
        assert_eq!(curve.required_experience(3), 65);
        // 209.952
        assert_eq!(curve.required_experience(5), 210);
    }

    #[test]
    fn test_level_zero_treated_as_level_one() {
        let curve = ExperienceCurve::default();
        assert_eq!(curve.required_experience(0), curve.required_experience(1));
        assert_eq!(tier_for_level(0), 0);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(tier_for_level(1), 0);
        assert_eq!(tier_for_level(5), 0);
        assert_eq!(tier_for_level(6), 1);
        assert_eq!(tier_for_level(10), 1);
        assert_eq!(tier_for_level(11), 2);
        assert_eq!(tier_for_level(16), 3);

        let curve = ExperienceCurve::default();
        assert_eq!(curve.growth_for_level(5), 1.8);
        assert!((curve.growth_for_level(6) - 1.9).abs() < 1e-12);
        assert_eq!(curve.required_experience(5), (20.0 * 1.8f64.powi(4)).round() as u32);
        // 20 * 1.9^5 = 495.2198
        assert_eq!(curve.required_experience(6), 495);
    }

    #[test]
    fn test_geometric_tier_bonus() {
        let curve = ExperienceCurve::default();
        // 0.1 * (0.2^2 - 1) / (0.2 - 1) = 0.12
        assert!((curve.tier_bonus(2) - 0.12).abs() < 1e-12);
        assert!((curve.growth_for_level(11) - 1.92).abs() < 1e-12);
    }

    #[test]
    fn test_unit_multiplier_is_linear() {
        let curve = ExperienceCurve::new(20.0, 1.8, 0.1, 1.0).unwrap();
        assert!((curve.tier_bonus(1) - 0.1).abs() < 1e-12);
        assert!((curve.tier_bonus(3) - 0.3).abs() < 1e-12);
        // Level 11 is tier 2: growth = 2.0, 20 * 2^10
        assert_eq!(curve.required_experience(11), 20_480);

        // Within epsilon of 1 takes the linear branch too
        let nearly = ExperienceCurve::new(20.0, 1.8, 0.1, 1.000_01).unwrap();
        assert_eq!(nearly.tier_bonus(3), 3.0 * 0.1);
    }

    #[test]
    fn test_linear_case_is_limit_of_geometric() {
        let linear = ExperienceCurve::new(20.0, 1.8, 0.1, 1.0).unwrap();
        let geometric = ExperienceCurve::new(20.0, 1.8, 0.1, 1.001).unwrap();
        for tier in 1..6 {
            let diff = (linear.tier_bonus(tier) - geometric.tier_bonus(tier)).abs();
            assert!(diff < 0.01, "tier {} differs by {}", tier, diff);
        }
        let a = f64::from(linear.required_experience(11));
        let b = f64::from(geometric.required_experience(11));
        assert!((a - b).abs() / a < 0.01);
    }

    #[test]
    fn test_flat_curve_has_no_bonus() {
        let curve = flat_curve();
        for level in 1..30 {
            assert_eq!(curve.growth_for_level(level), 1.8);
        }
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        // 2.5 * 1^n is exactly 2.5 at every level
        let curve = ExperienceCurve::new(2.5, 1.0, 0.0, 1.0).unwrap();
        assert_eq!(curve.required_experience(1), 3);
        assert_eq!(curve.required_experience(4), 3);
    }

    #[test]
    fn test_monotonic_growth() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let curve = ExperienceCurve::new(
                rng.gen_range(1.0..500.0),
                rng.gen_range(1.01..2.5),
                rng.gen_range(0.0..0.5),
                rng.gen_range(0.0..3.0),
            )
            .unwrap();
            for level in 1..60 {
                let here = curve.required_experience(level);
                let next = curve.required_experience(level + 1);
                assert!(next >= here, "{:?} decreased at level {}", curve, level);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let curve = ExperienceCurve::default();
        for level in 1..40 {
            assert_eq!(
                required_experience(level, &curve),
                required_experience(level, &curve)
            );
        }
    }

    #[test]
    fn test_saturates_for_huge_levels() {
        let curve = ExperienceCurve::default();
        assert_eq!(curve.required_experience(500), u32::MAX);
    }

    #[test]
    fn test_degenerate_growth_yields_zero() {
        // Negative bonus drives growth to 0 from tier 1 onwards
        let curve = ExperienceCurve::new(20.0, 1.5, -1.5, 1.0).unwrap();
        assert_eq!(curve.required_experience(1), 20);
        assert_eq!(curve.required_experience(6), 0);
    }

    #[test]
    fn test_validation() {
        assert!(ExperienceCurve::new(0.2, 1.8, 0.1, 0.2).is_err());
        assert!(ExperienceCurve::new(20.0, 0.0, 0.1, 0.2).is_err());
        assert!(ExperienceCurve::new(20.0, f64::NAN, 0.1, 0.2).is_err());
        assert!(ExperienceCurve::new(20.0, 1.8, f64::INFINITY, 0.2).is_err());
        assert_eq!(
            ExperienceCurve::new(-5.0, 1.8, 0.1, 0.2),
            Err(ProgressionError::InvalidCurve { parameter: "base_requirement", value: -5.0 })
        );
        assert!(ExperienceCurve::new(20.0, 0.9, -0.1, 0.5).is_ok());
    }
}
