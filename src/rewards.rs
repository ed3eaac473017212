// Copyright 2026 Pax Foundation. All rights reserved.
// Pax Protocol Simulation Suite ("The Dovecote") - Reward Schedule

//! Deterministic reward projection tables.
//!
//! `projected_reward` is the dashboard's pre-submission estimate:
//! `floor(base(category) * score/100 * multiplier(tier) + 2 * reputation)`.
//! It never mints -- actual issuance happens exclusively through the
//! validation threshold in [`crate::validation`]. The tables are total
//! functions over the closed category/tier sets, so adding a variant forces
//! the compiler to demand a row here.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{PeaceCategory, VerificationTier};

// ─── Tables ──────────────────────────────────────────────────────────────────

/// Base reward in PAX per category.
pub fn category_base(category: PeaceCategory) -> Decimal {
    match category {
        PeaceCategory::ConflictResolution => dec!(1000),
        PeaceCategory::HumanRights => dec!(800),
        PeaceCategory::Education => dec!(600),
        PeaceCategory::Environmental => dec!(500),
        PeaceCategory::CommunityBuilding => dec!(400),
    }
}

/// Identity-tier multiplier.
pub fn tier_multiplier(tier: VerificationTier) -> Decimal {
    match tier {
        VerificationTier::Anonymous => dec!(1.0),
        VerificationTier::Verified => dec!(1.5),
        VerificationTier::Audited => dec!(2.5),
        VerificationTier::Diplomatic => dec!(5.0),
    }
}

/// Flat bonus of 2 PAX per reputation point.
pub fn reputation_bonus(reputation: u32) -> Decimal {
    Decimal::from(reputation) * dec!(2)
}

// ─── Projection ──────────────────────────────────────────────────────────────

/// Projected payout for a submission scoring `expert_score` out of 100.
pub fn projected_reward(
    category: PeaceCategory,
    tier: VerificationTier,
    expert_score: u32,
    reputation: u32,
) -> Decimal {
    let performance = Decimal::from(expert_score) / dec!(100);
    let scaled = category_base(category) * performance * tier_multiplier(tier);
    (scaled + reputation_bonus(reputation)).floor()
}

/// Same projection as an `f64` for the dashboard surface.
pub fn projected_reward_f64(
    category: PeaceCategory,
    tier: VerificationTier,
    expert_score: u32,
    reputation: u32,
) -> f64 {
    projected_reward(category, tier, expert_score, reputation)
        .to_f64()
        .unwrap_or(0.0)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_anonymous_projection() {
        // 1000 * 0.92 * 1.0 + 2*85 = 920 + 170 = 1090
        let reward = projected_reward(
            PeaceCategory::ConflictResolution,
            VerificationTier::Anonymous,
            92,
            85,
        );
        assert_eq!(reward, dec!(1090));
    }

    #[test]
    fn verified_tier_scales_by_multiplier() {
        // 800 * 0.75 * 1.5 + 2*10 = 900 + 20 = 920
        let reward = projected_reward(
            PeaceCategory::HumanRights,
            VerificationTier::Verified,
            75,
            10,
        );
        assert_eq!(reward, dec!(920));
    }

    #[test]
    fn diplomatic_tier_dominates() {
        let anon = projected_reward(
            PeaceCategory::Education,
            VerificationTier::Anonymous,
            80,
            0,
        );
        let diplomatic = projected_reward(
            PeaceCategory::Education,
            VerificationTier::Diplomatic,
            80,
            0,
        );
        assert_eq!(diplomatic, anon * dec!(5));
    }

    #[test]
    fn projection_is_floored() {
        // 500 * 0.77 * 2.5 = 962.5 -> floors to 962
        let reward = projected_reward(
            PeaceCategory::Environmental,
            VerificationTier::Audited,
            77,
            0,
        );
        assert_eq!(reward, dec!(962));
    }

    #[test]
    fn zero_score_pays_only_reputation() {
        for category in PeaceCategory::ALL {
            let reward = projected_reward(category, VerificationTier::Verified, 0, 40);
            assert_eq!(reward, dec!(80));
        }
    }

    #[test]
    fn f64_projection_agrees_with_decimal() {
        let d = projected_reward(
            PeaceCategory::CommunityBuilding,
            VerificationTier::Audited,
            95,
            12,
        );
        let f = projected_reward_f64(
            PeaceCategory::CommunityBuilding,
            VerificationTier::Audited,
            95,
            12,
        );
        assert_eq!(f, d.to_f64().unwrap());
    }
}
