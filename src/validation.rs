// Copyright 2026 Pax Foundation. All rights reserved.
// Pax Protocol Simulation Suite ("The Dovecote") - Validation Workflow

//! Endorsement-threshold approval for submitted projects.
//!
//! A project needs a fixed number of independent endorsements before reward
//! issuance -- a simple Sybil-resistance proxy standing in for real
//! decentralized consensus. Approval is the only path that mints rewards.

use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;
use crate::types::{Project, ProjectStatus};

// ─── Constants ───────────────────────────────────────────────────────────────

/// Endorsements required before a pending project flips to approved.
pub const VALIDATION_THRESHOLD: u32 = 5;

/// Reputation credited to the creator on approval.
pub const REPUTATION_INCREMENT: u32 = 10;

/// Expert quality score assigned on approval, uniform in `[85, 100)`.
pub const EXPERT_SCORE_MIN: u32 = 85;
pub const EXPERT_SCORE_SPAN: u32 = 15;

/// Reward minted on approval, uniform in `[2500, 7500)`, floored.
pub const REWARD_MIN: f64 = 2500.0;
pub const REWARD_MAX: f64 = 7500.0;

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// Result of applying one endorsement to a project.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ValidationOutcome {
    /// Project is already in a terminal state; nothing changed.
    AlreadyFinal,
    /// Endorsement recorded, threshold not yet reached.
    Endorsed { validations: u32 },
    /// Threshold reached: project approved, score and reward assigned.
    Approved { expert_score: u32, reward: f64 },
}

// ─── Transition ──────────────────────────────────────────────────────────────

/// Apply a single endorsement to `project`, drawing score and reward from
/// `rng` if the threshold is reached.
///
/// Idempotent on terminal states: an approved (or rejected) project is
/// returned unchanged. The caller is responsible for crediting the creator
/// with the returned reward and reputation bump.
pub fn apply_validation(
    project: &mut Project,
    rng: &mut dyn RandomSource,
) -> ValidationOutcome {
    if project.status.is_terminal() {
        return ValidationOutcome::AlreadyFinal;
    }

    project.validations += 1;
    if project.validations < VALIDATION_THRESHOLD {
        return ValidationOutcome::Endorsed { validations: project.validations };
    }

    let expert_score =
        EXPERT_SCORE_MIN + (rng.next_unit() * EXPERT_SCORE_SPAN as f64).floor() as u32;
    let reward = rng.in_range(REWARD_MIN, REWARD_MAX).floor();

    project.status = ProjectStatus::Approved;
    project.expert_score = expert_score;
    project.rewarded_amount = reward;

    ValidationOutcome::Approved { expert_score, reward }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::FixedSource;
    use crate::types::PeaceCategory;

    fn pending_project() -> Project {
        Project {
            id: "proj_test".into(),
            creator_id: "actor_1".into(),
            title: "Cross-border dialogue series".into(),
            description: "Monthly facilitated dialogue between border towns.".into(),
            category: PeaceCategory::CommunityBuilding,
            evidence_cid: "Qmabc...pax".into(),
            status: ProjectStatus::Pending,
            validations: 0,
            expert_score: 0,
            rewarded_amount: 0.0,
            created_at_ms: 0,
        }
    }

    #[test]
    fn stays_pending_below_threshold() {
        let mut project = pending_project();
        let mut rng = FixedSource::new(vec![0.5]);
        for expected in 1..VALIDATION_THRESHOLD {
            let outcome = apply_validation(&mut project, &mut rng);
            assert_eq!(outcome, ValidationOutcome::Endorsed { validations: expected });
            assert_eq!(project.status, ProjectStatus::Pending);
            assert_eq!(project.rewarded_amount, 0.0);
            assert_eq!(project.expert_score, 0);
        }
    }

    #[test]
    fn fifth_endorsement_approves_with_exact_draws() {
        let mut project = pending_project();
        // First draw -> score, second -> reward.
        let mut rng = FixedSource::new(vec![0.0, 0.5]);
        for _ in 0..VALIDATION_THRESHOLD - 1 {
            apply_validation(&mut project, &mut rng);
        }
        let outcome = apply_validation(&mut project, &mut rng);
        // score = 85 + floor(0.0 * 15) = 85; reward = floor(2500 + 0.5*5000) = 5000
        assert_eq!(outcome, ValidationOutcome::Approved { expert_score: 85, reward: 5000.0 });
        assert_eq!(project.status, ProjectStatus::Approved);
        assert_eq!(project.expert_score, 85);
        assert_eq!(project.rewarded_amount, 5000.0);
        assert_eq!(project.validations, VALIDATION_THRESHOLD);
    }

    #[test]
    fn score_and_reward_stay_in_band() {
        for seed_frac in [0.0, 0.2, 0.5, 0.9, 0.999_999] {
            let mut project = pending_project();
            let mut rng = FixedSource::new(vec![seed_frac]);
            for _ in 0..VALIDATION_THRESHOLD {
                apply_validation(&mut project, &mut rng);
            }
            assert!((85..100).contains(&project.expert_score));
            assert!(project.rewarded_amount >= REWARD_MIN);
            assert!(project.rewarded_amount < REWARD_MAX);
            // floored to a whole token amount
            assert_eq!(project.rewarded_amount.fract(), 0.0);
        }
    }

    #[test]
    fn approved_project_is_a_no_op() {
        let mut project = pending_project();
        let mut rng = FixedSource::new(vec![0.3]);
        for _ in 0..VALIDATION_THRESHOLD {
            apply_validation(&mut project, &mut rng);
        }
        let snapshot = project.clone();
        let outcome = apply_validation(&mut project, &mut rng);
        assert_eq!(outcome, ValidationOutcome::AlreadyFinal);
        assert_eq!(project.validations, snapshot.validations);
        assert_eq!(project.expert_score, snapshot.expert_score);
        assert_eq!(project.rewarded_amount, snapshot.rewarded_amount);
    }

    #[test]
    fn rejected_project_is_a_no_op() {
        let mut project = pending_project();
        project.status = ProjectStatus::Rejected;
        let mut rng = FixedSource::new(vec![0.3]);
        let outcome = apply_validation(&mut project, &mut rng);
        assert_eq!(outcome, ValidationOutcome::AlreadyFinal);
        assert_eq!(project.validations, 0);
    }

    #[test]
    fn reward_implies_approved() {
        let mut project = pending_project();
        let mut rng = FixedSource::new(vec![0.7]);
        for _ in 0..VALIDATION_THRESHOLD {
            apply_validation(&mut project, &mut rng);
            if project.rewarded_amount > 0.0 {
                assert_eq!(project.status, ProjectStatus::Approved);
            }
        }
    }
}
