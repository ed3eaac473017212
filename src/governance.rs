// Copyright 2026 Pax Foundation. All rights reserved.
// Pax Protocol Simulation Suite ("The Dovecote") - Governance Voting

//! Ballot creation and vote accumulation.
//!
//! Votes are weight-supplied by the caller and never retracted; there is no
//! per-voter ledger, so double-voting is unguarded (known gap -- the audit
//! engine's capture check is the compensating control). Proposals expire by
//! timestamp but are never finalized or purged automatically.

use crate::types::{Proposal, ProposalStatus};

// ─── Constants ───────────────────────────────────────────────────────────────

/// Proposals accept votes for 7 days from creation.
pub const PROPOSAL_LIFETIME_MS: u64 = 7 * 24 * 60 * 60 * 1000;

/// A proposal with more `votes_for` than this is treated as a governance
/// capture attempt by the audit engine.
pub const CAPTURE_VOTE_THRESHOLD: f64 = 10_000_000.0;

// ─── Operations ──────────────────────────────────────────────────────────────

/// Build a fresh active ballot expiring `PROPOSAL_LIFETIME_MS` after `now_ms`.
pub fn new_proposal(
    id: String,
    title: String,
    description: String,
    proposer: String,
    now_ms: u64,
) -> Proposal {
    Proposal {
        id,
        title,
        description,
        proposer,
        votes_for: 0.0,
        votes_against: 0.0,
        status: ProposalStatus::Active,
        expires_at_ms: now_ms + PROPOSAL_LIFETIME_MS,
    }
}

/// Add `weight` to the matching accumulator. Accumulators only grow: a
/// non-finite or negative weight is ignored, since applying it would amount
/// to vote retraction.
pub fn record_vote(proposal: &mut Proposal, support: bool, weight: f64) {
    if !weight.is_finite() || weight < 0.0 {
        return;
    }
    if support {
        proposal.votes_for += weight;
    } else {
        proposal.votes_against += weight;
    }
}

/// Whether the voting window has closed. Display-only: expiry does not move
/// the proposal out of `Active`.
pub fn is_expired(proposal: &Proposal, now_ms: u64) -> bool {
    now_ms >= proposal.expires_at_ms
}

/// Abnormal voting volume, the audit engine's capture signal.
pub fn is_capture_attempt(proposal: &Proposal) -> bool {
    proposal.votes_for > CAPTURE_VOTE_THRESHOLD
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn ballot(now_ms: u64) -> Proposal {
        new_proposal(
            "prop_t1".into(),
            "Raise environmental multiplier".into(),
            "Increase ecological restoration multiplier from 1.2 to 1.5.".into(),
            "0x111...aaa".into(),
            now_ms,
        )
    }

    #[test]
    fn new_proposal_is_active_with_week_expiry() {
        let p = ballot(1_000);
        assert_eq!(p.status, ProposalStatus::Active);
        assert_eq!(p.votes_for, 0.0);
        assert_eq!(p.votes_against, 0.0);
        assert_eq!(p.expires_at_ms, 1_000 + PROPOSAL_LIFETIME_MS);
    }

    #[test]
    fn votes_accumulate_by_side() {
        let mut p = ballot(0);
        record_vote(&mut p, true, 1_500.0);
        record_vote(&mut p, false, 400.0);
        record_vote(&mut p, true, 250.0);
        assert_eq!(p.votes_for, 1_750.0);
        assert_eq!(p.votes_against, 400.0);
    }

    #[test]
    fn votes_never_decrease() {
        let mut p = ballot(0);
        let mut last_for = 0.0;
        let mut last_against = 0.0;
        let weights = [
            10.0,
            -100_000.0,
            250.0,
            f64::NAN,
            f64::NEG_INFINITY,
            1_500.0,
            -0.5,
        ];
        for (i, weight) in weights.iter().cycle().take(28).enumerate() {
            record_vote(&mut p, i % 2 == 0, *weight);
            assert!(p.votes_for >= last_for, "votes_for shrank on weight {weight}");
            assert!(p.votes_against >= last_against);
            last_for = p.votes_for;
            last_against = p.votes_against;
        }
        assert!(p.votes_for > 0.0);
        assert!(p.votes_against > 0.0);
    }

    #[test]
    fn expiry_is_display_only() {
        let p = ballot(0);
        assert!(!is_expired(&p, PROPOSAL_LIFETIME_MS - 1));
        assert!(is_expired(&p, PROPOSAL_LIFETIME_MS));
        // Status does not transition on expiry.
        assert_eq!(p.status, ProposalStatus::Active);
    }

    #[test]
    fn capture_detection_threshold() {
        let mut p = ballot(0);
        record_vote(&mut p, true, CAPTURE_VOTE_THRESHOLD);
        assert!(!is_capture_attempt(&p));
        record_vote(&mut p, true, 1.0);
        assert!(is_capture_attempt(&p));
    }
}
