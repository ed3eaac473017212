// Copyright 2026 Pax Foundation. All rights reserved.
// Pax Protocol Simulation Suite ("The Dovecote") - Validation Oracle Seam

//! Interface to the text-classification oracle that screens submissions.
//!
//! The real deployment fronts an AI model; the engine only ever sees this
//! trait. The shipped implementation is a deterministic heuristic so the
//! simulation (and its tests) behave identically run to run.

use serde::{Deserialize, Serialize};

// ─── Assessment ──────────────────────────────────────────────────────────────

/// Oracle verdict on a title/description pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub is_authentic: bool,
    /// Quality/veracity score, 0-100.
    pub score: u32,
    pub risk_flags: Vec<String>,
    pub justification: String,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

pub trait ValidationOracle {
    fn assess(&self, title: &str, description: &str) -> Assessment;
}

// ─── HeuristicOracle ─────────────────────────────────────────────────────────

/// Deterministic stand-in for the AI oracle. Scores on description substance
/// and flags the obvious fraud patterns.
#[derive(Debug, Clone, Default)]
pub struct HeuristicOracle;

impl ValidationOracle for HeuristicOracle {
    fn assess(&self, title: &str, description: &str) -> Assessment {
        let mut risk_flags = Vec::new();

        if title.len() >= 4
            && title.chars().filter(|c| c.is_alphabetic()).count() > 0
            && title
                .chars()
                .filter(|c| c.is_alphabetic())
                .all(|c| c.is_uppercase())
        {
            risk_flags.push("SHOUTING_TITLE".to_string());
        }
        if description.split_whitespace().count() < 8 {
            risk_flags.push("THIN_EVIDENCE".to_string());
        }
        let lowered = description.to_lowercase();
        for phrase in ["guaranteed returns", "airdrop", "double your"] {
            if lowered.contains(phrase) {
                risk_flags.push("FINANCIAL_LURE".to_string());
                break;
            }
        }

        // Substance score: word count up to 60 words, penalised per flag.
        let substance = description.split_whitespace().count().min(60) as u32;
        let base = 40 + substance;
        let score = base.saturating_sub(risk_flags.len() as u32 * 25).min(100);
        let is_authentic = score >= 50 && risk_flags.len() < 2;

        let justification = if risk_flags.is_empty() {
            "No fraud markers; narrative is specific and verifiable.".to_string()
        } else {
            format!("Flagged: {}.", risk_flags.join(", "))
        };

        Assessment { is_authentic, score, risk_flags, justification }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substantive_submission_passes() {
        let oracle = HeuristicOracle;
        let verdict = oracle.assess(
            "Well rehabilitation in border district",
            "Rebuilt three communal wells serving 400 households, with signed \
             attestations from both village councils and geotagged photos.",
        );
        assert!(verdict.is_authentic);
        assert!(verdict.score >= 50);
        assert!(verdict.risk_flags.is_empty());
    }

    #[test]
    fn thin_description_is_flagged() {
        let oracle = HeuristicOracle;
        let verdict = oracle.assess("Peace mural", "Painted a wall.");
        assert!(verdict.risk_flags.contains(&"THIN_EVIDENCE".to_string()));
        assert!(verdict.score < 50);
    }

    #[test]
    fn financial_lure_and_shouting_fail_authenticity() {
        let oracle = HeuristicOracle;
        let verdict = oracle.assess(
            "SEND TOKENS NOW",
            "Guaranteed returns for everyone who joins our peace airdrop today, \
             double your holdings instantly with zero verification required.",
        );
        assert!(!verdict.is_authentic);
        assert!(verdict.risk_flags.len() >= 2);
    }

    #[test]
    fn assessment_is_deterministic() {
        let oracle = HeuristicOracle;
        let a = oracle.assess("Title case", "A dialogue program across five districts over two years.");
        let b = oracle.assess("Title case", "A dialogue program across five districts over two years.");
        assert_eq!(a.score, b.score);
        assert_eq!(a.is_authentic, b.is_authentic);
        assert_eq!(a.risk_flags, b.risk_flags);
    }
}
