// Copyright 2026 Pax Foundation. All rights reserved.
// Pax Protocol Simulation Suite ("The Dovecote") - Audit Engine

//! Pull-based invariant diagnostics.
//!
//! Each run freshly re-derives the protocol's health from the authoritative
//! entity data and the infrastructure flags: no state is kept between runs,
//! so two audits with no intervening mutation produce identical verdicts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::governance;
use crate::types::{
    AuditLog, AuditReport, LogLevel, Project, Proposal, ReadinessItem, ReadinessStatus,
    SystemMetrics,
};

// ─── Constants ───────────────────────────────────────────────────────────────

pub const TOTAL_INVARIANTS: u32 = 4;

/// Score multiplier applied while the protocol is paused.
pub const PAUSED_SCORE_PENALTY: f64 = 0.8;

/// Ledger sums are f64; integer token amounts stay exact well past this.
const LEDGER_TOLERANCE: f64 = 1e-6;

// ─── InfraFlags ──────────────────────────────────────────────────────────────

/// Infrastructure posture inspected by the audit. Drift injection clears
/// these; reconciliation restores them. Storage health is not a flag: the
/// audit reads it live from the evidence store's shard quorum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InfraFlags {
    /// Timelocks/multisig hardening in place.
    pub hardened: bool,
    /// Price/compliance oracle reachable.
    pub oracle_connected: bool,
}

impl Default for InfraFlags {
    fn default() -> Self {
        Self { hardened: true, oracle_connected: false }
    }
}

// ─── Audit run ───────────────────────────────────────────────────────────────

struct LogSink {
    logs: Vec<AuditLog>,
    healthy: bool,
    now_ms: u64,
}

impl LogSink {
    fn push(&mut self, level: LogLevel, component: &'static str, message: String) {
        self.logs.push(AuditLog {
            id: self.logs.len() as u32,
            timestamp_ms: self.now_ms,
            level,
            component,
            message,
        });
        if level == LogLevel::Critical {
            self.healthy = false;
        }
    }
}

/// Run the full diagnostic against current state.
pub fn run_audit(
    projects: &HashMap<String, Project>,
    proposals: &HashMap<String, Proposal>,
    metrics: &SystemMetrics,
    flags: &InfraFlags,
    storage_resilient: bool,
    now_ms: u64,
) -> AuditReport {
    let mut sink = LogSink { logs: Vec::new(), healthy: true, now_ms };
    let mut matched = 0u32;

    // Invariant 1: settlement ledger. Sum of project payouts must equal the
    // cached emission counter.
    let total_rewards: f64 = projects.values().map(|p| p.rewarded_amount).sum();
    if (total_rewards - metrics.total_tokens_distributed).abs() > LEDGER_TOLERANCE {
        sink.push(
            LogLevel::Critical,
            "Settlement",
            format!(
                "Ledger mismatch: project payouts ({total_rewards}) != emission counter ({})",
                metrics.total_tokens_distributed
            ),
        );
    } else {
        matched += 1;
        sink.push(
            LogLevel::Success,
            "Settlement",
            "Settlement invariant verified: payouts equal total emission.".to_string(),
        );
    }

    // Invariant 2: governance capture. No ballot above the capture threshold.
    let captured = proposals
        .values()
        .filter(|p| governance::is_capture_attempt(p))
        .count();
    if captured > 0 {
        sink.push(
            LogLevel::Critical,
            "Governance",
            format!("Governance capture: abnormal voting volume in {captured} proposal(s)."),
        );
    } else {
        matched += 1;
        sink.push(
            LogLevel::Success,
            "Governance",
            "Governance invariant verified: no voting volume above safety threshold."
                .to_string(),
        );
    }

    // Invariant 3: registry sync. Authoritative project count vs cache.
    if projects.len() as u32 != metrics.active_projects {
        sink.push(
            LogLevel::Critical,
            "Registry",
            format!(
                "Registry desync: storage size ({}) != cached count ({}).",
                projects.len(),
                metrics.active_projects
            ),
        );
    } else {
        matched += 1;
        sink.push(
            LogLevel::Success,
            "Registry",
            "Registry invariant verified: counters synchronized.".to_string(),
        );
    }

    // Invariant 4: oracle connectivity. Degraded, not fatal.
    if flags.oracle_connected {
        matched += 1;
        sink.push(
            LogLevel::Success,
            "Network",
            "Network invariant verified: oracle consensus healthy.".to_string(),
        );
    } else {
        sink.push(
            LogLevel::Warning,
            "Network",
            "Oracle disconnected: data sync is currently local-only.".to_string(),
        );
    }

    let readiness = readiness_checklist(flags, storage_resilient);

    let mut score = (matched as f64 / TOTAL_INVARIANTS as f64) * 100.0;
    if metrics.paused {
        score *= PAUSED_SCORE_PENALTY;
    }

    AuditReport {
        healthy: sink.healthy,
        score,
        logs: sink.logs,
        invariants_matched: matched,
        total_invariants: TOTAL_INVARIANTS,
        readiness,
    }
}

/// Fixed four-item production-readiness checklist, scored from the flags
/// and the live shard quorum.
fn readiness_checklist(flags: &InfraFlags, storage_resilient: bool) -> Vec<ReadinessItem> {
    vec![
        ReadinessItem {
            id: "R1",
            category: "Logic Architecture",
            status: ReadinessStatus::Pass,
            reason: "Stateless services and deterministic reward tables verified.",
        },
        ReadinessItem {
            id: "R2",
            category: "Settlement Infrastructure",
            status: if flags.hardened {
                ReadinessStatus::Pass
            } else {
                ReadinessStatus::Conditional
            },
            reason: "Timelocks and multisig on the settlement path.",
        },
        ReadinessItem {
            id: "R3",
            category: "Storage Resilience",
            status: if storage_resilient {
                ReadinessStatus::Pass
            } else {
                ReadinessStatus::NotPass
            },
            reason: "Evidence replicated across sanctuary shards.",
        },
        ReadinessItem {
            id: "R4",
            category: "Compliance Middleware",
            status: if flags.oracle_connected {
                ReadinessStatus::Pass
            } else {
                ReadinessStatus::Conditional
            },
            reason: "Oracle-verified biometric anchors.",
        },
    ]
}

// ─── Tests ───────────────────────────────────────────────────────────────────
