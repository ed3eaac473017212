// Copyright 2026 Pax Foundation. All rights reserved.
// Pax Protocol Simulation Suite ("The Dovecote") - Type Definitions

use serde::{Deserialize, Serialize};

// ─── Verification Tier (SBT) ─────────────────────────────────────────────────

/// Soulbound identity tier, ordered by privilege.
///
/// Anonymous < Verified < Audited < Diplomatic. Privileged engine operations
/// (drift injection, reconciliation, pause) require `Audited` or above.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationTier {
    Anonymous = 0,
    Verified = 1,
    Audited = 2,
    Diplomatic = 3,
}

impl Default for VerificationTier {
    fn default() -> Self {
        VerificationTier::Anonymous
    }
}

impl VerificationTier {
    pub fn description(&self) -> &'static str {
        match self {
            Self::Anonymous => "Unverified wallet",
            Self::Verified => "Biometric anchor confirmed",
            Self::Audited => "Third-party audited entity",
            Self::Diplomatic => "Accredited diplomatic mission",
        }
    }

    /// Whether this tier may invoke privileged SRE operations.
    pub fn can_administer(&self) -> bool {
        *self >= Self::Audited
    }
}

// ─── Peace Category ──────────────────────────────────────────────────────────

/// Closed set of recognised peace-work categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeaceCategory {
    ConflictResolution,
    Education,
    Environmental,
    CommunityBuilding,
    HumanRights,
}

impl PeaceCategory {
    pub const ALL: [PeaceCategory; 5] = [
        Self::ConflictResolution,
        Self::Education,
        Self::Environmental,
        Self::CommunityBuilding,
        Self::HumanRights,
    ];

    /// Wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConflictResolution => "CONFLICT_RESOLUTION",
            Self::Education => "EDUCATION",
            Self::Environmental => "ENVIRONMENTAL",
            Self::CommunityBuilding => "COMMUNITY_BUILDING",
            Self::HumanRights => "HUMAN_RIGHTS",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ConflictResolution => "Mediation and de-escalation",
            Self::Education => "Peace education and literacy",
            Self::Environmental => "Ecological restoration",
            Self::CommunityBuilding => "Local cohesion programs",
            Self::HumanRights => "Rights monitoring and advocacy",
        }
    }
}

// ─── Project Status ──────────────────────────────────────────────────────────

/// Project lifecycle: `Pending -> Approved` via the validation threshold,
/// `Rejected` only by administrative action. Both end states are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Pending = 0,
    Approved = 1,
    Rejected = 2,
}

impl ProjectStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

// ─── Proposal Status ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProposalStatus {
    Active = 0,
    Executed = 1,
    Defeated = 2,
    Queued = 3,
}

// ─── Actor ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub address: String,
    pub reputation: u32,
    pub tier: VerificationTier,
    /// Rewards minted by approvals but not yet claimed to the wallet.
    pub pending_rewards: f64,
    /// Spendable PAX balance.
    pub pax_balance: f64,
    /// Stable-asset balance credited by swaps.
    pub usdc_balance: f64,
    pub joined_at_ms: u64,
}

// ─── Project ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub creator_id: String,
    pub title: String,
    pub description: String,
    pub category: PeaceCategory,
    /// Content identifier of the pinned evidence bundle.
    pub evidence_cid: String,
    pub status: ProjectStatus,
    pub validations: u32,
    /// Assigned only on approval, 0 before.
    pub expert_score: u32,
    /// Minted only on approval, 0 before. `rewarded_amount > 0` implies
    /// `status == Approved`.
    pub rewarded_amount: f64,
    pub created_at_ms: u64,
}

// ─── Proposal ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    pub id: String,
    pub title: String,
    pub description: String,
    pub proposer: String,
    /// Monotonically non-decreasing accumulators; votes are never retracted.
    pub votes_for: f64,
    pub votes_against: f64,
    pub status: ProposalStatus,
    pub expires_at_ms: u64,
}

// ─── SystemMetrics ───────────────────────────────────────────────────────────

/// Cached dashboard snapshot. The audit engine's job is to detect when this
/// cache has drifted from the authoritative per-entity data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemMetrics {
    pub total_value_locked: f64,
    pub total_tokens_distributed: f64,
    pub active_projects: u32,
    pub verified_actors: u32,
    pub treasury_balance: f64,
    pub paused: bool,
    #[serde(default)]
    pub pax_price: f64,
    #[serde(default)]
    pub liquidity_depth: f64,
}

// ─── Audit report types ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadinessStatus {
    Pass,
    Conditional,
    NotPass,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadinessItem {
    pub id: &'static str,
    pub category: &'static str,
    pub status: ReadinessStatus,
    pub reason: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditLog {
    /// Sequential within a report so repeated audits are comparable.
    pub id: u32,
    pub timestamp_ms: u64,
    pub level: LogLevel,
    pub component: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub healthy: bool,
    pub score: f64,
    pub logs: Vec<AuditLog>,
    pub invariants_matched: u32,
    pub total_invariants: u32,
    pub readiness: Vec<ReadinessItem>,
}

// ─── SlashEvent ──────────────────────────────────────────────────────────────

/// Recorded when reconciliation evicts a captured proposal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlashEvent {
    pub actor: String,
    pub amount: f64,
    pub reason: String,
    pub timestamp_ms: u64,
}

// ─── SwapReceipt ─────────────────────────────────────────────────────────────

/// Outcome of a PAX -> USDC swap against the protocol pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapReceipt {
    pub pax_in: f64,
    pub fee_paid: f64,
    pub usdc_out: f64,
    /// Spot price after the reserves moved.
    pub pax_price: f64,
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_privilege_ordering() {
        assert!(VerificationTier::Anonymous < VerificationTier::Verified);
        assert!(VerificationTier::Verified < VerificationTier::Audited);
        assert!(VerificationTier::Audited < VerificationTier::Diplomatic);
        assert!(!VerificationTier::Verified.can_administer());
        assert!(VerificationTier::Audited.can_administer());
        assert!(VerificationTier::Diplomatic.can_administer());
    }

    #[test]
    fn project_status_terminality() {
        assert!(!ProjectStatus::Pending.is_terminal());
        assert!(ProjectStatus::Approved.is_terminal());
        assert!(ProjectStatus::Rejected.is_terminal());
    }

    #[test]
    fn enum_wire_shape_matches_dashboard() {
        let json = serde_json::to_string(&PeaceCategory::ConflictResolution).unwrap();
        assert_eq!(json, "\"CONFLICT_RESOLUTION\"");
        let json = serde_json::to_string(&VerificationTier::Diplomatic).unwrap();
        assert_eq!(json, "\"DIPLOMATIC\"");
        let json = serde_json::to_string(&ReadinessStatus::NotPass).unwrap();
        assert_eq!(json, "\"NOT_PASS\"");
    }

    #[test]
    fn serde_roundtrip_project() {
        let project = Project {
            id: "proj_001".into(),
            creator_id: "actor_0x123".into(),
            title: "Water access mediation".into(),
            description: "Brokered shared-well agreement between two villages.".into(),
            category: PeaceCategory::ConflictResolution,
            evidence_cid: "Qm1234...pax".into(),
            status: ProjectStatus::Pending,
            validations: 3,
            expert_score: 0,
            rewarded_amount: 0.0,
            created_at_ms: 1_700_000_000_000,
        };
        let json = serde_json::to_string(&project).unwrap();
        let back: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(back.status, ProjectStatus::Pending);
        assert_eq!(back.validations, 3);
        assert_eq!(back.category, PeaceCategory::ConflictResolution);
    }
}
