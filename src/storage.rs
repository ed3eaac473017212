// Copyright 2026 Pax Foundation. All rights reserved.
// Pax Protocol Simulation Suite ("The Dovecote") - Evidence Storage Seam

//! Content-addressed evidence pinning behind a trait.
//!
//! Production pins to a sharded IPFS cluster; the engine only sees
//! [`EvidenceStore`]. The shipped mock keeps the original three "sanctuary"
//! shards and derives a synthetic CID from the content bytes.

use serde::{Deserialize, Serialize};

// ─── Shards ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShardStatus {
    Online,
    Offline,
}

#[derive(Debug, Clone, Serialize)]
pub struct StorageShard {
    pub id: &'static str,
    pub name: &'static str,
    pub region: &'static str,
    pub status: ShardStatus,
    pub latency_ms: u32,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

pub trait EvidenceStore {
    /// Pin `content` and return its content identifier.
    fn pin(&self, content: &str) -> String;

    /// Public gateway URL for a pinned CID.
    fn gateway_url(&self, cid: &str) -> String;

    fn shards(&self) -> Vec<StorageShard>;

    /// At least 2 of 3 shards must confirm for a pin to be durable.
    fn is_resilient(&self) -> bool;

    /// Flip every shard on or off (drift injection / reconciliation).
    fn set_all_online(&mut self, online: bool);
}

// ─── ShardedStore ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ShardedStore {
    shards: Vec<StorageShard>,
}

impl Default for ShardedStore {
    fn default() -> Self {
        Self {
            shards: vec![
                StorageShard {
                    id: "node_alpha",
                    name: "Sanctuary Alpha",
                    region: "US-EAST",
                    status: ShardStatus::Online,
                    latency_ms: 45,
                },
                StorageShard {
                    id: "node_beta",
                    name: "Sanctuary Beta",
                    region: "EU-CENTRAL",
                    status: ShardStatus::Online,
                    latency_ms: 112,
                },
                StorageShard {
                    id: "node_gamma",
                    name: "Sanctuary Gamma",
                    region: "SG-WEST",
                    status: ShardStatus::Online,
                    latency_ms: 230,
                },
            ],
        }
    }
}

impl EvidenceStore for ShardedStore {
    fn pin(&self, content: &str) -> String {
        // Synthetic CID: byte sum in hex, same derivation the mock cluster
        // has always used. Not collision-resistant, not meant to be.
        let sum: u64 = content.bytes().map(u64::from).sum();
        format!("Qm{:x}...pax", sum)
    }

    /// Routes through the first online shard, falling back to the primary
    /// when the whole cluster is dark.
    fn gateway_url(&self, cid: &str) -> String {
        let shard = self
            .shards
            .iter()
            .find(|s| s.status == ShardStatus::Online)
            .unwrap_or(&self.shards[0]);
        format!("https://{}.pax-sanctuary.io/ipfs/{}", shard.id, cid)
    }

    fn shards(&self) -> Vec<StorageShard> {
        self.shards.clone()
    }

    fn is_resilient(&self) -> bool {
        let online = self
            .shards
            .iter()
            .filter(|s| s.status == ShardStatus::Online)
            .count();
        online * 3 >= self.shards.len() * 2
    }

    fn set_all_online(&mut self, online: bool) {
        let status = if online { ShardStatus::Online } else { ShardStatus::Offline };
        for shard in &mut self.shards {
            shard.status = status;
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
