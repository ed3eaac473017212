// Copyright 2026 Pax Foundation. All rights reserved.
// Pax Protocol Simulation Suite ("The Dovecote")

pub mod types;
pub mod error;
pub mod rng;
pub mod market;
pub mod validation;
pub mod rewards;
pub mod governance;
pub mod oracle;
pub mod storage;
pub mod audit;
pub mod simulator;

pub use error::EngineError;
pub use simulator::{ProtocolSimulator, SimulatorConfig};
pub use types::*;

use wasm_bindgen::prelude::*;

fn to_js<T: serde::Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

fn err_js(e: EngineError) -> JsValue {
    JsValue::from_str(&format!("{}: {}", e.code(), e))
}

fn parse_category(raw: &str) -> PeaceCategory {
    PeaceCategory::ALL
        .iter()
        .copied()
        .find(|c| c.as_str() == raw)
        .unwrap_or(PeaceCategory::CommunityBuilding)
}

// ─── WASM Interface ──────────────────────────────────────────────────────────

/// Browser facade over [`ProtocolSimulator`]. One instance per dashboard
/// session; the JS side never sees engine internals, only JSON snapshots.
#[wasm_bindgen]
pub struct PaxEngine {
    sim: ProtocolSimulator,
}

#[wasm_bindgen]
impl PaxEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32, now_ms: f64) -> Self {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        Self {
            sim: ProtocolSimulator::new(SimulatorConfig::with_seed(seed as u64, now_ms as u64)),
        }
    }

    // ── Clock ──

    pub fn set_now(&mut self, now_ms: f64) {
        self.sim.set_now(now_ms as u64);
    }

    pub fn advance_time(&mut self, delta_ms: f64) {
        self.sim.advance_time(delta_ms as u64);
    }

    // ── Snapshots ──

    pub fn get_metrics(&self) -> JsValue {
        to_js(&self.sim.metrics())
    }

    pub fn get_projects(&self) -> JsValue {
        to_js(&self.sim.projects())
    }

    pub fn get_proposals(&self) -> JsValue {
        to_js(&self.sim.proposals())
    }

    pub fn get_actor(&self, actor_id: &str) -> JsValue {
        match self.sim.actor(actor_id) {
            Ok(actor) => to_js(&actor),
            Err(_) => JsValue::NULL,
        }
    }

    pub fn get_slashes(&self) -> JsValue {
        to_js(&self.sim.slashes())
    }

    pub fn get_storage_shards(&self) -> JsValue {
        to_js(&self.sim.storage_shards())
    }

    /// Category catalogue for the submission form.
    pub fn get_categories(&self) -> JsValue {
        let catalogue: Vec<_> = PeaceCategory::ALL
            .iter()
            .map(|c| serde_json::json!({ "name": c.as_str(), "description": c.description() }))
            .collect();
        to_js(&catalogue)
    }

    // ── Submission & validation ──

    pub fn submit_project(
        &mut self,
        creator_id: &str,
        title: &str,
        description: &str,
        category: &str,
        evidence_cid: &str,
    ) -> Result<JsValue, JsValue> {
        self.sim
            .submit_project(creator_id, title, description, parse_category(category), evidence_cid)
            .map(|p| to_js(&p))
            .map_err(err_js)
    }

    pub fn validate_project(&mut self, project_id: &str) -> Result<JsValue, JsValue> {
        self.sim
            .validate_project(project_id)
            .map(|p| to_js(&p))
            .map_err(err_js)
    }

    pub fn claim_rewards(&mut self, actor_id: &str) -> Result<f64, JsValue> {
        self.sim.claim_rewards(actor_id).map_err(err_js)
    }

    pub fn assess_submission(&self, title: &str, description: &str) -> JsValue {
        to_js(&self.sim.assess_submission(title, description))
    }

    pub fn projected_reward(
        &self,
        actor_id: &str,
        category: &str,
        expert_score: u32,
    ) -> Result<f64, JsValue> {
        self.sim
            .projected_reward(actor_id, parse_category(category), expert_score)
            .map_err(err_js)
    }

    pub fn pin_evidence(&self, content: &str) -> String {
        self.sim.pin_evidence(content)
    }

    pub fn evidence_url(&self, cid: &str) -> String {
        self.sim.evidence_url(cid)
    }

    // ── Governance ──

    pub fn create_proposal(
        &mut self,
        title: &str,
        description: &str,
        proposer: &str,
    ) -> Result<JsValue, JsValue> {
        self.sim
            .create_proposal(title, description, proposer)
            .map(|p| to_js(&p))
            .map_err(err_js)
    }

    pub fn vote_proposal(
        &mut self,
        proposal_id: &str,
        support: bool,
        weight: f64,
    ) -> Result<JsValue, JsValue> {
        self.sim
            .vote_proposal(proposal_id, support, weight)
            .map(|p| to_js(&p))
            .map_err(err_js)
    }

    pub fn is_proposal_expired(&self, proposal_id: &str) -> Result<bool, JsValue> {
        self.sim.proposal_expired(proposal_id).map_err(err_js)
    }

    // ── Swap market ──

    pub fn quote_swap(&self, pax_in: f64) -> JsValue {
        to_js(&self.sim.quote_swap(pax_in))
    }

    pub fn swap_pax_for_usdc(
        &mut self,
        actor_id: &str,
        pax_in: f64,
    ) -> Result<JsValue, JsValue> {
        self.sim
            .swap_pax_for_usdc(actor_id, pax_in)
            .map(|r| to_js(&r))
            .map_err(err_js)
    }

    // ── SRE console ──

    pub fn run_full_audit(&self) -> JsValue {
        to_js(&self.sim.run_full_audit())
    }

    pub fn simulate_drift(&mut self, caller_id: &str) -> Result<(), JsValue> {
        self.sim.simulate_drift(caller_id).map_err(err_js)
    }

    pub fn reconcile_state(&mut self, caller_id: &str) -> Result<(), JsValue> {
        self.sim.reconcile_state(caller_id).map_err(err_js)
    }

    pub fn toggle_pause(&mut self, caller_id: &str) -> Result<bool, JsValue> {
        self.sim.toggle_pause(caller_id).map_err(err_js)
    }

    pub fn connect_oracle(&mut self, caller_id: &str) -> Result<bool, JsValue> {
        self.sim.connect_oracle(caller_id).map_err(err_js)
    }

    /// Reset to the seeded demo world.
    pub fn reset(&mut self) {
        self.sim.reset();
    }
}
