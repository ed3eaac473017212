// Copyright 2026 Pax Foundation. All rights reserved.
// Scenario definitions: scripted workloads with per-run assertions.

use pax_engine::rng::{ChaChaSource, RandomSource};
use pax_engine::simulator::{ProtocolSimulator, SimulatorConfig};
use pax_engine::{EngineError, PeaceCategory, ProjectStatus};

/// Logical epoch all runs start from.
const BASE_NOW_MS: u64 = 1_700_000_000_000;

const VERIFIED_ACTOR: &str = "actor_0x123";
const OPS_ACTOR: &str = "actor_ops";

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub run: fn(u64) -> Outcome,
}

/// What a single seeded run reports back to the harness.
pub struct Outcome {
    pub violations: Vec<String>,
    pub audit_score: f64,
    pub invariants_matched: u32,
    pub projects_approved: u32,
    pub tokens_distributed: f64,
    pub swaps_executed: u32,
    pub final_pax_price: f64,
    pub critical_sections: u64,
}

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "SWAP_DEPTH_SWEEP",
            label: "Swap depth sweep",
            category: "Market",
            run: swap_depth_sweep,
        },
        Scenario {
            name: "VALIDATION_PIPELINE",
            label: "Validation threshold pipeline",
            category: "Settlement",
            run: validation_pipeline,
        },
        Scenario {
            name: "PAUSE_GATE",
            label: "Pause gate under load",
            category: "Safety",
            run: pause_gate,
        },
        Scenario {
            name: "DRIFT_RECONCILE",
            label: "Drift injection and reconciliation",
            category: "Audit",
            run: drift_reconcile,
        },
        Scenario {
            name: "GOVERNANCE_LOAD",
            label: "Governance voting load",
            category: "Governance",
            run: governance_load,
        },
    ]
}

fn fresh_sim(seed: u64) -> ProtocolSimulator {
    ProtocolSimulator::new(SimulatorConfig::with_seed(seed, BASE_NOW_MS))
}

fn outcome_from(sim: &ProtocolSimulator, violations: Vec<String>, swaps: u32) -> Outcome {
    let report = sim.run_full_audit();
    let metrics = sim.metrics();
    let approved = sim
        .projects()
        .iter()
        .filter(|p| p.status == ProjectStatus::Approved)
        .count() as u32;
    Outcome {
        violations,
        audit_score: report.score,
        invariants_matched: report.invariants_matched,
        projects_approved: approved,
        tokens_distributed: metrics.total_tokens_distributed,
        swaps_executed: swaps,
        final_pax_price: metrics.pax_price,
        critical_sections: sim.nonce(),
    }
}

// ─── Market ─────────────────────────────────────────────────────────────────

/// Random sell pressure against the pool. Checks the fee take, quote
/// consistency and strictly falling spot price.
fn swap_depth_sweep(seed: u64) -> Outcome {
    let mut sim = fresh_sim(seed);
    let mut workload = ChaChaSource::seed_from(seed ^ 0x5157_4150);
    let mut violations = Vec::new();
    let mut swaps = 0u32;
    let mut last_price = sim.metrics().pax_price;

    for i in 0..200 {
        let pax_in = workload.in_range(1.0, 200.0);
        let quote = sim.quote_swap(pax_in);
        match sim.swap_pax_for_usdc(VERIFIED_ACTOR, pax_in) {
            Ok(receipt) => {
                swaps += 1;
                if (receipt.usdc_out - quote.usdc_out).abs() > 1e-9 {
                    violations.push(format!("swap {i}: receipt diverges from quote"));
                }
                if (receipt.fee_paid - pax_in * 0.003).abs() > 1e-9 {
                    violations.push(format!("swap {i}: fee take incorrect"));
                }
                if receipt.pax_price >= last_price {
                    violations.push(format!("swap {i}: spot price did not fall"));
                }
                last_price = receipt.pax_price;
            }
            Err(e) => violations.push(format!("swap {i}: unexpected error {e}")),
        }
    }

    let report = sim.run_full_audit();
    if !report.healthy {
        violations.push("audit unhealthy after sweep".to_string());
    }
    outcome_from(&sim, violations, swaps)
}

// ─── Settlement ─────────────────────────────────────────────────────────────

/// Ten projects through the endorsement threshold, then reward claims.
fn validation_pipeline(seed: u64) -> Outcome {
    let mut sim = fresh_sim(seed);
    let mut violations = Vec::new();

    for i in 0..10 {
        let creator = format!("actor_field_{i}");
        let project = match sim.submit_project(
            &creator,
            "Water point restoration",
            "Rebuilt communal wells with attestations from both village councils.",
            PeaceCategory::Environmental,
            "Qm3e8...pax",
        ) {
            Ok(p) => p,
            Err(e) => {
                violations.push(format!("submit {i}: {e}"));
                continue;
            }
        };

        for round in 1..=5u32 {
            match sim.validate_project(&project.id) {
                Ok(updated) => {
                    if round < 5 && updated.status != ProjectStatus::Pending {
                        violations.push(format!(
                            "{}: approved early at endorsement {round}",
                            project.id
                        ));
                    }
                    if round == 5 {
                        if updated.status != ProjectStatus::Approved {
                            violations
                                .push(format!("{}: not approved at threshold", project.id));
                        }
                        if !(85..100).contains(&updated.expert_score) {
                            violations.push(format!(
                                "{}: expert score {} out of band",
                                project.id, updated.expert_score
                            ));
                        }
                        if !(2500.0..7500.0).contains(&updated.rewarded_amount) {
                            violations.push(format!(
                                "{}: reward {} out of band",
                                project.id, updated.rewarded_amount
                            ));
                        }
                    }
                }
                Err(e) => violations.push(format!("{} round {round}: {e}", project.id)),
            }
        }

        match sim.actor(&creator) {
            Ok(actor) => {
                if actor.reputation != 20 {
                    violations.push(format!("{creator}: reputation {} != 20", actor.reputation));
                }
                match sim.claim_rewards(&creator) {
                    Ok(amount) => {
                        if amount != sim.actor(&creator).map(|a| a.pax_balance).unwrap_or(0.0) {
                            violations.push(format!("{creator}: claim not credited"));
                        }
                    }
                    Err(e) => violations.push(format!("{creator} claim: {e}")),
                }
                // Second claim must report an empty balance.
                if sim.claim_rewards(&creator) != Err(EngineError::ZeroBalance) {
                    violations.push(format!("{creator}: double claim not rejected"));
                }
            }
            Err(e) => violations.push(format!("{creator}: {e}")),
        }
    }

    let report = sim.run_full_audit();
    if !report.healthy {
        violations.push("settlement ledger drifted during pipeline".to_string());
    }
    outcome_from(&sim, violations, 0)
}

// ─── Safety ─────────────────────────────────────────────────────────────────

/// Pause blocks every mutator, reads and audits keep working, unpause
/// restores service.
fn pause_gate(seed: u64) -> Outcome {
    let mut sim = fresh_sim(seed);
    let mut violations = Vec::new();

    if let Err(e) = sim.toggle_pause(OPS_ACTOR) {
        violations.push(format!("pause: {e}"));
    }

    let blocked = sim.submit_project(
        VERIFIED_ACTOR,
        "Blocked during pause",
        "Submission attempted while the protocol is halted.",
        PeaceCategory::Education,
        "Qm0...pax",
    );
    if !matches!(blocked, Err(EngineError::Paused)) {
        violations.push("mutator not rejected while paused".to_string());
    }
    if !matches!(sim.vote_proposal("prop_001", true, 10.0), Err(EngineError::Paused)) {
        violations.push("vote not rejected while paused".to_string());
    }

    let paused_report = sim.run_full_audit();
    if !paused_report.healthy {
        violations.push("audit unhealthy while paused".to_string());
    }
    if paused_report.score >= 80.0 {
        violations.push("paused score penalty not applied".to_string());
    }

    if let Err(e) = sim.toggle_pause(OPS_ACTOR) {
        violations.push(format!("unpause: {e}"));
    }
    if sim
        .submit_project(
            VERIFIED_ACTOR,
            "Resumed after pause",
            "Submission accepted once the halt is lifted by operations.",
            PeaceCategory::Education,
            "Qm0...pax",
        )
        .is_err()
    {
        violations.push("mutator still rejected after unpause".to_string());
    }

    outcome_from(&sim, violations, 0)
}

// ─── Audit ──────────────────────────────────────────────────────────────────

/// Chaos round-trip: drift must be caught, reconciliation must heal.
fn drift_reconcile(seed: u64) -> Outcome {
    let mut sim = fresh_sim(seed);
    let mut violations = Vec::new();

    if let Err(e) = sim.simulate_drift(OPS_ACTOR) {
        violations.push(format!("drift: {e}"));
    }
    let drifted = sim.run_full_audit();
    if drifted.healthy {
        violations.push("audit missed injected drift".to_string());
    }
    if drifted.invariants_matched > 1 {
        violations.push(format!(
            "only {} invariant(s) should survive drift",
            drifted.invariants_matched
        ));
    }

    if let Err(e) = sim.reconcile_state(OPS_ACTOR) {
        violations.push(format!("reconcile: {e}"));
    }
    let healed = sim.run_full_audit();
    if !healed.healthy {
        violations.push("audit unhealthy after reconciliation".to_string());
    }
    if healed.invariants_matched != 4 {
        violations.push("not all invariants restored".to_string());
    }
    if sim.slashes().len() != 1 {
        violations.push("capture eviction did not record a slash".to_string());
    }

    outcome_from(&sim, violations, 0)
}

// ─── Governance ─────────────────────────────────────────────────────────────

/// Vote churn across several ballots; accumulators only grow and volumes
/// stay under the capture threshold.
fn governance_load(seed: u64) -> Outcome {
    let mut sim = fresh_sim(seed);
    let mut workload = ChaChaSource::seed_from(seed ^ 0x474f_5645);
    let mut violations = Vec::new();

    let mut ids = Vec::new();
    for i in 0..5 {
        match sim.create_proposal(
            &format!("Treasury allocation round {i}"),
            "Quarterly budget reallocation for regional peace programs.",
            "0x111...aaa",
        ) {
            Ok(p) => ids.push(p.id),
            Err(e) => violations.push(format!("create {i}: {e}")),
        }
    }

    let mut last_totals = vec![0.0f64; ids.len()];
    for round in 0..100 {
        let target = (workload.next_unit() * ids.len() as f64) as usize % ids.len();
        let support = workload.next_unit() < 0.7;
        let weight = workload.in_range(10.0, 5_000.0);
        match sim.vote_proposal(&ids[target], support, weight) {
            Ok(p) => {
                let total = p.votes_for + p.votes_against;
                if total < last_totals[target] {
                    violations.push(format!("round {round}: accumulator shrank"));
                }
                last_totals[target] = total;
            }
            Err(e) => violations.push(format!("round {round}: {e}")),
        }
    }

    let report = sim.run_full_audit();
    if !report.healthy {
        violations.push("benign vote load tripped the capture check".to_string());
    }
    outcome_from(&sim, violations, 0)
}
