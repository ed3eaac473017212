// Pax Scenario Runner — Monte Carlo protocol-invariant validation
// Seedable PRNG, per-run assertion trail, JSON report output
//
// Usage:
//   cargo run --release --bin scenarios                 # All scenarios (30 runs each)
//   cargo run --release --bin scenarios -- --runs 5     # Quick mode
//   cargo run --release --bin scenarios -- PAUSE_GATE   # Filter by name
//   cargo run --release --bin scenarios -- --seed 42    # Custom base seed

mod report;
mod scenarios;

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use report::*;
use scenarios::*;

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    runs: usize,
    seed: u64,
    filter: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs { runs: 30, seed: 0, filter: None };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                if i < args.len() {
                    cli.runs = args[i].parse().unwrap_or(30);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            arg if !arg.starts_with('-') => {
                cli.filter = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

// ─── Monte Carlo ────────────────────────────────────────────────────────────

fn run_monte_carlo(scenario: &Scenario, runs: usize, base_seed: u64) -> MonteCarloReport {
    let mut individual_runs = Vec::with_capacity(runs);

    for run_idx in 0..runs {
        let seed = base_seed.wrapping_add(run_idx as u64);
        let start = Instant::now();
        let outcome = (scenario.run)(seed);
        let elapsed_ms = start.elapsed().as_millis();

        for violation in &outcome.violations {
            eprintln!("  [{} seed {}] {}", scenario.name, seed, violation);
        }

        individual_runs.push(RunResult {
            scenario: scenario.name.to_string(),
            seed,
            pass: outcome.violations.is_empty(),
            violations: outcome.violations,
            audit_score: outcome.audit_score,
            invariants_matched: outcome.invariants_matched,
            projects_approved: outcome.projects_approved,
            tokens_distributed: outcome.tokens_distributed,
            swaps_executed: outcome.swaps_executed,
            final_pax_price: outcome.final_pax_price,
            critical_sections: outcome.critical_sections,
            elapsed_ms,
        });
    }

    let passed = individual_runs.iter().filter(|r| r.pass).count();
    let samples = |f: fn(&RunResult) -> f64| -> Stats {
        let values: Vec<f64> = individual_runs.iter().map(f).collect();
        Stats::from_samples(&values)
    };

    MonteCarloReport {
        scenario_name: scenario.name.to_string(),
        label: scenario.label.to_string(),
        category: scenario.category.to_string(),
        n_runs: runs,
        pass_rate: passed as f64 / runs.max(1) as f64,
        audit_score: samples(|r| r.audit_score),
        tokens_distributed: samples(|r| r.tokens_distributed),
        final_pax_price: samples(|r| r.final_pax_price),
        elapsed_ms: samples(|r| r.elapsed_ms as f64),
        individual_runs,
    }
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    let cli = parse_args();
    let all_scenarios = scenarios();

    let to_run: Vec<&Scenario> = match &cli.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all_scenarios
                .iter()
                .filter(|s| {
                    s.name.to_lowercase().contains(&f_lower)
                        || s.label.to_lowercase().contains(&f_lower)
                        || s.category.to_lowercase().contains(&f_lower)
                })
                .collect()
        }
        None => all_scenarios.iter().collect(),
    };

    if to_run.is_empty() {
        eprintln!("No scenarios match filter: {:?}", cli.filter);
        std::process::exit(1);
    }

    println!("\n  Pax Scenario Runner v0.3.0");
    println!(
        "  PRNG: ChaCha8Rng | Runs/scenario: {} | Base seed: {}",
        cli.runs, cli.seed
    );
    println!("  Running {} scenario(s)...\n", to_run.len());
    println!(
        "  {:<34} {:>5} {:>8} {:>12} {:>9} {:>7}",
        "Scenario", "Pass%", "Score", "Distributed", "PaxPrice", "Time"
    );
    println!("  {}", "-".repeat(82));

    let suite_start = Instant::now();
    let mut mc_reports = Vec::new();

    for scenario in &to_run {
        let mc = run_monte_carlo(scenario, cli.runs, cli.seed);
        let status = if mc.pass_rate >= 1.0 { "PASS" } else { "FAIL" };
        println!(
            "  {:<34} {:>4}% {:>8.1} {:>12.0} {:>9.4} {:>5.0}ms  {}",
            mc.label,
            (mc.pass_rate * 100.0) as u32,
            mc.audit_score.mean,
            mc.tokens_distributed.mean,
            mc.final_pax_price.mean,
            mc.elapsed_ms.mean,
            status,
        );
        mc_reports.push(mc);
    }

    let suite_elapsed = suite_start.elapsed();

    let total = mc_reports.len();
    let passed = mc_reports.iter().filter(|r| r.pass_rate >= 1.0).count();
    let failed = total - passed;

    println!("  {}", "-".repeat(82));
    println!(
        "  Total: {}  Passed: {}  Failed: {}  Suite time: {:.1}s\n",
        total,
        passed,
        failed,
        suite_elapsed.as_secs_f64()
    );

    // ─── Write JSON Report ──────────────────────────────────────────────

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let timestamp = format!("{ts}");

    let suite = SuiteReport {
        timestamp: timestamp.clone(),
        version: "0.3.0",
        prng: "ChaCha8Rng",
        n_runs_per_scenario: cli.runs,
        summary: Summary {
            total,
            passed,
            failed,
            pass_rate: passed as f64 / total.max(1) as f64,
        },
        scenarios: mc_reports,
    };

    let dir = std::path::Path::new("scenario-results");
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("Failed to create scenario-results/: {e}");
        std::process::exit(1);
    }
    let path = dir.join(format!("scenarios-{timestamp}.json"));
    match serde_json::to_string_pretty(&suite) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&path, json) {
                eprintln!("Failed to write {}: {e}", path.display());
                std::process::exit(1);
            }
            println!("  Results saved to: {}\n", path.display());
        }
        Err(e) => {
            eprintln!("Failed to serialize report: {e}");
            std::process::exit(1);
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
}
