// Copyright 2026 Pax Foundation. All rights reserved.
// Browser-facade smoke test, run with `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]

use pax_engine::PaxEngine;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn engine_boots_and_serves_snapshots() {
    let engine = PaxEngine::new(42, 1_700_000_000_000.0);
    assert!(!engine.get_metrics().is_null());
    assert!(!engine.get_projects().is_null());
    assert!(!engine.run_full_audit().is_null());
}

#[wasm_bindgen_test]
fn swap_round_trip_over_the_boundary() {
    let mut engine = PaxEngine::new(42, 1_700_000_000_000.0);
    let quote = engine.quote_swap(1_000.0);
    assert!(!quote.is_null());
    let receipt = engine.swap_pax_for_usdc("actor_0x123", 1_000.0);
    assert!(receipt.is_ok());
}

#[wasm_bindgen_test]
fn errors_cross_as_coded_strings() {
    let mut engine = PaxEngine::new(42, 1_700_000_000_000.0);
    let err = engine
        .swap_pax_for_usdc("actor_ghost", 10.0)
        .expect_err("unknown actor must fail");
    let text = err.as_string().unwrap_or_default();
    assert!(text.starts_with("ACTOR_NOT_FOUND"));
}
