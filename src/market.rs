// Copyright 2026 Pax Foundation. All rights reserved.
// Pax Protocol Simulation Suite ("The Dovecote") - Constant-Product Market

//! Two-asset liquidity pool, PAX against USDC.
//!
//! Standard constant-product pricing: `k = pax_reserve * usdc_reserve` is
//! held invariant across a swap except for fee retention, so `k` never
//! decreases. Output shrinks marginally with input size (slippage) and
//! asymptotically approaches the far reserve.

use serde::{Deserialize, Serialize};

/// Swap fee in basis points, extracted from the input side (30 bps).
pub const SWAP_FEE_RATE: f64 = 0.003;

// ─── Quote ───────────────────────────────────────────────────────────────────

/// Breakdown of a prospective swap at current reserves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SwapQuote {
    pub pax_in: f64,
    pub fee_paid: f64,
    pub usdc_out: f64,
}

// ─── LiquidityPool ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquidityPool {
    pub pax_reserve: f64,
    pub usdc_reserve: f64,
}

impl LiquidityPool {
    pub fn new(pax_reserve: f64, usdc_reserve: f64) -> Self {
        Self { pax_reserve, usdc_reserve }
    }

    /// Spot price of PAX in USDC.
    pub fn spot_price(&self) -> f64 {
        self.usdc_reserve / self.pax_reserve
    }

    /// Liquidity depth, quoted as the stable-side reserve.
    pub fn depth(&self) -> f64 {
        self.usdc_reserve
    }

    pub fn k(&self) -> f64 {
        self.pax_reserve * self.usdc_reserve
    }

    /// Pure constant-product quote for selling `pax_in` into the pool.
    ///
    /// `fee = in * 0.003`, the fee-reduced amount enters the PAX reserve, and
    /// the USDC output is whatever keeps `k` constant on the post-fee amount.
    /// Non-finite or negative inputs quote to zero: running the curve in
    /// reverse would shrink `k`.
    pub fn quote(&self, pax_in: f64) -> SwapQuote {
        if !pax_in.is_finite() || pax_in <= 0.0 {
            return SwapQuote { pax_in, fee_paid: 0.0, usdc_out: 0.0 };
        }
        let fee_paid = pax_in * SWAP_FEE_RATE;
        let in_after_fee = pax_in - fee_paid;
        let new_pax_reserve = self.pax_reserve + in_after_fee;
        let new_usdc_reserve = self.k() / new_pax_reserve;
        SwapQuote {
            pax_in,
            fee_paid,
            usdc_out: self.usdc_reserve - new_usdc_reserve,
        }
    }

    /// Apply a quoted swap to the reserves. The full input (fee included)
    /// lands in the PAX reserve, which is what makes `k` non-decreasing.
    /// Inputs that quote to zero leave the reserves untouched.
    pub fn execute_swap(&mut self, pax_in: f64) -> SwapQuote {
        let quote = self.quote(pax_in);
        if quote.usdc_out > 0.0 {
            self.pax_reserve += pax_in;
            self.usdc_reserve -= quote.usdc_out;
        }
        quote
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
