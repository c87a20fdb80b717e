//! Fixed-point scaling constants shared by the staking and bond contracts.
//!
//! Token amounts use the value token's smallest unit (9 decimals). Prices and
//! the debt ratio carry their own scale, listed here so every formula reads
//! from one place.

/// Scale of the debt ratio: `current_debt * RATIO_SCALE / total_supply`.
pub const RATIO_SCALE: i128 = 1_000_000_000;

/// Scale of a decoded 18-decimal fraction.
pub const DECODE_SCALE_18: u128 = 1_000_000_000_000_000_000;

/// `native_price = control_variable * debt_ratio / CONTROL_VARIABLE_DIVISOR`.
pub const CONTROL_VARIABLE_DIVISOR: i128 = 10_000_000;

/// `payout = decode_18(value / native_price) / PAYOUT_RESCALE`.
pub const PAYOUT_RESCALE: u128 = 10_000_000_000_000_000;

/// Smallest payout a bond may carry (0.01 value token).
pub const MIN_PAYOUT: i128 = 10_000_000;

/// Basis points denominator for fees and the vested fraction.
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Highest accepted fee, 100% of the payout-equivalent.
pub const MAX_FEE: i128 = 10_000;

/// `max_payout` is expressed in thousandths of a percent of total supply.
pub const MAX_PAYOUT_DENOMINATOR: i128 = 100_000;

/// Highest accepted `max_payout`, 1% of total supply.
pub const MAX_PAYOUT_CAP: i128 = 1_000;

/// An adjustment step may not exceed 25/1000 (2.5%) of the control variable.
pub const MAX_ADJUSTMENT_NUMERATOR: i128 = 25;
pub const MAX_ADJUSTMENT_DENOMINATOR: i128 = 1_000;

/// Shortest vesting term, in ticks.
pub const VESTING_TERM_FLOOR: u64 = 10_000;

/// Default divisor applied when quoting the bond price in the reference currency.
pub const DEFAULT_PRICE_BASE: i128 = 100;
