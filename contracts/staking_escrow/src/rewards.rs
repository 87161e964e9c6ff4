//! Time-weighted reward arithmetic.
//!
//! A staker holding `amount` for `time_staked` seconds earns
//!
//! ```text
//! reward = amount × time_staked × total_reward_pool / (total_staked × period_length)
//! ```
//!
//! with a single truncating division at the end. The ledger applies the
//! formula through a global reward-per-token accumulator: each stretch of
//! time with a constant `total_staked` adds the reward of `PRECISION` tokens
//! to it, and a position earns `amount × Δaccumulator / PRECISION`.

/// Fixed-point scale of the reward-per-token accumulator.
pub const PRECISION: i128 = 1_000_000_000_000;

/// Compute the reward owed for one settlement window.
///
/// Returns `None` when the denominator is zero or an intermediate product
/// overflows `i128`; callers decide how to surface that.
///
/// # Arguments
/// * `amount`            – staked principal held over the window
/// * `time_staked`       – window length in seconds, already clamped to the period
/// * `total_reward_pool` – reward budget of the period
/// * `total_staked`      – sum of all stakes at settlement time
/// * `period_length`     – full period length in seconds
pub fn reward(
    amount: i128,
    time_staked: u64,
    total_reward_pool: i128,
    total_staked: i128,
    period_length: u64,
) -> Option<i128> {
    if amount == 0 || time_staked == 0 {
        return Some(0);
    }

    let denominator = total_staked.checked_mul(i128::from(period_length))?;
    if denominator == 0 {
        return None;
    }

    amount
        .checked_mul(i128::from(time_staked))?
        .checked_mul(total_reward_pool)?
        .checked_div(denominator)
}

/// Advance the accumulator over `window` seconds of a period.
///
/// With nothing staked no one accrues and the accumulator stays put.
pub fn reward_per_token(
    stored: i128,
    window: u64,
    total_reward_pool: i128,
    total_staked: i128,
    period_length: u64,
) -> Option<i128> {
    if total_staked == 0 {
        return Some(stored);
    }
    stored.checked_add(reward(
        PRECISION,
        window,
        total_reward_pool,
        total_staked,
        period_length,
    )?)
}

/// Reward earned by `amount` since the accumulator stood at `paid`.
pub fn earned(amount: i128, current: i128, paid: i128) -> Option<i128> {
    amount
        .checked_mul(current.checked_sub(paid)?)?
        .checked_div(PRECISION)
}

/// Share of the pool committed to stakers by one accumulator step, rounded
/// up so that every position's truncated `earned` stays covered.
pub fn allocation(total_staked: i128, delta: i128) -> Option<i128> {
    total_staked
        .checked_mul(delta)?
        .checked_add(PRECISION - 1)?
        .checked_div(PRECISION)
}

/// Length of the accrual window `[checkpoint, now]` intersected with the
/// period `[start_time, horizon]`.
///
/// `horizon` is the scheduled end while the period is live and the recorded
/// end once it has been closed, so settling again after the end yields zero.
pub fn accrual_window(checkpoint: u64, now: u64, start_time: u64, horizon: u64) -> u64 {
    let from = checkpoint.max(start_time);
    let to = now.min(horizon);
    to.saturating_sub(from)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure-math tests with no Soroban environment dependency.
