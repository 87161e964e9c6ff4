//! Per-account stake positions and the settlement rules that mutate them.
//!
//! Every mutation settles first: accrual is always computed from the
//! position and totals as they were *before* the triggering change.

use common::{TTL_EXTEND_TO, TTL_THRESHOLD};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{period::PeriodState, rewards, ContractError};

// Per-account persistent storage uses tuple keys: (prefix, account)
const POSITION: Symbol = symbol_short!("POS");

/// One account's stake. Created on first stake and never deleted.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StakePosition {
    pub amount: i128,
    /// Last stake, withdrawal, or paid claim; anchors the lockup.
    pub last_update_time: u64,
    /// Accumulator value already folded into `pending_reward`.
    pub reward_per_token_paid: i128,
    pub pending_reward: i128,
    pub total_claimed: i128,
}

// ── Storage ──────────────────────────────────────────────────────────────────

fn position_key(account: &Address) -> (Symbol, Address) {
    (POSITION, account.clone())
}

pub fn load_position(env: &Env, account: &Address) -> StakePosition {
    env.storage()
        .persistent()
        .get(&position_key(account))
        .unwrap_or_default()
}

pub fn save_position(env: &Env, account: &Address, position: &StakePosition) {
    let key = position_key(account);
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Settlement ───────────────────────────────────────────────────────────────

/// Reward earned since the position last settled, not yet folded in.
///
/// Works on a copy of the period state, so queries never write.
pub fn accrued(state: &PeriodState, position: &StakePosition, now: u64) -> Result<i128, ContractError> {
    let mut view = state.clone();
    view.accrue(now)?;
    rewards::earned(
        position.amount,
        view.reward_per_token,
        position.reward_per_token_paid,
    )
    .ok_or(ContractError::ArithmeticOverflow)
}

/// Bring the accumulator to `now` and fold the position's share of it into
/// `pending_reward`.
///
/// Leaves `last_update_time` alone, so settlement itself never restarts a
/// lockup. Idle positions need no settling at period end: the accumulator
/// carries their share across restarts.
pub fn settle(
    state: &mut PeriodState,
    position: &mut StakePosition,
    now: u64,
) -> Result<i128, ContractError> {
    state.accrue(now)?;

    let earned = rewards::earned(
        position.amount,
        state.reward_per_token,
        position.reward_per_token_paid,
    )
    .ok_or(ContractError::ArithmeticOverflow)?;

    if earned > 0 {
        position.pending_reward = position
            .pending_reward
            .checked_add(earned)
            .ok_or(ContractError::ArithmeticOverflow)?;
    }
    position.reward_per_token_paid = state.reward_per_token;

    Ok(earned)
}

// ── Mutations ────────────────────────────────────────────────────────────────

pub fn deposit(
    state: &mut PeriodState,
    position: &mut StakePosition,
    amount: i128,
    now: u64,
) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidInput);
    }

    settle(state, position, now)?;

    position.amount = position
        .amount
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    state.total_staked = state
        .total_staked
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    position.last_update_time = now;

    Ok(())
}

pub fn withdraw(
    state: &mut PeriodState,
    position: &mut StakePosition,
    amount: i128,
    now: u64,
) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidInput);
    }
    if amount > position.amount {
        return Err(ContractError::InsufficientBalance);
    }
    // Strict: the exact lockup boundary is still locked.
    if now.saturating_sub(position.last_update_time) <= state.lockup_duration {
        return Err(ContractError::LockupNotElapsed);
    }

    settle(state, position, now)?;

    position.amount -= amount;
    state.total_staked = state.total_staked.saturating_sub(amount);
    position.last_update_time = now;

    Ok(())
}

/// Settle and take the whole of `pending_reward`.
///
/// The payout is booked here, before any transfer happens. Every unit of it
/// was committed from some period's pool when it accrued, so no cap applies.
pub fn take_payout(
    state: &mut PeriodState,
    position: &mut StakePosition,
    now: u64,
) -> Result<i128, ContractError> {
    settle(state, position, now)?;

    let payout = position.pending_reward;
    if payout <= 0 {
        return Ok(0);
    }

    position.pending_reward = 0;
    position.total_claimed = position.total_claimed.saturating_add(payout);
    position.last_update_time = now;
    // Committed amounts round up, so what is owed always covers the payout.
    state.total_owed = state.total_owed.saturating_sub(payout);

    Ok(payout)
}

/// Principal the account could withdraw at `now`.
pub fn withdrawable(state: &PeriodState, position: &StakePosition, now: u64) -> i128 {
    if now.saturating_sub(position.last_update_time) > state.lockup_duration {
        position.amount
    } else {
        0
    }
}
