#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Symbol};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub stake_token: Address,
    pub reward_token: Address,
    pub total_reward_pool: i128,
    pub period_length: u64,
    pub lockup_duration: u64,
    pub timestamp: u64,
}

/// Fired when a user deposits stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub staker_total: i128,
    pub total_staked: i128,
    pub timestamp: u64,
}

/// Fired when a user withdraws principal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub staker: Address,
    pub amount: i128,
    pub staker_total: i128,
    pub total_staked: i128,
    pub timestamp: u64,
}

/// Fired when reward tokens are paid to a staker.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPaidEvent {
    pub staker: Address,
    pub amount: i128,
    pub total_claimed: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PeriodStartedEvent {
    pub start_time: u64,
    pub period_length: u64,
    pub total_reward_pool: i128,
    pub timestamp: u64,
}

/// Fired when the period closes. `remaining` is the part of the pool never
/// committed to stakers, `swept` what was returned to the admin after
/// reserving owed rewards.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PeriodEndedEvent {
    pub ended_at: u64,
    pub remaining: i128,
    pub swept: i128,
    pub total_owed: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockupDurationSetEvent {
    pub caller: Address,
    pub duration: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PeriodLengthSetEvent {
    pub caller: Address,
    pub length: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPoolSetEvent {
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the stake or reward token address changes; `role` is
/// `STAKE` or `REWARD`.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenSetEvent {
    pub role: Symbol,
    pub token: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ControllerUpdatedEvent {
    pub controller: Address,
    pub enabled: bool,
    pub timestamp: u64,
}

/// Fired when an admin transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferProposedEvent {
    pub current_admin: Address,
    pub proposed_admin: Address,
    pub timestamp: u64,
}

/// Fired when an admin transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferAcceptedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

/// Fired when a pending admin transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferCancelledEvent {
    pub admin: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    stake_token: Address,
    reward_token: Address,
    total_reward_pool: i128,
    period_length: u64,
    lockup_duration: u64,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            stake_token,
            reward_token,
            total_reward_pool,
            period_length,
            lockup_duration,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(
    env: &Env,
    staker: Address,
    amount: i128,
    staker_total: i128,
    total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            amount,
            staker_total,
            total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(
    env: &Env,
    staker: Address,
    amount: i128,
    staker_total: i128,
    total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), staker.clone()),
        WithdrawnEvent {
            staker,
            amount,
            staker_total,
            total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_paid(env: &Env, staker: Address, amount: i128, total_claimed: i128) {
    env.events().publish(
        (symbol_short!("RWD_PAID"), staker.clone()),
        RewardPaidEvent {
            staker,
            amount,
            total_claimed,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_period_started(
    env: &Env,
    start_time: u64,
    period_length: u64,
    total_reward_pool: i128,
) {
    env.events().publish(
        (symbol_short!("PER_START"),),
        PeriodStartedEvent {
            start_time,
            period_length,
            total_reward_pool,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_period_ended(
    env: &Env,
    ended_at: u64,
    remaining: i128,
    swept: i128,
    total_owed: i128,
) {
    env.events().publish(
        (symbol_short!("PER_END"),),
        PeriodEndedEvent {
            ended_at,
            remaining,
            swept,
            total_owed,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_lockup_duration_set(env: &Env, caller: Address, duration: u64) {
    env.events().publish(
        (symbol_short!("LOCK_SET"),),
        LockupDurationSetEvent {
            caller,
            duration,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_period_length_set(env: &Env, caller: Address, length: u64) {
    env.events().publish(
        (symbol_short!("LEN_SET"),),
        PeriodLengthSetEvent {
            caller,
            length,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_pool_set(env: &Env, amount: i128) {
    env.events().publish(
        (symbol_short!("POOL_SET"),),
        RewardPoolSetEvent {
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_token_set(env: &Env, role: Symbol, token: Address) {
    env.events().publish(
        (symbol_short!("TOKEN_SET"), role.clone()),
        TokenSetEvent {
            role,
            token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_controller_updated(env: &Env, controller: Address, enabled: bool) {
    env.events().publish(
        (symbol_short!("CTRL_UPD"), controller.clone()),
        ControllerUpdatedEvent {
            controller,
            enabled,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_proposed(env: &Env, current_admin: Address, proposed_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"), current_admin.clone()),
        AdminTransferProposedEvent {
            current_admin,
            proposed_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"), new_admin.clone()),
        AdminTransferAcceptedEvent {
            old_admin,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_cancelled(env: &Env, admin: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("ADM_CNCL"), admin.clone()),
        AdminTransferCancelledEvent {
            admin,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
