use soroban_sdk::{contracttype, symbol_short, Env, Symbol};

use crate::{rewards, ContractError};

const PERIOD: Symbol = symbol_short!("PERIOD");

/// Process-wide staking period state, stored as a single instance entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PeriodState {
    pub active: bool,
    pub start_time: u64,
    /// Accrual horizon of the last closed period; zero before the first one.
    pub ended_at: u64,
    pub period_length: u64,
    pub lockup_duration: u64,
    pub total_staked: i128,
    pub total_reward_pool: i128,
    /// Part of this period's pool already committed to stakers.
    pub rewards_distributed: i128,
    /// Committed rewards not yet paid out, across every period and position.
    pub total_owed: i128,
    /// Cumulative reward per staked token, scaled by `rewards::PRECISION`.
    pub reward_per_token: i128,
    /// The accumulator covers accrual up to this instant.
    pub last_accrual: u64,
}

impl PeriodState {
    pub fn new(total_reward_pool: i128, period_length: u64, lockup_duration: u64) -> Self {
        Self {
            active: false,
            start_time: 0,
            ended_at: 0,
            period_length,
            lockup_duration,
            total_staked: 0,
            total_reward_pool,
            rewards_distributed: 0,
            total_owed: 0,
            reward_per_token: 0,
            last_accrual: 0,
        }
    }

    /// Scheduled end of the live period.
    pub fn scheduled_end(&self) -> u64 {
        self.start_time.saturating_add(self.period_length)
    }

    /// Latest instant that still earns rewards.
    pub fn horizon(&self) -> u64 {
        if self.active {
            self.scheduled_end()
        } else {
            self.ended_at
        }
    }

    pub fn time_remaining(&self, now: u64) -> u64 {
        if !self.active {
            return 0;
        }
        self.scheduled_end().saturating_sub(now)
    }

    /// Part of the pool not yet committed this period.
    pub fn remaining_rewards(&self) -> i128 {
        self.total_reward_pool
            .saturating_sub(self.rewards_distributed)
            .max(0)
    }

    /// Bring the accumulator up to `now` and commit the matching share of the
    /// pool. Must run before any change to `total_staked`.
    pub fn accrue(&mut self, now: u64) -> Result<(), ContractError> {
        let window =
            rewards::accrual_window(self.last_accrual, now, self.start_time, self.horizon());

        if window > 0 && self.total_staked > 0 {
            let updated = rewards::reward_per_token(
                self.reward_per_token,
                window,
                self.total_reward_pool,
                self.total_staked,
                self.period_length,
            )
            .ok_or(ContractError::ArithmeticOverflow)?;
            let delta = updated - self.reward_per_token;
            let committed = rewards::allocation(self.total_staked, delta)
                .ok_or(ContractError::ArithmeticOverflow)?
                .min(self.remaining_rewards());

            self.reward_per_token = updated;
            self.rewards_distributed = self
                .rewards_distributed
                .checked_add(committed)
                .ok_or(ContractError::ArithmeticOverflow)?;
            self.total_owed = self
                .total_owed
                .checked_add(committed)
                .ok_or(ContractError::ArithmeticOverflow)?;
        }

        self.last_accrual = self.last_accrual.max(now);
        Ok(())
    }

    /// `Inactive → Active`.
    pub fn begin(&mut self, now: u64) -> Result<(), ContractError> {
        if self.active {
            return Err(ContractError::PeriodActive);
        }
        if self.period_length == 0 || self.total_reward_pool <= 0 {
            return Err(ContractError::InvalidInput);
        }
        self.active = true;
        self.start_time = now;
        self.last_accrual = now;
        self.rewards_distributed = 0;
        Ok(())
    }

    /// `Active → Inactive`. An early end cuts accrual at `now`; a late one
    /// at the scheduled end.
    pub fn close(&mut self, now: u64) -> Result<(), ContractError> {
        if !self.active {
            return Err(ContractError::PeriodNotActive);
        }
        self.accrue(now)?;
        self.ended_at = now.min(self.scheduled_end());
        self.active = false;
        Ok(())
    }
}

pub fn load(env: &Env) -> Result<PeriodState, ContractError> {
    env.storage()
        .instance()
        .get(&PERIOD)
        .ok_or(ContractError::NotInitialized)
}

pub fn save(env: &Env, state: &PeriodState) {
    env.storage().instance().set(&PERIOD, state);
}
