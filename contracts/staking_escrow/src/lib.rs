#![no_std]

pub mod events;
pub mod ledger;
pub mod period;
pub mod rewards;

use common::{controllers, reentrancy, TTL_EXTEND_TO, TTL_THRESHOLD};
use soroban_sdk::{
    contract, contractimpl, contracttype, log, symbol_short, token, Address, Env, Symbol, Vec,
};

pub use ledger::StakePosition;
pub use period::PeriodState;

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
const INITIALIZED: Symbol = symbol_short!("INIT");
const STAKE_TOKEN: Symbol = symbol_short!("STK_TOK");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    InsufficientBalance = 5,
    LockupNotElapsed = 6,
    PeriodActive = 7,
    PeriodNotActive = 8,
    InsufficientRewardFunds = 9,
    TokensIdentical = 10,
    StakeInCustody = 11,
    RewardsOutstanding = 12,
    NoPendingAdmin = 13,
    ArithmeticOverflow = 14,
    Reentrant = 15,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Every global parameter in one read, returned by `get_snapshot`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingSnapshot {
    pub admin: Address,
    pub stake_token: Address,
    pub reward_token: Address,
    pub period: PeriodState,
    pub time_remaining: u64,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract with an inactive period.
    ///
    /// * `stake_token`       – SAC address of the token users stake.
    /// * `reward_token`      – SAC address of the token paid as rewards.
    /// * `total_reward_pool` – reward budget of each period.
    /// * `period_length`     – seconds from start to the scheduled end.
    /// * `lockup_duration`   – seconds after an account's last settlement
    ///                         before it may withdraw.
    pub fn initialize(
        env: Env,
        admin: Address,
        stake_token: Address,
        reward_token: Address,
        total_reward_pool: i128,
        period_length: u64,
        lockup_duration: u64,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if total_reward_pool < 0 || period_length == 0 {
            return Err(ContractError::InvalidInput);
        }
        if stake_token == reward_token {
            return Err(ContractError::TokensIdentical);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&STAKE_TOKEN, &stake_token);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        period::save(
            &env,
            &PeriodState::new(total_reward_pool, period_length, lockup_duration),
        );
        Self::extend_instance_ttl(&env);

        events::publish_initialized(
            &env,
            admin,
            stake_token,
            reward_token,
            total_reward_pool,
            period_length,
            lockup_duration,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` stake tokens.
    ///
    /// Any reward already earned on the previous balance is settled first,
    /// so the deposit never earns retroactively.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::enter(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }

        let now = env.ledger().timestamp();
        let mut state = period::load(&env)?;
        let mut position = ledger::load_position(&env, &staker);

        ledger::deposit(&mut state, &mut position, amount, now)?;
        ledger::save_position(&env, &staker, &position);
        period::save(&env, &state);

        token::Client::new(&env, &Self::stake_token(&env)?).transfer(
            &staker,
            &env.current_contract_address(),
            &amount,
        );

        Self::exit(&env);
        events::publish_staked(&env, staker, amount, position.amount, state.total_staked);

        Ok(())
    }

    /// Return `amount` of principal to the staker.
    ///
    /// Fails with `LockupNotElapsed` unless strictly more than the lockup
    /// duration has passed since the staker's last stake, withdrawal, or
    /// paid claim.
    pub fn withdraw(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::enter(&env)?;
        staker.require_auth();

        let now = env.ledger().timestamp();
        let mut state = period::load(&env)?;
        let mut position = ledger::load_position(&env, &staker);

        ledger::withdraw(&mut state, &mut position, amount, now)?;
        ledger::save_position(&env, &staker, &position);
        period::save(&env, &state);

        token::Client::new(&env, &Self::stake_token(&env)?).transfer(
            &env.current_contract_address(),
            &staker,
            &amount,
        );

        Self::exit(&env);
        events::publish_withdrawn(&env, staker, amount, position.amount, state.total_staked);

        Ok(())
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Settle and pay out the staker's pending reward.
    ///
    /// Returns the amount paid; zero owed is not an error. Rewards carried
    /// over from earlier periods are paid in full along with the current ones.
    pub fn claim_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        Self::enter(&env)?;
        staker.require_auth();

        let now = env.ledger().timestamp();
        let mut state = period::load(&env)?;
        let mut position = ledger::load_position(&env, &staker);

        let paid = ledger::take_payout(&mut state, &mut position, now)?;
        ledger::save_position(&env, &staker, &position);
        period::save(&env, &state);

        if paid > 0 {
            token::Client::new(&env, &Self::reward_token(&env)?).transfer(
                &env.current_contract_address(),
                &staker,
                &paid,
            );
            events::publish_reward_paid(&env, staker, paid, position.total_claimed);
        }

        Self::exit(&env);
        Ok(paid)
    }

    // ── Period lifecycle ────────────────────────────────────────────────────

    /// Open a new staking period. The contract must already hold enough
    /// reward tokens for the whole pool on top of rewards still owed from
    /// earlier periods.
    pub fn start_staking_period(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::enter(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let now = env.ledger().timestamp();
        let mut state = period::load(&env)?;
        state.begin(now)?;

        let required = state
            .total_reward_pool
            .checked_add(state.total_owed)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let custody = Self::reward_custody(&env)?;
        if custody < required {
            log!(&env, "reward custody below pool", custody, required);
            return Err(ContractError::InsufficientRewardFunds);
        }

        period::save(&env, &state);

        Self::exit(&env);
        events::publish_period_started(
            &env,
            state.start_time,
            state.period_length,
            state.total_reward_pool,
        );

        Ok(())
    }

    /// Close the live period.
    ///
    /// The accumulator is brought up to the end, which commits every
    /// staker's share without touching their positions. The uncommitted
    /// remainder of the pool, less anything still owed, is swept back to the
    /// admin. Returns the uncommitted remainder.
    pub fn end_staking_period(env: Env, caller: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        Self::enter(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let now = env.ledger().timestamp();
        let mut state = period::load(&env)?;
        state.close(now)?;

        let remaining = state.remaining_rewards();
        let sweepable = Self::reward_custody(&env)?
            .saturating_sub(state.total_owed)
            .max(0);
        let swept = remaining.min(sweepable);

        period::save(&env, &state);

        if swept > 0 {
            log!(&env, "sweeping unpaid pool", swept);
            token::Client::new(&env, &Self::reward_token(&env)?).transfer(
                &env.current_contract_address(),
                &caller,
                &swept,
            );
        }

        Self::exit(&env);
        events::publish_period_ended(&env, state.ended_at, remaining, swept, state.total_owed);

        Ok(remaining)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Seconds left before the live period's scheduled end; zero when inactive.
    pub fn get_time_remaining(env: Env) -> u64 {
        period::load(&env)
            .map(|state| state.time_remaining(env.ledger().timestamp()))
            .unwrap_or(0)
    }

    /// Reward earned since the account's last settlement, not yet folded in.
    pub fn get_accrued_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        let state = period::load(&env)?;
        let position = ledger::load_position(&env, &staker);
        ledger::accrued(&state, &position, env.ledger().timestamp())
    }

    /// Everything the account has earned: claimed, pending, and accrued.
    pub fn get_lifetime_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        let state = period::load(&env)?;
        let position = ledger::load_position(&env, &staker);
        let accrued = ledger::accrued(&state, &position, env.ledger().timestamp())?;

        Ok(position
            .total_claimed
            .saturating_add(position.pending_reward)
            .saturating_add(accrued))
    }

    /// Principal the account could withdraw right now.
    pub fn get_withdrawable(env: Env, staker: Address) -> i128 {
        match period::load(&env) {
            Ok(state) => ledger::withdrawable(
                &state,
                &ledger::load_position(&env, &staker),
                env.ledger().timestamp(),
            ),
            Err(_) => 0,
        }
    }

    pub fn get_position(env: Env, staker: Address) -> StakePosition {
        ledger::load_position(&env, &staker)
    }

    pub fn get_snapshot(env: Env) -> Result<StakingSnapshot, ContractError> {
        let period = period::load(&env)?;
        Ok(StakingSnapshot {
            admin: Self::get_admin(env.clone())?,
            stake_token: Self::stake_token(&env)?,
            reward_token: Self::reward_token(&env)?,
            time_remaining: period.time_remaining(env.ledger().timestamp()),
            period,
        })
    }

    /// Return the sum of all currently staked tokens.
    pub fn get_total_staked(env: Env) -> i128 {
        period::load(&env)
            .map(|state| state.total_staked)
            .unwrap_or(0)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose a new admin address. Only the current admin can call this.
    /// The new admin must call `accept_admin` to complete the transfer.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        env.storage().instance().set(&PENDING_ADMIN, &new_admin);

        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);

        Ok(())
    }

    /// Accept the pending admin transfer. Only the proposed new admin can call this.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_admin.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::NoPendingAdmin)?;

        if new_admin != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_admin = Self::get_admin(env.clone())?;

        env.storage().instance().set(&ADMIN, &new_admin);
        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    /// Cancel a pending admin transfer. Only the current admin can call this.
    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::NoPendingAdmin)?;

        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_cancelled(&env, current_admin, pending);

        Ok(())
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_ADMIN)
    }

    // ── Controllers ──────────────────────────────────────────────────────────

    /// Grant `controller` the delegated configuration rights.
    pub fn add_controller(
        env: Env,
        caller: Address,
        controller: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if !controllers::add_controller(&env, &controller) {
            return Err(ContractError::InvalidInput);
        }

        events::publish_controller_updated(&env, controller, true);
        Ok(())
    }

    pub fn remove_controller(
        env: Env,
        caller: Address,
        controller: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if !controllers::remove_controller(&env, &controller) {
            return Err(ContractError::InvalidInput);
        }

        events::publish_controller_updated(&env, controller, false);
        Ok(())
    }

    pub fn is_controller(env: Env, who: Address) -> bool {
        controllers::is_controller(&env, &who)
    }

    pub fn get_controllers(env: Env) -> Vec<Address> {
        controllers::list_controllers(&env)
    }

    // ── Configuration ────────────────────────────────────────────────────────

    /// Update the lockup duration. Applies to every position from now on.
    ///
    /// Callable by the admin or a controller.
    pub fn set_lockup_duration(
        env: Env,
        caller: Address,
        duration: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_or_controller(&env, &caller)?;

        let mut state = period::load(&env)?;
        state.lockup_duration = duration;
        period::save(&env, &state);

        events::publish_lockup_duration_set(&env, caller, duration);
        Ok(())
    }

    /// Update the period length used by the next period.
    ///
    /// Callable by the admin or a controller while no period is live.
    pub fn set_period_length(env: Env, caller: Address, length: u64) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_or_controller(&env, &caller)?;

        if length == 0 {
            return Err(ContractError::InvalidInput);
        }
        let mut state = Self::load_inactive(&env)?;
        state.period_length = length;
        period::save(&env, &state);

        events::publish_period_length_set(&env, caller, length);
        Ok(())
    }

    /// Update the reward budget of the next period.
    pub fn set_reward_pool(env: Env, caller: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }
        let mut state = Self::load_inactive(&env)?;
        state.total_reward_pool = amount;
        period::save(&env, &state);

        events::publish_reward_pool_set(&env, amount);
        Ok(())
    }

    /// Point the contract at a different stake token. Only possible while no
    /// principal is in custody.
    pub fn set_stake_token(env: Env, caller: Address, token: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let state = Self::load_inactive(&env)?;
        if state.total_staked != 0 {
            return Err(ContractError::StakeInCustody);
        }
        if token == Self::reward_token(&env)? {
            return Err(ContractError::TokensIdentical);
        }

        env.storage().instance().set(&STAKE_TOKEN, &token);

        events::publish_token_set(&env, symbol_short!("STAKE"), token);
        Ok(())
    }

    /// Point the contract at a different reward token. Only possible while no
    /// reward is owed.
    pub fn set_reward_token(env: Env, caller: Address, token: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let state = Self::load_inactive(&env)?;
        if state.total_owed != 0 {
            return Err(ContractError::RewardsOutstanding);
        }
        if token == Self::stake_token(&env)? {
            return Err(ContractError::TokensIdentical);
        }

        env.storage().instance().set(&REWARD_TOKEN, &token);

        events::publish_token_set(&env, symbol_short!("REWARD"), token);
        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` is not the stored admin.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn require_admin_or_controller(env: &Env, caller: &Address) -> Result<(), ContractError> {
        if controllers::is_controller(env, caller) {
            return Ok(());
        }
        Self::require_admin(env, caller)
    }

    fn load_inactive(env: &Env) -> Result<PeriodState, ContractError> {
        let state = period::load(env)?;
        if state.active {
            return Err(ContractError::PeriodActive);
        }
        Ok(state)
    }

    /// Take the re-entrancy lock for a function that calls a token contract.
    /// Must run before anything else so a nested call fails immediately.
    fn enter(env: &Env) -> Result<(), ContractError> {
        if !reentrancy::acquire(env) {
            log!(env, "re-entrant call rejected");
            return Err(ContractError::Reentrant);
        }
        Self::extend_instance_ttl(env);
        Ok(())
    }

    fn exit(env: &Env) {
        reentrancy::release(env);
    }

    fn extend_instance_ttl(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
    }

    fn stake_token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&STAKE_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    fn reward_token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    /// Reward tokens held by the contract.
    fn reward_custody(env: &Env) -> Result<i128, ContractError> {
        let reward_token = Self::reward_token(env)?;
        Ok(token::Client::new(env, &reward_token).balance(&env.current_contract_address()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_access;


#[cfg(test)]
mod test_reentrancy;
