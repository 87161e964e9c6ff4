extern crate std;

use common::reentrancy;
use soroban_sdk::{
    contract, contractimpl, symbol_short,
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env, Symbol,
};

use crate::test::{at, setup, staker_with};
use crate::{ContractError, StakingContract, StakingContractClient};

// ── Hostile token ────────────────────────────────────────────────────────────

const TARGET: Symbol = symbol_short!("TARGET");
const ATTEMPTS: Symbol = symbol_short!("ATTEMPTS");
const REFUSED: Symbol = symbol_short!("REFUSED");

/// Token whose `transfer` calls back into the staking contract before
/// returning, recording how many nested calls the host refused outright.
#[contract]
pub struct HostileToken;

#[contractimpl]
impl HostileToken {
    pub fn set_target(env: Env, target: Address) {
        env.storage().instance().set(&TARGET, &target);
    }

    pub fn transfer(env: Env, from: Address, _to: Address, _amount: i128) {
        let target: Address = env.storage().instance().get(&TARGET).unwrap();
        let staking = StakingContractClient::new(&env, &target);

        // The host refuses to re-enter a contract already on the call stack.
        // A contract error here, such as an unexpired lockup, would mean the
        // nested call got through, so it does not count.
        let mut rejected: u32 = env.storage().instance().get(&REFUSED).unwrap_or(0);
        if matches!(staking.try_withdraw(&from, &1), Err(Err(_))) {
            rejected += 1;
        }
        if matches!(staking.try_claim_rewards(&from), Err(Err(_))) {
            rejected += 1;
        }

        let attempts: u32 = env.storage().instance().get(&ATTEMPTS).unwrap_or(0);
        env.storage().instance().set(&ATTEMPTS, &(attempts + 2));
        env.storage().instance().set(&REFUSED, &rejected);
    }

    pub fn balance(_env: Env, _id: Address) -> i128 {
        1_000_000
    }

    /// `(attempted, refused by the host)` nested calls so far.
    pub fn reentry_counts(env: Env) -> (u32, u32) {
        (
            env.storage().instance().get(&ATTEMPTS).unwrap_or(0),
            env.storage().instance().get(&REFUSED).unwrap_or(0),
        )
    }
}

fn setup_hostile() -> (Env, StakingContractClient<'static>, HostileTokenClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let hostile_id = env.register(HostileToken, ());
    let hostile = HostileTokenClient::new(&env, &hostile_id);
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    client.initialize(&admin, &hostile_id, &reward_token, &1_000, &100, &0);
    hostile.set_target(&contract_id);

    StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &1_000);
    client.start_staking_period(&admin);

    (env, client, hostile, admin)
}

// ── Nested calls through a token ─────────────────────────────────────────────

#[test]
fn test_hostile_token_cannot_reenter_during_stake() {
    let (env, client, hostile, _admin) = setup_hostile();
    let staker = Address::generate(&env);

    client.stake(&staker, &100);

    assert_eq!(hostile.reentry_counts(), (2, 2));
    assert_eq!(client.get_position(&staker).amount, 100);
    assert_eq!(client.get_total_staked(), 100);
}

#[test]
fn test_hostile_token_cannot_reenter_during_withdraw() {
    let (env, client, hostile, _admin) = setup_hostile();
    let staker = Address::generate(&env);

    client.stake(&staker, &100);
    env.ledger().set_timestamp(10);
    client.withdraw(&staker, &60);

    assert_eq!(hostile.reentry_counts(), (4, 4));

    // 100 × 10 × 1_000 / (100 × 100) = 100, settled exactly once.
    let position = client.get_position(&staker);
    assert_eq!(position.amount, 40);
    assert_eq!(position.pending_reward, 100);
    assert_eq!(client.get_total_staked(), 40);
}

// ── Lock discipline ──────────────────────────────────────────────────────────

#[test]
fn test_guarded_entry_points_reject_while_locked() {
    let s = setup(1_000, 100, 0);
    let staker = staker_with(&s, 100);
    s.client.stake(&staker, &50);
    at(&s, 10);

    s.env.as_contract(&s.contract_id, || {
        assert!(reentrancy::acquire(&s.env));

        assert_eq!(
            StakingContract::stake(s.env.clone(), staker.clone(), 10),
            Err(ContractError::Reentrant)
        );
        assert_eq!(
            StakingContract::withdraw(s.env.clone(), staker.clone(), 10),
            Err(ContractError::Reentrant)
        );
        assert_eq!(
            StakingContract::claim_rewards(s.env.clone(), staker.clone()),
            Err(ContractError::Reentrant)
        );
        assert_eq!(
            StakingContract::start_staking_period(s.env.clone(), s.admin.clone()),
            Err(ContractError::Reentrant)
        );

        reentrancy::release(&s.env);
    });
}

#[test]
fn test_lock_released_after_each_call() {
    let s = setup(1_000, 100, 0);
    let staker = staker_with(&s, 100);
    let is_locked = || s.env.as_contract(&s.contract_id, || reentrancy::is_locked(&s.env));

    s.client.start_staking_period(&s.admin);
    assert!(!is_locked());

    s.client.stake(&staker, &100);
    assert!(!is_locked());

    at(&s, 20);
    s.client.claim_rewards(&staker);
    assert!(!is_locked());

    // A failed call rolls the lock back along with everything else.
    assert!(s.client.try_withdraw(&staker, &1_000).is_err());
    assert!(!is_locked());

    at(&s, 21);
    s.client.withdraw(&staker, &100);
    s.client.end_staking_period(&s.admin);
    assert!(!is_locked());
}
