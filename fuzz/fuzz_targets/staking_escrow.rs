#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};
use staking_escrow::{StakingContract, StakingContractClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { amount: u32 },
    Withdraw { amount: u32 },
    ClaimRewards,
    EndPeriod,
    StartPeriod,
    Advance { seconds: u16 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);
    let admin = Address::generate(&env);

    let pool = 1_000_000i128;
    client.initialize(&admin, &stake_token, &reward_token, &pool, &3_600, &60);
    StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &pool);
    client.start_staking_period(&admin);

    let mut users = Vec::new();
    for _ in 0..4 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &stake_token).mint(&user, &i128::from(u32::MAX));
        users.push(user);
    }

    let mut now = 0u64;
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Stake { amount } => {
                let _ = client.try_stake(caller, &i128::from(amount));
            }
            FuzzAction::Withdraw { amount } => {
                let _ = client.try_withdraw(caller, &i128::from(amount));
            }
            FuzzAction::ClaimRewards => {
                let _ = client.try_claim_rewards(caller);
            }
            FuzzAction::EndPeriod => {
                let _ = client.try_end_staking_period(&admin);
            }
            FuzzAction::StartPeriod => {
                StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &pool);
                let _ = client.try_start_staking_period(&admin);
            }
            FuzzAction::Advance { seconds } => {
                now += u64::from(seconds);
                env.ledger().set_timestamp(now);
            }
        }

        // Ledger invariants must survive every action, successful or not.
        let period = client.get_snapshot().period;
        let staked: i128 = users.iter().map(|u| client.get_position(u).amount).sum();
        let pending: i128 = users
            .iter()
            .map(|u| client.get_position(u).pending_reward)
            .sum();
        let custody = TokenClient::new(&env, &reward_token).balance(&contract_id);
        assert_eq!(staked, period.total_staked);
        assert!(pending <= period.total_owed);
        assert!(custody >= period.total_owed);
        assert!(period.rewards_distributed <= period.total_reward_pool);
    }
});
