extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::test::setup;
use crate::ContractError;

// ── Two-step admin transfer ──────────────────────────────────────────────────

#[test]
fn test_admin_transfer_completes_on_accept() {
    let s = setup(1_000, 100, 0);
    let successor = Address::generate(&s.env);

    s.client.propose_admin(&s.admin, &successor);
    assert_eq!(s.client.get_pending_admin(), Some(successor.clone()));
    // Nothing changes until the successor accepts.
    assert_eq!(s.client.get_admin(), s.admin);

    s.client.accept_admin(&successor);
    assert_eq!(s.client.get_admin(), successor);
    assert_eq!(s.client.get_pending_admin(), None);

    // Lifecycle rights moved with ownership.
    let result = s.client.try_start_staking_period(&s.admin);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    s.client.start_staking_period(&successor);
}

#[test]
fn test_accept_by_wrong_address_fails() {
    let s = setup(1_000, 100, 0);
    let successor = Address::generate(&s.env);
    let impostor = Address::generate(&s.env);

    s.client.propose_admin(&s.admin, &successor);

    let result = s.client.try_accept_admin(&impostor);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(s.client.get_admin(), s.admin);
}

#[test]
fn test_accept_without_proposal_fails() {
    let s = setup(1_000, 100, 0);
    let someone = Address::generate(&s.env);

    let result = s.client.try_accept_admin(&someone);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingAdmin),
        _ => unreachable!("Expected NoPendingAdmin error"),
    }
}

#[test]
fn test_cancelled_proposal_cannot_be_accepted() {
    let s = setup(1_000, 100, 0);
    let successor = Address::generate(&s.env);

    s.client.propose_admin(&s.admin, &successor);
    s.client.cancel_admin_transfer(&s.admin);
    assert_eq!(s.client.get_pending_admin(), None);

    let result = s.client.try_accept_admin(&successor);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingAdmin),
        _ => unreachable!("Expected NoPendingAdmin error"),
    }
}

#[test]
fn test_non_admin_cannot_propose() {
    let s = setup(1_000, 100, 0);
    let intruder = Address::generate(&s.env);

    let result = s.client.try_propose_admin(&intruder, &intruder);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

// ── Controllers ──────────────────────────────────────────────────────────────

#[test]
fn test_controller_can_configure_durations() {
    let s = setup(1_000, 100, 0);
    let ctrl = Address::generate(&s.env);

    s.client.add_controller(&s.admin, &ctrl);
    assert!(s.client.is_controller(&ctrl));
    assert_eq!(s.client.get_controllers().len(), 1);

    s.client.set_lockup_duration(&ctrl, &3_600);
    s.client.set_period_length(&ctrl, &7_200);

    let period = s.client.get_snapshot().period;
    assert_eq!(period.lockup_duration, 3_600);
    assert_eq!(period.period_length, 7_200);
}

#[test]
fn test_controller_cannot_run_owner_actions() {
    let s = setup(1_000, 100, 0);
    let ctrl = Address::generate(&s.env);
    let other = Address::generate(&s.env);
    s.client.add_controller(&s.admin, &ctrl);

    let result = s.client.try_start_staking_period(&ctrl);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }

    let result = s.client.try_set_reward_pool(&ctrl, &5);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }

    let result = s.client.try_add_controller(&ctrl, &other);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_removed_controller_loses_rights() {
    let s = setup(1_000, 100, 0);
    let ctrl = Address::generate(&s.env);

    s.client.add_controller(&s.admin, &ctrl);
    s.client.remove_controller(&s.admin, &ctrl);
    assert!(!s.client.is_controller(&ctrl));

    let result = s.client.try_set_lockup_duration(&ctrl, &1);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_duplicate_controller_membership_changes_fail() {
    let s = setup(1_000, 100, 0);
    let ctrl = Address::generate(&s.env);

    s.client.add_controller(&s.admin, &ctrl);
    let result = s.client.try_add_controller(&s.admin, &ctrl);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }

    s.client.remove_controller(&s.admin, &ctrl);
    let result = s.client.try_remove_controller(&s.admin, &ctrl);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
}

#[test]
fn test_non_admin_cannot_set_lockup() {
    let s = setup(1_000, 100, 0);
    let intruder = Address::generate(&s.env);

    let result = s.client.try_set_lockup_duration(&intruder, &999);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}
