//! Re-entrancy lock for functions that call out to another contract.
//!
//! The lock is a flag in instance storage. A failed invocation rolls the flag
//! back with every other write, so only the success path has to release it.

use soroban_sdk::{symbol_short, Env, Symbol};

const REENTRY_LOCK: Symbol = symbol_short!("RE_LOCK");

/// Returns `true` while a guarded function is executing.
pub fn is_locked(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&REENTRY_LOCK)
        .unwrap_or(false)
}

/// Takes the lock.
///
/// Returns `false` without blocking if the lock is already held.
pub fn acquire(env: &Env) -> bool {
    if is_locked(env) {
        return false;
    }
    env.storage().instance().set(&REENTRY_LOCK, &true);
    true
}

/// Releases the lock.
pub fn release(env: &Env) {
    env.storage().instance().remove(&REENTRY_LOCK);
}
