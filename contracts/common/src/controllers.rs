use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

use crate::{TTL_EXTEND_TO, TTL_THRESHOLD};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const CONTROLLER_PREFIX: Symbol = symbol_short!("CTRL");
const CONTROLLER_LIST: Symbol = symbol_short!("CTRL_LST");

// ── Storage Helpers ──────────────────────────────────────────────────────────

fn controller_key(controller: &Address) -> (Symbol, Address) {
    (CONTROLLER_PREFIX, controller.clone())
}

fn extend_ttl(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Core Functions ───────────────────────────────────────────────────────────

/// Returns `true` if `who` is on the controller allow-list.
pub fn is_controller(env: &Env, who: &Address) -> bool {
    let key = controller_key(who);
    let member: bool = env.storage().persistent().get(&key).unwrap_or(false);
    if member {
        extend_ttl(env, &key);
    }
    member
}

/// Adds `controller` to the allow-list.
///
/// Only callable internally; callers must verify the owner beforehand.
/// Returns `false` if the address was already a controller.
pub fn add_controller(env: &Env, controller: &Address) -> bool {
    if is_controller(env, controller) {
        return false;
    }
    let key = controller_key(controller);
    env.storage().persistent().set(&key, &true);
    extend_ttl(env, &key);
    track_controller(env, controller);
    true
}

/// Removes `controller` from the allow-list.
///
/// Returns `false` if the address was not a controller.
pub fn remove_controller(env: &Env, controller: &Address) -> bool {
    if !is_controller(env, controller) {
        return false;
    }
    env.storage()
        .persistent()
        .remove(&controller_key(controller));
    untrack_controller(env, controller);
    true
}

/// Returns every address currently on the allow-list.
pub fn list_controllers(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&CONTROLLER_LIST)
        .unwrap_or(Vec::new(env))
}

fn save_list(env: &Env, controllers: &Vec<Address>) {
    env.storage().persistent().set(&CONTROLLER_LIST, controllers);
    env.storage()
        .persistent()
        .extend_ttl(&CONTROLLER_LIST, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn track_controller(env: &Env, controller: &Address) {
    let mut controllers = list_controllers(env);
    if !controllers.contains(controller) {
        controllers.push_back(controller.clone());
        save_list(env, &controllers);
    }
}

fn untrack_controller(env: &Env, controller: &Address) {
    let mut controllers = list_controllers(env);
    if let Some(index) = controllers.first_index_of(controller) {
        controllers.remove(index);
        save_list(env, &controllers);
    }
}
