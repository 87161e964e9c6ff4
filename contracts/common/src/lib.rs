//! Shared guards for the staking escrow contract suite.
//!
//! This crate provides:
//! - [`controllers`]: an owner-managed allow-list of delegated controllers.
//! - [`reentrancy`]: a storage-backed lock rejecting nested entry into
//!   functions that hand control to an external contract.
//!
//! Both helpers return plain `bool`s so each contract can map a rejection
//! onto its own `contracterror` enum.

#![no_std]

pub mod controllers;
pub mod reentrancy;

pub use controllers::*;
pub use reentrancy::*;

// ── Storage lifetime ─────────────────────────────────────────────────────────

/// Ledgers below which a persistent entry's TTL is bumped on access.
pub const TTL_THRESHOLD: u32 = 5_184_000;

/// Ledgers a bumped persistent entry lives for.
pub const TTL_EXTEND_TO: u32 = 10_368_000;
