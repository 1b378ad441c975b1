//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers used by FundMe:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key         | Type      | Description                              |
//! |-------------|-----------|------------------------------------------|
//! | `Owner`     | `Address` | Deployer; sole identity allowed to withdraw |
//! | `PriceFeed` | `Address` | Price-feed oracle contract               |
//! | `Asset`     | `Address` | Token contract the funding is held in    |
//!
//! All three are written once by `init` and never rewritten. Instance TTL
//! is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                     | Type           | Description                     |
//! |-------------------------|----------------|---------------------------------|
//! | `FundedAmount(Address)` | `i128`         | Cumulative contribution; absent = 0 |
//! | `Funders`               | `Vec<Address>` | Append-only funder log          |
//!
//! `Funders` is not deduplicated: a repeat funder appears once per `fund`
//! call. Withdrawal clears entries against every log position, so repeats
//! are harmless. Persistent TTL is bumped by **30 days** whenever it falls
//! below 7 days remaining.

use soroban_sdk::{contracttype, vec, Address, Env, Vec};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
///
/// Instance-tier keys (`Owner`, `PriceFeed`, `Asset`) live as long as the
/// contract and are extended together. Persistent-tier keys
/// (`FundedAmount`, `Funders`) hold the mutable ledger with independent TTLs.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Contract owner, fixed at init (Instance).
    Owner,
    /// Price-feed oracle contract address (Instance).
    PriceFeed,
    /// Token contract holding the funds (Instance).
    Asset,
    /// Cumulative contribution per funder (Persistent).
    FundedAmount(Address),
    /// Append-only log of funder addresses (Persistent).
    Funders,
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Whether `init` has already run.
pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

/// Write the three init-time singletons. Called exactly once from `init`.
pub fn save_init_config(env: &Env, owner: &Address, asset: &Address, price_feed: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
    env.storage().instance().set(&DataKey::Asset, asset);
    env.storage().instance().set(&DataKey::PriceFeed, price_feed);
    bump_instance(env);
}

/// Retrieve the contract owner.
/// Panics if `init` has not been called.
pub fn read_owner(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .expect("contract not initialized")
}

/// Retrieve the price-feed contract address.
/// Panics if `init` has not been called.
pub fn read_price_feed(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::PriceFeed)
        .expect("contract not initialized")
}

/// Retrieve the held-asset token contract address.
/// Panics if `init` has not been called.
pub fn read_asset(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Asset)
        .expect("contract not initialized")
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key, if present.
fn bump_persistent(env: &Env, key: &DataKey) {
    if env.storage().persistent().has(key) {
        env.storage()
            .persistent()
            .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    }
}

/// Cumulative amount funded by `funder` since the last withdrawal.
/// Absent entries read as zero.
pub fn read_funded_amount(env: &Env, funder: &Address) -> i128 {
    let key = DataKey::FundedAmount(funder.clone());
    let amount = env.storage().persistent().get(&key).unwrap_or(0);
    bump_persistent(env, &key);
    amount
}

/// Add `amount` to the funder's cumulative contribution.
pub fn add_funded_amount(env: &Env, funder: &Address, amount: i128) {
    let key = DataKey::FundedAmount(funder.clone());
    let current: i128 = env.storage().persistent().get(&key).unwrap_or(0);
    env.storage().persistent().set(&key, &(current + amount));
    bump_persistent(env, &key);
}

/// Reset the funder's cumulative contribution to zero.
/// Removing the key is equivalent: absent entries read as zero.
pub fn clear_funded_amount(env: &Env, funder: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::FundedAmount(funder.clone()));
}

/// The full funder log. Empty before the first `fund` call and after
/// every withdrawal.
pub fn read_funders(env: &Env) -> Vec<Address> {
    let key = DataKey::Funders;
    let funders = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| vec![env]);
    bump_persistent(env, &key);
    funders
}

/// Number of entries in the funder log (repeats included).
pub fn funders_len(env: &Env) -> u32 {
    read_funders(env).len()
}

/// Append `funder` to the log. No dedup: one entry per successful `fund`.
pub fn push_funder(env: &Env, funder: &Address) {
    let key = DataKey::Funders;
    let mut funders = read_funders(env);
    funders.push_back(funder.clone());
    env.storage().persistent().set(&key, &funders);
    bump_persistent(env, &key);
}

/// Empty the funder log.
pub fn clear_funders(env: &Env) {
    env.storage().persistent().remove(&DataKey::Funders);
}
