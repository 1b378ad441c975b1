//! # FundMe Contract
//!
//! This is the root crate of the **FundMe** funding contract. It exposes
//! the single Soroban contract `FundMe` whose entry points cover the full
//! funding lifecycle:
//!
//! | Phase      | Entry Point(s)                                    |
//! |------------|---------------------------------------------------|
//! | Bootstrap  | [`FundMe::init`]                                  |
//! | Funding    | [`FundMe::fund`]                                  |
//! | Withdrawal | [`FundMe::withdraw`], [`FundMe::cheaper_withdraw`] |
//! | Queries    | `get_owner`, `get_price_feed`, `get_asset`, `get_funder`, `get_address_to_amount_funded`, `get_funders_count`, `get_minimum_usd` |
//!
//! ## Architecture
//!
//! Storage access is fully delegated to [`storage`], the USD conversion to
//! [`conversion`], and the oracle interface to [`price_feed`]. This file
//! contains only the public entry points and event emissions.
//!
//! ## Withdrawal ordering
//!
//! Both withdrawal variants clear every bookkeeping entry before issuing
//! the outbound token transfer. The transfer is the last fallible step of
//! the invocation; if it fails the host rolls the whole transaction back,
//! so no caller can ever observe a paid-out contract with a non-empty
//! funder ledger or vice versa.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, token, Address, Env,
};

pub mod conversion;
pub mod price_feed;
mod events;
mod storage;

#[cfg(test)]
mod fuzz_test;
#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;

pub use events::{ContractFunded, FundsWithdrawn};
pub use price_feed::{PriceFeed, PriceFeedClient};

use conversion::MINIMUM_USD;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized       = 1,
    InsufficientContribution = 2,
    NotOwner                 = 3,
    TransferFailed           = 4,
    IndexOutOfRange          = 5,
}

#[contract]
pub struct FundMe;

#[contractimpl]
impl FundMe {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract, fixing the owner, the held asset, and the
    /// price-feed oracle.
    ///
    /// Must be called exactly once immediately after deployment.
    /// Subsequent calls panic with `Error::AlreadyInitialized`.
    ///
    /// - `owner` must sign the transaction and becomes the only identity
    ///   allowed to withdraw. Never rewritable.
    /// - `asset` is the token contract contributions are paid in (the
    ///   native-asset SAC on a real deployment).
    /// - `price_feed` is the oracle used for the minimum-USD gate.
    pub fn init(env: Env, owner: Address, asset: Address, price_feed: Address) {
        if storage::is_initialized(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        owner.require_auth();
        storage::save_init_config(&env, &owner, &asset, &price_feed);
    }

    // ─────────────────────────────────────────────────────────
    // Funding
    // ─────────────────────────────────────────────────────────

    /// Contribute `amount` base units of the held asset.
    ///
    /// The USD value of `amount` at the feed's current rate must clear
    /// [`MINIMUM_USD`]; otherwise the call panics with
    /// `Error::InsufficientContribution` and no tokens move.
    ///
    /// On success the tokens transfer from `funder` to the contract, the
    /// funder's cumulative amount grows by `amount`, and the funder is
    /// appended to the funder log (again, if already present).
    pub fn fund(env: Env, funder: Address, amount: i128) {
        funder.require_auth();

        let feed = PriceFeedClient::new(&env, &storage::read_price_feed(&env));
        let price = feed.latest_price();
        let decimals = feed.decimals();
        if !conversion::meets_minimum(price, decimals, amount) {
            panic_with_error!(&env, Error::InsufficientContribution);
        }

        // Move the tokens before touching the books; a failed transfer
        // aborts the invocation with no ledger change.
        let asset = storage::read_asset(&env);
        token::Client::new(&env, &asset).transfer(
            &funder,
            &env.current_contract_address(),
            &amount,
        );

        storage::add_funded_amount(&env, &funder, amount);
        storage::push_funder(&env, &funder);

        events::funded(&env, &funder, amount);
    }

    // ─────────────────────────────────────────────────────────
    // Withdrawal
    // ─────────────────────────────────────────────────────────

    /// Withdraw the full contract balance to the owner and reset all
    /// funder bookkeeping.
    ///
    /// `caller` must be the owner fixed at `init`; anyone else panics
    /// with `Error::NotOwner` and changes nothing.
    ///
    /// This variant re-reads the funder log from persistent storage on
    /// every loop iteration, one storage read per entry. Observable
    /// results are identical to [`FundMe::cheaper_withdraw`].
    pub fn withdraw(env: Env, caller: Address) {
        caller.require_auth();
        let owner = require_owner(&env, &caller);

        let count = storage::funders_len(&env);
        let mut i = 0u32;
        while i < count {
            let funder = storage::read_funders(&env).get_unchecked(i);
            storage::clear_funded_amount(&env, &funder);
            i += 1;
        }

        settle(&env, &owner, count);
    }

    /// Gas-lean variant of [`FundMe::withdraw`]: loads the funder log
    /// into memory once and iterates over the local copy. Same owner
    /// gate, same reset, same payout.
    pub fn cheaper_withdraw(env: Env, caller: Address) {
        caller.require_auth();
        let owner = require_owner(&env, &caller);

        let funders = storage::read_funders(&env);
        for funder in funders.iter() {
            storage::clear_funded_amount(&env, &funder);
        }

        settle(&env, &owner, funders.len());
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// The owner fixed at `init`.
    pub fn get_owner(env: Env) -> Address {
        storage::read_owner(&env)
    }

    /// The bound price-feed contract address.
    pub fn get_price_feed(env: Env) -> Address {
        storage::read_price_feed(&env)
    }

    /// The token contract the funding is held in.
    pub fn get_asset(env: Env) -> Address {
        storage::read_asset(&env)
    }

    /// The funder-log entry at `index`. Panics with
    /// `Error::IndexOutOfRange` when `index` is past the end — including
    /// index 0 right after a withdrawal, when the log is empty.
    pub fn get_funder(env: Env, index: u32) -> Address {
        match storage::read_funders(&env).get(index) {
            Some(funder) => funder,
            None => panic_with_error!(&env, Error::IndexOutOfRange),
        }
    }

    /// Cumulative amount `funder` has contributed since the last
    /// withdrawal. Zero for addresses that never funded.
    pub fn get_address_to_amount_funded(env: Env, funder: Address) -> i128 {
        storage::read_funded_amount(&env, &funder)
    }

    /// Length of the funder log, repeats included.
    pub fn get_funders_count(env: Env) -> u32 {
        storage::funders_len(&env)
    }

    /// The USD floor a single contribution must clear, at 7-decimal scale.
    pub fn get_minimum_usd(_env: Env) -> i128 {
        MINIMUM_USD
    }
}

// ─────────────────────────────────────────────────────────────
// Internal helpers
// ─────────────────────────────────────────────────────────────

/// Owner gate shared by both withdrawal variants.
fn require_owner(env: &Env, caller: &Address) -> Address {
    let owner = storage::read_owner(env);
    if *caller != owner {
        panic_with_error!(env, Error::NotOwner);
    }
    owner
}

/// Final step of a withdrawal: clear the funder log, then pay the full
/// balance out to the owner. Runs after every `FundedAmount` entry has
/// been cleared; the transfer is the only step that can still fail.
fn settle(env: &Env, owner: &Address, funders_cleared: u32) {
    storage::clear_funders(env);

    let asset_client = token::Client::new(env, &storage::read_asset(env));
    let balance = asset_client.balance(&env.current_contract_address());

    if asset_client
        .try_transfer(&env.current_contract_address(), owner, &balance)
        .is_err()
    {
        panic_with_error!(env, Error::TransferFailed);
    }

    events::withdrawn(env, owner, balance, funders_cleared);
}
