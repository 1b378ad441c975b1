#![allow(dead_code)]

extern crate std;

use soroban_sdk::{token, Address, Env, Vec};

use crate::FundMeClient;

/// INV-1: The contract's token balance equals the sum of all funded
/// amounts. Funds are never created, destroyed, or misattributed.
pub fn assert_conservation(env: &Env, client: &FundMeClient, funders: &[Address]) {
    let asset = token::Client::new(env, &client.get_asset());
    let held = asset.balance(&client.address);

    let mut sum: i128 = 0;
    let mut seen: std::vec::Vec<Address> = std::vec::Vec::new();
    for funder in funders {
        if !seen.contains(funder) {
            sum += client.get_address_to_amount_funded(funder);
            seen.push(funder.clone());
        }
    }

    assert_eq!(
        held, sum,
        "INV-1 violated: contract holds {held} but the ledger sums to {sum}"
    );
}

/// INV-2: Owner never changes after init.
pub fn assert_owner_unchanged(client: &FundMeClient, expected: &Address) {
    assert_eq!(
        &client.get_owner(),
        expected,
        "INV-2 violated: owner changed after init"
    );
}

/// INV-3: After a successful withdrawal the books are fully reset — zero
/// balance, zero per-funder amounts, empty funder log.
pub fn assert_full_reset(env: &Env, client: &FundMeClient, prior_funders: &[Address]) {
    let asset = token::Client::new(env, &client.get_asset());
    assert_eq!(
        asset.balance(&client.address),
        0,
        "INV-3 violated: balance nonzero after withdrawal"
    );
    for funder in prior_funders {
        assert_eq!(
            client.get_address_to_amount_funded(funder),
            0,
            "INV-3 violated: funded amount survived withdrawal"
        );
    }
    assert_eq!(
        client.get_funders_count(),
        0,
        "INV-3 violated: funder log non-empty after withdrawal"
    );
}

/// INV-4: The funder log only ever grows between withdrawals.
pub fn assert_log_monotonic(len_before: u32, len_after: u32) {
    assert!(
        len_after >= len_before,
        "INV-4 violated: funder log shrank from {len_before} to {len_after} without a withdrawal"
    );
}

/// INV-5: Funding invariant — a successful `fund` of `amount` grows the
/// funder's cumulative amount by exactly `amount`.
pub fn assert_fund_invariant(amount_before: i128, amount_after: i128, amount: i128) {
    assert_eq!(
        amount_after,
        amount_before + amount,
        "INV-5 violated: {amount_before} + {amount} != {amount_after}"
    );
}

/// Snapshot of every externally observable piece of contract state, used
/// by the withdraw/cheaper_withdraw equivalence checks.
#[derive(Debug, PartialEq, Eq)]
pub struct StateSnapshot {
    pub balance: i128,
    pub funders: std::vec::Vec<Address>,
    pub amounts: std::vec::Vec<i128>,
}

pub fn snapshot(env: &Env, client: &FundMeClient, funders: &[Address]) -> StateSnapshot {
    let asset = token::Client::new(env, &client.get_asset());
    let log: Vec<Address> = {
        let mut out = soroban_sdk::vec![env];
        for i in 0..client.get_funders_count() {
            out.push_back(client.get_funder(&i));
        }
        out
    };
    StateSnapshot {
        balance: asset.balance(&client.address),
        funders: log.iter().collect(),
        amounts: funders
            .iter()
            .map(|f| client.get_address_to_amount_funded(f))
            .collect(),
    }
}
