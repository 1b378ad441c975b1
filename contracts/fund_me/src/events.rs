//! Contract events consumed by the off-chain indexer
//! (`backend/indexer/src/events.rs` mirrors these shapes).

use soroban_sdk::{contracttype, symbol_short, Address, Env};

/// Data payload of the `funded` event.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractFunded {
    pub funder: Address,
    pub amount: i128,
}

/// Data payload of the `withdrawn` event.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsWithdrawn {
    pub to: Address,
    pub amount: i128,
    /// Funder-log entries cleared by this withdrawal (repeats included).
    pub funders_cleared: u32,
}

/// Topics: `("funded", funder)`.
pub fn funded(env: &Env, funder: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("funded"), funder.clone()),
        ContractFunded {
            funder: funder.clone(),
            amount,
        },
    );
}

/// Topics: `("withdrawn",)`.
pub fn withdrawn(env: &Env, to: &Address, amount: i128, funders_cleared: u32) {
    env.events().publish(
        (symbol_short!("withdrawn"),),
        FundsWithdrawn {
            to: to.clone(),
            amount,
            funders_cleared,
        },
    );
}
