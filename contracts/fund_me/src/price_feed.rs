//! Price-feed oracle interface.
//!
//! FundMe reads the exchange rate from whatever contract the deployer
//! bound at `init` — a real oracle on public networks, [`MockPriceFeed`]
//! in tests. The contract trusts the feed's values; it performs no
//! validation beyond the numeric conversion in [`crate::conversion`].

use soroban_sdk::{contractclient, Env};

/// Cross-contract interface of the price feed.
///
/// `latest_price` returns the USD price of one whole asset unit scaled
/// by `10^decimals()`.
#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeed {
    fn latest_price(env: Env) -> i128;
    fn decimals(env: Env) -> u32;
}

/// Mock price feed for local testing, analogous to the aggregator mock
/// deployed on development networks. Price is settable after init so
/// tests can move the rate under the contract.
#[cfg(any(test, feature = "testutils"))]
pub mod mock {
    use soroban_sdk::{contract, contractimpl, contracttype, Env};

    #[contracttype]
    #[derive(Clone, Debug, Eq, PartialEq)]
    enum MockKey {
        Decimals,
        Price,
    }

    #[contract]
    pub struct MockPriceFeed;

    #[contractimpl]
    impl MockPriceFeed {
        /// Set the feed's decimals and starting price.
        pub fn init(env: Env, decimals: u32, initial_price: i128) {
            env.storage().instance().set(&MockKey::Decimals, &decimals);
            env.storage().instance().set(&MockKey::Price, &initial_price);
        }

        /// Replace the current price.
        pub fn set_price(env: Env, price: i128) {
            env.storage().instance().set(&MockKey::Price, &price);
        }

        pub fn latest_price(env: Env) -> i128 {
            env.storage()
                .instance()
                .get(&MockKey::Price)
                .expect("mock feed not initialized")
        }

        pub fn decimals(env: Env) -> u32 {
            env.storage()
                .instance()
                .get(&MockKey::Decimals)
                .expect("mock feed not initialized")
        }
    }
}
