//! Deterministic operation-sequence test: drives the contract with a
//! pseudo-random mix of funds and withdrawals and checks every step
//! against an in-memory model of the ledger.

extern crate std;

use std::vec::Vec;

use soroban_sdk::{testutils::Address as _, token, Address, Env};

use crate::price_feed::mock::{MockPriceFeed, MockPriceFeedClient};
use crate::{Error, FundMe, FundMeClient};

const DECIMALS: u32 = 8;
const INITIAL_PRICE: i128 = 2_000_0000_0000;

/// Candidate amounts. At the fixed rate, everything from 250_000 base
/// units (exactly 50 USD) upward must succeed; smaller must be rejected.
const AMOUNTS: [i128; 5] = [0, 100_000, 250_000, 10_000_000, 25_000_000];
const MIN_ACCEPTED: i128 = 250_000;

struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 32
    }
}

#[test]
fn random_op_sequence_matches_model() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(FundMe, ());
    let client = FundMeClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    let asset_admin = Address::generate(&env);
    let asset_id = env.register_stellar_asset_contract_v2(asset_admin);
    let asset = token::Client::new(&env, &asset_id.address());
    let asset_sac = token::StellarAssetClient::new(&env, &asset_id.address());

    let feed_id = env.register(MockPriceFeed, ());
    MockPriceFeedClient::new(&env, &feed_id).init(&DECIMALS, &INITIAL_PRICE);

    client.init(&owner, &asset_id.address(), &feed_id);

    let funders: Vec<Address> = (0..4)
        .map(|_| {
            let funder = Address::generate(&env);
            asset_sac.mint(&funder, &(1_000 * 10_000_000i128));
            funder
        })
        .collect();
    let attacker = Address::generate(&env);

    // Model state.
    let mut model_amounts: Vec<i128> = std::vec![0; funders.len()];
    let mut model_log_len: u32 = 0;
    let mut model_held: i128 = 0;

    let mut rng = Lcg(0x5eed_f00d);
    let mut use_cheaper = false;

    for _ in 0..200 {
        let roll = rng.next() % 12;
        if roll == 0 {
            // Owner withdraws; model resets.
            if use_cheaper {
                client.cheaper_withdraw(&owner);
            } else {
                client.withdraw(&owner);
            }
            use_cheaper = !use_cheaper;
            model_amounts.iter_mut().for_each(|a| *a = 0);
            model_log_len = 0;
            model_held = 0;
            assert_eq!(
                client.try_get_funder(&0),
                Err(Ok(Error::IndexOutOfRange.into()))
            );
        } else if roll == 1 {
            // Attacker withdrawal must bounce without touching state.
            assert_eq!(client.try_withdraw(&attacker), Err(Ok(Error::NotOwner.into())));
        } else {
            let who = (rng.next() as usize) % funders.len();
            let amount = AMOUNTS[(rng.next() as usize) % AMOUNTS.len()];
            if amount >= MIN_ACCEPTED {
                client.fund(&funders[who], &amount);
                model_amounts[who] += amount;
                model_log_len += 1;
                model_held += amount;
            } else {
                assert_eq!(
                    client.try_fund(&funders[who], &amount),
                    Err(Ok(Error::InsufficientContribution.into()))
                );
            }
        }

        // Contract state must track the model after every operation.
        assert_eq!(asset.balance(&client.address), model_held);
        assert_eq!(client.get_funders_count(), model_log_len);
        for (i, funder) in funders.iter().enumerate() {
            assert_eq!(client.get_address_to_amount_funded(funder), model_amounts[i]);
        }
        assert_eq!(client.get_owner(), owner);
    }
}
