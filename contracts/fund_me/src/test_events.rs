extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    token, vec, Address, Env, IntoVal, TryIntoVal,
};

use crate::events::{ContractFunded, FundsWithdrawn};
use crate::price_feed::mock::{MockPriceFeed, MockPriceFeedClient};
use crate::{FundMe, FundMeClient};

const DECIMALS: u32 = 8;
const INITIAL_PRICE: i128 = 2_000_0000_0000;
const SEND_VALUE: i128 = 10_000_000;

fn setup_with_init() -> (
    Env,
    FundMeClient<'static>,
    Address,
    token::StellarAssetClient<'static>,
) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(FundMe, ());
    let client = FundMeClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    let asset_admin = Address::generate(&env);
    let asset = env.register_stellar_asset_contract_v2(asset_admin);
    let asset_sac = token::StellarAssetClient::new(&env, &asset.address());

    let feed_id = env.register(MockPriceFeed, ());
    let feed = MockPriceFeedClient::new(&env, &feed_id);
    feed.init(&DECIMALS, &INITIAL_PRICE);

    client.init(&owner, &asset.address(), &feed_id);
    (env, client, owner, asset_sac)
}

#[test]
fn funded_event_carries_funder_and_amount() {
    let (env, client, _, asset_sac) = setup_with_init();
    let funder = Address::generate(&env);
    asset_sac.mint(&funder, &SEND_VALUE);

    client.fund(&funder, &SEND_VALUE);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("funded"), funder)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("funded").into_val(&env),
        funder.clone().into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    // Data: ContractFunded struct
    let event_data: ContractFunded = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ContractFunded {
            funder: funder.clone(),
            amount: SEND_VALUE,
        }
    );
}

#[test]
fn withdrawn_event_reports_payout_and_cleared_entries() {
    let (env, client, owner, asset_sac) = setup_with_init();
    let funder_a = Address::generate(&env);
    let funder_b = Address::generate(&env);
    asset_sac.mint(&funder_a, &(2 * SEND_VALUE));
    asset_sac.mint(&funder_b, &SEND_VALUE);

    client.fund(&funder_a, &SEND_VALUE);
    client.fund(&funder_b, &SEND_VALUE);
    client.fund(&funder_a, &SEND_VALUE);

    client.withdraw(&owner);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("withdrawn"),)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![&env, symbol_short!("withdrawn").into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    // Data: FundsWithdrawn struct — three log entries, two distinct funders.
    let event_data: FundsWithdrawn = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        FundsWithdrawn {
            to: owner.clone(),
            amount: 3 * SEND_VALUE,
            funders_cleared: 3,
        }
    );
}

#[test]
fn cheaper_withdraw_emits_the_same_event_shape() {
    let (env, client, owner, asset_sac) = setup_with_init();
    let funder = Address::generate(&env);
    asset_sac.mint(&funder, &SEND_VALUE);
    client.fund(&funder, &SEND_VALUE);

    client.cheaper_withdraw(&owner);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![&env, symbol_short!("withdrawn").into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: FundsWithdrawn = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        FundsWithdrawn {
            to: owner,
            amount: SEND_VALUE,
            funders_cleared: 1,
        }
    );
}
