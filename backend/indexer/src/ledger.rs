//! Off-chain reconstruction of the on-chain funder ledger.
//!
//! Folds the indexed event stream into per-funder cumulative balances,
//! applying the same rules the contract enforces:
//!
//! * a `funded` event adds its amount to the funder's running total;
//! * a `withdrawn` event resets every balance and empties the funder set.
//!
//! Events must be supplied in ledger order (the DB queries already sort
//! ascending). The result matches what `get_address_to_amount_funded`
//! would return on-chain for each funder at the head of the stream.
//!
//! Decoding already guarantees that stored `funded` rows carry a funder
//! and an integer amount; a row violating that here means the database
//! was tampered with or corrupted, and the replay aborts with
//! [`IndexerError::LedgerReplay`] instead of serving wrong balances.

use std::collections::HashMap;

use serde::Serialize;

use crate::errors::{IndexerError, Result};
use crate::events::EventRecord;

/// Cumulative contribution of one funder since the last withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunderBalance {
    pub funder: String,
    /// i128 amount rendered as a decimal string, like the event payloads.
    pub amount: String,
}

/// The reconstructed ledger state at the head of the event stream.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct LedgerView {
    /// Distinct funders in first-contribution order, current round only.
    pub funders: Vec<FunderBalance>,
    /// Sum of all current balances.
    pub total: String,
    /// Number of withdrawals observed over the whole stream.
    pub withdrawals: u64,
}

/// Replay `events` into a [`LedgerView`].
pub fn replay(events: &[EventRecord]) -> Result<LedgerView> {
    let mut balances: HashMap<String, i128> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    let mut withdrawals: u64 = 0;

    for ev in events {
        match ev.event_type.as_str() {
            "funded" => {
                let actor = ev
                    .actor
                    .clone()
                    .ok_or_else(|| replay_err(ev.id, "funded row has no funder"))?;
                let amount = parse_amount(ev)?;
                if !order.contains(&actor) {
                    order.push(actor.clone());
                }
                *balances.entry(actor).or_insert(0) += amount;
            }
            "withdrawn" => {
                balances.clear();
                order.clear();
                withdrawals += 1;
            }
            _ => {}
        }
    }

    let total: i128 = balances.values().sum();
    Ok(LedgerView {
        funders: order
            .into_iter()
            .map(|funder| {
                let amount = balances.get(&funder).copied().unwrap_or(0);
                FunderBalance {
                    funder,
                    amount: amount.to_string(),
                }
            })
            .collect(),
        total: total.to_string(),
        withdrawals,
    })
}

fn parse_amount(ev: &EventRecord) -> Result<i128> {
    let raw = ev
        .amount
        .as_ref()
        .ok_or_else(|| replay_err(ev.id, "funded row has no amount"))?;
    raw.parse()
        .map_err(|_| replay_err(ev.id, "amount is not an integer"))
}

fn replay_err(event_id: i64, reason: &str) -> IndexerError {
    IndexerError::LedgerReplay {
        event_id,
        reason: reason.to_string(),
    }
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
