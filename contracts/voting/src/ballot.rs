//! Voted flags and per-position ballot counters.
//!
//! A flag `(VOTED, voter, position)` is written exactly once, in the same
//! invocation that increments the chosen candidate's tally, so for every
//! position `Σ candidate.votes == ballots_cast(position)`.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol, Vec};

const VOTED: Symbol = symbol_short!("VOTED");
const BALLOTS: Symbol = symbol_short!("BALLOTS");

// TTL: ~30 days
const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 1_036_800;

/// One candidate's line in a results table.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CandidateTally {
    pub index: u32,
    pub id_number: String,
    pub names: String,
    pub party: String,
    pub verified: bool,
    pub votes: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionResults {
    pub position: String,
    pub total_votes: u32,
    /// Candidates in ballot order.
    pub tallies: Vec<CandidateTally>,
}

fn voted_key(voter: &Address, position: &String) -> (Symbol, Address, String) {
    (VOTED, voter.clone(), position.clone())
}

fn ballots_key(position: &String) -> (Symbol, String) {
    (BALLOTS, position.clone())
}

pub(crate) fn has_voted(env: &Env, voter: &Address, position: &String) -> bool {
    env.storage().persistent().has(&voted_key(voter, position))
}

pub(crate) fn ballots_cast(env: &Env, position: &String) -> u32 {
    env.storage()
        .persistent()
        .get(&ballots_key(position))
        .unwrap_or(0)
}

/// Mark `(voter, position)` as voted and bump the position's ballot counter.
pub(crate) fn record(env: &Env, voter: &Address, position: &String, ballots: u32) {
    let key = voted_key(voter, position);
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

    let key = ballots_key(position);
    env.storage().persistent().set(&key, &ballots);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
