//! Candidate registry and per-position rosters.
//!
//! Each position keeps a roster: the ids of its candidates in registration
//! order. A ballot's `candidate_index` is an index into that roster.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol, Vec};

const CAND: Symbol = symbol_short!("CAND");
const CAND_LST: Symbol = symbol_short!("CAND_LST");
const ROSTER: Symbol = symbol_short!("ROSTER");

const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Candidate {
    pub names: String,
    pub age: u32,
    /// Must match the `id_number` of a registered voter.
    pub id_number: String,
    pub party: String,
    pub position: String,
    pub verified: bool,
    pub votes: u32,
    /// Wallet that submitted the registration.
    pub registered_by: Address,
    pub registered_at: u64,
}

fn cand_key(id_number: &String) -> (Symbol, String) {
    (CAND, id_number.clone())
}

fn roster_key(position: &String) -> (Symbol, String) {
    (ROSTER, position.clone())
}

pub(crate) fn load(env: &Env, id_number: &String) -> Option<Candidate> {
    env.storage().persistent().get(&cand_key(id_number))
}

pub(crate) fn exists(env: &Env, id_number: &String) -> bool {
    env.storage().persistent().has(&cand_key(id_number))
}

/// Overwrite an existing candidate record.
pub(crate) fn store(env: &Env, candidate: &Candidate) {
    let key = cand_key(&candidate.id_number);
    env.storage().persistent().set(&key, candidate);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn ids(env: &Env) -> Vec<String> {
    env.storage()
        .persistent()
        .get(&CAND_LST)
        .unwrap_or(Vec::new(env))
}

pub(crate) fn roster(env: &Env, position: &String) -> Vec<String> {
    env.storage()
        .persistent()
        .get(&roster_key(position))
        .unwrap_or(Vec::new(env))
}

fn store_ids(env: &Env, ids: &Vec<String>) {
    env.storage().persistent().set(&CAND_LST, ids);
    env.storage()
        .persistent()
        .extend_ttl(&CAND_LST, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn store_roster(env: &Env, position: &String, roster: &Vec<String>) {
    let key = roster_key(position);
    env.storage().persistent().set(&key, roster);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Insert a new candidate and append it to its position's roster.
///
/// Returns the candidate's roster index.
pub(crate) fn insert(env: &Env, candidate: &Candidate) -> u32 {
    store(env, candidate);

    let mut all = ids(env);
    all.push_back(candidate.id_number.clone());
    store_ids(env, &all);

    let mut slots = roster(env, &candidate.position);
    let index = slots.len();
    slots.push_back(candidate.id_number.clone());
    store_roster(env, &candidate.position, &slots);
    index
}

/// Delete a candidate record and its roster slot.
pub(crate) fn remove(env: &Env, candidate: &Candidate) {
    env.storage()
        .persistent()
        .remove(&cand_key(&candidate.id_number));

    let mut all = ids(env);
    if let Some(i) = all.first_index_of(&candidate.id_number) {
        all.remove(i);
        store_ids(env, &all);
    }

    let mut slots = roster(env, &candidate.position);
    if let Some(i) = slots.first_index_of(&candidate.id_number) {
        slots.remove(i);
        store_roster(env, &candidate.position, &slots);
    }
}

pub(crate) fn all(env: &Env) -> Vec<Candidate> {
    let mut out = Vec::new(env);
    for id in ids(env).iter() {
        if let Some(c) = load(env, &id) {
            out.push_back(c);
        }
    }
    out
}

/// Candidates standing for `position`, in ballot order.
pub(crate) fn for_position(env: &Env, position: &String) -> Vec<Candidate> {
    let mut out = Vec::new(env);
    for id in roster(env, position).iter() {
        if let Some(c) = load(env, &id) {
            out.push_back(c);
        }
    }
    out
}
