//! Voter registry, keyed both by wallet and by government ID.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol, Vec};

const VOTER: Symbol = symbol_short!("VOTER");
const VOTER_ID: Symbol = symbol_short!("VOTER_ID");
const VOTER_LST: Symbol = symbol_short!("VTR_LST");

// TTL: ~60 days at 5s/ledger
const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Voter {
    pub names: String,
    pub age: u32,
    /// Self-reported unique identifier (e.g. national ID number).
    pub id_number: String,
    pub wallet: Address,
    pub registered_at: u64,
}

fn voter_key(wallet: &Address) -> (Symbol, Address) {
    (VOTER, wallet.clone())
}

fn id_key(id_number: &String) -> (Symbol, String) {
    (VOTER_ID, id_number.clone())
}

pub(crate) fn load(env: &Env, wallet: &Address) -> Option<Voter> {
    env.storage().persistent().get(&voter_key(wallet))
}

pub(crate) fn load_by_id(env: &Env, id_number: &String) -> Option<Voter> {
    let wallet: Address = env.storage().persistent().get(&id_key(id_number))?;
    load(env, &wallet)
}

pub(crate) fn exists(env: &Env, wallet: &Address) -> bool {
    env.storage().persistent().has(&voter_key(wallet))
}

pub(crate) fn id_taken(env: &Env, id_number: &String) -> bool {
    env.storage().persistent().has(&id_key(id_number))
}

pub(crate) fn wallets(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&VOTER_LST)
        .unwrap_or(Vec::new(env))
}

/// Insert a new voter under both keys and append it to the registry list.
///
/// Uniqueness is checked by the caller.
pub(crate) fn insert(env: &Env, voter: &Voter) {
    let key = voter_key(&voter.wallet);
    env.storage().persistent().set(&key, voter);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

    let key = id_key(&voter.id_number);
    env.storage().persistent().set(&key, &voter.wallet);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

    let mut all = wallets(env);
    all.push_back(voter.wallet.clone());
    env.storage().persistent().set(&VOTER_LST, &all);
    env.storage()
        .persistent()
        .extend_ttl(&VOTER_LST, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn all(env: &Env) -> Vec<Voter> {
    let mut out = Vec::new(env);
    for wallet in wallets(env).iter() {
        if let Some(v) = load(env, &wallet) {
            out.push_back(v);
        }
    }
    out
}
