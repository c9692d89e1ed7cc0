//! Append-only catalog of contested positions.

use soroban_sdk::{contracttype, symbol_short, Env, String, Symbol, Vec};

const POS: Symbol = symbol_short!("POS");
const POS_LST: Symbol = symbol_short!("POS_LST");

const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub name: String,
    pub added_at: u64,
}

fn pos_key(name: &String) -> (Symbol, String) {
    (POS, name.clone())
}

pub(crate) fn exists(env: &Env, name: &String) -> bool {
    env.storage().persistent().has(&pos_key(name))
}

pub(crate) fn all(env: &Env) -> Vec<Position> {
    env.storage()
        .persistent()
        .get(&POS_LST)
        .unwrap_or(Vec::new(env))
}

pub(crate) fn count(env: &Env) -> u32 {
    all(env).len()
}

/// Append every name in `names` that is not already present.
///
/// Returns the names actually added, in input order.
pub(crate) fn append_new(env: &Env, names: &Vec<String>, now: u64) -> Vec<String> {
    let mut catalog = all(env);
    let mut added = Vec::new(env);

    for name in names.iter() {
        let key = pos_key(&name);
        if env.storage().persistent().has(&key) {
            continue;
        }
        env.storage().persistent().set(&key, &true);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
        catalog.push_back(Position {
            name: name.clone(),
            added_at: now,
        });
        added.push_back(name);
    }

    if !added.is_empty() {
        env.storage().persistent().set(&POS_LST, &catalog);
        env.storage()
            .persistent()
            .extend_ttl(&POS_LST, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    added
}
