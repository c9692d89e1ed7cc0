//! Append-only on-chain log of election facts.
//!
//! Every event published by [`crate::events`] is mirrored here so indexers
//! and the front-end can page through history with plain reads. Entries are
//! numbered from 1 and never rewritten.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol, Vec};

const FACT_CTR: Symbol = symbol_short!("FACT_CTR");
const FACT: Symbol = symbol_short!("FACT");

const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

/// Upper bound on a single page returned by [`range`].
pub const MAX_PAGE: u32 = 100;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum FactKind {
    VoterRegistered = 0,
    CandidateRegistered = 1,
    CandidateVerified = 2,
    CandidateRejected = 3,
    PositionAdded = 4,
    PhaseChanged = 5,
    VoteCast = 6,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ElectionFact {
    pub seq: u64,
    pub kind: FactKind,
    /// Id number, position name or phase label depending on `kind`.
    pub subject: String,
    pub actor: Address,
    pub timestamp: u64,
}

fn fact_key(seq: u64) -> (Symbol, u64) {
    (FACT, seq)
}

pub fn count(env: &Env) -> u64 {
    env.storage().instance().get(&FACT_CTR).unwrap_or(0u64)
}

pub(crate) fn append(env: &Env, kind: FactKind, subject: String, actor: &Address) -> u64 {
    let seq = count(env).saturating_add(1);
    let fact = ElectionFact {
        seq,
        kind,
        subject,
        actor: actor.clone(),
        timestamp: env.ledger().timestamp(),
    };
    let key = fact_key(seq);
    env.storage().persistent().set(&key, &fact);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    env.storage().instance().set(&FACT_CTR, &seq);
    seq
}

/// Facts with `seq >= start`, at most `min(limit, MAX_PAGE)` of them.
pub(crate) fn range(env: &Env, start: u64, limit: u32) -> Vec<ElectionFact> {
    let mut out = Vec::new(env);
    let last = count(env);
    let mut seq = start.max(1);
    let limit = limit.min(MAX_PAGE);

    while seq <= last && out.len() < limit {
        if let Some(fact) = env.storage().persistent().get(&fact_key(seq)) {
            out.push_back(fact);
        }
        seq += 1;
    }
    out
}
