//! Global election phase.
//!
//! ```text
//! NotStarted ──► Registering ──► Voting ──► Ended
//! ```
//!
//! Transitions are forward-only and each edge is taken at most once.

use soroban_sdk::{contracttype, symbol_short, Env, Symbol};

use crate::ContractError;

const PHASE: Symbol = symbol_short!("PHASE");
const VOTE_END: Symbol = symbol_short!("VOTE_END");

pub const SECS_PER_DAY: u64 = 86_400;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ElectionPhase {
    NotStarted = 0,
    Registering = 1,
    Voting = 2,
    Ended = 3,
}

impl ElectionPhase {
    /// The single phase reachable from `self`, if any.
    pub fn successor(self) -> Option<ElectionPhase> {
        match self {
            ElectionPhase::NotStarted => Some(ElectionPhase::Registering),
            ElectionPhase::Registering => Some(ElectionPhase::Voting),
            ElectionPhase::Voting => Some(ElectionPhase::Ended),
            ElectionPhase::Ended => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ElectionPhase::NotStarted => "NotStarted",
            ElectionPhase::Registering => "Registering",
            ElectionPhase::Voting => "Voting",
            ElectionPhase::Ended => "Ended",
        }
    }
}

pub(crate) fn current(env: &Env) -> ElectionPhase {
    env.storage()
        .instance()
        .get(&PHASE)
        .unwrap_or(ElectionPhase::NotStarted)
}

pub(crate) fn set(env: &Env, phase: ElectionPhase) {
    env.storage().instance().set(&PHASE, &phase);
}

pub(crate) fn require(env: &Env, expected: ElectionPhase) -> Result<(), ContractError> {
    if current(env) != expected {
        return Err(ContractError::InvalidPhase);
    }
    Ok(())
}

/// Validate that the election sits in `from` and return the phase it moves to.
///
/// Does not write; callers commit with [`set`] once their own checks pass.
pub(crate) fn next_from(env: &Env, from: ElectionPhase) -> Result<ElectionPhase, ContractError> {
    require(env, from)?;
    from.successor().ok_or(ContractError::InvalidPhase)
}

pub(crate) fn voting_end_time(env: &Env) -> u64 {
    env.storage().instance().get(&VOTE_END).unwrap_or(0)
}

pub(crate) fn set_voting_end_time(env: &Env, end: u64) {
    env.storage().instance().set(&VOTE_END, &end);
}
