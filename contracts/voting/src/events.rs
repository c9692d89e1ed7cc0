#![allow(deprecated)] // events().publish migration tracked separately

//! Structured event publishing for the Voting contract.
//!
//! Each publisher also appends the matching entry to the fact log.

use soroban_sdk::{symbol_short, Address, Env, String};

use crate::candidate::Candidate;
use crate::facts::{self, FactKind};
use crate::phase::ElectionPhase;
use crate::voter::Voter;

pub fn publish_voter_registered(env: &Env, voter: &Voter) {
    env.events().publish(
        (symbol_short!("VOTER_REG"), voter.wallet.clone()),
        (voter.names.clone(), voter.age, voter.id_number.clone()),
    );
    facts::append(
        env,
        FactKind::VoterRegistered,
        voter.id_number.clone(),
        &voter.wallet,
    );
}

pub fn publish_candidate_registered(env: &Env, candidate: &Candidate) {
    env.events().publish(
        (symbol_short!("CAND_REG"), candidate.position.clone()),
        (
            candidate.names.clone(),
            candidate.age,
            candidate.id_number.clone(),
            candidate.party.clone(),
        ),
    );
    facts::append(
        env,
        FactKind::CandidateRegistered,
        candidate.id_number.clone(),
        &candidate.registered_by,
    );
}

pub fn publish_candidate_verified(env: &Env, owner: &Address, candidate: &Candidate) {
    env.events().publish(
        (symbol_short!("CAND_VER"),),
        (candidate.names.clone(), candidate.id_number.clone()),
    );
    facts::append(
        env,
        FactKind::CandidateVerified,
        candidate.id_number.clone(),
        owner,
    );
}

pub fn publish_candidate_rejected(env: &Env, owner: &Address, candidate: &Candidate) {
    env.events().publish(
        (symbol_short!("CAND_REJ"),),
        (candidate.names.clone(), candidate.id_number.clone()),
    );
    facts::append(
        env,
        FactKind::CandidateRejected,
        candidate.id_number.clone(),
        owner,
    );
}

pub fn publish_position_added(env: &Env, owner: &Address, name: &String) {
    env.events()
        .publish((symbol_short!("POS_ADD"),), name.clone());
    facts::append(env, FactKind::PositionAdded, name.clone(), owner);
}

pub fn publish_phase_changed(
    env: &Env,
    owner: &Address,
    from: ElectionPhase,
    to: ElectionPhase,
) {
    env.events()
        .publish((symbol_short!("PHASE"),), (from, to));
    facts::append(
        env,
        FactKind::PhaseChanged,
        String::from_str(env, to.label()),
        owner,
    );
}

pub fn publish_vote_cast(env: &Env, voter: &Address, position: &String, candidate_index: u32) {
    env.events().publish(
        (symbol_short!("VOTE"), position.clone()),
        candidate_index,
    );
    facts::append(env, FactKind::VoteCast, position.clone(), voter);
}

pub fn publish_reward(env: &Env, to: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("REWARD"), to.clone()), amount);
}
