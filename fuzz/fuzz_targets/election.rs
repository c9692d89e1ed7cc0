#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    Address, Env, String, Vec,
};
use voting::{ElectionConfig, ElectionPhase, VotingContract, VotingContractClient};

const POSITIONS: [&str; 3] = ["Mayor", "Governor", "Senator"];

/// Every state-changing entry point. Indices are reduced modulo small pools
/// so that duplicates and double votes are common.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    AddPosition { position: u8 },
    StartRegistration,
    OpenVoting { days: u8 },
    EndVoting,
    RegisterVoter { id: u8, age: u8 },
    RegisterCandidate { id: u8, position: u8 },
    Verify { id: u8, as_owner: bool },
    Reject { id: u8 },
    Vote { position: u8, index: u8 },
    AdvanceTime { delta: u16 },
}

fuzz_target!(|input: (bool, bool, std::vec::Vec<FuzzAction>)| {
    let (gate_positions, enforce_deadline, actions) = input;

    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let contract_id = env.register(VotingContract, ());
    let client = VotingContractClient::new(&env, &contract_id);

    let config = ElectionConfig {
        gate_positions_on_phase: gate_positions,
        enforce_voting_deadline: enforce_deadline,
        ..ElectionConfig::default()
    };
    if client.try_initialize(&owner, &config).is_err() {
        return;
    }

    let users: std::vec::Vec<Address> = (0..5).map(|_| Address::generate(&env)).collect();
    let text = |s: &str| String::from_str(&env, s);
    let id_text = |id: u8| String::from_str(&env, &std::format!("ID-{}", id % 8));

    let mut last_phase = ElectionPhase::NotStarted;
    let mut last_ballots = 0u32;
    let mut frozen_rosters: Option<std::vec::Vec<u32>> = None;

    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::AddPosition { position } => {
                let mut names = Vec::new(&env);
                names.push_back(text(POSITIONS[position as usize % POSITIONS.len()]));
                let _ = client.try_add_positions(&owner, &names);
            }
            FuzzAction::StartRegistration => {
                let _ = client.try_start_registration(&owner);
            }
            FuzzAction::OpenVoting { days } => {
                let _ = client.try_end_registration_start_voting(&owner, &(days as u32));
            }
            FuzzAction::EndVoting => {
                let _ = client.try_end_voting(&owner);
            }
            FuzzAction::RegisterVoter { id, age } => {
                let _ = client.try_register_voter(caller, &text("Voter"), &(age as u32), &id_text(id));
            }
            FuzzAction::RegisterCandidate { id, position } => {
                let _ = client.try_register_candidate(
                    caller,
                    &text("Candidate"),
                    &30,
                    &id_text(id),
                    &text("Party"),
                    &text(POSITIONS[position as usize % POSITIONS.len()]),
                );
            }
            FuzzAction::Verify { id, as_owner } => {
                let who = if as_owner { &owner } else { caller };
                let _ = client.try_verify_candidate(who, &id_text(id));
            }
            FuzzAction::Reject { id } => {
                let _ = client.try_reject_candidate(&owner, &id_text(id));
            }
            FuzzAction::Vote { position, index } => {
                let _ = client.try_vote(
                    caller,
                    &text(POSITIONS[position as usize % POSITIONS.len()]),
                    &(index as u32 % 4),
                );
            }
            FuzzAction::AdvanceTime { delta } => {
                let ts = env.ledger().timestamp().saturating_add(delta as u64 * 60);
                env.ledger().set_timestamp(ts);
            }
        }

        // ── Post-action invariant checks ──
        let phase = client.phase();
        assert!(phase >= last_phase, "INVARIANT VIOLATION: phase went backwards");
        last_phase = phase;

        let mut ballots = 0u32;
        for p in client.get_all_positions().iter() {
            let results = client.get_results(&p.name);
            let mut sum = 0u32;
            for t in results.tallies.iter() {
                assert!(t.verified || t.votes == 0, "INVARIANT VIOLATION: unverified candidate holds votes");
                sum += t.votes;
            }
            assert_eq!(sum, results.total_votes, "INVARIANT VIOLATION: tally != ballots");
            ballots += results.total_votes;
        }
        assert!(ballots >= last_ballots, "INVARIANT VIOLATION: ballots decreased");
        if phase >= ElectionPhase::Voting {
            let rosters: std::vec::Vec<u32> = POSITIONS
                .iter()
                .map(|p| client.get_candidates_for_position(&text(p)).len())
                .collect();
            if let Some(frozen) = &frozen_rosters {
                assert_eq!(frozen, &rosters, "INVARIANT VIOLATION: roster changed during voting");
            }
            frozen_rosters = Some(rosters);
        }
        if phase < ElectionPhase::Voting {
            assert_eq!(ballots, 0, "INVARIANT VIOLATION: ballots before voting");
        }
        last_ballots = ballots;

        let mut balances = client.balance_of(&owner);
        for u in &users {
            balances += client.balance_of(u);
        }
        assert_eq!(balances, client.total_supply(), "INVARIANT VIOLATION: supply != balances");
    }
});
