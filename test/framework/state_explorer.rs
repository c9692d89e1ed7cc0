//! # State Space Explorer
//!
//! Replays election action sequences against a harness and verifies state
//! and transition invariants after every step.
//!
//! ## Complexity
//!
//! - Time: O(S × (I + T) × N) where S = steps, I and T = state and
//!   transition invariants, N = snapshot size. Bounded by `max_steps`.
//! - Space: O(S × N) when snapshots are recorded, O(N) otherwise.

extern crate std;

use core::fmt::Debug;

use soroban_sdk::Address;
use std::string::String;
use std::vec::Vec;
use voting::ContractError;

use super::generators::{id_number, position_name, ElectionAction};
use super::invariants::{InvariantSet, TransitionInvariantSet};
use super::{ActionOutcome, ElectionSnapshot, ElectionTestHarness, TestRunSummary};

// ── Explorer Configuration ───────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    pub max_steps: usize,
    /// Halt on the first invariant violation.
    pub fail_fast: bool,
    pub record_snapshots: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            max_steps: 100,
            fail_fast: true,
            record_snapshots: false,
        }
    }
}

// ── Exploration Result ───────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ExplorationResult {
    pub summary: TestRunSummary,
    pub snapshots: Vec<ElectionSnapshot>,
    pub action_log: Vec<(ElectionAction, ActionOutcome)>,
}

impl ExplorationResult {
    pub fn passed(&self) -> bool {
        self.summary.passed()
    }

    /// Contract error codes returned by `entry_point`, in order.
    pub fn errors_for(&self, entry_point: &str) -> Vec<u32> {
        self.action_log
            .iter()
            .filter(|(a, _)| action_entry_point(a) == entry_point)
            .filter_map(|(_, o)| match o {
                ActionOutcome::ExpectedError(code) => Some(*code),
                _ => None,
            })
            .collect()
    }
}

// ── State Space Explorer ─────────────────────────────────────────────────────

/// Executes action sequences against the Voting contract, checking invariants
/// after every transition.
pub struct StateExplorer<'a> {
    harness: &'a ElectionTestHarness<'a>,
    invariants: InvariantSet,
    transitions: TransitionInvariantSet,
    config: ExplorerConfig,
    users: Vec<Address>,
}

impl<'a> StateExplorer<'a> {
    pub fn new(
        harness: &'a ElectionTestHarness<'a>,
        invariants: InvariantSet,
        transitions: TransitionInvariantSet,
        config: ExplorerConfig,
        users: Vec<Address>,
    ) -> Self {
        Self {
            harness,
            invariants,
            transitions,
            config,
            users,
        }
    }

    /// Explorer with the default configuration and every built-in invariant.
    pub fn with_defaults(harness: &'a ElectionTestHarness<'a>, users: Vec<Address>) -> Self {
        Self::new(
            harness,
            InvariantSet::election_defaults(),
            TransitionInvariantSet::election_defaults(),
            ExplorerConfig::default(),
            users,
        )
    }

    /// Execute a sequence of actions, checking invariants after each.
    pub fn explore(&mut self, actions: &[ElectionAction]) -> ExplorationResult {
        let mut summary = TestRunSummary::new();
        let mut snapshots = Vec::new();
        let mut action_log = Vec::new();

        let mut previous = self.harness.snapshot();
        if self.config.record_snapshots {
            snapshots.push(previous.clone());
        }

        let steps = actions.len().min(self.config.max_steps);

        for action in actions.iter().take(steps) {
            let outcome = self.execute_action(action);
            summary.entry_points_hit.insert(action_entry_point(action).into());
            summary.actions_executed += 1;
            match &outcome {
                ActionOutcome::Ok => summary.actions_succeeded += 1,
                ActionOutcome::ExpectedError(_) => {}
                ActionOutcome::UnexpectedError(msg) => summary.unexpected_errors.push(
                    std::format!("action #{} ({:?}): {}", summary.actions_executed, action, msg),
                ),
            }
            action_log.push((action.clone(), outcome));

            let snapshot = self.harness.snapshot();
            if snapshot.phase != previous.phase {
                summary.transitions_observed += 1;
            }

            let mut violations = self.invariants.check_all(&snapshot);
            violations.extend(self.transitions.check_all(&previous, &snapshot));
            summary.invariant_checks += 1;

            let failed = !violations.is_empty();
            for (name, msg) in violations {
                summary.invariant_violations.push(std::format!(
                    "After action #{} ({:?}): [{}] {}",
                    summary.actions_executed,
                    action,
                    name,
                    msg
                ));
            }

            if self.config.record_snapshots {
                snapshots.push(snapshot.clone());
            }
            if failed && self.config.fail_fast {
                break;
            }
            previous = snapshot;
        }

        ExplorationResult {
            summary,
            snapshots,
            action_log,
        }
    }

    fn user(&self, index: usize) -> &Address {
        &self.users[index % self.users.len()]
    }

    fn execute_action(&mut self, action: &ElectionAction) -> ActionOutcome {
        let h = self.harness;
        let env = &h.env;
        match action {
            ElectionAction::AddPositions { position_indices } => {
                let names: Vec<&str> = position_indices.iter().map(|i| position_name(*i)).collect();
                outcome(h.client.try_add_positions(&h.owner, &env.text_vec(&names)))
            }
            ElectionAction::StartRegistration => {
                outcome(h.client.try_start_registration(&h.owner))
            }
            ElectionAction::OpenVoting { days } => {
                outcome(h.client.try_end_registration_start_voting(&h.owner, days))
            }
            ElectionAction::EndVoting => outcome(h.client.try_end_voting(&h.owner)),
            ElectionAction::RegisterVoter {
                user_index,
                id_index,
                age,
            } => {
                let id = id_number(*id_index);
                outcome(h.client.try_register_voter(
                    self.user(*user_index),
                    &env.text(&std::format!("Voter {}", id)),
                    age,
                    &env.text(&id),
                ))
            }
            ElectionAction::RegisterCandidate {
                id_index,
                position_index,
            } => {
                let id = id_number(*id_index);
                outcome(h.client.try_register_candidate(
                    &h.owner,
                    &env.text(&std::format!("Candidate {}", id)),
                    &30,
                    &env.text(&id),
                    &env.text("Independent"),
                    &env.text(position_name(*position_index)),
                ))
            }
            ElectionAction::VerifyCandidate { id_index } => outcome(
                h.client
                    .try_verify_candidate(&h.owner, &env.text(&id_number(*id_index))),
            ),
            ElectionAction::RejectCandidate { id_index } => outcome(
                h.client
                    .try_reject_candidate(&h.owner, &env.text(&id_number(*id_index))),
            ),
            ElectionAction::Vote {
                user_index,
                position_index,
                candidate_index,
            } => outcome(h.client.try_vote(
                self.user(*user_index),
                &env.text(position_name(*position_index)),
                candidate_index,
            )),
            ElectionAction::AdvanceTime { delta } => {
                env.advance_time(*delta);
                ActionOutcome::Ok
            }
            ElectionAction::StrangerVerify {
                user_index,
                id_index,
            } => outcome(h.client.try_verify_candidate(
                self.user(*user_index),
                &env.text(&id_number(*id_index)),
            )),
        }
    }
}

/// Fold a `try_*` client result into an [`ActionOutcome`].
fn outcome<T, C: Debug, I: Debug>(
    result: Result<Result<T, C>, Result<ContractError, I>>,
) -> ActionOutcome {
    match result {
        Ok(Ok(_)) => ActionOutcome::Ok,
        Ok(Err(e)) => ActionOutcome::UnexpectedError(std::format!("conversion: {:?}", e)),
        Err(Ok(e)) => ActionOutcome::ExpectedError(e as u32),
        Err(Err(e)) => ActionOutcome::UnexpectedError(std::format!("{:?}", e)),
    }
}

/// Map an action to the entry point it exercises.
pub fn action_entry_point(action: &ElectionAction) -> &'static str {
    match action {
        ElectionAction::AddPositions { .. } => "add_positions",
        ElectionAction::StartRegistration => "start_registration",
        ElectionAction::OpenVoting { .. } => "end_registration_start_voting",
        ElectionAction::EndVoting => "end_voting",
        ElectionAction::RegisterVoter { .. } => "register_voter",
        ElectionAction::RegisterCandidate { .. } => "register_candidate",
        ElectionAction::VerifyCandidate { .. } | ElectionAction::StrangerVerify { .. } => {
            "verify_candidate"
        }
        ElectionAction::RejectCandidate { .. } => "reject_candidate",
        ElectionAction::Vote { .. } => "vote",
        ElectionAction::AdvanceTime { .. } => "advance_time",
    }
}

/// State-changing entry points, for coverage calculation.
pub const ELECTION_ENTRY_POINTS: &[&str] = &[
    "add_positions",
    "start_registration",
    "end_registration_start_voting",
    "end_voting",
    "register_voter",
    "register_candidate",
    "verify_candidate",
    "reject_candidate",
    "vote",
];
