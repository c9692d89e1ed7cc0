#![no_std]

//! # Votex Voting Contract
//!
//! The on-chain ledger behind the Votex election dashboard:
//!
//! - **Phase control**: NotStarted → Registering → Voting → Ended, owner driven
//! - **Voter registry**: one voter per wallet and per government ID
//! - **Candidate registry**: per-position rosters gated by owner verification
//! - **Position catalog**: append-only, duplicates skipped
//! - **Tally**: at most one ballot per (voter, position), verified candidates only
//! - **VTKN rewards**: minted on voter registration and candidate verification
//! - **Sign-in challenge**: deterministic message hash + Ed25519 verification
//!
//! Every state-mutating entry point checks all of its preconditions before
//! the first storage write.

pub mod ballot;
pub mod candidate;
pub mod challenge;
pub mod config;
pub mod events;
pub mod facts;
pub mod phase;
pub mod position;
pub mod reward;
pub mod voter;

use soroban_sdk::{
    contract, contractimpl, log, symbol_short, Address, BytesN, Env, String, Symbol, Vec,
};

pub use ballot::{CandidateTally, PositionResults};
pub use candidate::Candidate;
pub use config::ElectionConfig;
pub use facts::{ElectionFact, FactKind};
pub use phase::ElectionPhase;
pub use position::Position;
pub use voter::Voter;

use phase::SECS_PER_DAY;

// ── Storage key constants ─────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const INITIALIZED: Symbol = symbol_short!("INIT");

/// Longest accepted name, party or position string.
pub const MAX_TEXT_LEN: u32 = 128;
/// Longest accepted government ID string.
pub const MAX_ID_LEN: u32 = 64;

// ── Error codes ───────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    InvalidConfig = 5,
    InvalidPhase = 6,
    AlreadyRegistered = 7,
    NotAVoter = 8,
    NotFound = 9,
    UnknownPosition = 10,
    InvalidCandidateIndex = 11,
    CandidateNotVerified = 12,
    AlreadyVoted = 13,
    AlreadyVerified = 14,
    InvalidAge = 15,
    VotingClosed = 16,
    Overflow = 17,
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct VotingContract;

#[contractimpl]
impl VotingContract {
    // ── Initialisation ────────────────────────────────────────────────────────

    /// Bootstrap the election.
    ///
    /// * `owner`:  the only address allowed to drive phases, add positions
    ///              and verify or reject candidates.
    /// * `config`: reward amounts, age window and policy flags.
    pub fn initialize(env: Env, owner: Address, config: ElectionConfig) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        config.validate()?;

        env.storage().instance().set(&OWNER, &owner);
        config::store(&env, &config);
        phase::set(&env, ElectionPhase::NotStarted);
        env.storage().instance().set(&INITIALIZED, &true);

        log!(&env, "election initialized", owner);
        Ok(())
    }

    /// Replace the configuration. Only allowed before registration opens.
    pub fn update_config(
        env: Env,
        caller: Address,
        config: ElectionConfig,
    ) -> Result<(), ContractError> {
        Self::require_owner(&env, &caller)?;
        phase::require(&env, ElectionPhase::NotStarted)?;
        config.validate()?;

        config::store(&env, &config);
        log!(&env, "election config updated");
        Ok(())
    }

    // ── Phase transitions ─────────────────────────────────────────────────────

    /// NotStarted → Registering.
    pub fn start_registration(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_owner(&env, &caller)?;
        Self::advance(&env, &caller, ElectionPhase::NotStarted)?;
        Ok(())
    }

    /// Registering → Voting.
    ///
    /// Records `voting_end_time = now + duration_days` days. The deadline is
    /// only enforced by `vote` when `enforce_voting_deadline` is configured.
    pub fn end_registration_start_voting(
        env: Env,
        caller: Address,
        duration_days: u32,
    ) -> Result<u64, ContractError> {
        Self::require_owner(&env, &caller)?;
        phase::require(&env, ElectionPhase::Registering)?;
        if duration_days == 0 {
            return Err(ContractError::InvalidInput);
        }

        let end = env
            .ledger()
            .timestamp()
            .checked_add((duration_days as u64).saturating_mul(SECS_PER_DAY))
            .ok_or(ContractError::Overflow)?;

        Self::advance(&env, &caller, ElectionPhase::Registering)?;
        phase::set_voting_end_time(&env, end);
        Ok(end)
    }

    /// Voting → Ended. The tally is frozen from here on.
    pub fn end_voting(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_owner(&env, &caller)?;
        Self::advance(&env, &caller, ElectionPhase::Voting)?;
        Ok(())
    }

    // ── Voter registry ────────────────────────────────────────────────────────

    /// Register the calling wallet as a voter and credit the voter reward.
    pub fn register_voter(
        env: Env,
        voter: Address,
        names: String,
        age: u32,
        id_number: String,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        voter.require_auth();
        phase::require(&env, ElectionPhase::Registering)?;

        Self::check_text(&names, MAX_TEXT_LEN)?;
        Self::check_text(&id_number, MAX_ID_LEN)?;
        let cfg = config::load(&env)?;
        cfg.check_age(age)?;

        if voter::exists(&env, &voter) || voter::id_taken(&env, &id_number) {
            return Err(ContractError::AlreadyRegistered);
        }
        let (balance, supply) = reward::prepare_mint(&env, &voter, cfg.voter_reward)?;

        let record = Voter {
            names,
            age,
            id_number,
            wallet: voter.clone(),
            registered_at: env.ledger().timestamp(),
        };
        voter::insert(&env, &record);
        events::publish_voter_registered(&env, &record);

        if cfg.voter_reward > 0 {
            reward::commit_mint(&env, &voter, balance, supply);
            events::publish_reward(&env, &voter, cfg.voter_reward);
        }
        Ok(())
    }

    // ── Candidate registry ────────────────────────────────────────────────────

    /// Put a registered voter forward as a candidate for `position`.
    ///
    /// Any wallet may submit the registration; the candidate starts
    /// unverified and cannot receive votes until the owner verifies it.
    /// Returns the candidate's index on the position's ballot.
    pub fn register_candidate(
        env: Env,
        caller: Address,
        names: String,
        age: u32,
        id_number: String,
        party: String,
        position: String,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        phase::require(&env, ElectionPhase::Registering)?;

        Self::check_text(&names, MAX_TEXT_LEN)?;
        Self::check_text(&id_number, MAX_ID_LEN)?;
        Self::check_text(&party, MAX_TEXT_LEN)?;
        config::load(&env)?.check_age(age)?;

        if !voter::id_taken(&env, &id_number) {
            return Err(ContractError::NotAVoter);
        }
        if candidate::exists(&env, &id_number) {
            return Err(ContractError::AlreadyRegistered);
        }
        if !position::exists(&env, &position) {
            return Err(ContractError::UnknownPosition);
        }

        let record = Candidate {
            names,
            age,
            id_number,
            party,
            position,
            verified: false,
            votes: 0,
            registered_by: caller,
            registered_at: env.ledger().timestamp(),
        };
        let index = candidate::insert(&env, &record);
        events::publish_candidate_registered(&env, &record);
        Ok(index)
    }

    /// Approve a candidate for the ballot and credit the verification reward
    /// to the owner.
    pub fn verify_candidate(
        env: Env,
        caller: Address,
        id_number: String,
    ) -> Result<(), ContractError> {
        let owner = Self::require_owner(&env, &caller)?;

        let mut record = candidate::load(&env, &id_number).ok_or(ContractError::NotFound)?;
        if record.verified {
            return Err(ContractError::AlreadyVerified);
        }
        let cfg = config::load(&env)?;
        let (balance, supply) = reward::prepare_mint(&env, &owner, cfg.verification_reward)?;

        record.verified = true;
        candidate::store(&env, &record);
        events::publish_candidate_verified(&env, &owner, &record);

        if cfg.verification_reward > 0 {
            reward::commit_mint(&env, &owner, balance, supply);
            events::publish_reward(&env, &owner, cfg.verification_reward);
        }
        Ok(())
    }

    /// Remove an unverified candidate. Later candidates for the same
    /// position move up one slot on the ballot, so rosters are frozen once
    /// voting opens.
    pub fn reject_candidate(
        env: Env,
        caller: Address,
        id_number: String,
    ) -> Result<(), ContractError> {
        let owner = Self::require_owner(&env, &caller)?;
        if phase::current(&env) > ElectionPhase::Registering {
            return Err(ContractError::InvalidPhase);
        }

        let record = candidate::load(&env, &id_number).ok_or(ContractError::NotFound)?;
        if record.verified {
            return Err(ContractError::AlreadyVerified);
        }

        candidate::remove(&env, &record);
        events::publish_candidate_rejected(&env, &owner, &record);
        Ok(())
    }

    // ── Position catalog ──────────────────────────────────────────────────────

    /// Append positions to the catalog.
    ///
    /// Names already in the catalog, or repeated within `names`, are skipped.
    /// An empty or oversized name rejects the whole batch. Returns the number
    /// of positions actually added.
    pub fn add_positions(
        env: Env,
        caller: Address,
        names: Vec<String>,
    ) -> Result<u32, ContractError> {
        let owner = Self::require_owner(&env, &caller)?;

        if config::load(&env)?.gate_positions_on_phase
            && phase::current(&env) > ElectionPhase::Registering
        {
            return Err(ContractError::InvalidPhase);
        }
        for name in names.iter() {
            Self::check_text(&name, MAX_TEXT_LEN)?;
        }

        let added = position::append_new(&env, &names, env.ledger().timestamp());
        for name in added.iter() {
            events::publish_position_added(&env, &owner, &name);
        }
        Ok(added.len())
    }

    // ── Ballot ────────────────────────────────────────────────────────────────

    /// Cast one ballot for the candidate at `candidate_index` on the
    /// `position` roster.
    pub fn vote(
        env: Env,
        voter: Address,
        position: String,
        candidate_index: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        voter.require_auth();
        phase::require(&env, ElectionPhase::Voting)?;

        if config::load(&env)?.enforce_voting_deadline
            && env.ledger().timestamp() > phase::voting_end_time(&env)
        {
            return Err(ContractError::VotingClosed);
        }
        if !voter::exists(&env, &voter) {
            return Err(ContractError::NotAVoter);
        }
        if !position::exists(&env, &position) {
            return Err(ContractError::UnknownPosition);
        }

        let id = candidate::roster(&env, &position)
            .get(candidate_index)
            .ok_or(ContractError::InvalidCandidateIndex)?;
        let mut record = candidate::load(&env, &id).ok_or(ContractError::InvalidCandidateIndex)?;
        if !record.verified {
            return Err(ContractError::CandidateNotVerified);
        }
        if ballot::has_voted(&env, &voter, &position) {
            return Err(ContractError::AlreadyVoted);
        }

        record.votes = record.votes.checked_add(1).ok_or(ContractError::Overflow)?;
        let ballots = ballot::ballots_cast(&env, &position)
            .checked_add(1)
            .ok_or(ContractError::Overflow)?;

        candidate::store(&env, &record);
        ballot::record(&env, &voter, &position, ballots);
        events::publish_vote_cast(&env, &voter, &position, candidate_index);
        Ok(())
    }

    // ── Sign-in challenge ─────────────────────────────────────────────────────

    /// Build the 32-byte challenge a wallet signs to open a session.
    pub fn create_message_hash(
        env: Env,
        address: Address,
        domain: String,
        statement: String,
        uri: String,
        chain_id: u64,
        nonce: u64,
    ) -> BytesN<32> {
        challenge::message_hash(&env, &address, &domain, &statement, &uri, chain_id, nonce)
    }

    /// Check that `signature` is the Ed25519 signature of the `signer`
    /// account over `message_hash`.
    ///
    /// Returns `true` on success. A signature by any other key aborts the
    /// call, so a client never observes `false`. A contract address cannot
    /// sign and fails with `InvalidInput`.
    pub fn verify_signature(
        env: Env,
        signer: Address,
        message_hash: BytesN<32>,
        signature: BytesN<64>,
    ) -> Result<bool, ContractError> {
        challenge::verify(&env, &signer, &message_hash, &signature)?;
        Ok(true)
    }

    /// Rebuild the challenge for `address` and verify `signature` against
    /// that account's key in one call.
    pub fn verify_sign_in(
        env: Env,
        address: Address,
        domain: String,
        statement: String,
        uri: String,
        chain_id: u64,
        nonce: u64,
        signature: BytesN<64>,
    ) -> Result<bool, ContractError> {
        let hash =
            challenge::message_hash(&env, &address, &domain, &statement, &uri, chain_id, nonce);
        challenge::verify(&env, &address, &hash, &signature)?;
        Ok(true)
    }

    // ── Token views ───────────────────────────────────────────────────────────

    pub fn name(env: Env) -> String {
        String::from_str(&env, reward::TOKEN_NAME)
    }

    pub fn symbol(env: Env) -> String {
        String::from_str(&env, reward::TOKEN_SYMBOL)
    }

    pub fn decimals(_env: Env) -> u32 {
        reward::DECIMALS
    }

    pub fn balance_of(env: Env, holder: Address) -> i128 {
        reward::balance_of(&env, &holder)
    }

    pub fn total_supply(env: Env) -> i128 {
        reward::total_supply(&env)
    }

    // ── Election views ────────────────────────────────────────────────────────

    pub fn owner(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_config(env: Env) -> Result<ElectionConfig, ContractError> {
        config::load(&env)
    }

    pub fn phase(env: Env) -> ElectionPhase {
        phase::current(&env)
    }

    pub fn registration_started(env: Env) -> bool {
        phase::current(&env) >= ElectionPhase::Registering
    }

    pub fn voting_started(env: Env) -> bool {
        phase::current(&env) >= ElectionPhase::Voting
    }

    /// Zero until voting has been opened.
    pub fn voting_end_time(env: Env) -> u64 {
        phase::voting_end_time(&env)
    }

    pub fn get_voters(env: Env) -> Vec<Voter> {
        voter::all(&env)
    }

    pub fn get_voter_count(env: Env) -> u32 {
        voter::wallets(&env).len()
    }

    pub fn get_voter(env: Env, wallet: Address) -> Option<Voter> {
        voter::load(&env, &wallet)
    }

    pub fn get_voter_by_id(env: Env, id_number: String) -> Option<Voter> {
        voter::load_by_id(&env, &id_number)
    }

    pub fn is_voter_registered(env: Env, wallet: Address) -> bool {
        voter::exists(&env, &wallet)
    }

    pub fn get_candidates(env: Env) -> Vec<Candidate> {
        candidate::all(&env)
    }

    pub fn get_candidate_count(env: Env) -> u32 {
        candidate::ids(&env).len()
    }

    pub fn get_candidate(env: Env, id_number: String) -> Option<Candidate> {
        candidate::load(&env, &id_number)
    }

    /// The ballot for `position`: candidates in index order.
    pub fn get_candidates_for_position(env: Env, position: String) -> Vec<Candidate> {
        candidate::for_position(&env, &position)
    }

    pub fn get_all_positions(env: Env) -> Vec<Position> {
        position::all(&env)
    }

    pub fn get_position_count(env: Env) -> u32 {
        position::count(&env)
    }

    pub fn position_exists(env: Env, name: String) -> bool {
        position::exists(&env, &name)
    }

    pub fn has_voted(env: Env, wallet: Address, position: String) -> bool {
        ballot::has_voted(&env, &wallet, &position)
    }

    /// Positions `wallet` has already voted for, in catalog order.
    pub fn get_voted_positions(env: Env, wallet: Address) -> Vec<String> {
        let mut out = Vec::new(&env);
        for p in position::all(&env).iter() {
            if ballot::has_voted(&env, &wallet, &p.name) {
                out.push_back(p.name);
            }
        }
        out
    }

    pub fn get_results(env: Env, position: String) -> Result<PositionResults, ContractError> {
        if !position::exists(&env, &position) {
            return Err(ContractError::UnknownPosition);
        }

        let mut tallies = Vec::new(&env);
        for (i, c) in candidate::for_position(&env, &position).iter().enumerate() {
            tallies.push_back(CandidateTally {
                index: i as u32,
                id_number: c.id_number,
                names: c.names,
                party: c.party,
                verified: c.verified,
                votes: c.votes,
            });
        }

        Ok(PositionResults {
            total_votes: ballot::ballots_cast(&env, &position),
            position,
            tallies,
        })
    }

    pub fn fact_count(env: Env) -> u64 {
        facts::count(&env)
    }

    /// Page through the fact log starting at sequence number `start`.
    pub fn get_facts(env: Env, start: u64, limit: u32) -> Vec<ElectionFact> {
        facts::range(&env, start, limit)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Authenticate `caller` and check it holds the owner capability.
    fn require_owner(env: &Env, caller: &Address) -> Result<Address, ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        let owner: Address = env
            .storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != owner {
            return Err(ContractError::Unauthorized);
        }
        Ok(owner)
    }

    fn advance(
        env: &Env,
        owner: &Address,
        from: ElectionPhase,
    ) -> Result<ElectionPhase, ContractError> {
        let to = phase::next_from(env, from)?;
        phase::set(env, to);
        events::publish_phase_changed(env, owner, from, to);
        log!(env, "election phase changed", from, to);
        Ok(to)
    }

    fn check_text(value: &String, max_len: u32) -> Result<(), ContractError> {
        if value.len() == 0 || value.len() > max_len {
            return Err(ContractError::InvalidInput);
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
