//! Election configuration stored at initialisation.
//!
//! The two boolean flags select between the behaviour observed in the
//! deployed contract and the stricter variant:
//!
//! | Flag                      | `false` (default)              | `true`                                   |
//! |---------------------------|--------------------------------|------------------------------------------|
//! | `gate_positions_on_phase` | positions may be added anytime | only during NotStarted / Registering     |
//! | `enforce_voting_deadline` | `voting_end_time` is advisory  | `vote` fails after `voting_end_time`     |

use soroban_sdk::{contracttype, symbol_short, Env, Symbol};

use crate::reward::UNIT;
use crate::ContractError;

const CONFIG: Symbol = symbol_short!("CONFIG");

/// Reward credited to a wallet on successful voter registration (5 VTKN).
pub const DEFAULT_VOTER_REWARD: i128 = 5 * UNIT;
/// Reward credited to the owner for each candidate verification (10 VTKN).
pub const DEFAULT_VERIFICATION_REWARD: i128 = 10 * UNIT;
pub const DEFAULT_MIN_VOTER_AGE: u32 = 18;
pub const DEFAULT_MAX_VOTER_AGE: u32 = 150;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ElectionConfig {
    /// Base units minted to a voter on registration.
    pub voter_reward: i128,
    /// Base units minted to the owner on each candidate verification.
    pub verification_reward: i128,
    /// Inclusive lower bound on registrant age.
    pub min_voter_age: u32,
    /// Inclusive upper bound on registrant age.
    pub max_voter_age: u32,
    pub gate_positions_on_phase: bool,
    pub enforce_voting_deadline: bool,
}

impl Default for ElectionConfig {
    fn default() -> Self {
        Self {
            voter_reward: DEFAULT_VOTER_REWARD,
            verification_reward: DEFAULT_VERIFICATION_REWARD,
            min_voter_age: DEFAULT_MIN_VOTER_AGE,
            max_voter_age: DEFAULT_MAX_VOTER_AGE,
            gate_positions_on_phase: false,
            enforce_voting_deadline: false,
        }
    }
}

impl ElectionConfig {
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.voter_reward < 0 || self.verification_reward < 0 {
            return Err(ContractError::InvalidConfig);
        }
        if self.min_voter_age == 0 || self.min_voter_age > self.max_voter_age {
            return Err(ContractError::InvalidConfig);
        }
        Ok(())
    }

    /// Age check shared by voter and candidate registration.
    pub fn check_age(&self, age: u32) -> Result<(), ContractError> {
        if age < self.min_voter_age || age > self.max_voter_age {
            return Err(ContractError::InvalidAge);
        }
        Ok(())
    }
}

pub(crate) fn store(env: &Env, config: &ElectionConfig) {
    env.storage().instance().set(&CONFIG, config);
}

pub(crate) fn load(env: &Env) -> Result<ElectionConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}
