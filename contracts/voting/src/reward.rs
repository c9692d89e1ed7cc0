//! VTKN reward ledger.
//!
//! VTKN is a non-transferable accounting unit that lives entirely in contract
//! storage. It is only ever minted, by two actions:
//! - a wallet **registers as a voter** (credited to the voter);
//! - the owner **verifies a candidate** (credited to the owner).

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::ContractError;

// ── Storage keys ──────────────────────────────────────────────────────────────

const RW_BALANCE: Symbol = symbol_short!("RW_BAL");
const RW_SUPPLY: Symbol = symbol_short!("RW_SUP");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Token metadata ────────────────────────────────────────────────────────────

pub const TOKEN_NAME: &str = "Votex";
pub const TOKEN_SYMBOL: &str = "VTKN";
pub const DECIMALS: u32 = 18;
/// One whole VTKN in base units.
pub const UNIT: i128 = 1_000_000_000_000_000_000;

fn balance_key(holder: &Address) -> (Symbol, Address) {
    (RW_BALANCE, holder.clone())
}

/// Return the balance of `holder` (0 if never credited).
pub fn balance_of(env: &Env, holder: &Address) -> i128 {
    let key = balance_key(holder);
    let bal: Option<i128> = env.storage().persistent().get(&key);
    if bal.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    bal.unwrap_or(0)
}

pub fn total_supply(env: &Env) -> i128 {
    env.storage().instance().get(&RW_SUPPLY).unwrap_or(0)
}

/// Compute the balances a mint of `amount` would produce without writing.
///
/// Lets callers check for overflow before committing any other state.
pub(crate) fn prepare_mint(
    env: &Env,
    to: &Address,
    amount: i128,
) -> Result<(i128, i128), ContractError> {
    if amount < 0 {
        return Err(ContractError::InvalidInput);
    }
    let balance = balance_of(env, to)
        .checked_add(amount)
        .ok_or(ContractError::Overflow)?;
    let supply = total_supply(env)
        .checked_add(amount)
        .ok_or(ContractError::Overflow)?;
    Ok((balance, supply))
}

/// Write a mint previously computed by [`prepare_mint`].
pub(crate) fn commit_mint(env: &Env, to: &Address, balance: i128, supply: i128) {
    let key = balance_key(to);
    env.storage().persistent().set(&key, &balance);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    env.storage().instance().set(&RW_SUPPLY, &supply);
}
