//! Sign-in challenge for front-end sessions.
//!
//! ```text
//! hash = keccak256( TAG
//!                 || xdr(address) || xdr(domain) || xdr(statement) || xdr(uri)
//!                 || chain_id_be64 || nonce_be64 )
//! ```
//!
//! XDR encodings are length-prefixed, so no two distinct field tuples share a
//! preimage. The wallet signs the 32-byte hash with its Ed25519 account key,
//! and the key is read back out of the claimed account address.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env, String};

use crate::ContractError;

/// Version tag prepended to every challenge preimage.
const TAG: &[u8; 16] = b"votex-sign-in:v1";

/// XDR prefix of an account address:
/// `ScVal::Address` (18), `ScAddress::Account` (0), `PublicKey::Ed25519` (0).
const ACCOUNT_PREFIX: [u8; 12] = [0, 0, 0, 18, 0, 0, 0, 0, 0, 0, 0, 0];
const ACCOUNT_XDR_LEN: u32 = 44;

pub fn message_hash(
    env: &Env,
    address: &Address,
    domain: &String,
    statement: &String,
    uri: &String,
    chain_id: u64,
    nonce: u64,
) -> BytesN<32> {
    let mut data = Bytes::from_array(env, TAG);
    data.append(&address.clone().to_xdr(env));
    data.append(&domain.clone().to_xdr(env));
    data.append(&statement.clone().to_xdr(env));
    data.append(&uri.clone().to_xdr(env));
    data.extend_from_array(&chain_id.to_be_bytes());
    data.extend_from_array(&nonce.to_be_bytes());

    env.crypto().keccak256(&data).into()
}

/// Ed25519 public key of a Stellar account address.
///
/// Contract addresses have no signing key and yield `InvalidInput`.
pub fn account_key(env: &Env, address: &Address) -> Result<BytesN<32>, ContractError> {
    let xdr = address.clone().to_xdr(env);
    if xdr.len() != ACCOUNT_XDR_LEN || xdr.slice(0..12) != Bytes::from_array(env, &ACCOUNT_PREFIX) {
        return Err(ContractError::InvalidInput);
    }
    let mut key = [0u8; 32];
    xdr.slice(12..ACCOUNT_XDR_LEN).copy_into_slice(&mut key);
    Ok(BytesN::from_array(env, &key))
}

/// Verify `signature` over `message_hash` by the account key of `signer`.
///
/// The host aborts the invocation if the signature does not verify.
pub fn verify(
    env: &Env,
    signer: &Address,
    message_hash: &BytesN<32>,
    signature: &BytesN<64>,
) -> Result<(), ContractError> {
    let key = account_key(env, signer)?;
    let message = Bytes::from_array(env, &message_hash.to_array());
    env.crypto().ed25519_verify(&key, &message, signature);
    Ok(())
}
