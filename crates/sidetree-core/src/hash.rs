//! Helper functions for hashing and multi-hashing data.
//!
//! Sidetree nodes publish the multihash algorithm they expect, so every function takes the
//! multihash code as an argument rather than assuming one. Data is canonicalized before hashing.
//! See [JSON Canonicalization Scheme (JCS)](https://identity.foundation/JCS/) for details.

use base64ct::{Base64UrlUnpadded, Encoding};
use multihash::Multihash;
use olpc_cjson::CanonicalFormatter;
use serde::Serialize;
use sha2::{Digest, Sha256, Sha512};

use crate::{error::Err, tracerr, Result};

/// Multihash code for SHA2-256.
pub const SHA2_256: u64 = 0x12;
/// Multihash code for SHA2-512.
pub const SHA2_512: u64 = 0x13;

/// Serialize the provided data to canonical JSON.
///
/// # Errors
///
/// * Serialization error if the data cannot be serialized.
pub fn canonical_json(data: &impl Serialize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, CanonicalFormatter::new());
    data.serialize(&mut ser)?;
    Ok(buf)
}

/// Transforms the provided data into a base64-encoded multihash. It creates canonical JSON,
/// multi-hashes it using the algorithm for the provided multihash code, and then base64-encodes
/// the result. This is the derivation used for operation reveal values.
///
/// # Errors
///
/// * Serialization error if the data cannot be serialized.
/// * `Err::InvalidHash` if the multihash code is not recognized.
pub fn hash_data(data: &impl Serialize, code: u64) -> Result<String> {
    let buf = canonical_json(data)?;
    let multi = multi_hash(&buf, code)?;
    Ok(Base64UrlUnpadded::encode_string(&multi))
}

/// Hash the public key by hashing the canonical JSON representation and then multi-hashing the
/// hash. Committing to the hash of a key means the key itself stays unrevealed until the
/// operation that uses it.
///
/// # Errors
///
/// * Serialization error if the public key cannot be serialized.
/// * `Err::InvalidHash` if the multihash code is not recognized.
pub fn hash_commitment(data: &impl Serialize, code: u64) -> Result<String> {
    let buf = canonical_json(data)?;
    let hashed = digest(&buf, code)?;
    let multi = multi_hash(&hashed, code)?;
    Ok(Base64UrlUnpadded::encode_string(&multi))
}

// Hashes the provided data using the algorithm for the multihash code.
fn digest(data: &[u8], code: u64) -> Result<Vec<u8>> {
    match code {
        SHA2_256 => Ok(Sha256::digest(data).to_vec()),
        SHA2_512 => Ok(Sha512::digest(data).to_vec()),
        _ => tracerr!(Err::InvalidHash, "unrecognized multihash algorithm: {}", code),
    }
}

// Multi-hashes the provided data using the algorithm for the multihash code.
fn multi_hash(data: &[u8], code: u64) -> Result<Vec<u8>> {
    let hashed = digest(data, code)?;
    let mhash = Multihash::<64>::wrap(code, &hashed)?;
    Ok(mhash.to_bytes())
}

/// Check the provided string is a valid multi-hash with a recognized algorithm.
///
/// # Errors
///
/// * Decoding error if the string is not base64url or not a multihash.
/// * `Err::InvalidHash` if the multihash code is not recognized.
pub fn check_hash(hash: &str) -> Result<()> {
    let decoded = Base64UrlUnpadded::decode_vec(hash)?;
    let wrapped = Multihash::<64>::from_bytes(&decoded)?;
    if wrapped.code() != SHA2_256 && wrapped.code() != SHA2_512 {
        tracerr!(Err::InvalidHash, "invalid hash code: {}", wrapped.code());
    }
    Ok(())
}
