//! Sidetree operation wire format and signed-data assembly.

use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sidetree_core::hash::canonical_json;
use sidetree_core::{error::Err, tracerr, Patch, Result, SigningKey};

/// The type of DID operation requested.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationType {
    /// Update an existing DID.
    #[default]
    Update,
    /// Recover a DID, resetting its document to the supplied state.
    Recover,
    /// Deactivate a DID.
    Deactivate,
}

/// Display implementation for DID operation type.
impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self {
            OperationType::Update => write!(f, "update"),
            OperationType::Recover => write!(f, "recover"),
            OperationType::Deactivate => write!(f, "deactivate"),
        }
    }
}

/// An operation request as posted to a Sidetree node's `/operations` endpoint.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Request {
    /// The type of DID operation requested.
    #[serde(rename = "type")]
    pub type_: OperationType,
    /// The unique suffix of the DID the operation applies to.
    pub did_suffix: String,
    /// Value proving knowledge of the previously committed key.
    pub reveal_value: String,
    /// Document change information. Not present on a deactivate request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<Delta>,
    /// Compact JWS over the operation's protocol-critical content.
    pub signed_data: String,
}

/// DID change information.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Delta {
    /// Commitment to the key that will authorize the next update.
    pub update_commitment: String,
    /// The document mutations the operation applies.
    pub patches: Vec<Patch>,
}

/// Check the delta can be marshalled to canonical JSON that is no more than 1000 bytes long.
///
/// # Errors
///
/// * `Err::InvalidFormat` - The delta exceeds the protocol bound.
pub fn check_delta(delta: &Delta) -> Result<()> {
    let buf = canonical_json(delta)?;
    if buf.len() > 1000 {
        tracerr!(Err::InvalidFormat, "delta longer than 1000 bytes: {}", buf.len());
    }
    Ok(())
}

/// Sign the operation's protocol-critical payload into a compact JWS. The protected header
/// carries the signing key's algorithm name and, when supplied, the key ID; the payload is
/// canonical JSON.
pub(crate) fn sign_data(
    key: &SigningKey,
    kid: Option<&str>,
    payload: &impl Serialize,
) -> Result<String> {
    let header = match kid {
        Some(kid) => json!({ "alg": key.algorithm().to_string(), "kid": kid }),
        None => json!({ "alg": key.algorithm().to_string() }),
    };
    let protected = Base64UrlUnpadded::encode_string(&serde_json::to_vec(&header)?);
    let payload = Base64UrlUnpadded::encode_string(&canonical_json(payload)?);
    let signing_input = format!("{protected}.{payload}");
    let signature = key.sign(signing_input.as_bytes())?;
    Ok(format!(
        "{signing_input}.{}",
        Base64UrlUnpadded::encode_string(&signature)
    ))
}
