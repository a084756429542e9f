//! Document content carried by Sidetree operations: the public keys and services a caller wants a
//! DID document to contain, plus the normalization and key-type checks applied before they are
//! placed into a request.

use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{Deserialize, Serialize};

use crate::keys::Jwk;
use crate::{error::Err, tracerr, Result};

/// Verification key type for keys carrying a JWK public key value.
pub const JWS_VERIFICATION_KEY_2020: &str = "JwsVerificationKey2020";
/// Verification key type for raw Ed25519 public key values.
pub const ED25519_VERIFICATION_KEY_2018: &str = "Ed25519VerificationKey2018";

/// A public key to be included in a DID document.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PublicKey {
    /// Identifier for the key within the document.
    pub id: String,
    /// The type of verification key. One that is registered in a DID specification registry.
    #[serde(rename = "type")]
    pub type_: String,
    /// The verification relationships the key should be registered for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purposes: Option<Vec<String>>,
    /// Raw public key bytes, base64url-encoded. May also hold a serialized JWK, in which case
    /// [`PublicKey::unwrap_jwk`] moves the extracted public value into `jwk`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// The public key as a JWK, for key types that embed one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jwk: Option<Jwk>,
    /// Whether the key is used for recovery operations.
    #[serde(skip_serializing_if = "is_false")]
    pub recovery: bool,
    /// Whether the key is used for update operations.
    #[serde(skip_serializing_if = "is_false")]
    pub update: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(b: &bool) -> bool {
    !*b
}

impl PublicKey {
    /// Normalize a key whose `value` may contain a serialized JWK: if it parses as one, the JWK's
    /// extracted public value replaces the raw value. Values that do not parse are expected to be
    /// binary keys and pass through untouched.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidFormat` - The value is not valid base64url.
    /// * `Err::InvalidKey` - The value parses as a JWK but its public part cannot be extracted.
    pub fn unwrap_jwk(&self) -> Result<Self> {
        let mut out = self.clone();
        let Some(value) = &self.value else {
            return Ok(out);
        };
        let bytes = match Base64UrlUnpadded::decode_vec(value) {
            Ok(b) => b,
            Err(e) => tracerr!(
                Err::InvalidFormat,
                "public key value is not valid base64url: {}",
                e
            ),
        };
        if let Ok(jwk) = serde_json::from_slice::<Jwk>(&bytes) {
            if !jwk.kty.is_empty() {
                out.jwk = Some(jwk.public()?);
                out.value = None;
            }
        }
        Ok(out)
    }

    /// The JWK embedded in this key, either directly or as a serialized `value`.
    #[must_use]
    pub fn embedded_jwk(&self) -> Option<Jwk> {
        if let Some(jwk) = &self.jwk {
            return Some(jwk.clone());
        }
        let value = self.value.as_ref()?;
        let bytes = Base64UrlUnpadded::decode_vec(value).ok()?;
        let jwk = serde_json::from_slice::<Jwk>(&bytes).ok()?;
        (!jwk.kty.is_empty()).then_some(jwk)
    }
}

/// Check a public key carries a recognized verification key type, and for JWK-valued types that
/// the embedded key maps to a supported algorithm.
///
/// # Errors
///
/// * `Err::InvalidKey` - The type tag is not recognized or the embedded JWK is unsupported.
pub fn validate_key_type(key: &PublicKey) -> Result<()> {
    match key.type_.as_str() {
        JWS_VERIFICATION_KEY_2020 => {
            let Some(jwk) = key.embedded_jwk() else {
                tracerr!(
                    Err::InvalidKey,
                    "{} key {} requires a JWK public key value",
                    JWS_VERIFICATION_KEY_2020,
                    key.id
                );
            };
            jwk.infer_algorithm()?;
            Ok(())
        }
        ED25519_VERIFICATION_KEY_2018 => Ok(()),
        other => tracerr!(Err::InvalidKey, "invalid key type: {}", other),
    }
}

/// A service to be included in a DID document.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Service {
    /// Identifier for the service within the document.
    pub id: String,
    /// The type of service.
    #[serde(rename = "type")]
    pub type_: String,
    /// The service endpoint URL.
    pub service_endpoint: String,
}
