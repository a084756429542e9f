//! Cryptographic key handling: the signing-key adapter used to sign operation requests and the
//! simplified JWK structure commitments are derived from.

use base64ct::{Base64UrlUnpadded, Encoding};
use ecdsa::signature::Signer as _;
use serde::{Deserialize, Serialize};

use crate::{error::Err, tracerr, Result};

/// Simplified JSON Web Key (JWK) key structure.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Jwk {
    /// Key type.
    pub kty: String,
    /// Cryptographic curve type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,
    /// X coordinate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    /// Y coordinate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    /// Secret key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
}

impl Jwk {
    /// Extract the public part of the key, dropping any private component and checking the
    /// coordinates required by the key type are present.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidKey` - A required coordinate is missing or the key type is not supported.
    pub fn public(&self) -> Result<Self> {
        match self.kty.as_str() {
            "EC" => {
                if self.x.is_none() || self.y.is_none() {
                    tracerr!(Err::InvalidKey, "EC public key requires x and y coordinates");
                }
            }
            "OKP" => {
                if self.x.is_none() {
                    tracerr!(Err::InvalidKey, "OKP public key requires an x coordinate");
                }
            }
            other => tracerr!(Err::InvalidKey, "unsupported key type: {}", other),
        }
        Ok(Self {
            kty: self.kty.clone(),
            crv: self.crv.clone(),
            x: self.x.clone(),
            y: self.y.clone(),
            d: None,
        })
    }

    /// Attempt to match the public key parameters to one of the supported signing algorithms.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidKey` - The key structure cannot be interpreted to a supported format.
    pub fn infer_algorithm(&self) -> Result<Algorithm> {
        match (self.kty.as_str(), self.crv.as_deref()) {
            ("EC", Some("P-256")) => Ok(Algorithm::Es256),
            ("OKP", Some("Ed25519")) => Ok(Algorithm::EdDsa),
            _ => tracerr!(Err::InvalidKey, "unknown key type and curve combination"),
        }
    }
}

/// Types of key signature algorithm supported for operation signing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Algorithm {
    /// ECDSA using the P-256 curve and SHA-256.
    Es256,
    /// EdDSA using the Ed25519 curve.
    EdDsa,
}

/// JOSE algorithm name.
impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::Es256 => write!(f, "ES256"),
            Algorithm::EdDsa => write!(f, "EdDSA"),
        }
    }
}

/// A private key capable of signing operation requests. Closed set: each variant maps to exactly
/// one signing algorithm, so adding a key family means adding a variant and a match arm in each
/// method rather than touching dispatch call sites.
#[derive(Clone)]
pub enum SigningKey {
    /// Elliptic-curve P-256 private key, signs with `ES256`.
    Ec(p256::SecretKey),
    /// Ed25519 private key, signs with `EdDSA`.
    Ed(ed25519_dalek::SigningKey),
}

impl SigningKey {
    /// The signing algorithm bound to this key's family.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Ec(_) => Algorithm::Es256,
            Self::Ed(_) => Algorithm::EdDsa,
        }
    }

    /// Express the corresponding public key as a JWK.
    ///
    /// # Errors
    ///
    /// * `Err` variants wrapping a key encoding failure.
    pub fn public_jwk(&self) -> Result<Jwk> {
        match self {
            Self::Ec(sk) => {
                let jwk = sk.public_key().to_jwk_string();
                serde_json::from_str(&jwk).map_err(Into::into)
            }
            Self::Ed(sk) => Ok(Jwk {
                kty: "OKP".to_string(),
                crv: Some("Ed25519".to_string()),
                x: Some(Base64UrlUnpadded::encode_string(
                    sk.verifying_key().as_bytes(),
                )),
                ..Jwk::default()
            }),
        }
    }

    /// Sign the provided message, returning the raw signature bytes (64 bytes for both supported
    /// families).
    ///
    /// # Errors
    ///
    /// * Signature error if the message could not be signed.
    pub fn sign(&self, msg: &[u8]) -> Result<Vec<u8>> {
        match self {
            Self::Ec(sk) => {
                let signer = p256::ecdsa::SigningKey::from(sk);
                let signature: p256::ecdsa::Signature = signer.try_sign(msg)?;
                Ok(signature.to_bytes().to_vec())
            }
            Self::Ed(sk) => {
                let signature = sk.try_sign(msg)?;
                Ok(signature.to_bytes().to_vec())
            }
        }
    }
}
