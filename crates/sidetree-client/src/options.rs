//! Per-operation option values. Each operation takes a plain, immutable set of options validated
//! up front by [`validate`](UpdateOptions::validate) before any endpoint resolution or network
//! traffic happens, so an incomplete option set fails fast.

use sidetree_core::{error::Err, tracerr, Jwk, PublicKey, Result, Service, SigningKey};

use crate::discovery::Endpoint;

/// Options for a DID update operation.
#[derive(Clone, Default)]
pub struct UpdateOptions {
    /// The private key that signs the operation. Its public JWK is the currently committed
    /// update key.
    pub signing_key: Option<SigningKey>,
    /// Key ID carried in the signed data's protected header.
    pub signing_key_id: Option<String>,
    /// Public key (as a JWK) the next update operation will be verified against.
    pub next_update_public_key: Option<Jwk>,
    /// Reveal value proving knowledge of the committed update key. Derived from the signing
    /// key's public JWK when not supplied.
    pub reveal_value: Option<String>,
    /// Sidetree node endpoints to use instead of domain discovery.
    pub sidetree_endpoints: Vec<Endpoint>,
    /// Public keys to add to the DID document.
    pub add_public_keys: Vec<PublicKey>,
    /// IDs of public keys to remove from the DID document.
    pub remove_public_keys: Vec<String>,
    /// Services to add to the DID document.
    pub add_services: Vec<Service>,
    /// IDs of services to remove from the DID document.
    pub remove_services: Vec<String>,
}

impl UpdateOptions {
    /// Check the option set carries everything an update operation requires.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidInput` - A required option is missing.
    pub fn validate(&self) -> Result<()> {
        if self.signing_key.is_none() {
            tracerr!(Err::InvalidInput, "signing public key is required");
        }
        if self.next_update_public_key.is_none() {
            tracerr!(Err::InvalidInput, "next update public key is required");
        }
        Ok(())
    }
}

/// Options for a DID recover operation.
#[derive(Clone, Default)]
pub struct RecoverOptions {
    /// The private key that signs the operation. Its public JWK is the currently committed
    /// recovery key.
    pub signing_key: Option<SigningKey>,
    /// Key ID carried in the signed data's protected header.
    pub signing_key_id: Option<String>,
    /// Public key (as a JWK) the next recovery operation will be verified against.
    pub next_recovery_public_key: Option<Jwk>,
    /// Public key (as a JWK) the next update operation will be verified against.
    pub next_update_public_key: Option<Jwk>,
    /// Reveal value proving knowledge of the committed recovery key. Derived from the signing
    /// key's public JWK when not supplied.
    pub reveal_value: Option<String>,
    /// Sidetree node endpoints to use instead of domain discovery.
    pub sidetree_endpoints: Vec<Endpoint>,
    /// Public keys the recovered DID document should contain.
    pub public_keys: Vec<PublicKey>,
    /// Services the recovered DID document should contain.
    pub services: Vec<Service>,
}

impl RecoverOptions {
    /// Check the option set carries everything a recover operation requires.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidInput` - A required option is missing.
    pub fn validate(&self) -> Result<()> {
        if self.next_recovery_public_key.is_none() {
            tracerr!(Err::InvalidInput, "next recovery public key is required");
        }
        if self.next_update_public_key.is_none() {
            tracerr!(Err::InvalidInput, "next update public key is required");
        }
        if self.signing_key.is_none() {
            tracerr!(Err::InvalidInput, "signing key is required");
        }
        Ok(())
    }
}

/// Options for a DID deactivate operation.
#[derive(Clone, Default)]
pub struct DeactivateOptions {
    /// The private key that signs the operation. Its public JWK is the currently committed
    /// recovery key.
    pub signing_key: Option<SigningKey>,
    /// Key ID carried in the signed data's protected header.
    pub signing_key_id: Option<String>,
    /// Reveal value proving knowledge of the committed recovery key. Derived from the signing
    /// key's public JWK when not supplied.
    pub reveal_value: Option<String>,
    /// Sidetree node endpoints to use instead of domain discovery.
    pub sidetree_endpoints: Vec<Endpoint>,
}

impl DeactivateOptions {
    /// Check the option set carries everything a deactivate operation requires.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidInput` - A required option is missing.
    pub fn validate(&self) -> Result<()> {
        if self.signing_key.is_none() {
            tracerr!(Err::InvalidInput, "signing key is required");
        }
        Ok(())
    }
}
