//! Protocol-level building blocks for Sidetree DID operation clients: typed errors,
//! multihash-based commitment and reveal-value derivation, signing-key adapters, and DID document
//! patches. The companion `sidetree-client` crate assembles these into signed operation requests.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod document;
pub mod error;
pub mod hash;
pub mod keys;
pub mod patch;

pub use document::{PublicKey, Service};
pub use error::Error;
pub use keys::{Algorithm, Jwk, SigningKey};
pub use patch::{Patch, PatchAction, PatchBuilder, PatchDocument};

/// Crate-wide result type.
pub type Result<T, E = Error> = core::result::Result<T, E>;
