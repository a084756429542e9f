//! Client for Sidetree-based DID methods. Assembles signed update, recover and deactivate
//! operation requests from caller-supplied key material and posts them to a Sidetree node, with
//! the node endpoint either given explicitly or discovered from a domain.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod client;
pub mod discovery;
pub mod operation;
pub mod options;
mod transport;

pub use client::{Client, Resolution};
pub use discovery::{
    ConfigService, Endpoint, EndpointService, HttpConfigService, HttpEndpointService,
    SidetreeConfig,
};
pub use options::{DeactivateOptions, RecoverOptions, UpdateOptions};
