//! Patches describe the mutations a Sidetree operation applies to a DID document. This module
//! carries the patch wire format and a builder that validates patch contents against the intended
//! action. Applying patches to a resolved document is the resolver's side of the protocol and is
//! not handled here.

use std::collections::HashMap;
use std::fmt::Display;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::document::{validate_key_type, PublicKey, Service};
use crate::{error::Err, tracerr, Result};

/// Types of patches (updates) that can be applied to a DID document.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum PatchAction {
    /// Replace an entire DID document.
    #[default]
    #[serde(rename = "replace")]
    Replace,
    /// Add one or more public keys to the DID document.
    #[serde(rename = "add-public-keys")]
    AddPublicKeys,
    /// Remove one or more public keys from the DID document.
    #[serde(rename = "remove-public-keys")]
    RemovePublicKeys,
    /// Add one or more services to the DID document.
    #[serde(rename = "add-services")]
    AddServices,
    /// Remove one or more services from the DID document.
    #[serde(rename = "remove-services")]
    RemoveServices,
}

impl Display for PatchAction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self {
            PatchAction::Replace => write!(f, "replace"),
            PatchAction::AddPublicKeys => write!(f, "add-public-keys"),
            PatchAction::RemovePublicKeys => write!(f, "remove-public-keys"),
            PatchAction::AddServices => write!(f, "add-services"),
            PatchAction::RemoveServices => write!(f, "remove-services"),
        }
    }
}

/// DID document content for a replace patch.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatchDocument {
    /// Public keys the document should contain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_keys: Option<Vec<PublicKey>>,
    /// Services the document should contain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<Service>>,
}

/// Patch information for updating a DID.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Patch {
    /// The type of patch to apply.
    pub action: PatchAction,
    /// A set of keys and services to construct a whole DID document. Only used by a replace
    /// patch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<PatchDocument>,
    /// A set of services to add. Only use this field for adding services. To remove services use
    /// the `ids` field instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<Service>>,
    /// A set of key IDs or service IDs to remove.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
    /// A set of public keys to add. Only use this field for adding keys. To remove keys use the
    /// `ids` field instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_keys: Option<Vec<PublicKey>>,
}

impl Patch {
    /// Construct a new patch using a [`PatchBuilder`].
    #[must_use]
    pub fn builder(action: PatchAction) -> PatchBuilder {
        PatchBuilder::new(action)
    }
}

/// Build and validate a patch.
#[derive(Default)]
pub struct PatchBuilder {
    action: PatchAction,
    document: Option<PatchDocument>,
    services: Vec<Service>,
    ids: Vec<String>,
    public_keys: Vec<PublicKey>,
}

impl PatchBuilder {
    /// Initiate the build of a patch by supplying the intended action. This will drive what
    /// subsequent functions will validate and the final validation on build.
    #[must_use]
    pub fn new(action: PatchAction) -> PatchBuilder {
        PatchBuilder {
            action,
            document: None,
            services: Vec::new(),
            ids: Vec::new(),
            public_keys: Vec::new(),
        }
    }

    /// Adds a document to the patch. This is only valid for a replace action.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidPatch` - The patch action is not replace.
    pub fn document(&mut self, document: &PatchDocument) -> Result<&PatchBuilder> {
        if self.action != PatchAction::Replace {
            tracerr!(
                Err::InvalidPatch,
                "a document can only be added to a replace patch"
            );
        }
        self.document = Some(document.clone());
        Ok(self)
    }

    /// Adds a service to the patch. This is only valid for an add services action.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidPatch` - The patch action is not add-services or the ID is invalid.
    pub fn service(&mut self, service: &Service) -> Result<&PatchBuilder> {
        if self.action != PatchAction::AddServices {
            tracerr!(
                Err::InvalidPatch,
                "a service can only be added to an add-services patch"
            );
        }
        self.check_id(&service.id)?;
        self.services.push(service.clone());
        Ok(self)
    }

    /// Adds a public key to the patch. Only valid for an add keys action. The key must carry a
    /// recognized verification key type.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidPatch` - The patch action is not add-public-keys, the ID is invalid or
    ///   duplicated, or a purpose is duplicated.
    /// * `Err::InvalidKey` - The key type is not recognized.
    pub fn public_key(&mut self, key: &PublicKey) -> Result<&PatchBuilder> {
        if self.action != PatchAction::AddPublicKeys {
            tracerr!(
                Err::InvalidPatch,
                "a public key can only be added to an add-public-keys patch"
            );
        }
        self.check_id(&key.id)?;
        validate_key_type(key)?;
        // Check the purposes don't contain duplicates
        if let Some(purposes) = &key.purposes {
            let mut purpose_map = HashMap::new();
            for p in purposes {
                if purpose_map.contains_key(p) {
                    tracerr!(Err::InvalidPatch, "duplicate key purpose: {}", p);
                }
                purpose_map.insert(p.clone(), true);
            }
        }
        // Make sure the key ID is not already on the patch
        for k in &self.public_keys {
            if k.id == key.id {
                tracerr!(Err::InvalidPatch, "duplicate key ID: {}", key.id);
            }
        }
        self.public_keys.push(key.clone());
        Ok(self)
    }

    /// Adds an ID to the patch. This is only valid for remove keys or remove services actions.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidPatch` - The patch action is not a removal or the ID is invalid or
    ///   duplicated.
    pub fn id(&mut self, id: &str) -> Result<&PatchBuilder> {
        self.check_id(id)?;
        if self.action != PatchAction::RemovePublicKeys
            && self.action != PatchAction::RemoveServices
        {
            tracerr!(
                Err::InvalidPatch,
                "an ID can only be added to a remove-public-keys or remove-services patch"
            );
        }
        // No duplicates
        for i in &self.ids {
            if i == id {
                tracerr!(Err::InvalidPatch, "duplicate ID: {}", id);
            }
        }
        self.ids.push(id.to_string());
        Ok(self)
    }

    /// Build the patch. Returns an error if the patch components have not been provided properly.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidPatch` - The components required by the patch action are missing.
    pub fn build(&self) -> Result<Patch> {
        match self.action {
            PatchAction::Replace => {
                if self.document.is_none() {
                    tracerr!(
                        Err::InvalidPatch,
                        "a replace patch must contain a patch document"
                    );
                }
                Ok(Patch {
                    action: self.action.clone(),
                    document: self.document.clone(),
                    ..Default::default()
                })
            }
            PatchAction::AddPublicKeys => {
                if self.public_keys.is_empty() {
                    tracerr!(
                        Err::InvalidPatch,
                        "an add-public-keys patch must contain at least one key"
                    );
                }
                Ok(Patch {
                    action: self.action.clone(),
                    public_keys: Some(self.public_keys.clone()),
                    ..Default::default()
                })
            }
            PatchAction::RemovePublicKeys => {
                if self.ids.is_empty() {
                    tracerr!(
                        Err::InvalidPatch,
                        "a remove-public-keys patch must contain at least one ID"
                    );
                }
                Ok(Patch {
                    action: self.action.clone(),
                    ids: Some(self.ids.clone()),
                    ..Default::default()
                })
            }
            PatchAction::AddServices => {
                if self.services.is_empty() {
                    tracerr!(
                        Err::InvalidPatch,
                        "an add-services patch must contain at least one service"
                    );
                }
                Ok(Patch {
                    action: self.action.clone(),
                    services: Some(self.services.clone()),
                    ..Default::default()
                })
            }
            PatchAction::RemoveServices => {
                if self.ids.is_empty() {
                    tracerr!(
                        Err::InvalidPatch,
                        "a remove-services patch must contain at least one ID"
                    );
                }
                Ok(Patch {
                    action: self.action.clone(),
                    ids: Some(self.ids.clone()),
                    ..Default::default()
                })
            }
        }
    }

    // Check an ID is made of valid base64url characters or key ID part delimiters. This is *not*
    // a full check for a valid DID URL.
    fn check_id(&self, id: &str) -> Result<()> {
        let re = Regex::new(r"^[a-zA-Z0-9_\-\?#:/=&\+%]*$")?;
        if !re.is_match(id) {
            tracerr!(
                Err::InvalidPatch,
                "ID contains invalid characters for a key. Must be a DID URL or path fragment: {}",
                id
            );
        }
        Ok(())
    }
}
