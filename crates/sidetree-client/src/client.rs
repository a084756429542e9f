//! Client for Sidetree DID operations. Each operation validates its options, resolves the target
//! node endpoint and its hashing configuration, builds a signed operation request and posts it to
//! the node. Nothing is retried internally; failures surface to the caller with the failing stage
//! attached.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use sidetree_core::error::{Context as _, Err};
use sidetree_core::hash::{hash_commitment, hash_data};
use sidetree_core::{tracerr, Jwk, Patch, PatchAction, PatchDocument, Result};

use crate::discovery::{ConfigService, Endpoint, EndpointService, SidetreeConfig};
use crate::operation::{check_delta, sign_data, Delta, OperationType, Request};
use crate::options::{DeactivateOptions, RecoverOptions, UpdateOptions};
use crate::transport;

/// Result of resolving a DID through a node's resolution endpoint. The document and metadata
/// shapes are defined by the node and passed through uninterpreted.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resolution {
    /// The JSON-LD context of the resolution result.
    #[serde(rename = "@context")]
    pub context: serde_json::Value,
    /// The resolved DID document.
    pub did_document: serde_json::Value,
    /// Metadata about the resolution process.
    pub resolver_metadata: serde_json::Value,
    /// Metadata the DID method attaches to the document.
    pub method_metadata: serde_json::Value,
}

/// Client for a Sidetree-based DID method. Holds only immutable configuration, so one instance
/// can be shared across concurrent operations.
pub struct Client<E, C>
where
    E: EndpointService,
    C: ConfigService,
{
    endpoint_service: E,
    config_service: C,
    /// Reusable HTTP client
    http_client: reqwest::Client,
    auth_token: Option<String>,
}

impl<E, C> Client<E, C>
where
    E: EndpointService,
    C: ConfigService,
{
    /// Constructor.
    #[must_use]
    pub fn new(endpoint_service: E, config_service: C) -> Self {
        Self {
            endpoint_service,
            config_service,
            http_client: crate::discovery::json_client(),
            auth_token: None,
        }
    }

    /// Attach an authorization token sent with every operation request.
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Update a DID document.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidInput` - A required option is missing or the DID has no unique suffix.
    /// * Discovery, build or transport errors with the failing stage attached.
    pub async fn update_did(&self, did: &str, domain: &str, opts: &UpdateOptions) -> Result<()> {
        opts.validate()?;

        let endpoint = self.endpoint(domain, &opts.sidetree_endpoints).await?;
        let config = self.config_service.config(&endpoint).await?;

        let req = build_update_request(did, &config, opts)
            .context("failed to build update request")?;

        transport::send_operation(&self.http_client, &endpoint, self.auth_token.as_deref(), req)
            .await
            .context(format!(
                "failed to send {} sidetree request",
                OperationType::Update
            ))?;

        Ok(())
    }

    /// Recover a DID document, resetting it to the supplied content.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidInput` - A required option is missing or the DID has no unique suffix.
    /// * Discovery, build or transport errors with the failing stage attached.
    pub async fn recover_did(&self, did: &str, domain: &str, opts: &RecoverOptions) -> Result<()> {
        opts.validate()?;

        let endpoint = self.endpoint(domain, &opts.sidetree_endpoints).await?;
        let config = self.config_service.config(&endpoint).await?;

        let req =
            build_recover_request(did, &config, opts).context("failed to build sidetree request")?;

        transport::send_operation(&self.http_client, &endpoint, self.auth_token.as_deref(), req)
            .await
            .context(format!(
                "failed to send {} sidetree request",
                OperationType::Recover
            ))?;

        Ok(())
    }

    /// Deactivate a DID.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidInput` - A required option is missing or the DID has no unique suffix.
    /// * Discovery, build or transport errors with the failing stage attached.
    pub async fn deactivate_did(
        &self,
        did: &str,
        domain: &str,
        opts: &DeactivateOptions,
    ) -> Result<()> {
        opts.validate()?;

        let endpoint = self.endpoint(domain, &opts.sidetree_endpoints).await?;
        let config = self.config_service.config(&endpoint).await?;

        let req = build_deactivate_request(did, &config, opts)
            .context("failed to build sidetree request")?;

        transport::send_operation(&self.http_client, &endpoint, self.auth_token.as_deref(), req)
            .await
            .context(format!(
                "failed to send {} sidetree request",
                OperationType::Deactivate
            ))?;

        Ok(())
    }

    /// Resolve a DID through a node's resolution endpoint.
    ///
    /// # Errors
    ///
    /// * Discovery or transport errors with the failing stage attached.
    pub async fn resolve_did(
        &self,
        did: &str,
        domain: &str,
        sidetree_endpoints: &[Endpoint],
    ) -> Result<Resolution> {
        let endpoint = self.endpoint(domain, sidetree_endpoints).await?;
        let url = Url::parse(&format!("{endpoint}/identifiers/{did}"))?;

        let res = match self.http_client.get(url).send().await {
            Ok(res) => res,
            Err(e) => tracerr!(
                Err::RequestError,
                "failed to call DID resolution endpoint: {}",
                e
            ),
        };

        transport::unpack_response::<Resolution>(res).await
    }

    // Resolve the node endpoint to send to. Explicit endpoints are used as given; a domain
    // triggers discovery and overrides them.
    async fn endpoint(&self, domain: &str, sidetree_endpoints: &[Endpoint]) -> Result<String> {
        if domain.is_empty() && sidetree_endpoints.is_empty() {
            tracerr!(
                Err::InvalidConfig,
                "domain is empty and sidetree endpoints is empty"
            );
        }

        if domain.is_empty() {
            return Ok(sidetree_endpoints[0].url.clone());
        }

        let endpoints = match self.endpoint_service.endpoints(domain).await {
            Ok(v) => v,
            Err(e) => tracerr!(Err::RequestError, "failed to get endpoints: {}", e),
        };
        if endpoints.is_empty() {
            tracerr!(Err::NotFound, "list of endpoints is empty");
        }

        // TODO: weight endpoint selection by stakeholder policy instead of first-wins
        Ok(endpoints[0].url.clone())
    }
}

// Request builder for a Sidetree DID update.
fn build_update_request(
    did: &str,
    config: &SidetreeConfig,
    opts: &UpdateOptions,
) -> Result<Vec<u8>> {
    let Some(signing_key) = &opts.signing_key else {
        tracerr!(Err::InvalidInput, "signing public key is required");
    };
    let Some(next_update_key) = &opts.next_update_public_key else {
        tracerr!(Err::InvalidInput, "next update public key is required");
    };

    let update_commitment = hash_commitment(next_update_key, config.multihash_algorithm)
        .context("failed to get next update key commitment")?;

    let update_key = signing_key.public_jwk()?;
    let patches = update_patches(opts)?;
    let did_suffix = unique_suffix(did)?;

    let reveal_value = match &opts.reveal_value {
        Some(v) => v.clone(),
        None => default_reveal_value(&update_key, config.multihash_algorithm),
    };

    let delta = Delta {
        update_commitment,
        patches,
    };
    check_delta(&delta)?;
    let delta_hash = hash_data(&delta, config.multihash_algorithm)?;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Data<'a> {
        update_key: &'a Jwk,
        delta_hash: &'a str,
    }
    let signed_data = sign_data(
        signing_key,
        opts.signing_key_id.as_deref(),
        &Data {
            update_key: &update_key,
            delta_hash: &delta_hash,
        },
    )?;

    let req = Request {
        type_: OperationType::Update,
        did_suffix,
        reveal_value,
        delta: Some(delta),
        signed_data,
    };
    Ok(serde_json::to_vec(&req)?)
}

// Request builder for a Sidetree DID recovery.
fn build_recover_request(
    did: &str,
    config: &SidetreeConfig,
    opts: &RecoverOptions,
) -> Result<Vec<u8>> {
    let Some(next_recovery_key) = &opts.next_recovery_public_key else {
        tracerr!(Err::InvalidInput, "next recovery public key is required");
    };
    let Some(next_update_key) = &opts.next_update_public_key else {
        tracerr!(Err::InvalidInput, "next update public key is required");
    };
    let Some(signing_key) = &opts.signing_key else {
        tracerr!(Err::InvalidInput, "signing key is required");
    };

    let mut public_keys = Vec::new();
    for key in &opts.public_keys {
        public_keys.push(key.unwrap_jwk()?);
    }
    let document = PatchDocument {
        public_keys: (!public_keys.is_empty()).then_some(public_keys),
        services: (!opts.services.is_empty()).then_some(opts.services.clone()),
    };
    let patch = Patch::builder(PatchAction::Replace).document(&document)?.build()?;

    let recovery_commitment = hash_commitment(next_recovery_key, config.multihash_algorithm)
        .context("failed to get next recovery key commitment")?;
    let update_commitment = hash_commitment(next_update_key, config.multihash_algorithm)
        .context("failed to get next update key commitment")?;

    let recovery_key = signing_key.public_jwk()?;
    let did_suffix = unique_suffix(did)?;

    let reveal_value = match &opts.reveal_value {
        Some(v) => v.clone(),
        None => default_reveal_value(&recovery_key, config.multihash_algorithm),
    };

    let delta = Delta {
        update_commitment,
        patches: vec![patch],
    };
    check_delta(&delta)?;
    let delta_hash = hash_data(&delta, config.multihash_algorithm)?;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Data<'a> {
        recovery_commitment: &'a str,
        recovery_key: &'a Jwk,
        delta_hash: &'a str,
    }
    let signed_data = sign_data(
        signing_key,
        opts.signing_key_id.as_deref(),
        &Data {
            recovery_commitment: &recovery_commitment,
            recovery_key: &recovery_key,
            delta_hash: &delta_hash,
        },
    )?;

    let req = Request {
        type_: OperationType::Recover,
        did_suffix,
        reveal_value,
        delta: Some(delta),
        signed_data,
    };
    Ok(serde_json::to_vec(&req)?)
}

// Request builder for a Sidetree DID deactivation.
fn build_deactivate_request(
    did: &str,
    config: &SidetreeConfig,
    opts: &DeactivateOptions,
) -> Result<Vec<u8>> {
    let Some(signing_key) = &opts.signing_key else {
        tracerr!(Err::InvalidInput, "signing key is required");
    };

    let recovery_key = signing_key.public_jwk()?;
    let did_suffix = unique_suffix(did)?;

    let reveal_value = match &opts.reveal_value {
        Some(v) => v.clone(),
        None => default_reveal_value(&recovery_key, config.multihash_algorithm),
    };

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Data<'a> {
        did_suffix: &'a str,
        recovery_key: &'a Jwk,
    }
    let signed_data = sign_data(
        signing_key,
        opts.signing_key_id.as_deref(),
        &Data {
            did_suffix: &did_suffix,
            recovery_key: &recovery_key,
        },
    )?;

    let req = Request {
        type_: OperationType::Deactivate,
        did_suffix,
        reveal_value,
        delta: None,
        signed_data,
    };
    Ok(serde_json::to_vec(&req)?)
}

// Translate the caller's update intent into an ordered list of patches. Empty categories
// contribute no patch.
fn update_patches(opts: &UpdateOptions) -> Result<Vec<Patch>> {
    let mut patches = Vec::new();

    if !opts.remove_public_keys.is_empty() {
        let mut builder = Patch::builder(PatchAction::RemovePublicKeys);
        for id in &opts.remove_public_keys {
            builder.id(id)?;
        }
        patches.push(builder.build()?);
    }

    if !opts.remove_services.is_empty() {
        let mut builder = Patch::builder(PatchAction::RemoveServices);
        for id in &opts.remove_services {
            builder.id(id)?;
        }
        patches.push(builder.build()?);
    }

    if !opts.add_services.is_empty() {
        let mut builder = Patch::builder(PatchAction::AddServices);
        for service in &opts.add_services {
            builder.service(service)?;
        }
        patches.push(builder.build()?);
    }

    if !opts.add_public_keys.is_empty() {
        let mut builder = Patch::builder(PatchAction::AddPublicKeys);
        for key in &opts.add_public_keys {
            builder.public_key(key)?;
        }
        patches.push(builder.build()?);
    }

    Ok(patches)
}

// Extract the unique suffix Sidetree operations key off of: the segment after the DID's last
// colon.
fn unique_suffix(id: &str) -> Result<String> {
    match id.rsplit_once(':') {
        Some((_, suffix)) => Ok(suffix.to_string()),
        None => tracerr!(Err::InvalidInput, "unique suffix not provided in id [{}]", id),
    }
}

// Derive the reveal value from the current signing key's public JWK. Failures are logged and
// produce an empty value rather than aborting the request, so callers supplying explicit reveal
// values are unaffected; callers relying on the default must treat an empty result as an error.
fn default_reveal_value(jwk: &Jwk, multihash_algorithm: u64) -> String {
    match hash_data(jwk, multihash_algorithm) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!("failed to default reveal value: {e}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use base64ct::{Base64UrlUnpadded, Encoding};
    use rand_core::OsRng;
    use sidetree_core::document::{
        PublicKey, Service, ED25519_VERIFICATION_KEY_2018, JWS_VERIFICATION_KEY_2020,
    };
    use sidetree_core::hash::SHA2_256;
    use sidetree_core::SigningKey;

    use super::*;

    fn ec_signing_key() -> SigningKey {
        SigningKey::Ec(p256::SecretKey::random(&mut OsRng))
    }

    fn ed_signing_key() -> SigningKey {
        SigningKey::Ed(ed25519_dalek::SigningKey::generate(&mut OsRng))
    }

    fn next_key() -> Jwk {
        Jwk {
            kty: "EC".to_string(),
            crv: Some("P-256".to_string()),
            x: Some("XFl4fd9n4qp2Gcc2_oqqUsI3uT63o3Jt0f54DiNOijw".to_string()),
            y: Some("IH_q19UKDu_jkIwtehWU7NiaXk7CaGoD-XRcuuqcgQ0".to_string()),
            ..Default::default()
        }
    }

    fn config() -> SidetreeConfig {
        SidetreeConfig {
            multihash_algorithm: SHA2_256,
        }
    }

    fn service() -> Service {
        Service {
            id: "service-1".to_string(),
            type_: "LinkedDomains".to_string(),
            service_endpoint: "https://example.com/".to_string(),
        }
    }

    // Endpoint service returning a fixed list.
    struct StaticEndpoints(Vec<Endpoint>);

    impl EndpointService for StaticEndpoints {
        async fn endpoints(&self, _domain: &str) -> Result<Vec<Endpoint>> {
            Ok(self.0.clone())
        }
    }

    // Collaborators that must not be reached; validation failures happen before discovery,
    // config or transport run.
    struct Unreachable;

    impl EndpointService for Unreachable {
        async fn endpoints(&self, _domain: &str) -> Result<Vec<Endpoint>> {
            panic!("endpoint discovery must not be invoked");
        }
    }

    impl ConfigService for Unreachable {
        async fn config(&self, _endpoint: &str) -> Result<SidetreeConfig> {
            panic!("config resolution must not be invoked");
        }
    }

    #[test]
    fn unique_suffix_extraction() {
        assert_eq!(unique_suffix("did:method:abc123").unwrap(), "abc123");
        assert_eq!(
            unique_suffix("did:method:network:abc123").unwrap(),
            "abc123"
        );

        let err = unique_suffix("noColonHere").expect_err("expected error");
        assert!(err
            .to_string()
            .contains("unique suffix not provided in id [noColonHere]"));
    }

    #[test]
    fn update_patches_ordered() {
        let opts = UpdateOptions {
            add_public_keys: vec![PublicKey {
                id: "key-2".to_string(),
                type_: ED25519_VERIFICATION_KEY_2018.to_string(),
                value: Some(Base64UrlUnpadded::encode_string(&[7u8; 32])),
                ..Default::default()
            }],
            remove_public_keys: vec!["key-1".to_string()],
            add_services: vec![service()],
            remove_services: vec!["service-0".to_string()],
            ..Default::default()
        };

        let patches = update_patches(&opts).unwrap();
        let actions: Vec<PatchAction> = patches.iter().map(|p| p.action.clone()).collect();
        assert_eq!(
            actions,
            vec![
                PatchAction::RemovePublicKeys,
                PatchAction::RemoveServices,
                PatchAction::AddServices,
                PatchAction::AddPublicKeys,
            ]
        );
    }

    #[test]
    fn update_patches_skip_empty_categories() {
        let patches = update_patches(&UpdateOptions::default()).unwrap();
        assert!(patches.is_empty());

        let opts = UpdateOptions {
            add_services: vec![service()],
            ..Default::default()
        };
        let patches = update_patches(&opts).unwrap();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].action, PatchAction::AddServices);
    }

    #[test]
    fn update_patches_reject_unknown_key_type() {
        let opts = UpdateOptions {
            add_public_keys: vec![PublicKey {
                id: "key-2".to_string(),
                type_: "Bad".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let err = update_patches(&opts).expect_err("expected error");
        assert!(err.to_string().contains("invalid key type: Bad"));
    }

    #[test]
    fn build_update_request_ok() {
        let signing_key = ec_signing_key();
        let opts = UpdateOptions {
            signing_key: Some(signing_key.clone()),
            next_update_public_key: Some(next_key()),
            add_services: vec![service()],
            ..Default::default()
        };

        let bytes = build_update_request("did:method:abc123", &config(), &opts).unwrap();
        assert!(!bytes.is_empty());

        let req: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(req["type"], "update");
        assert_eq!(req["didSuffix"], "abc123");

        // The embedded commitment must be reproducible from the supplied next update key.
        let expected = hash_commitment(&next_key(), SHA2_256).unwrap();
        assert_eq!(req["delta"]["updateCommitment"], expected.as_str());

        // The defaulted reveal value is derived from the signing key's public JWK.
        let update_key = signing_key.public_jwk().unwrap();
        let expected = hash_data(&update_key, SHA2_256).unwrap();
        assert_eq!(req["revealValue"], expected.as_str());

        assert_eq!(req["delta"]["patches"][0]["action"], "add-services");

        let jws = req["signedData"].as_str().unwrap();
        let parts: Vec<&str> = jws.split('.').collect();
        assert_eq!(parts.len(), 3);
        let header = Base64UrlUnpadded::decode_vec(parts[0]).unwrap();
        let header: serde_json::Value = serde_json::from_slice(&header).unwrap();
        assert_eq!(header["alg"], "ES256");
    }

    #[test]
    fn build_update_request_ed25519() {
        let opts = UpdateOptions {
            signing_key: Some(ed_signing_key()),
            signing_key_id: Some("key-1".to_string()),
            next_update_public_key: Some(next_key()),
            ..Default::default()
        };

        let bytes = build_update_request("did:method:abc123", &config(), &opts).unwrap();
        let req: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        let jws = req["signedData"].as_str().unwrap();
        let parts: Vec<&str> = jws.split('.').collect();
        let header = Base64UrlUnpadded::decode_vec(parts[0]).unwrap();
        let header: serde_json::Value = serde_json::from_slice(&header).unwrap();
        assert_eq!(header["alg"], "EdDSA");
        assert_eq!(header["kid"], "key-1");
    }

    #[test]
    fn build_update_request_explicit_reveal_value() {
        let opts = UpdateOptions {
            signing_key: Some(ec_signing_key()),
            next_update_public_key: Some(next_key()),
            reveal_value: Some("caller-managed".to_string()),
            ..Default::default()
        };

        let bytes = build_update_request("did:method:abc123", &config(), &opts).unwrap();
        let req: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(req["revealValue"], "caller-managed");
    }

    #[test]
    fn build_update_request_missing_options() {
        let err = build_update_request("did:method:abc123", &config(), &UpdateOptions::default())
            .expect_err("expected error");
        assert_eq!(err.to_string(), "signing public key is required");

        let opts = UpdateOptions {
            signing_key: Some(ec_signing_key()),
            ..Default::default()
        };
        let err = build_update_request("did:method:abc123", &config(), &opts)
            .expect_err("expected error");
        assert_eq!(err.to_string(), "next update public key is required");
    }

    #[test]
    fn build_update_request_bad_did() {
        let opts = UpdateOptions {
            signing_key: Some(ec_signing_key()),
            next_update_public_key: Some(next_key()),
            ..Default::default()
        };
        let err =
            build_update_request("noColonHere", &config(), &opts).expect_err("expected error");
        assert!(err.to_string().contains("unique suffix not provided"));
    }

    #[test]
    fn build_recover_request_ok() {
        let signing_key = ec_signing_key();
        let doc_key_jwk = Jwk {
            d: Some("CB6W6NKEuI4uiYiyM2CM4YzczOYXdx-ykAe5rlZaB-Q".to_string()),
            ..next_key()
        };
        let opts = RecoverOptions {
            signing_key: Some(signing_key.clone()),
            next_recovery_public_key: Some(next_key()),
            next_update_public_key: Some(next_key()),
            public_keys: vec![PublicKey {
                id: "key-1".to_string(),
                type_: JWS_VERIFICATION_KEY_2020.to_string(),
                value: Some(Base64UrlUnpadded::encode_string(
                    &serde_json::to_vec(&doc_key_jwk).unwrap(),
                )),
                ..Default::default()
            }],
            services: vec![service()],
            ..Default::default()
        };

        let bytes = build_recover_request("did:method:abc123", &config(), &opts).unwrap();
        let req: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(req["type"], "recover");
        assert_eq!(req["didSuffix"], "abc123");

        // Document keys had their JWK value unwrapped with the private part stripped.
        let patch = &req["delta"]["patches"][0];
        assert_eq!(patch["action"], "replace");
        let doc_key = &patch["document"]["publicKeys"][0];
        assert!(doc_key.get("value").is_none());
        assert_eq!(doc_key["jwk"]["x"], next_key().x.unwrap().as_str());
        assert!(doc_key["jwk"].get("d").is_none());
        assert_eq!(patch["document"]["services"][0]["id"], "service-1");

        let expected = hash_commitment(&next_key(), SHA2_256).unwrap();
        assert_eq!(req["delta"]["updateCommitment"], expected.as_str());

        // Reveal value defaults from the recovery (signing) key.
        let recovery_key = signing_key.public_jwk().unwrap();
        let expected = hash_data(&recovery_key, SHA2_256).unwrap();
        assert_eq!(req["revealValue"], expected.as_str());
    }

    #[test]
    fn build_recover_request_missing_options() {
        let err = build_recover_request("did:method:abc123", &config(), &RecoverOptions::default())
            .expect_err("expected error");
        assert_eq!(err.to_string(), "next recovery public key is required");

        let opts = RecoverOptions {
            next_recovery_public_key: Some(next_key()),
            ..Default::default()
        };
        let err = build_recover_request("did:method:abc123", &config(), &opts)
            .expect_err("expected error");
        assert_eq!(err.to_string(), "next update public key is required");

        let opts = RecoverOptions {
            next_recovery_public_key: Some(next_key()),
            next_update_public_key: Some(next_key()),
            ..Default::default()
        };
        let err = build_recover_request("did:method:abc123", &config(), &opts)
            .expect_err("expected error");
        assert_eq!(err.to_string(), "signing key is required");
    }

    #[test]
    fn build_deactivate_request_ok() {
        let opts = DeactivateOptions {
            signing_key: Some(ec_signing_key()),
            ..Default::default()
        };

        let bytes = build_deactivate_request("did:method:abc123", &config(), &opts).unwrap();
        let req: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(req["type"], "deactivate");
        assert_eq!(req["didSuffix"], "abc123");
        assert!(req.get("delta").is_none());
        assert!(!req["revealValue"].as_str().unwrap().is_empty());
        assert!(!req["signedData"].as_str().unwrap().is_empty());
    }

    #[test]
    fn build_deactivate_request_missing_signing_key() {
        let err =
            build_deactivate_request("did:method:abc123", &config(), &DeactivateOptions::default())
                .expect_err("expected error");
        assert_eq!(err.to_string(), "signing key is required");
    }

    #[test]
    fn default_reveal_value_soft_fails() {
        let jwk = next_key();

        // An unsupported multihash algorithm fails the derivation; the default is an empty
        // value, not an error.
        assert_eq!(default_reveal_value(&jwk, 0x99), "");
        assert!(!default_reveal_value(&jwk, SHA2_256).is_empty());
    }

    #[tokio::test]
    async fn endpoint_requires_domain_or_endpoints() {
        let client = Client::new(Unreachable, Unreachable);
        let err = client.endpoint("", &[]).await.expect_err("expected error");
        assert_eq!(
            err.to_string(),
            "domain is empty and sidetree endpoints is empty"
        );
    }

    #[tokio::test]
    async fn endpoint_explicit_skips_discovery() {
        let client = Client::new(Unreachable, Unreachable);
        let endpoint = client
            .endpoint(
                "",
                &[Endpoint {
                    url: "https://node.example.com/sidetree".to_string(),
                }],
            )
            .await
            .unwrap();
        assert_eq!(endpoint, "https://node.example.com/sidetree");
    }

    #[tokio::test]
    async fn endpoint_discovery_empty_list() {
        let client = Client::new(StaticEndpoints(Vec::new()), Unreachable);
        let err = client
            .endpoint("example.com", &[])
            .await
            .expect_err("expected error");
        assert_eq!(err.to_string(), "list of endpoints is empty");
    }

    #[tokio::test]
    async fn endpoint_discovery_first_wins() {
        let client = Client::new(
            StaticEndpoints(vec![
                Endpoint {
                    url: "https://node1.example.com".to_string(),
                },
                Endpoint {
                    url: "https://node2.example.com".to_string(),
                },
            ]),
            Unreachable,
        );
        let endpoint = client.endpoint("example.com", &[]).await.unwrap();
        assert_eq!(endpoint, "https://node1.example.com");
    }

    #[tokio::test]
    async fn recover_did_validates_before_discovery() {
        let client = Client::new(Unreachable, Unreachable);
        let opts = RecoverOptions {
            signing_key: Some(ec_signing_key()),
            next_update_public_key: Some(next_key()),
            ..Default::default()
        };

        // The panicking collaborators prove validation fails before any network activity.
        let err = client
            .recover_did("did:method:abc123", "example.com", &opts)
            .await
            .expect_err("expected error");
        assert!(err.to_string().contains("next recovery public key is required"));
    }

    #[tokio::test]
    async fn update_did_validates_before_discovery() {
        let client = Client::new(Unreachable, Unreachable);
        let err = client
            .update_did("did:method:abc123", "example.com", &UpdateOptions::default())
            .await
            .expect_err("expected error");
        assert!(err.to_string().contains("signing public key is required"));
    }
}
