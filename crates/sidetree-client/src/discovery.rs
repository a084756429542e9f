//! Endpoint discovery and node configuration resolution. The client consumes these through the
//! [`EndpointService`] and [`ConfigService`] traits so discovery policy can be replaced without
//! touching the operation pipeline; HTTP implementations are provided for the common case.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use sidetree_core::{error::Err, tracerr, Result};

use crate::transport::unpack_response;

/// A Sidetree node endpoint.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Endpoint {
    /// Base URL of the node.
    pub url: String,
}

/// Hashing configuration published by a Sidetree node. Fetched per request build; any caching
/// is an implementer's concern.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidetreeConfig {
    /// Multihash code for the algorithm the node expects commitments and reveal values to use.
    pub multihash_algorithm: u64,
}

/// Resolves the Sidetree node endpoints published for a domain.
#[allow(async_fn_in_trait)]
pub trait EndpointService {
    /// Get the endpoints for the provided domain.
    ///
    /// # Errors
    ///
    /// An error should be returned if the domain's endpoint list could not be fetched.
    async fn endpoints(&self, domain: &str) -> Result<Vec<Endpoint>>;
}

/// Resolves a Sidetree node's published configuration.
#[allow(async_fn_in_trait)]
pub trait ConfigService {
    /// Get the configuration for the node at the provided endpoint URL.
    ///
    /// # Errors
    ///
    /// An error should be returned if the configuration could not be fetched.
    async fn config(&self, endpoint: &str) -> Result<SidetreeConfig>;
}

// The endpoint list document published under a domain's .well-known path.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct EndpointList {
    endpoints: Vec<String>,
}

/// Endpoint discovery against the `/.well-known/did-sidetree` document of a domain.
pub struct HttpEndpointService {
    http_client: reqwest::Client,
}

impl HttpEndpointService {
    /// Constructor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            http_client: json_client(),
        }
    }
}

impl Default for HttpEndpointService {
    fn default() -> Self {
        Self::new()
    }
}

impl EndpointService for HttpEndpointService {
    async fn endpoints(&self, domain: &str) -> Result<Vec<Endpoint>> {
        let url = Url::parse(&format!("https://{domain}/.well-known/did-sidetree"))?;
        let res = match self.http_client.get(url).send().await {
            Ok(v) => v,
            Err(e) => tracerr!(Err::RequestError, "failed to fetch endpoint list: {}", e),
        };
        let list = unpack_response::<EndpointList>(res).await?;
        Ok(list.endpoints.into_iter().map(|url| Endpoint { url }).collect())
    }
}

/// Node configuration resolution against a Sidetree node's `/version` endpoint.
pub struct HttpConfigService {
    http_client: reqwest::Client,
}

impl HttpConfigService {
    /// Constructor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            http_client: json_client(),
        }
    }
}

impl Default for HttpConfigService {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigService for HttpConfigService {
    async fn config(&self, endpoint: &str) -> Result<SidetreeConfig> {
        let url = Url::parse(&format!("{endpoint}/version"))?;
        let res = match self.http_client.get(url).send().await {
            Ok(v) => v,
            Err(e) => tracerr!(Err::RequestError, "failed to fetch sidetree config: {}", e),
        };
        unpack_response::<SidetreeConfig>(res).await
    }
}

// Reusable HTTP client accepting JSON responses.
pub(crate) fn json_client() -> reqwest::Client {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("application/json"),
    );
    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .expect("failed to create HTTP client.")
}
