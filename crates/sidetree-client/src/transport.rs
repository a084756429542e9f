//! HTTP transport for operation requests and node lookups. Failures carry the status code and
//! response body so the caller can diagnose node-side rejections.

use reqwest::{header, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use sidetree_core::{error::Err, tracerr, Result};

/// POST an assembled operation request to the node's `/operations` endpoint.
pub(crate) async fn send_operation(
    http_client: &reqwest::Client,
    endpoint: &str,
    auth_token: Option<&str>,
    request: Vec<u8>,
) -> Result<Vec<u8>> {
    let url = Url::parse(&format!("{endpoint}/operations"))?;

    let mut req = http_client
        .post(url)
        .header(header::CONTENT_TYPE, "application/json")
        .body(request);
    if let Some(token) = auth_token {
        req = req.header(header::AUTHORIZATION, token);
    }

    let res = match req.send().await {
        Ok(v) => v,
        Err(e) => tracerr!(Err::RequestError, "failed to send request: {}", e),
    };

    let status = res.status();
    let body = match res.bytes().await {
        Ok(b) => b,
        Err(e) => tracerr!(Err::RequestError, "failed to read response: {}", e),
    };

    if status != StatusCode::OK {
        tracerr!(
            Err::ApiError,
            "got unexpected response from {} status '{}' body {}",
            endpoint,
            status.as_u16(),
            String::from_utf8_lossy(&body)
        );
    }

    Ok(body.to_vec())
}

/// Unpack a JSON response from a node or discovery endpoint.
pub(crate) async fn unpack_response<T>(res: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let status = res.status();
    if status.is_success() {
        match res.json::<T>().await {
            Ok(obj) => Ok(obj),
            Err(e) => tracerr!(
                Err::DeserializationError,
                "failed to deserialize successful response: {}",
                e
            ),
        }
    } else {
        let body = res.text().await.unwrap_or_default();
        tracerr!(
            Err::ApiError,
            "got unexpected response status '{}' body {}",
            status.as_u16(),
            body
        );
    }
}
