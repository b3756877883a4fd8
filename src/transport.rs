//! Blocking HTTP transport shared by the product and inventory clients.
//!
//! Joins request paths onto the configured API base, encodes JSON bodies and
//! maps non-success statuses to [`StorefrontError::Backend`]. Nothing here
//! retries: every call is a single request/response.

use std::time::Duration;

use rand::RngCore;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config;
use crate::error::{Result, StorefrontError};

/// A base URL plus the blocking client used to reach it.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join `path` onto the base URL, tolerating slashes on either side.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, path)
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!(%method, %url, "sending request");
        self.client.request(method, url)
    }

    /// GET a JSON document, mapping 404 to `None`.
    pub fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>> {
        let resp = self.request(Method::GET, path).query(query).send()?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = check_status(resp)?;
        Ok(Some(resp.json()?))
    }

    /// Send a JSON body and decode the JSON response.
    pub fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.request(method, path).json(body).send()?;
        let resp = check_status(resp)?;
        Ok(resp.json()?)
    }

    /// POST a JSON body whose response carries no content.
    ///
    /// When `idempotency_key` is given it is sent in the
    /// [`config::IDEMPOTENCY_HEADER`] header.
    pub fn post_no_content<B>(&self, path: &str, body: &B, idempotency_key: Option<&str>) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let mut req = self.request(Method::POST, path).json(body);
        if let Some(key) = idempotency_key {
            req = req.header(config::IDEMPOTENCY_HEADER, key);
        }
        check_status(req.send()?)?;
        Ok(())
    }

    pub fn delete(&self, path: &str) -> Result<()> {
        let resp = self.request(Method::DELETE, path).send()?;
        check_status(resp)?;
        Ok(())
    }
}

/// Turn a non-success response into [`StorefrontError::Backend`].
///
/// The message is taken from an `error` (or `message`) field of a JSON body,
/// then the raw body text, then the status reason phrase.
pub fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| {
            v.get("error")
                .or_else(|| v.get("message"))
                .and_then(|m| m.as_str())
                .map(|s| s.to_string())
        })
        .or_else(|| {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
    Err(StorefrontError::Backend {
        status: status.as_u16(),
        message,
    })
}

/// Fresh random 128-bit key, hex encoded.
pub fn new_idempotency_key() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

