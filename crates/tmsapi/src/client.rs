//! `HttpClient` - request dispatcher for the TMS API.

use std::fmt;
use std::sync::Mutex;
use std::time::Duration;

use reqwest::Client;
use serde_json::{Map, Value};
use tracing::instrument;
use url::{Url, form_urlencoded};

use crate::envelope::normalize;
use crate::error::{Result, TmsError};
use crate::query::QueryParams;

/// API version segment prefixed to every metadata path.
pub const API_VERSION: &str = "v1.1";

/// Default base URL for metadata endpoints.
pub const BASE_URL: &str = "http://data.tmsapi.com/";

/// Default base URL for binary image assets.
pub const BASE_ASSET_URL: &str = "http://developer.tmsimg.com/";

/// Default User-Agent.
const DEFAULT_USER_AGENT: &str = concat!("tmsapi/", env!("CARGO_PKG_VERSION"));

/// Body defaults merged under every POST payload.
const POST_DEFAULT_EXPIRES_IN: u64 = 30;

/// Builds a versioned request path: `v1.1{resource_path}[?{query}]`.
///
/// The `?` separator is only added when the rendered query is non-empty.
#[must_use]
pub fn build_path(resource_path: &str, query: &QueryParams) -> String {
    let rendered = query.render();
    if rendered.is_empty() {
        format!("{API_VERSION}{resource_path}")
    } else {
        format!("{API_VERSION}{resource_path}?{rendered}")
    }
}

/// Percent-encodes one path segment, so `/`, `?`, `#` and `%` stay inside it.
///
/// `EP1#x` becomes `EP1%23x`.
#[must_use]
pub fn encode_segment(segment: &str) -> String {
    // byte_serialize maps space to `+` and escapes a literal `+` as `%2B`.
    form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Ensures a base URL ends with `/` so relative joins append to its path.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// TMS API request dispatcher.
///
/// Holds no request-scoped state: each operation builds its own
/// [`QueryParams`] via [`HttpClient::query`]. The last observed result count
/// is kept for inspection only.
pub struct HttpClient {
    /// HTTP client (reqwest, gzip enabled).
    http_client: Client,
    /// Base URL for metadata requests.
    base_url: Url,
    /// Base URL for asset requests.
    asset_base_url: Url,
    /// API key sent as the `api_key` query parameter.
    api_key: String,
    /// Result count from the most recent `meta` envelope.
    last_count: Mutex<Option<u64>>,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("asset_base_url", &self.asset_base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Builder for `HttpClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct HttpClientBuilder {
    base_url: Option<Url>,
    asset_base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl HttpClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            asset_base_url: None,
            api_key: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Overrides the metadata base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Overrides the asset base URL.
    #[must_use]
    pub fn asset_base_url(mut self, url: Url) -> Self {
        self.asset_base_url = Some(url);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (default: `tmsapi/<version>`).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets a total request timeout, enforced by the HTTP client.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set or empty.
    /// - A default base URL fails to parse.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<HttpClient> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(TmsError::MissingParameter("api_key"))?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(BASE_URL)?,
        };
        let asset_base_url = match self.asset_base_url {
            Some(url) => url,
            None => Url::parse(BASE_ASSET_URL)?,
        };

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| String::from(DEFAULT_USER_AGENT));

        let mut builder = Client::builder().user_agent(&user_agent).gzip(true);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(HttpClient {
            http_client,
            base_url: with_trailing_slash(base_url),
            asset_base_url: with_trailing_slash(asset_base_url),
            api_key,
            last_count: Mutex::new(None),
        })
    }
}

impl HttpClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// Creates a client for the public endpoints with the given API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or the HTTP client fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Returns a fresh parameter set carrying the `api_key`.
    #[must_use]
    pub fn query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.set("api_key", &self.api_key);
        query
    }

    /// Last result count reported by the API, if any.
    ///
    /// Advisory only: with concurrent operations it may belong to any
    /// recently completed request.
    #[must_use]
    pub fn count(&self) -> Option<u64> {
        self.last_count.lock().ok().and_then(|guard| *guard)
    }

    /// Metadata base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Asset base URL.
    #[must_use]
    pub const fn asset_base_url(&self) -> &Url {
        &self.asset_base_url
    }

    /// Sends a GET request and returns the normalized JSON payload.
    ///
    /// # Errors
    ///
    /// Returns a transport error on network failure or non-2xx status, or
    /// `Decode` if the body is not JSON.
    #[instrument(skip_all, fields(path = resource_path))]
    pub async fn get(&self, resource_path: &str, query: &QueryParams) -> Result<Value> {
        let url = self.base_url.join(&build_path(resource_path, query))?;
        tracing::debug!(params = ?query.names(), "TMS API GET");

        let response = self.http_client.get(url).send().await?;
        let body = Self::read_success_body(response).await?;
        self.finish(&body)
    }

    /// Sends a POST request with a JSON body and returns the normalized payload.
    ///
    /// Object bodies are merged over `{"expires_in": 30}`; caller keys win.
    /// `null` sends the defaults alone.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBody` for any other body before sending, otherwise
    /// the same as [`HttpClient::get`].
    #[instrument(skip_all, fields(path = resource_path))]
    pub async fn post(
        &self,
        resource_path: &str,
        query: &QueryParams,
        body: &Value,
    ) -> Result<Value> {
        let mut payload = Map::new();
        payload.insert(
            String::from("expires_in"),
            Value::from(POST_DEFAULT_EXPIRES_IN),
        );
        match body {
            Value::Object(fields) => payload.extend(fields.clone()),
            Value::Null => {}
            _ => return Err(TmsError::InvalidBody),
        }

        let url = self.base_url.join(&build_path(resource_path, query))?;
        tracing::debug!(params = ?query.names(), "TMS API POST");

        let response = self
            .http_client
            .post(url)
            .json(&Value::Object(payload))
            .send()
            .await?;
        let body = Self::read_success_body(response).await?;
        self.finish(&body)
    }

    /// Fetches a binary asset from the asset endpoint.
    ///
    /// The path is `assets/{asset_id}` with no version prefix and the id
    /// percent-encoded. The body is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns a transport error on network failure or non-2xx status.
    #[instrument(skip_all, fields(asset = asset_id))]
    pub async fn get_asset(&self, asset_id: &str, query: &QueryParams) -> Result<Vec<u8>> {
        let mut url = self
            .asset_base_url
            .join(&format!("assets/{}", encode_segment(asset_id)))?;
        let rendered = query.render();
        if !rendered.is_empty() {
            url.set_query(Some(&rendered));
        }
        tracing::debug!(params = ?query.names(), "TMS asset GET");

        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(response).await);
        }
        let bytes = response.bytes().await?;
        tracing::debug!(%status, body_len = bytes.len(), "TMS asset received");
        Ok(bytes.to_vec())
    }

    /// Reads the body of a 2xx response, or turns the response into `Status`.
    async fn read_success_body(response: reqwest::Response) -> Result<String> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(response).await);
        }
        let body = response.text().await?;
        tracing::debug!(%status, body_len = body.len(), "TMS API response");
        Ok(body)
    }

    async fn status_error(response: reqwest::Response) -> TmsError {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<failed to read body>"));
        tracing::warn!(code = status.as_u16(), "TMS API returned an error status");
        TmsError::Status {
            status: status.as_u16(),
            body,
        }
    }

    /// Normalizes a body and records its result count.
    fn finish(&self, body: &str) -> Result<Value> {
        let normalized = normalize(body)?;
        if let Some(count) = normalized.count
            && let Ok(mut guard) = self.last_count.lock()
        {
            *guard = Some(count);
        }
        Ok(normalized.data)
    }
}
