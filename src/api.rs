// Remote data provider: a small blocking HTTP client that talks to the
// SpaceX v4 REST API. The store performs one request per collection and
// blocks on each; there is no retry policy, a failed request aborts the
// fetch pass.

use reqwest::blocking::Client;
use serde_json::Value;
use thiserror::Error;

/// Public SpaceX API, version 4.
pub const DEFAULT_BASE_URL: &str = "https://api.spacexdata.com/v4";

/// Errors produced while talking to the data provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response status {0}")]
    Status(reqwest::StatusCode),
}

/// The four provider calls the store fetches through. The production
/// implementation is [`SpacexApi`]; tests substitute canned data.
pub trait InfoProvider {
    fn company(&self) -> Result<Value, ProviderError>;
    fn launches(&self) -> Result<Value, ProviderError>;
    fn launchpads(&self) -> Result<Value, ProviderError>;
    fn rockets(&self) -> Result<Value, ProviderError>;
}

/// Blocking client for the SpaceX API. Holds a reqwest client and the
/// base URL of the service.
#[derive(Debug, Clone)]
pub struct SpacexApi {
    client: Client,
    base_url: String,
}

impl SpacexApi {
    /// Create a client against the public SpaceX API.
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against an alternative base URL.
    pub fn with_base_url(base_url: &str) -> Result<Self, ProviderError> {
        let client = Client::builder().build()?;
        Ok(SpacexApi {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `{base_url}/{path}` and decode the body as JSON.
    fn get_json(&self, path: &str) -> Result<Value, ProviderError> {
        let url = format!("{}/{}", self.base_url, path);
        let res = self.client.get(&url).send()?;
        if !res.status().is_success() {
            return Err(ProviderError::Status(res.status()));
        }
        Ok(res.json()?)
    }
}

impl InfoProvider for SpacexApi {
    fn company(&self) -> Result<Value, ProviderError> {
        self.get_json("company")
    }

    fn launches(&self) -> Result<Value, ProviderError> {
        self.get_json("launches")
    }

    fn launchpads(&self) -> Result<Value, ProviderError> {
        self.get_json("launchpads")
    }

    fn rockets(&self) -> Result<Value, ProviderError> {
        self.get_json("rockets")
    }
}
