//! Reddit API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Comment-tree operations reach it only through the [`Requester`] trait.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde_json::Value;
use url::Url;

use crate::error::{ApiFault, RedditError, Result};
use crate::traits::{Params, Requester, SharedRequester};

const DEFAULT_API_URL: &str = "https://oauth.reddit.com";
const USER_AGENT: &str = concat!("redtree/", env!("CARGO_PKG_VERSION"));

/// Low-level Reddit API client.
///
/// Sends bearer-authenticated requests and decodes JSON bodies. Obtaining
/// and refreshing the token is left to the caller.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use redtree::RedditClient;
///
/// # fn example() -> redtree::Result<()> {
/// // Create from environment variables
/// let client = RedditClient::from_env()?;
///
/// // Or configure manually
/// let client = RedditClient::new("access-token", "https://oauth.reddit.com")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RedditClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
}

impl std::fmt::Debug for RedditClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedditClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl RedditClient {
    /// Create a client from environment variables.
    ///
    /// Uses `REDDIT_ACCESS_TOKEN` for authentication, optionally
    /// `REDDIT_API_URL` for the base URL (defaults to
    /// `https://oauth.reddit.com`) and `REDDIT_USER_AGENT`.
    ///
    /// # Errors
    ///
    /// Returns an error if `REDDIT_ACCESS_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("REDDIT_ACCESS_TOKEN").map_err(|_| {
            RedditError::ConfigMissing(
                "REDDIT_ACCESS_TOKEN environment variable not set".to_string(),
            )
        })?;

        let base_url =
            env::var("REDDIT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let user_agent =
            env::var("REDDIT_USER_AGENT").unwrap_or_else(|_| USER_AGENT.to_string());

        Self::with_user_agent(&token, &base_url, &user_agent)
    }

    /// Create a new client with the provided token and base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        Self::with_user_agent(token, base_url, USER_AGENT)
    }

    /// Create a new client with a custom `User-Agent` header.
    ///
    /// Reddit throttles generic user agents, so long-running tools should
    /// identify themselves.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn with_user_agent(token: &str, base_url: &str, user_agent: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(user_agent)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(RedditError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Wrap the client for embedding in trees and thunks.
    pub fn shared(self) -> SharedRequester {
        Arc::new(self)
    }

    /// Send a request and decode its JSON body.
    #[tracing::instrument(skip(self, params))]
    pub async fn send(&self, method: Method, path: &str, params: &Params) -> Result<Value> {
        let url = self.base_url.join(path.trim_start_matches('/'))?;

        let request = self
            .http
            .request(method.clone(), url)
            .bearer_auth(&self.token)
            .query(&[("raw_json", "1")]);

        let request = if method == Method::GET {
            request.query(params)
        } else {
            request.form(params)
        };

        let response = request.send().await.map_err(RedditError::HttpError)?;
        let response = Self::check_response(response).await?;
        let body: Value = response.json().await.map_err(RedditError::HttpError)?;

        check_api_errors(&body)?;
        Ok(body)
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(RedditError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(RedditError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        // Try to parse as JSON and extract message field
        if let Ok(json) = serde_json::from_str::<Value>(&body) {
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                return err.to_string();
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}

#[async_trait]
impl Requester for RedditClient {
    async fn request(&self, method: Method, path: &str, params: &Params) -> Result<Value> {
        self.send(method, path, params).await
    }
}

/// Surface `json.errors` from an `api_type=json` body as [`RedditError::ApiRejected`].
fn check_api_errors(body: &Value) -> Result<()> {
    let Some(errors) = body.pointer("/json/errors").and_then(Value::as_array) else {
        return Ok(());
    };
    if errors.is_empty() {
        return Ok(());
    }

    let faults = errors
        .iter()
        .map(|entry| {
            let part = |i: usize| entry.get(i).and_then(Value::as_str).map(str::to_string);
            ApiFault {
                code: part(0).unwrap_or_else(|| "UNKNOWN".to_string()),
                message: part(1).unwrap_or_default(),
                field: part(2),
            }
        })
        .collect();

    Err(RedditError::ApiRejected(faults))
}
