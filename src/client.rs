//! Nulz mail async client implementation.

use crate::error::Error;
use crate::models::{Inbox, Message, MessagesPage};
use crate::Result;
use rand::{distr::Alphanumeric, Rng};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://v1.nulz.lol/v1";
const API_KEY_ENV: &str = "NULZ_API_KEY";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_USER_AGENT: &str = concat!("nulzmail-client/", env!("CARGO_PKG_VERSION"));
const PAGE_LIMIT: &str = "50";

/// Async client for the nulz mail temporary email service.
///
/// Use [`Client::new`] for defaults or [`Client::builder`] for custom settings
/// like the API key source, base URL, timeout, and proxy.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    proxy: Option<String>,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new client with default settings.
    ///
    /// The API key is read from the `NULZ_API_KEY` environment variable. An
    /// unset variable is not an error here; the server rejects
    /// unauthenticated requests on first use.
    ///
    /// # Examples
    /// ```no_run
    /// # use nulzmail_client::Client;
    /// # fn main() -> Result<(), nulzmail_client::Error> {
    /// let client = Client::new()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// Create a new client with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().api_key(api_key).build()
    }

    /// Get the proxy URL if one was configured.
    ///
    /// Returns `None` when no proxy was set on the builder.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Get the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a disposable inbox.
    ///
    /// # Returns
    /// The new [`Inbox`] with its id and full email address.
    ///
    /// # Examples
    /// ```no_run
    /// # use nulzmail_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), nulzmail_client::Error> {
    /// let client = Client::new()?;
    /// let inbox = client.create_inbox().await?;
    /// println!("{}", inbox.address);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_inbox(&self) -> Result<Inbox> {
        self.create_inbox_with_prefix("").await
    }

    /// Create a disposable inbox whose address starts with `prefix`.
    ///
    /// An empty prefix behaves like [`Client::create_inbox`]. The request
    /// always carries a JSON body (`{}` when no prefix is set) so the backend
    /// sees valid JSON.
    ///
    /// # Arguments
    /// * `prefix` - Desired local-part prefix (e.g. `"signup-test"`)
    ///
    /// # Examples
    /// ```no_run
    /// # use nulzmail_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), nulzmail_client::Error> {
    /// let client = Client::new()?;
    /// let inbox = client.create_inbox_with_prefix("signup-test").await?;
    /// println!("{}", inbox.address);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_inbox_with_prefix(&self, prefix: &str) -> Result<Inbox> {
        let body = if prefix.is_empty() {
            json!({})
        } else {
            json!({ "prefix": prefix })
        };
        self.request(Method::POST, "/aliases", &[], Some(&body))
            .await
    }

    /// List all inboxes on the account.
    ///
    /// # Returns
    /// Every alias the account currently holds; an empty list when there are
    /// none.
    pub async fn list_inboxes(&self) -> Result<Vec<Inbox>> {
        #[derive(Deserialize)]
        struct Envelope {
            aliases: Option<Vec<Inbox>>,
        }

        let envelope: Envelope = self.request(Method::GET, "/aliases", &[], None).await?;
        Ok(envelope.aliases.unwrap_or_default())
    }

    /// Delete an inbox by id.
    ///
    /// # Arguments
    /// * `inbox_id` - Identifier from [`Inbox`]
    pub async fn delete_inbox(&self, inbox_id: &str) -> Result<()> {
        let path = format!("/aliases/{inbox_id}");
        self.send(Method::DELETE, &path, &[], None).await?;
        Ok(())
    }

    /// List messages in an inbox, newest first.
    ///
    /// # Arguments
    /// * `inbox_id` - Identifier from [`Inbox`]
    /// * `cursor` - Pagination token from a previous
    ///   [`MessagesPage::cursor`]; `None` (or an empty token) starts from the
    ///   newest message
    ///
    /// # Examples
    /// ```no_run
    /// # use nulzmail_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), nulzmail_client::Error> {
    /// let client = Client::new()?;
    /// let inbox = client.create_inbox().await?;
    /// let page = client.list_messages(&inbox.id, None).await?;
    /// for msg in &page.messages {
    ///     println!("{}: {}", msg.from_addr, msg.subject);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_messages(
        &self,
        inbox_id: &str,
        cursor: Option<&str>,
    ) -> Result<MessagesPage> {
        let path = format!("/aliases/{inbox_id}/messages");
        let mut query = vec![("limit", PAGE_LIMIT)];
        if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
            query.push(("offset", cursor));
        }
        self.request(Method::GET, &path, &query, None).await
    }

    /// Fetch one message by id, including its bodies.
    ///
    /// # Arguments
    /// * `message_id` - Identifier from a [`MessageSummary`] or [`Message`]
    ///
    /// [`MessageSummary`]: crate::MessageSummary
    pub async fn get_message(&self, message_id: &str) -> Result<Message> {
        let path = format!("/messages/{message_id}");
        self.request(Method::GET, &path, &[], None).await
    }

    /// Common request pattern: send, map non-2xx to an error, decode JSON.
    async fn request<T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&serde_json::Value>,
    ) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.send(method, path, query, body).await?;
        response.json().await.map_err(Error::Http)
    }

    /// Issue one HTTP request and surface non-2xx responses as [`Error::Api`].
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, &url).headers(self.headers());
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(path, status = status.as_u16(), "api response");
        if !status.is_success() {
            return Err(Error::from_response(response).await);
        }
        Ok(response)
    }

    /// Build headers for API requests.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&format!("ApiKey {}", self.api_key)) {
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }
}

/// Generate a random inbox prefix (lowercase alphanumeric).
///
/// The length is clamped to 6..=32 characters. Handy together with
/// [`Client::create_inbox_with_prefix`] when tests need unique addresses.
pub fn random_prefix(len: usize) -> String {
    let length = len.clamp(6, 32);
    let mut rng = rand::rng();
    let raw: String = (0..length)
        .map(|_| rng.sample(Alphanumeric) as char)
        .collect();
    raw.to_lowercase()
}

/// Builder for configuring a nulz mail client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
    proxy: Option<String>,
    user_agent: String,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - API key from the `NULZ_API_KEY` environment variable
    /// - Production base URL
    /// - 30 second request timeout
    /// - No proxy
    /// - `nulzmail-client/<version>` user agent
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            proxy: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set the API key explicitly instead of reading `NULZ_API_KEY`.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the base URL (trailing slashes are trimmed).
    ///
    /// Useful for testing against a mock server or a self-hosted deployment.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the whole-request timeout applied to every call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a proxy URL (e.g., "http://127.0.0.1:8080").
    ///
    /// This uses reqwest's proxy support for all requests.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client.
    ///
    /// Fails only when the HTTP client itself cannot be constructed (bad
    /// proxy URL, TLS backend initialization). A missing API key is not an
    /// error; the server rejects unauthenticated requests instead.
    ///
    /// # Examples
    /// ```no_run
    /// # use nulzmail_client::Client;
    /// # fn main() -> Result<(), nulzmail_client::Error> {
    /// let client = Client::builder()
    ///     .api_key("nlz_0123456789")
    ///     .user_agent("my-app/1.0")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Client> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent);

        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        let http = builder.build()?;
        let api_key = self
            .api_key
            .unwrap_or_else(|| env::var(API_KEY_ENV).unwrap_or_default());

        Ok(Client {
            http,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            api_key,
            proxy: self.proxy,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
