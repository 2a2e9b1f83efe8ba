//! Client configuration.

use std::fmt;
use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};

/// Configuration for an Engage API client.
///
/// Verbosity lives here rather than in any process-wide state: the one
/// knob it controls is whether request and response bodies are logged at
/// debug level.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the XML API endpoint.
    pub base_url: String,
    /// Account username for the login exchange.
    pub username: String,
    /// Account password for the login exchange.
    pub password: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
    /// Whether to log request/response bodies at debug level.
    pub enable_tracing: bool,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("user_agent", &self.user_agent)
            .field("enable_tracing", &self.enable_tracing)
            .finish()
    }
}

impl ClientConfig {
    /// Create a configuration with default timeouts.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Self::builder(base_url, username, password).build()
    }

    /// Create a new client config builder.
    pub fn builder(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> ClientConfigBuilder {
        ClientConfigBuilder::new(base_url, username, password)
    }

    /// Load configuration from `ENGAGE_URL`, `ENGAGE_USERNAME`, and
    /// `ENGAGE_PASSWORD`.
    pub fn from_env() -> Result<Self> {
        let base_url = require_env("ENGAGE_URL")?;
        let username = require_env("ENGAGE_USERNAME")?;
        let password = require_env("ENGAGE_PASSWORD")?;
        Self::new(base_url, username, password)
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| {
        Error::new(ErrorKind::Config(format!(
            "{name} environment variable is not set"
        )))
    })
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            config: ClientConfig {
                base_url: base_url.into(),
                username: username.into(),
                password: password.into(),
                timeout: Duration::from_secs(30),
                connect_timeout: Duration::from_secs(10),
                user_agent: crate::USER_AGENT.to_string(),
                enable_tracing: false,
            },
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set custom User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Enable or disable request/response body tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<ClientConfig> {
        let parsed = url::Url::parse(&self.config.base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::new(ErrorKind::Config(format!(
                "base URL must be http or https, got {:?}",
                parsed.scheme()
            ))));
        }
        if self.config.username.is_empty() {
            return Err(Error::new(ErrorKind::Config("username is empty".into())));
        }
        Ok(self.config)
    }
}
