use crate::error::Result;
use reqwest::blocking::{Client, ClientBuilder};
use std::time::Duration;
use url::Url;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("abiquo-api-rs/", env!("CARGO_PKG_VERSION"));

/// Create the HTTP client for API requests
pub fn create_rest_client(config: &Config) -> Result<Client> {
    let client = base_builder(config).timeout(config.timeout).build()?;
    Ok(client)
}

/// Create the HTTP client for upload requests with longer timeout
pub fn create_upload_client(config: &Config) -> Result<Client> {
    let client = base_builder(config).timeout(config.upload_timeout).build()?;
    Ok(client)
}

fn base_builder(config: &Config) -> ClientBuilder {
    ClientBuilder::new()
        .pool_max_idle_per_host(50)
        .connect_timeout(config.connect_timeout)
        .danger_accept_invalid_certs(config.insecure)
        .user_agent(USER_AGENT)
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct Config {
    /// API base URL, e.g. `https://abiquo.example.com/api`
    pub api_url: String,
    /// Skip TLS certificate validation
    pub insecure: bool,
    /// Log every request/response pair
    pub debug: bool,
    /// Timeout for a single API request
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Timeout for a single upload request
    pub upload_timeout: Duration,
}

impl Config {
    /// Create a new configuration for the given API base URL
    pub fn new(api_url: impl Into<String>) -> Self {
        Config {
            api_url: api_url.into(),
            insecure: false,
            debug: false,
            timeout: Duration::from_secs(300), // 5 minutes
            connect_timeout: Duration::from_secs(10),
            upload_timeout: Duration::from_secs(3600), // 1 hour
        }
    }

    /// Set debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Accept invalid or self-signed TLS certificates
    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = timeout;
        self
    }

    /// Parse the base URL, dropping any trailing slash
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(self.api_url.trim_end_matches('/'))?;
        Ok(url)
    }
}
