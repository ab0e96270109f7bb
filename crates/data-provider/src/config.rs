//! # Provider Configuration
//!
//! A [`ProviderConfig`] is built once and handed to
//! [`RestDataProvider`](crate::provider::RestDataProvider) at construction.
//! Nothing is read from globals afterwards, so differently configured
//! providers can live side by side (one per test, for instance).
//!
//! The only environment input is the backend base URL:
//!
//! ```bash
//! ADMIN_API_URL=https://admin.example.com/api cargo run
//! ```

use crate::error::ConfigError;
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// What `create` returns as the created record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CreatePolicy {
    /// The submitted record with the server-assigned `id` written over it.
    /// Any other field the server computed is dropped.
    #[default]
    EchoInput,
    /// The record the server returned under `data`, with the server id
    /// injected when that record has none.
    TrustServer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    base_url: Url,
    create_policy: CreatePolicy,
    total_from_content_range: bool,
}

impl ProviderConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:3000/api";
    pub const BASE_URL_ENV: &'static str = "ADMIN_API_URL";

    /// Validates `base_url` and applies defaults for everything else.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url: url,
            create_policy: CreatePolicy::default(),
            total_from_content_range: false,
        })
    }

    /// Reads the base URL from `ADMIN_API_URL`, falling back to
    /// [`Self::DEFAULT_BASE_URL`].
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(Self::BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::new(Self::DEFAULT_BASE_URL),
        }
    }

    pub fn with_create_policy(mut self, policy: CreatePolicy) -> Self {
        self.create_policy = policy;
        self
    }

    /// Lets `list` and `get-many-reference` read `total` from a
    /// `Content-Range: <unit> <start>-<end>/<total>` header when the body has
    /// no `total`. Off by default: a missing `total` is then malformed.
    pub fn with_content_range_total(mut self, enabled: bool) -> Self {
        self.total_from_content_range = enabled;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn create_policy(&self) -> CreatePolicy {
        self.create_policy
    }

    pub fn total_from_content_range(&self) -> bool {
        self.total_from_content_range
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(Self::DEFAULT_BASE_URL).expect("default base URL is valid"),
            create_policy: CreatePolicy::default(),
            total_from_content_range: false,
        }
    }
}
