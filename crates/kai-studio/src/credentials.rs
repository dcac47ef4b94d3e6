//! Credentials and the headers derived from them.
//!
//! Two modes are supported:
//!
//! - **Managed cloud**: `instance_id` and `api_key` are set; requests carry
//!   `organization-id`, `instance-id` and `api-key` headers and the base URL
//!   is [`MANAGED_BASE_URL`].
//! - **Self-hosted**: `host` is set; it becomes the base URL, and when an
//!   `api_key` is present it is the only header sent.
//!
//! With neither, no headers are sent and the base URL is empty. File and
//! management calls still reach their fixed hosts in that case; the empty
//! base URL is kept as reported and not substituted with a default.

use std::collections::BTreeMap;
use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Base URL of the managed cloud platform.
pub const MANAGED_BASE_URL: &str = "https://api.kai-studio.ai/";

/// Header carrying the organization id.
pub const ORGANIZATION_ID_HEADER: &str = "organization-id";

/// Header carrying the instance id.
pub const INSTANCE_ID_HEADER: &str = "instance-id";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "api-key";

/// Caller-supplied credentials.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Organization owning the instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    /// Instance to operate on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    /// API key for the instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Self-hosted base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

impl Credentials {
    /// Credentials for the managed cloud.
    pub fn managed(
        organization_id: impl Into<String>,
        instance_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            organization_id: Some(organization_id.into()),
            instance_id: Some(instance_id.into()),
            api_key: Some(api_key.into()),
            host: None,
        }
    }

    /// Credentials for a self-hosted deployment.
    pub fn self_hosted(host: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            ..Default::default()
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the organization id.
    pub fn with_organization_id(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    /// Set the instance id.
    pub fn with_instance_id(mut self, instance_id: impl Into<String>) -> Self {
        self.instance_id = Some(instance_id.into());
        self
    }

    /// Set the self-hosted base URL.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("organization_id", &self.organization_id)
            .field("instance_id", &self.instance_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("host", &self.host)
            .finish()
    }
}

/// Empty strings count as unset.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Headers and base URL resolved from [`Credentials`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ResolvedHeaders {
    headers: BTreeMap<&'static str, String>,
    base_url: String,
}

impl ResolvedHeaders {
    /// Resolve the header set and base URL for the given credentials.
    ///
    /// The managed and self-hosted checks run in sequence: a host overrides
    /// the managed base URL, and a host with an API key replaces the managed
    /// header set with `api-key` alone.
    pub fn resolve(credentials: &Credentials) -> Self {
        let mut resolved = Self::default();

        if let (Some(instance_id), Some(api_key)) = (
            present(&credentials.instance_id),
            present(&credentials.api_key),
        ) {
            let mut headers = BTreeMap::new();
            if let Some(organization_id) = present(&credentials.organization_id) {
                headers.insert(ORGANIZATION_ID_HEADER, organization_id.to_string());
            }
            headers.insert(INSTANCE_ID_HEADER, instance_id.to_string());
            headers.insert(API_KEY_HEADER, api_key.to_string());

            resolved.headers = headers;
            resolved.base_url = MANAGED_BASE_URL.to_string();
        }

        if let Some(host) = present(&credentials.host) {
            resolved.base_url = host.to_string();
            if let Some(api_key) = present(&credentials.api_key) {
                resolved.headers = BTreeMap::from([(API_KEY_HEADER, api_key.to_string())]);
            }
        }

        resolved
    }

    /// Header names and values, ordered by name.
    pub fn headers(&self) -> &BTreeMap<&'static str, String> {
        &self.headers
    }

    /// Look up a single header value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Resolved base URL. Empty when neither mode applies.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// True when no headers were resolved.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Build the header map installed on the HTTP client.
    ///
    /// The API key is marked sensitive so it stays out of transport logs.
    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (&name, value) in &self.headers {
            let mut header = HeaderValue::from_str(value)
                .map_err(|_| Error::Config(format!("invalid value for header '{}'", name)))?;
            if name == API_KEY_HEADER {
                header.set_sensitive(true);
            }
            map.insert(HeaderName::from_static(name), header);
        }
        Ok(map)
    }
}

impl fmt::Debug for ResolvedHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedHeaders")
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("base_url", &self.base_url)
            .finish()
    }
}
