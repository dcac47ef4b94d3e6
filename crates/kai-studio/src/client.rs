//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::{FilesApi, InstanceApi};
use crate::credentials::{Credentials, ResolvedHeaders};
use crate::error::{Error, Result};
use crate::types::ApiEnvelope;

/// Base URL of the file service.
pub const FILE_SERVICE_URL: &str = "https://fma.kai-studio.ai";

/// Base URL of the instance-management service.
pub const MANAGEMENT_SERVICE_URL: &str = "https://ima.kai-studio.ai";

/// Remote service a request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Service {
    Files,
    Management,
}

impl Service {
    fn as_str(self) -> &'static str {
        match self {
            Service::Files => "files",
            Service::Management => "management",
        }
    }
}

/// Base URLs of the file and management services.
///
/// Defaults to the hosted services. Requests are always routed through these
/// endpoints, never through the credential-derived base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoints {
    /// File service base URL.
    pub files: String,
    /// Instance-management service base URL.
    pub management: String,
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            files: FILE_SERVICE_URL.to_string(),
            management: MANAGEMENT_SERVICE_URL.to_string(),
        }
    }
}

/// Parse a base URL, making sure relative joins keep its path.
fn parse_base(url: &str) -> Result<Url> {
    let mut url = Url::parse(url)?;
    if !url.path().ends_with('/') {
        url.set_path(&format!("{}/", url.path()));
    }
    Ok(url)
}

/// Kai Studio API client.
///
/// Resolves credentials into headers once at construction and exposes the
/// file and instance-management APIs. Cloning is cheap; clones share the
/// same HTTP client and resolved headers.
///
/// # Example
///
/// ```no_run
/// use kai_studio::{Credentials, KaiStudio};
///
/// # async fn example() -> kai_studio::Result<()> {
/// let client = KaiStudio::new(Credentials::managed("org", "instance", "key"))?;
///
/// let files = client.files().list_files().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct KaiStudio {
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
pub(crate) struct ClientInner {
    /// HTTP client carrying the resolved headers as defaults.
    pub(crate) http: reqwest::Client,
    /// Credentials as supplied by the caller.
    pub(crate) credentials: Credentials,
    /// Headers and base URL derived from the credentials.
    pub(crate) resolved: ResolvedHeaders,
    /// File service base URL.
    pub(crate) files_url: Url,
    /// Management service base URL.
    pub(crate) management_url: Url,
    /// Request timeout, only when the caller set one.
    pub(crate) timeout: Option<Duration>,
}

impl std::fmt::Debug for KaiStudio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KaiStudio")
            .field("credentials", &self.inner.credentials)
            .field("resolved", &self.inner.resolved)
            .field("files_url", &self.inner.files_url.as_str())
            .field("management_url", &self.inner.management_url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

impl KaiStudio {
    /// Create a client with default settings.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::builder(credentials).build()
    }

    /// Create a new client builder.
    pub fn builder(credentials: Credentials) -> ClientBuilder {
        ClientBuilder::new(credentials)
    }

    /// Credentials the client was built with.
    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    /// Headers attached to every request.
    pub fn headers(&self) -> &ResolvedHeaders {
        &self.inner.resolved
    }

    /// Base URL derived from the credentials.
    ///
    /// Empty when the credentials match neither managed nor self-hosted mode.
    /// No API call uses this value; the services have fixed endpoints.
    pub fn base_url(&self) -> &str {
        self.inner.resolved.base_url()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the file API.
    pub fn files(&self) -> FilesApi {
        FilesApi::new(self.clone())
    }

    /// Access the instance-management API.
    pub fn instance(&self) -> InstanceApi {
        InstanceApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build the URL for a path on a service.
    pub(crate) fn url(&self, service: Service, path: &str) -> Result<Url> {
        let base = match service {
            Service::Files => &self.inner.files_url,
            Service::Management => &self.inner.management_url,
        };
        base.join(path.trim_start_matches('/')).map_err(Error::from)
    }

    fn request(&self, service: Service, path: &str) -> Result<reqwest::RequestBuilder> {
        let url = self.url(service, path)?;
        tracing::debug!(service = service.as_str(), path, "sending request");
        let builder = self.inner.http.post(url);
        Ok(match self.inner.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        })
    }

    /// Make a POST request without a body.
    pub(crate) async fn post<T: DeserializeOwned>(&self, service: Service, path: &str) -> Result<T> {
        let response = self.request(service, path)?.send().await?;
        self.handle_response(service, path, response).await
    }

    /// Make a POST request with a JSON body.
    pub(crate) async fn post_json<T, B>(&self, service: Service, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let response = self.request(service, path)?.json(body).send().await?;
        self.handle_response(service, path, response).await
    }

    /// Make a POST request with a multipart body.
    ///
    /// The content type carries an explicit `charset=utf-8` alongside the
    /// boundary.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let content_type = format!(
            "multipart/form-data; charset=utf-8; boundary={}",
            form.boundary()
        );
        let mut request = self.request(service, path)?.multipart(form).build()?;
        let value = HeaderValue::from_str(&content_type)
            .map_err(|_| Error::Config("invalid multipart content type".to_string()))?;
        request.headers_mut().insert(CONTENT_TYPE, value);

        let response = self.inner.http.execute(request).await?;
        self.handle_response(service, path, response).await
    }

    /// Handle a response, unwrapping the `response` envelope or returning the error.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            let envelope: ApiEnvelope<T> = response.json().await?;
            Ok(envelope.response)
        } else {
            tracing::warn!(
                service = service.as_str(),
                path,
                status = status.as_u16(),
                "request failed"
            );
            let message = response.text().await?;
            Err(Error::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Builder for creating a [`KaiStudio`] client.
#[derive(Debug)]
pub struct ClientBuilder {
    credentials: Credentials,
    endpoints: ServiceEndpoints,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoints: ServiceEndpoints::default(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the service endpoints.
    pub fn endpoints(mut self, endpoints: ServiceEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Set a request timeout.
    ///
    /// Requests have no local time limit unless one is set here.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<KaiStudio> {
        let files_url = parse_base(&self.endpoints.files)?;
        let management_url = parse_base(&self.endpoints.management)?;

        let resolved = ResolvedHeaders::resolve(&self.credentials);
        let headers = resolved.to_header_map()?;

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("kai-studio/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()?;

        Ok(KaiStudio {
            inner: Arc::new(ClientInner {
                http,
                credentials: self.credentials,
                resolved,
                files_url,
                management_url,
                timeout: self.timeout,
            }),
        })
    }
}
