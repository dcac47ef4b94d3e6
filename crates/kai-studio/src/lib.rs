//! HTTP client SDK for the Kai Studio platform.
//!
//! This crate provides a typed client for the Kai Studio file and
//! instance-management services.
//!
//! # Example
//!
//! ```no_run
//! use kai_studio::{Credentials, KaiStudio, Result, UploadFile};
//!
//! # async fn example() -> Result<()> {
//! // Managed cloud credentials
//! let client = KaiStudio::new(Credentials::managed("org-id", "instance-id", "api-key"))?;
//!
//! // Upload a document and list what is stored
//! let file = UploadFile::from_path("handbook.pdf").await?;
//! let results = client.files().upload_files(vec![file]).await?;
//! println!("Uploaded: {}", results.iter().all(|r| r.result));
//!
//! for file in client.files().list_files().await? {
//!     println!("{} ({} bytes)", file.name, file.size);
//! }
//!
//! // Add a knowledge base and redeploy
//! client
//!     .instance()
//!     .add_kb("web", serde_json::json!({"url": "https://example.com"}), "pricing".into())
//!     .await?;
//! client.instance().deploy().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Credential modes
//!
//! - **Managed cloud**: [`Credentials::managed`] sends `organization-id`,
//!   `instance-id` and `api-key` headers.
//! - **Self-hosted**: [`Credentials::self_hosted`] with an optional API key
//!   sends only the `api-key` header.
//!
//! Either way, the file and management APIs talk to their fixed service
//! hosts unless overridden with [`ClientBuilder::endpoints`].
//!
//! # Errors
//!
//! Failures are returned as [`Error`] without retries: transport failures
//! as [`Error::Http`], non-success statuses as [`Error::Api`] carrying the
//! raw response body.

pub mod api;
pub mod client;
pub mod credentials;
pub mod error;
pub mod types;

pub use api::{FilesApi, InstanceApi};
pub use client::{ClientBuilder, KaiStudio, ServiceEndpoints};
pub use credentials::{Credentials, ResolvedHeaders};
pub use error::{Error, Result};
pub use types::*;
