//! Request and response types for the Kai Studio API.
//!
//! These types mirror the services' wire contract, which uses camelCase field
//! names throughout.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Envelope
// ─────────────────────────────────────────────────────────────────────────────

/// Every service reply wraps its payload in a `response` field.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    pub response: T,
}

// ─────────────────────────────────────────────────────────────────────────────
// Files
// ─────────────────────────────────────────────────────────────────────────────

/// A stored file as described by the file service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSignature {
    /// File name.
    pub name: String,
    /// Metadata attached to the file.
    #[serde(default)]
    pub metadata: String,
    /// Last modification timestamp, as reported by the service.
    #[serde(default)]
    pub last_modified: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
}

/// Outcome of uploading a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUploadResponse {
    /// Whether the upload succeeded.
    pub result: bool,
    /// Failure reason, empty on success.
    #[serde(default)]
    pub reason: String,
}

/// A file to upload.
#[derive(Clone)]
pub struct UploadFile {
    file_name: String,
    bytes: Vec<u8>,
    mime_type: Option<String>,
}

impl UploadFile {
    /// Create an upload from in-memory bytes.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
            mime_type: None,
        }
    }

    /// Read a file from disk, using its file name as the upload name.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| Error::Config(format!("path has no file name: {}", path.display())))?;
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(file_name, bytes))
    }

    /// Set the MIME type of the part.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Upload name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// File contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// MIME type, if set.
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub(crate) fn into_part(self) -> Result<reqwest::multipart::Part> {
        let part = reqwest::multipart::Part::bytes(self.bytes).file_name(self.file_name);
        match self.mime_type {
            Some(mime) => Ok(part.mime_str(&mime)?),
            None => Ok(part),
        }
    }
}

impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

/// Request to download a file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DownloadFileRequest<'a> {
    pub file_name: &'a str,
}

/// Request to delete a file. The service names the field `file`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct DeleteFileRequest<'a> {
    pub file: &'a str,
}

// ─────────────────────────────────────────────────────────────────────────────
// Instance management
// ─────────────────────────────────────────────────────────────────────────────

/// Request to rename the instance.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct UpdateNameRequest<'a> {
    pub name: &'a str,
}

/// Request to add a knowledge base.
///
/// `options` and `search_goal` are forwarded untouched; the service validates
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddKbRequest {
    /// Knowledge base type.
    #[serde(rename = "type")]
    pub kb_type: String,
    /// Type-specific options.
    pub options: serde_json::Value,
    /// Search goal for the knowledge base.
    pub search_goal: serde_json::Value,
}

/// Request to update a knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateKbRequest {
    /// Knowledge base id.
    pub id: String,
    /// New options.
    pub options: serde_json::Value,
    /// New search goal.
    pub search_goal: serde_json::Value,
}

/// Request to set the playground's active knowledge base types.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SetPlaygroundRequest<'a> {
    pub type_list: &'a [String],
}

/// Request to remove a knowledge base.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct RemoveKbRequest<'a> {
    pub id: &'a str,
}
