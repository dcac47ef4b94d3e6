//! Files API.

use crate::client::{KaiStudio, Service};
use crate::error::Result;
use crate::types::{
    DeleteFileRequest, DownloadFileRequest, FileSignature, FileUploadResponse, UploadFile,
};

/// Multipart field name used for every uploaded file.
const UPLOAD_FIELD: &str = "files";

/// File service client.
pub struct FilesApi {
    client: KaiStudio,
}

impl FilesApi {
    pub(crate) fn new(client: KaiStudio) -> Self {
        Self { client }
    }

    /// List the files stored for the instance.
    pub async fn list_files(&self) -> Result<Vec<FileSignature>> {
        self.client.post(Service::Files, "list-files").await
    }

    /// Download a file by name.
    pub async fn download_file(&self, file_name: &str) -> Result<Vec<FileSignature>> {
        self.client
            .post_json(
                Service::Files,
                "download-file",
                &DownloadFileRequest { file_name },
            )
            .await
    }

    /// Upload files in a single multipart request.
    ///
    /// Returns one result per file. An empty input returns an empty result
    /// without contacting the service.
    pub async fn upload_files(&self, files: Vec<UploadFile>) -> Result<Vec<FileUploadResponse>> {
        if files.is_empty() {
            tracing::debug!("no files to upload");
            return Ok(Vec::new());
        }

        let mut form = reqwest::multipart::Form::new();
        for file in files {
            form = form.part(UPLOAD_FIELD, file.into_part()?);
        }

        self.client
            .post_multipart(Service::Files, "upload-file", form)
            .await
    }

    /// Delete a file by name.
    pub async fn remove_file(&self, file_name: &str) -> Result<bool> {
        self.client
            .post_json(
                Service::Files,
                "delete-file",
                &DeleteFileRequest { file: file_name },
            )
            .await
    }
}
