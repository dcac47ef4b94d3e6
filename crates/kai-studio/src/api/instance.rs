//! Instance-management API.
//!
//! Knowledge base payloads (`options`, `search_goal`) are opaque JSON and
//! are validated only by the service.

use crate::client::{KaiStudio, Service};
use crate::error::Result;
use crate::types::{
    AddKbRequest, RemoveKbRequest, SetPlaygroundRequest, UpdateKbRequest, UpdateNameRequest,
};

/// Instance-management service client.
pub struct InstanceApi {
    client: KaiStudio,
}

impl InstanceApi {
    pub(crate) fn new(client: KaiStudio) -> Self {
        Self { client }
    }

    /// Generate a new API key for the instance.
    ///
    /// The client keeps sending the key it was built with; build a new
    /// client to use the new one.
    pub async fn generate_new_api_key(&self) -> Result<bool> {
        self.client
            .post(Service::Management, "generate-new-apikey")
            .await
    }

    /// Rename the instance.
    pub async fn update_name(&self, name: &str) -> Result<bool> {
        self.client
            .post_json(Service::Management, "update-name", &UpdateNameRequest { name })
            .await
    }

    /// Deploy the instance.
    pub async fn deploy(&self) -> Result<bool> {
        self.client.post(Service::Management, "deploy").await
    }

    /// Delete the instance.
    pub async fn delete(&self) -> Result<bool> {
        self.client.post(Service::Management, "delete").await
    }

    /// Add a knowledge base.
    pub async fn add_kb(
        &self,
        kb_type: impl Into<String>,
        options: serde_json::Value,
        search_goal: serde_json::Value,
    ) -> Result<bool> {
        self.add_kb_with(AddKbRequest {
            kb_type: kb_type.into(),
            options,
            search_goal,
        })
        .await
    }

    /// Add a knowledge base from a prepared request.
    pub async fn add_kb_with(&self, request: AddKbRequest) -> Result<bool> {
        self.client
            .post_json(Service::Management, "add-kb", &request)
            .await
    }

    /// Set which knowledge base types are active in the playground.
    pub async fn set_playground(&self, type_list: &[String]) -> Result<bool> {
        self.client
            .post_json(
                Service::Management,
                "set-playground",
                &SetPlaygroundRequest { type_list },
            )
            .await
    }

    /// Update a knowledge base.
    pub async fn update_kb(
        &self,
        id: impl Into<String>,
        options: serde_json::Value,
        search_goal: serde_json::Value,
    ) -> Result<bool> {
        self.update_kb_with(UpdateKbRequest {
            id: id.into(),
            options,
            search_goal,
        })
        .await
    }

    /// Update a knowledge base from a prepared request.
    pub async fn update_kb_with(&self, request: UpdateKbRequest) -> Result<bool> {
        self.client
            .post_json(Service::Management, "update-kb", &request)
            .await
    }

    /// Remove a knowledge base.
    pub async fn remove_kb(&self, id: &str) -> Result<bool> {
        self.client
            .post_json(Service::Management, "remove-kb", &RemoveKbRequest { id })
            .await
    }
}
