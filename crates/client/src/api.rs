//! REST API client for the HR portal backend.
//!
//! Wraps the onboarding, personnel and group endpoints using [`reqwest`].
//! Every response is unwrapped from the `{ "data": ... }` envelope and every
//! non-2xx status is classified into a [`ClientError`].

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use hrportal_core::models::employee::Employee;
use hrportal_core::models::group::{DirectoryGroup, DistributionGroup, DynamicGroup};
use hrportal_core::models::process::{
    CreateProcess, OnboardingProcess, ProcessListParams, UpdateProcessStatus,
};
use hrportal_core::models::statistics::OnboardingStatistics;
use hrportal_core::models::task::{CreateTask, OnboardingTask, UpdateTask, UpdateTaskStatus};
use hrportal_core::models::template::{
    CreateTemplate, DuplicateTemplate, OnboardingTemplate, TemplateListParams, UpdateTemplate,
};
use hrportal_core::response::DataResponse;
use hrportal_core::types::DbId;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Header carrying a per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client for one portal backend.
#[derive(Debug, Clone)]
pub struct PortalApi {
    client: reqwest::Client,
    api_url: String,
    api_token: Option<String>,
}

impl PortalApi {
    /// Build a client with the configured timeouts.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    // ---- processes ----

    /// `GET /onboarding/processes`
    pub async fn list_processes(
        &self,
        params: &ProcessListParams,
    ) -> ClientResult<Vec<OnboardingProcess>> {
        let request = self.request(Method::GET, "/onboarding/processes").query(params);
        Self::send(request).await
    }

    /// `GET /onboarding/processes/{id}`
    pub async fn get_process(&self, process_id: DbId) -> ClientResult<OnboardingProcess> {
        self.get(&format!("/onboarding/processes/{process_id}")).await
    }

    /// `POST /onboarding/processes`
    pub async fn create_process(&self, input: &CreateProcess) -> ClientResult<OnboardingProcess> {
        self.post("/onboarding/processes", input).await
    }

    /// `PUT /onboarding/processes/{id}/status`
    pub async fn update_process_status(
        &self,
        process_id: DbId,
        input: &UpdateProcessStatus,
    ) -> ClientResult<OnboardingProcess> {
        self.put(&format!("/onboarding/processes/{process_id}/status"), input)
            .await
    }

    // ---- tasks ----

    /// `POST /onboarding/processes/{id}/tasks`
    pub async fn create_task(
        &self,
        process_id: DbId,
        input: &CreateTask,
    ) -> ClientResult<OnboardingTask> {
        self.post(&format!("/onboarding/processes/{process_id}/tasks"), input)
            .await
    }

    /// `PUT /onboarding/tasks/{id}`
    pub async fn update_task(
        &self,
        task_id: DbId,
        input: &UpdateTask,
    ) -> ClientResult<OnboardingTask> {
        self.put(&format!("/onboarding/tasks/{task_id}"), input).await
    }

    /// `DELETE /onboarding/tasks/{id}`
    pub async fn delete_task(&self, task_id: DbId) -> ClientResult<()> {
        self.delete(&format!("/onboarding/tasks/{task_id}")).await
    }

    /// `PUT /onboarding/tasks/{id}/status`
    pub async fn update_task_status(
        &self,
        task_id: DbId,
        input: &UpdateTaskStatus,
    ) -> ClientResult<OnboardingTask> {
        self.put(&format!("/onboarding/tasks/{task_id}/status"), input)
            .await
    }

    // ---- templates ----

    /// `GET /onboarding/templates`
    pub async fn list_templates(
        &self,
        params: &TemplateListParams,
    ) -> ClientResult<Vec<OnboardingTemplate>> {
        let request = self.request(Method::GET, "/onboarding/templates").query(params);
        Self::send(request).await
    }

    /// `GET /onboarding/templates/{id}`
    pub async fn get_template(&self, template_id: DbId) -> ClientResult<OnboardingTemplate> {
        self.get(&format!("/onboarding/templates/{template_id}")).await
    }

    /// `POST /onboarding/templates`
    pub async fn create_template(
        &self,
        input: &CreateTemplate,
    ) -> ClientResult<OnboardingTemplate> {
        self.post("/onboarding/templates", input).await
    }

    /// `PUT /onboarding/templates/{id}`
    pub async fn update_template(
        &self,
        template_id: DbId,
        input: &UpdateTemplate,
    ) -> ClientResult<OnboardingTemplate> {
        self.put(&format!("/onboarding/templates/{template_id}"), input)
            .await
    }

    /// `POST /onboarding/templates/{id}/duplicate`
    pub async fn duplicate_template(
        &self,
        template_id: DbId,
        input: &DuplicateTemplate,
    ) -> ClientResult<OnboardingTemplate> {
        self.post(&format!("/onboarding/templates/{template_id}/duplicate"), input)
            .await
    }

    /// `DELETE /onboarding/templates/{id}`
    pub async fn delete_template(&self, template_id: DbId) -> ClientResult<()> {
        self.delete(&format!("/onboarding/templates/{template_id}"))
            .await
    }

    /// `PUT /onboarding/templates/{id}/default`
    ///
    /// Exclusivity per process type is the backend's to enforce.
    pub async fn set_default_template(
        &self,
        template_id: DbId,
    ) -> ClientResult<OnboardingTemplate> {
        let request = self.request(
            Method::PUT,
            &format!("/onboarding/templates/{template_id}/default"),
        );
        Self::send(request).await
    }

    // ---- statistics, personnel, groups ----

    /// `GET /onboarding/statistics`
    pub async fn statistics(&self) -> ClientResult<OnboardingStatistics> {
        self.get("/onboarding/statistics").await
    }

    /// `GET /employees`
    pub async fn list_employees(&self) -> ClientResult<Vec<Employee>> {
        self.get("/employees").await
    }

    /// `GET /groups/directory`
    pub async fn list_directory_groups(&self) -> ClientResult<Vec<DirectoryGroup>> {
        self.get("/groups/directory").await
    }

    /// `GET /groups/dynamic`
    pub async fn list_dynamic_groups(&self) -> ClientResult<Vec<DynamicGroup>> {
        self.get("/groups/dynamic").await
    }

    /// `GET /groups/distribution`
    pub async fn list_distribution_groups(&self) -> ClientResult<Vec<DistributionGroup>> {
        self.get("/groups/distribution").await
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.api_url, path)
    }

    /// Start a request with the correlation id and, if configured, the
    /// bearer token attached.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(method = method.as_str(), path, request_id = %request_id, "Backend request");

        let builder = self
            .client
            .request(method, self.url(path))
            .header(REQUEST_ID_HEADER, request_id);
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        Self::send(self.request(Method::GET, path)).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        Self::send(self.request(Method::POST, path).json(body)).await
    }

    async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        Self::send(self.request(Method::PUT, path).json(body)).await
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        let response = self.request(Method::DELETE, path).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        Self::parse_response(response).await
    }

    /// Return the response unchanged on success, or the classified error
    /// built from its status and body.
    async fn ensure_success(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::from_response(status, &body));
        }
        Ok(response)
    }

    /// Parse a successful `{ "data": T }` body.
    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        let envelope: DataResponse<T> = serde_json::from_slice(&bytes)?;
        Ok(envelope.data)
    }
}
