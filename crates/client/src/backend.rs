//! The backend seam the views are written against.
//!
//! [`PortalApi`] is the production implementation; tests can substitute
//! an in-memory fake.

use async_trait::async_trait;

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
use hrportal_core::types::DbId;

use crate::api::PortalApi;
use crate::error::ClientResult;

#[async_trait]
pub trait PortalBackend: Send + Sync {
    async fn list_processes(&self, params: &ProcessListParams)
        -> ClientResult<Vec<OnboardingProcess>>;
    async fn get_process(&self, process_id: DbId) -> ClientResult<OnboardingProcess>;
    async fn create_process(&self, input: &CreateProcess) -> ClientResult<OnboardingProcess>;
    async fn update_process_status(
        &self,
        process_id: DbId,
        input: &UpdateProcessStatus,
    ) -> ClientResult<OnboardingProcess>;

    async fn create_task(&self, process_id: DbId, input: &CreateTask)
        -> ClientResult<OnboardingTask>;
    async fn update_task(&self, task_id: DbId, input: &UpdateTask) -> ClientResult<OnboardingTask>;
    async fn delete_task(&self, task_id: DbId) -> ClientResult<()>;
    async fn update_task_status(
        &self,
        task_id: DbId,
        input: &UpdateTaskStatus,
    ) -> ClientResult<OnboardingTask>;

    async fn list_templates(&self, params: &TemplateListParams)
        -> ClientResult<Vec<OnboardingTemplate>>;
    async fn get_template(&self, template_id: DbId) -> ClientResult<OnboardingTemplate>;
    async fn create_template(&self, input: &CreateTemplate) -> ClientResult<OnboardingTemplate>;
    async fn update_template(
        &self,
        template_id: DbId,
        input: &UpdateTemplate,
    ) -> ClientResult<OnboardingTemplate>;
    async fn duplicate_template(
        &self,
        template_id: DbId,
        input: &DuplicateTemplate,
    ) -> ClientResult<OnboardingTemplate>;
    async fn delete_template(&self, template_id: DbId) -> ClientResult<()>;
    async fn set_default_template(&self, template_id: DbId) -> ClientResult<OnboardingTemplate>;

    async fn statistics(&self) -> ClientResult<OnboardingStatistics>;
    async fn list_employees(&self) -> ClientResult<Vec<Employee>>;
    async fn list_directory_groups(&self) -> ClientResult<Vec<DirectoryGroup>>;
    async fn list_dynamic_groups(&self) -> ClientResult<Vec<DynamicGroup>>;
    async fn list_distribution_groups(&self) -> ClientResult<Vec<DistributionGroup>>;
}

#[async_trait]
impl PortalBackend for PortalApi {
    async fn list_processes(
        &self,
        params: &ProcessListParams,
    ) -> ClientResult<Vec<OnboardingProcess>> {
        PortalApi::list_processes(self, params).await
    }

    async fn get_process(&self, process_id: DbId) -> ClientResult<OnboardingProcess> {
        PortalApi::get_process(self, process_id).await
    }

    async fn create_process(&self, input: &CreateProcess) -> ClientResult<OnboardingProcess> {
        PortalApi::create_process(self, input).await
    }

    async fn update_process_status(
        &self,
        process_id: DbId,
        input: &UpdateProcessStatus,
    ) -> ClientResult<OnboardingProcess> {
        PortalApi::update_process_status(self, process_id, input).await
    }

    async fn create_task(
        &self,
        process_id: DbId,
        input: &CreateTask,
    ) -> ClientResult<OnboardingTask> {
        PortalApi::create_task(self, process_id, input).await
    }

    async fn update_task(&self, task_id: DbId, input: &UpdateTask) -> ClientResult<OnboardingTask> {
        PortalApi::update_task(self, task_id, input).await
    }

    async fn delete_task(&self, task_id: DbId) -> ClientResult<()> {
        PortalApi::delete_task(self, task_id).await
    }

    async fn update_task_status(
        &self,
        task_id: DbId,
        input: &UpdateTaskStatus,
    ) -> ClientResult<OnboardingTask> {
        PortalApi::update_task_status(self, task_id, input).await
    }

    async fn list_templates(
        &self,
        params: &TemplateListParams,
    ) -> ClientResult<Vec<OnboardingTemplate>> {
        PortalApi::list_templates(self, params).await
    }

    async fn get_template(&self, template_id: DbId) -> ClientResult<OnboardingTemplate> {
        PortalApi::get_template(self, template_id).await
    }

    async fn create_template(&self, input: &CreateTemplate) -> ClientResult<OnboardingTemplate> {
        PortalApi::create_template(self, input).await
    }

    async fn update_template(
        &self,
        template_id: DbId,
        input: &UpdateTemplate,
    ) -> ClientResult<OnboardingTemplate> {
        PortalApi::update_template(self, template_id, input).await
    }

    async fn duplicate_template(
        &self,
        template_id: DbId,
        input: &DuplicateTemplate,
    ) -> ClientResult<OnboardingTemplate> {
        PortalApi::duplicate_template(self, template_id, input).await
    }

    async fn delete_template(&self, template_id: DbId) -> ClientResult<()> {
        PortalApi::delete_template(self, template_id).await
    }

    async fn set_default_template(&self, template_id: DbId) -> ClientResult<OnboardingTemplate> {
        PortalApi::set_default_template(self, template_id).await
    }

    async fn statistics(&self) -> ClientResult<OnboardingStatistics> {
        PortalApi::statistics(self).await
    }

    async fn list_employees(&self) -> ClientResult<Vec<Employee>> {
        PortalApi::list_employees(self).await
    }

    async fn list_directory_groups(&self) -> ClientResult<Vec<DirectoryGroup>> {
        PortalApi::list_directory_groups(self).await
    }

    async fn list_dynamic_groups(&self) -> ClientResult<Vec<DynamicGroup>> {
        PortalApi::list_dynamic_groups(self).await
    }

    async fn list_distribution_groups(&self) -> ClientResult<Vec<DistributionGroup>> {
        PortalApi::list_distribution_groups(self).await
    }
}
