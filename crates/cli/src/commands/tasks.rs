use anyhow::{bail, Result};

use hrportal_core::models::task::CreateTask;
use hrportal_core::task_type::TaskTypeCode;

use crate::commands::check;
use crate::commands::processes::{open, show};
use crate::{Context, TaskCommand};

pub async fn execute(ctx: &Context, cmd: TaskCommand) -> Result<()> {
    match cmd {
        TaskCommand::Status {
            process_id,
            task_id,
            status,
            notes,
        } => {
            let view = open(ctx, process_id).await?;
            check(
                view.change_task_status(task_id, status, notes).await,
                || view.error(),
            )?;
            show(ctx, &view)
        }

        TaskCommand::Add {
            process_id,
            task_type,
            title,
            days,
            optional,
        } => {
            let task_type = TaskTypeCode(task_type);
            if task_type.template_type().is_none() && task_type.detail_type().is_none() {
                bail!("Unknown task type '{task_type}'");
            }
            let view = open(ctx, process_id).await?;
            let input = CreateTask {
                task_type,
                title,
                description: None,
                is_mandatory: !optional,
                expected_duration_days: days,
                deadline: None,
                assigned_to_id: None,
            };
            check(view.add_task(input).await, || view.error())?;
            show(ctx, &view)
        }

        TaskCommand::Assign {
            process_id,
            task_id,
            employee_id,
        } => {
            let view = open(ctx, process_id).await?;
            check(view.assign_task(task_id, employee_id).await, || {
                view.error()
            })?;
            show(ctx, &view)
        }

        TaskCommand::Delete {
            process_id,
            task_id,
        } => {
            let view = open(ctx, process_id).await?;
            check(view.delete_task(task_id).await, || view.error())?;
            show(ctx, &view)
        }
    }
}
