use anyhow::Result;

use hrportal_client::views::{ProcessDetailView, ProcessListView};
use hrportal_core::models::process::{CreateProcess, ProcessListParams};
use hrportal_core::types::DbId;

use crate::commands::{check, failure, today, warn_stale};
use crate::{render, Context, ProcessCommand};

pub async fn execute(ctx: &Context, cmd: ProcessCommand) -> Result<()> {
    match cmd {
        ProcessCommand::List {
            process_type,
            status,
        } => {
            let view = ProcessListView::new(ctx.backend.clone(), ctx.directory.clone());
            let filter = ProcessListParams {
                process_type,
                status,
            };
            check(view.set_filter(filter).await, || view.error())?;

            let rows = view.rows(today());
            if ctx.json {
                return render::json(&rows);
            }
            render::process_rows(&rows);
            if let Some(stats) = view.statistics() {
                println!();
                render::statistics(&stats);
            }
            Ok(())
        }

        ProcessCommand::Show { id } => {
            let view = open(ctx, id).await?;
            show(ctx, &view)
        }

        ProcessCommand::Create {
            process_type,
            title,
            employee,
            email,
            template,
            responsible,
        } => {
            let view = ProcessListView::new(ctx.backend.clone(), ctx.directory.clone());
            let input = CreateProcess {
                process_type,
                title,
                description: None,
                employee_name: employee,
                employee_email: email,
                planned_start_date: None,
                desired_end_date: None,
                responsible_id: responsible,
                template_id: template,
            };
            let id = view
                .create_process(input)
                .await
                .ok_or_else(|| failure(view.error()))?;
            warn_stale(view.error().as_deref());
            println!("Created process {id}");

            let detail = open(ctx, id).await?;
            show(ctx, &detail)
        }

        ProcessCommand::Status { id, action } => {
            let view = open(ctx, id).await?;
            check(view.change_process_status(action.into()).await, || {
                view.error()
            })?;
            show(ctx, &view)
        }
    }
}

/// Load the detail view for `id`.
pub async fn open(ctx: &Context, id: DbId) -> Result<ProcessDetailView> {
    let view = ProcessDetailView::new(ctx.backend.clone(), ctx.directory.clone(), id);
    check(view.load().await, || view.error())?;
    Ok(view)
}

pub fn show(ctx: &Context, view: &ProcessDetailView) -> Result<()> {
    let Some(process) = view.process() else {
        return Err(failure(view.error()));
    };
    if ctx.json {
        return render::json(&process);
    }
    render::process_detail(&process, today());
    Ok(())
}
