use anyhow::{anyhow, Result};

use hrportal_client::views::{TemplateEditorView, TemplateListView};
use hrportal_core::process_status::ProcessType;
use hrportal_core::types::DbId;

use crate::commands::{check, failure, warn_stale};
use crate::{render, Context, Direction, TemplateCommand};

pub async fn execute(ctx: &Context, cmd: TemplateCommand) -> Result<()> {
    match cmd {
        TemplateCommand::List => {
            let view = TemplateListView::new(ctx.backend.clone());
            check(view.load().await, || view.error())?;
            list(ctx, &view)
        }

        TemplateCommand::Show { id } => {
            let view = edit(ctx, id).await?;
            show(ctx, &view)
        }

        TemplateCommand::Duplicate { id, name } => {
            let view = TemplateListView::new(ctx.backend.clone());
            let copy = view
                .duplicate(id, name)
                .await
                .ok_or_else(|| failure(view.error()))?;
            warn_stale(view.error().as_deref());
            println!("Created template {copy}");
            list(ctx, &view)
        }

        TemplateCommand::Delete { id } => {
            let view = TemplateListView::new(ctx.backend.clone());
            check(view.delete(id).await, || view.error())?;
            list(ctx, &view)
        }

        TemplateCommand::Default { id } => {
            let view = TemplateListView::new(ctx.backend.clone());
            check(view.set_default(id).await, || view.error())?;
            list(ctx, &view)
        }

        TemplateCommand::AddTask {
            id,
            task_type,
            title,
            days,
        } => {
            let mut view = edit(ctx, id).await?;
            let order = view.add_task(task_type);
            view.update_task(order, |def| {
                if let Some(title) = title {
                    def.title = title;
                }
                if let Some(days) = days {
                    def.expected_duration_days = days;
                }
            });
            save(ctx, &mut view).await
        }

        TemplateCommand::RemoveTask { id, order } => {
            let mut view = edit(ctx, id).await?;
            if !view.remove_task(order) {
                return Err(anyhow!("Template {id} has no task at position {order}"));
            }
            save(ctx, &mut view).await
        }

        TemplateCommand::Move {
            id,
            order,
            direction,
        } => {
            let mut view = edit(ctx, id).await?;
            let moved = match direction {
                Direction::Up => view.move_up(order),
                Direction::Down => view.move_down(order),
            };
            if !moved {
                println!("Nothing to move");
                return show(ctx, &view);
            }
            save(ctx, &mut view).await
        }
    }
}

async fn edit(ctx: &Context, id: DbId) -> Result<TemplateEditorView> {
    TemplateEditorView::open(ctx.backend.clone(), id)
        .await
        .map_err(|e| anyhow!(e.user_message()))
}

async fn save(ctx: &Context, view: &mut TemplateEditorView) -> Result<()> {
    if !view.save().await {
        return Err(failure(view.error().map(str::to_string)));
    }
    warn_stale(view.error());
    show(ctx, view)
}

fn show(ctx: &Context, view: &TemplateEditorView) -> Result<()> {
    if ctx.json {
        return render::json(view.tasks());
    }
    let draft = view.draft();
    render::definitions(
        &format!("{} ({})", draft.name, draft.process_type.label()),
        view.tasks(),
    );
    Ok(())
}

fn list(ctx: &Context, view: &TemplateListView) -> Result<()> {
    if ctx.json {
        return render::json(&view.templates());
    }
    for process_type in [ProcessType::Onboarding, ProcessType::Offboarding] {
        render::templates(process_type.label(), &view.by_type(process_type));
    }
    Ok(())
}
