//! Read-only lookups: dashboard counters, personnel and groups.

use anyhow::{anyhow, Result};

use hrportal_client::views::GroupsView;

use crate::commands::check;
use crate::{render, Context};

pub async fn stats(ctx: &Context) -> Result<()> {
    let stats = ctx
        .backend
        .statistics()
        .await
        .map_err(|e| anyhow!(e.user_message()))?;
    if ctx.json {
        return render::json(&stats);
    }
    render::statistics(&stats);
    Ok(())
}

pub async fn employees(ctx: &Context, search: Option<&str>) -> Result<()> {
    let employees = ctx
        .directory
        .search(search.unwrap_or_default())
        .await
        .map_err(|e| anyhow!(e.user_message()))?;
    if ctx.json {
        return render::json(&employees);
    }
    render::employees(&employees);
    Ok(())
}

pub async fn groups(ctx: &Context, search: Option<&str>) -> Result<()> {
    let view = GroupsView::new(ctx.backend.clone());
    check(view.load().await, || view.error())?;

    let groups = match search {
        Some(query) => view.search(query),
        None => view.groups(),
    };
    if ctx.json {
        return render::json(&groups);
    }
    render::groups(&groups, view.counts());
    Ok(())
}
