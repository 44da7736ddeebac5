//! Plain-text tables for terminal output.

use serde::Serialize;

use hrportal_client::views::ProcessRow;
use hrportal_core::groups::{GroupCounts, UnifiedGroup};
use hrportal_core::models::employee::Employee;
use hrportal_core::models::process::OnboardingProcess;
use hrportal_core::models::statistics::OnboardingStatistics;
use hrportal_core::models::template::OnboardingTemplate;
use hrportal_core::presentation::{
    category_color, group_source_color, process_status_color, process_type_color,
    task_status_color, BadgeColor,
};
use hrportal_core::template::TemplateTaskDefinition;
use hrportal_core::types::Date;

pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn rule(width: usize) {
    println!("{}", "-".repeat(width));
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn badge(label: &str, color: BadgeColor) -> String {
    format!("{label} [{}]", color.as_str())
}

pub fn process_rows(rows: &[ProcessRow]) {
    if rows.is_empty() {
        println!("No processes found.");
        return;
    }
    println!(
        "{:<6} {:<18} {:<32} {:<24} {:<16} {:>9}",
        "ID", "TYPE", "TITLE", "EMPLOYEE", "STATUS", "PROGRESS"
    );
    rule(110);
    for row in rows {
        println!(
            "{:<6} {:<18} {:<32} {:<24} {:<16} {:>3}% {}/{}",
            row.id,
            row.process_type.label(),
            truncate(&row.title, 32),
            truncate(&row.employee_name, 24),
            row.status.label(),
            row.progress.percent,
            row.progress.completed,
            row.progress.total,
        );
    }
}

pub fn statistics(stats: &OnboardingStatistics) {
    println!("Active onboardings:   {}", stats.active_onboardings);
    println!("Active offboardings:  {}", stats.active_offboardings);
    println!("Open tasks:           {}", stats.open_tasks);
    println!("Completed processes:  {}", stats.completed_processes);
}

pub fn process_detail(process: &OnboardingProcess, today: Date) {
    let summary = process.summary(today);
    println!("#{} {}", process.id, process.title);
    println!(
        "{} for {} {}",
        badge(process.process_type.label(), process_type_color(process.process_type)),
        process.employee_name,
        badge(process.status.label(), process_status_color(process.status))
    );
    println!("Responsible: {}", or_dash(process.responsible_name.as_deref()));
    println!(
        "Progress: {}% ({} of {} done, {} mandatory open, {} overdue)",
        summary.percent, summary.completed, summary.total, summary.mandatory_open, summary.overdue
    );

    let actions: Vec<&str> = process.available_actions().iter().map(|a| a.label()).collect();
    if !actions.is_empty() {
        println!("Actions: {}", actions.join(", "));
    }

    println!();
    println!(
        "{:<4} {:<6} {:<32} {:<24} {:<14} {:<20} NEXT",
        "#", "ID", "TITLE", "TYPE", "STATUS", "ASSIGNED"
    );
    rule(120);
    for task in process.ordered_tasks() {
        let next: Vec<&str> = task
            .available_transitions()
            .iter()
            .map(|s| s.action_label())
            .collect();
        println!(
            "{:<4} {:<6} {:<32} {:<24} {:<14} {:<20} {}",
            task.order,
            task.id,
            truncate(&task.title, 32),
            truncate(task.task_type.label(), 24),
            format!("{}{}", task.status.label(), overdue_marker(task.is_overdue(today))),
            truncate(or_dash(task.assigned_to_name.as_deref()), 20),
            next.join(", ")
        );
        if let Some(notes) = &task.completion_notes {
            println!("       notes: {notes} [{}]", task_status_color(task.status).as_str());
        }
    }
}

fn overdue_marker(overdue: bool) -> &'static str {
    if overdue {
        " !"
    } else {
        ""
    }
}

pub fn templates(heading: &str, templates: &[OnboardingTemplate]) {
    println!("{heading}");
    rule(72);
    if templates.is_empty() {
        println!("  (none)");
    }
    for t in templates {
        println!(
            "{:<6} {:<40} {:>4} tasks {:>4}d{}",
            t.id,
            truncate(&t.name, 40),
            t.definitions().len(),
            t.default_duration_days,
            if t.is_default { "  default" } else { "" }
        );
    }
    println!();
}

pub fn definitions(name: &str, definitions: &[TemplateTaskDefinition]) {
    println!("{name}");
    rule(110);
    if definitions.is_empty() {
        println!("  (no task definitions)");
        return;
    }
    for def in definitions {
        let category = def
            .task_type
            .category()
            .map(|c| badge(c.label(), category_color(c)))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>3}. {:<36} {:<28} {:<22} {:>3}d{}",
            def.order,
            truncate(&def.title, 36),
            truncate(def.task_type.label(), 28),
            category,
            def.expected_duration_days,
            if def.is_mandatory { "" } else { "  (optional)" }
        );
    }
    let total: u32 = definitions.iter().map(|d| d.expected_duration_days).sum();
    println!("Total expected duration: {total} days");
}

pub fn employees(employees: &[Employee]) {
    for e in employees {
        println!(
            "{:<6} {:<32} {:<36} {}",
            e.id,
            truncate(&e.display_name, 32),
            or_dash(e.email.as_deref()),
            or_dash(e.department.as_deref())
        );
    }
}

pub fn groups(groups: &[UnifiedGroup], counts: GroupCounts) {
    println!(
        "{} groups ({} directory, {} dynamic, {} local)",
        counts.total(),
        counts.directory,
        counts.dynamic,
        counts.local
    );
    rule(110);
    for g in groups {
        println!(
            "{:<28} {:<36} {:<32} {:>5}",
            badge(g.source.label(), group_source_color(g.source)),
            truncate(&g.display_name, 36),
            or_dash(g.email.as_deref()),
            g.member_count
        );
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let cut: String = value.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}~")
    }
}
