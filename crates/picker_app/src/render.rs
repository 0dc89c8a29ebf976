//! Plain-text rendering of the orchestrator view model.

use picker_core::{AppViewModel, AttemptView, PickRowView, PickStatus};

pub fn status_text(status: PickStatus) -> &'static str {
    match status {
        PickStatus::InProgress => "In Progress",
        PickStatus::TryingToFindBrick => "Trying to find Brick",
        PickStatus::Success => "Success",
        PickStatus::Failed => "Failed",
        PickStatus::Skipped => "Skipped",
    }
}

/// One summary line per dirty update, so progress is visible mid-row.
pub fn render_progress(view: &AppViewModel) {
    let settled = view.counts.success + view.counts.failed + view.counts.skipped;
    println!(
        "[{settled}/{}] {} added, {} failed, {} skipped",
        view.total_parts, view.counts.success, view.counts.failed, view.counts.skipped
    );
}

/// Full per-row report with one line per attempt.
pub fn render_report(view: &AppViewModel) {
    for row in &view.rows {
        render_row(row);
    }
}

fn render_row(row: &PickRowView) {
    let name = row.name.as_deref().unwrap_or("?");
    let color = row.color.as_deref().unwrap_or("?");
    println!(
        "{} x{} {} ({}): {}",
        row.part_number,
        row.quantity,
        name,
        color,
        status_text(row.status)
    );
    for attempt in &row.attempts {
        println!("  - {}", describe_attempt(attempt));
    }
}

fn describe_attempt(attempt: &AttemptView) -> String {
    let element = attempt.element_id.as_deref().unwrap_or("?");
    if attempt.success {
        let added = attempt.bricks_added.unwrap_or(0);
        format!("added {added} of element {element}")
    } else if attempt.brick_not_found {
        format!("element {element} is not listed in the shop")
    } else {
        format!("could not add element {element}")
    }
}
