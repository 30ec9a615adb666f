//! Text rendering of activities for the terminal menu.

use schedule_core::Activity;
use std::io::{self, Write};

const TITLE_WIDTH: usize = 30;

fn status_label(activity: &Activity) -> &'static str {
    if activity.done {
        "Done"
    } else {
        "Pending"
    }
}

fn duration_label(activity: &Activity) -> String {
    activity
        .duration_hours
        .map(|hours| format!("{hours} h"))
        .unwrap_or_else(|| "-".to_string())
}

/// One-line form: `[id] Day HH:MM - title (Status: ...)`.
pub fn format_activity(activity: &Activity) -> String {
    let mut line = format!(
        "[{}] {} {} - {} (Status: {})",
        activity.id,
        activity.day,
        activity.time,
        activity.title,
        status_label(activity)
    );
    if activity.duration_hours.is_some() {
        line.push_str(&format!(" (Duration: {})", duration_label(activity)));
    }
    line
}

/// Fixed-width table with a header row; long titles are cut with `...`.
pub fn format_table(items: &[&Activity]) -> String {
    let mut table = format!(
        "{:<5} {:<10} {:<6} {:<width$} {:<8} {}\n",
        "ID",
        "Day",
        "Time",
        "Title",
        "Status",
        "Duration",
        width = TITLE_WIDTH
    );
    table.push_str(&"-".repeat(5 + 1 + 10 + 1 + 6 + 1 + TITLE_WIDTH + 1 + 8 + 1 + 8));
    table.push('\n');

    for activity in items {
        table.push_str(&format!(
            "{:<5} {:<10} {:<6} {:<width$} {:<8} {}\n",
            activity.id,
            activity.day,
            activity.time,
            clip(&activity.title, TITLE_WIDTH),
            status_label(activity),
            duration_label(activity),
            width = TITLE_WIDTH
        ));
    }
    table
}

/// Writes `items` as a table, or `empty` when there is nothing to show.
pub fn write_table(out: &mut impl Write, items: &[&Activity], empty: &str) -> io::Result<()> {
    if items.is_empty() {
        writeln!(out, "{empty}")
    } else {
        write!(out, "{}", format_table(items))
    }
}

/// Writes one line per item, or `empty` when there is nothing to show.
pub fn write_lines(out: &mut impl Write, items: &[&Activity], empty: &str) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "{empty}");
    }
    for activity in items {
        writeln!(out, "{}", format_activity(activity))?;
    }
    Ok(())
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(3)).collect();
    clipped.push_str("...");
    clipped
}
