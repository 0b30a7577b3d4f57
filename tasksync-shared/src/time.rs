/// Due-date presentation helpers
///
/// Formats a task's due date for list rows and detail views, with a relative
/// label ("Due today", "2 days overdue", ...). The reference instant is
/// always passed in explicitly so the output is deterministic under test.

use chrono::{DateTime, Duration, Utc};

/// Returns true when the due date is in the past
pub fn is_overdue(due: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    due < now
}

/// Returns true when the due date falls on the same calendar day as `now`
pub fn is_due_today(due: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    due.date_naive() == now.date_naive()
}

/// Returns true when the due date falls on the day after `now`
pub fn is_due_tomorrow(due: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    due.date_naive() == (now + Duration::days(1)).date_naive()
}

/// Relative label for a due date
///
/// Overdue dates report whole days overdue (hour resolution, so anything
/// less than a day behind is just "Overdue"). Upcoming dates within 24 hours
/// are "Due today", within 48 hours "Due tomorrow", and further out
/// "Due in N days" rounded up.
pub fn relative_due_label(due: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if due < now {
        let days_overdue = (now - due).num_hours() / 24;
        return match days_overdue {
            0 => "Overdue".to_string(),
            1 => "1 day overdue".to_string(),
            n => format!("{} days overdue", n),
        };
    }

    let hours_until = (due - now).num_hours();
    if hours_until < 24 {
        "Due today".to_string()
    } else if hours_until < 48 {
        "Due tomorrow".to_string()
    } else {
        let days_until = (hours_until + 23) / 24;
        format!("Due in {} days", days_until)
    }
}

/// Formats a due date as calendar text plus the relative label
///
/// Example output: `Jan 3, 2024 (Due tomorrow)`
pub fn format_due_date(due: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format!("{} ({})", due.format("%b %-d, %Y"), relative_due_label(due, now))
}

/// Formats a due date with its time of day plus the relative label
///
/// Example output: `Jan 3, 2024 at 9:00 AM (Due tomorrow)`
pub fn format_due_date_time(due: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format!(
        "{} at {} ({})",
        due.format("%b %-d, %Y"),
        due.format("%-I:%M %p"),
        relative_due_label(due, now)
    )
}
