use chrono::{DateTime, Datelike, Duration, Utc};

use crate::clock::Today;

/// Relative label for a due date: "Today", "Tomorrow", "Yesterday", otherwise
/// a short date such as "Oct 3" (with the year when it differs from today's).
pub fn format_due_date(due: Option<DateTime<Utc>>, today: &Today) -> String {
    let Some(due) = due else {
        return "No due date".to_string();
    };

    let local = due.with_timezone(&today.tz);
    let date = local.date_naive();
    if date == today.date {
        "Today".to_string()
    } else if date == today.date + Duration::days(1) {
        "Tomorrow".to_string()
    } else if date == today.date - Duration::days(1) {
        "Yesterday".to_string()
    } else if date.year() == today.date.year() {
        local.format("%b %-d").to_string()
    } else {
        local.format("%b %-d, %Y").to_string()
    }
}

/// Cuts `text` to `max_chars` characters, appending "..." when shortened.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
    }
}
