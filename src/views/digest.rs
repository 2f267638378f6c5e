use std::fmt::Write;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use meetai_models::{bill::Bill, meeting::Meeting};
use meetai_scheduler::days_until_due;

use super::{format_time, plural};

pub struct DigestView<'a> {
    pub meetings: &'a [Meeting],
    pub bills: &'a [Bill],
    pub free_slots: &'a [String],
    pub bill_window_days: i64,
}

pub fn render_digest(view: &DigestView<'_>, now: DateTime<Utc>, tz: Tz) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Today's Meetings");
    let _ = writeln!(
        out,
        "  {} meeting{} scheduled",
        view.meetings.len(),
        plural(view.meetings.len())
    );
    if view.meetings.is_empty() {
        let _ = writeln!(out, "  No meetings today");
    }
    for meeting in view.meetings {
        let _ = writeln!(
            out,
            "  • {}  {} - {}",
            meeting.title,
            format_time(meeting.start_time, tz),
            format_time(meeting.end_time, tz)
        );
        if let Some(location) = &meeting.location {
            let _ = writeln!(out, "      @ {location}");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Upcoming Bills");
    let _ = writeln!(out, "  Next {} days", view.bill_window_days);
    if view.bills.is_empty() {
        let _ = writeln!(out, "  No upcoming bills");
    }
    for bill in view.bills {
        let _ = writeln!(
            out,
            "  • {}  {}  {}  [{}]",
            bill.biller,
            bill.amount,
            due_label(bill, now, tz),
            bill.status
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Free Time");
    for slot in view.free_slots {
        let _ = writeln!(out, "  • {slot}");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Smart Reminders Active");
    let _ = writeln!(
        out,
        "  We'll notify you 30-40 minutes before meetings and 3-7 days before bills"
    );
    let _ = writeln!(out, "  Meeting reminders: ON | Bill reminders: ON");

    out
}

fn due_label(bill: &Bill, now: DateTime<Utc>, tz: Tz) -> String {
    match days_until_due(bill.due_at(), now) {
        days if days < 0 => "Overdue".to_owned(),
        0 => "Today".to_owned(),
        1 => "Tomorrow".to_owned(),
        days if days <= 7 => format!("In {days} days"),
        _ => bill
            .due_at()
            .with_timezone(&tz)
            .format("%m/%d/%Y")
            .to_string(),
    }
}
