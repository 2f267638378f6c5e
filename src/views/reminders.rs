use std::fmt::Write;

use chrono_tz::Tz;
use meetai_models::reminder::{Reminder, ReminderKind};
use meetai_scheduler::NotificationPermission;

use super::{format_time, plural};

/// Renders the reminder panel.
///
/// `upcoming` is what gets listed; `active` only decides whether the panel is empty.
pub fn render_reminders(
    permission: NotificationPermission,
    active: &[Reminder],
    upcoming: &[Reminder],
    tz: Tz,
) -> String {
    let mut out = String::new();

    let status = match permission {
        NotificationPermission::Granted => "Enabled",
        NotificationPermission::Denied => "Disabled (permission denied)",
        NotificationPermission::Undetermined => "Disabled (enable notifications to get alerts)",
    };
    let _ = writeln!(out, "Notifications: {status}");

    if active.is_empty() && upcoming.is_empty() {
        let _ = writeln!(out, "No Active Reminders");
        let _ = writeln!(
            out,
            "  Reminders appear 35 minutes before meetings and 3-7 days before bills"
        );
        return out;
    }

    let _ = writeln!(
        out,
        "{} reminder{} scheduled",
        upcoming.len(),
        plural(upcoming.len())
    );
    for reminder in upcoming {
        let _ = writeln!(
            out,
            "  {} {}  at {}  ({})",
            icon(reminder.kind),
            reminder.title,
            format_time(reminder.fire_at, tz),
            reminder.id
        );
        let _ = writeln!(out, "      {}", reminder.message);
    }

    out
}

fn icon(kind: ReminderKind) -> &'static str {
    match kind {
        ReminderKind::Meeting => "📅",
        ReminderKind::Bill => "💳",
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

    use super::*;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2025, 9, 5)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
            .and_utc()
    }

    fn standup() -> Reminder {
        Reminder::new(
            ReminderKind::Meeting,
            "1",
            "Team Standup".to_owned(),
            "Meeting \"Team Standup\" starts in 35 minutes".to_owned(),
            at(8, 25),
        )
    }

    #[test]
    fn lists_upcoming_with_count() {
        let reminders = vec![standup()];

        let rendered = render_reminders(
            NotificationPermission::Granted,
            &reminders,
            &reminders,
            chrono_tz::UTC,
        );

        assert!(rendered.contains("Notifications: Enabled"));
        assert!(rendered.contains("1 reminder scheduled"));
        assert!(rendered.contains("Team Standup  at 8:25 AM  (meeting-1)"));
    }

    #[test]
    fn active_but_past_reminders_show_zero_scheduled() {
        let mut due = standup();
        due.fire_at = at(8, 25) - TimeDelta::hours(1);

        let rendered = render_reminders(
            NotificationPermission::Denied,
            &[due],
            &[],
            chrono_tz::UTC,
        );

        assert!(rendered.contains("0 reminders scheduled"));
        assert!(!rendered.contains("No Active Reminders"));
    }

    #[test]
    fn empty_panel() {
        let rendered = render_reminders(
            NotificationPermission::Undetermined,
            &[],
            &[],
            chrono_tz::UTC,
        );

        assert!(rendered.contains("No Active Reminders"));
        assert!(rendered.contains("enable notifications"));
    }
}
