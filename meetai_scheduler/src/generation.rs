use std::ops::RangeInclusive;

use chrono::{DateTime, TimeDelta, Utc};
use meetai_models::{
    bill::{Bill, BillStatus},
    meeting::Meeting,
    reminder::{Reminder, ReminderKind},
};

pub const MEETING_LEAD_MINUTES: i64 = 35;
pub const BILL_REMINDER_DAYS: RangeInclusive<i64> = 3..=7;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Builds the full reminder set for the given schedule.
pub fn generate_reminders(meetings: &[Meeting], bills: &[Bill], now: DateTime<Utc>) -> Vec<Reminder> {
    let meeting_reminders = meetings.iter().filter_map(meeting_reminder);
    let bill_reminders = bills.iter().filter_map(|bill| bill_reminder(bill, now));

    meeting_reminders.chain(bill_reminders).collect()
}

pub fn meeting_reminder(meeting: &Meeting) -> Option<Reminder> {
    let lead_time = TimeDelta::minutes(MEETING_LEAD_MINUTES);
    let Some(fire_at) = meeting.start_time.checked_sub_signed(lead_time) else {
        log::warn!(
            "Meeting start is out of range, skipping reminder. [meeting_id = {}]",
            meeting.id
        );
        return None;
    };

    Some(Reminder::new(
        ReminderKind::Meeting,
        &meeting.id,
        meeting.title.clone(),
        format!(
            "Meeting \"{}\" starts in {} minutes",
            meeting.title, MEETING_LEAD_MINUTES
        ),
        fire_at,
    ))
}

/// Only bills still awaiting payment are reminded about.
pub fn bill_reminder(bill: &Bill, now: DateTime<Utc>) -> Option<Reminder> {
    if bill.status != BillStatus::Upcoming {
        return None;
    }

    let days = days_until_due(bill.due_at(), now);
    if !BILL_REMINDER_DAYS.contains(&days) {
        return None;
    }

    Some(Reminder::new(
        ReminderKind::Bill,
        &bill.id,
        format!("{} Bill Due", bill.biller),
        format!(
            "{} bill ({}) due in {} days",
            bill.biller, bill.amount, days
        ),
        now,
    ))
}

/// Whole days until `due_at`, rounded up. Negative once the due instant has passed.
pub fn days_until_due(due_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (due_at - now).num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);

    if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
        days
    } else {
        days + 1
    }
}
