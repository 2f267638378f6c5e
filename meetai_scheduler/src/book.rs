use std::collections::HashSet;

use chrono::{DateTime, TimeDelta, Utc};
use meetai_models::reminder::{Reminder, ReminderId};

/// The in-memory reminder collection of a session.
///
/// Regenerating replaces the collection wholesale. Dismissals and deliveries are
/// remembered by id for the whole session, so a regenerated reminder keeps its
/// dismissed flag and is never delivered twice.
#[derive(Debug, Default)]
pub struct ReminderBook {
    reminders: Vec<Reminder>,
    dismissed: HashSet<ReminderId>,
    notified: HashSet<ReminderId>,
}

impl ReminderBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, reminders: Vec<Reminder>) {
        self.reminders = reminders;
        for reminder in self.reminders.iter_mut() {
            if reminder.dismissed {
                self.dismissed.insert(reminder.id.clone());
            } else if self.dismissed.contains(&reminder.id) {
                reminder.dismiss();
            }
        }
    }

    /// Returns whether a reminder with this id is currently in the book.
    pub fn dismiss(&mut self, id: &ReminderId) -> bool {
        self.dismissed.insert(id.clone());

        match self.reminders.iter_mut().find(|r| &r.id == id) {
            Some(reminder) => {
                reminder.dismiss();
                true
            }
            None => false,
        }
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn active(&self) -> Vec<Reminder> {
        self.reminders
            .iter()
            .filter(|r| r.is_active())
            .cloned()
            .collect()
    }

    pub fn upcoming(&self, now: DateTime<Utc>) -> Vec<Reminder> {
        self.reminders
            .iter()
            .filter(|r| r.is_upcoming(now))
            .cloned()
            .collect()
    }

    /// Collects reminders due at `now` that were not delivered yet and marks them delivered.
    pub fn take_due(&mut self, now: DateTime<Utc>, tolerance: TimeDelta) -> Vec<Reminder> {
        let due: Vec<Reminder> = self
            .reminders
            .iter()
            .filter(|r| r.is_active() && !self.notified.contains(&r.id))
            .filter(|r| is_due(r, now, tolerance))
            .cloned()
            .collect();

        self.notified.extend(due.iter().map(|r| r.id.clone()));

        due
    }
}

pub fn is_due(reminder: &Reminder, now: DateTime<Utc>, tolerance: TimeDelta) -> bool {
    (now - reminder.fire_at).abs() < tolerance
}

#[cfg(test)]
mod tests {
    use meetai_models::reminder::ReminderKind;
    use proptest::prelude::*;

    use super::*;

    fn reminder(source_id: &str, fire_at: DateTime<Utc>) -> Reminder {
        Reminder::new(
            ReminderKind::Meeting,
            source_id,
            format!("Meeting {source_id}"),
            format!("Meeting \"{source_id}\" starts in 35 minutes"),
            fire_at,
        )
    }

    #[test]
    fn dismiss_is_idempotent() {
        let now = Utc::now();
        let mut book = ReminderBook::new();
        book.replace(vec![reminder("1", now), reminder("2", now)]);
        let id = ReminderId::from("meeting-1");

        assert!(book.dismiss(&id));
        assert!(book.dismiss(&id));

        let active = book.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id.as_str(), "meeting-2");
    }

    #[test]
    fn dismissing_unknown_id_reports_false() {
        let mut book = ReminderBook::new();
        book.replace(vec![reminder("1", Utc::now())]);

        assert!(!book.dismiss(&ReminderId::from("bill-9")));
        assert_eq!(book.active().len(), 1);
    }

    #[test]
    fn replace_drops_previous_reminders() {
        let now = Utc::now();
        let mut book = ReminderBook::new();
        book.replace(vec![reminder("1", now), reminder("2", now)]);
        book.replace(vec![reminder("3", now)]);

        let ids: Vec<&str> = book.reminders().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["meeting-3"]);
    }

    #[test]
    fn dismissal_survives_regeneration() {
        let now = Utc::now();
        let mut book = ReminderBook::new();
        book.replace(vec![reminder("1", now + TimeDelta::hours(1))]);
        book.dismiss(&ReminderId::from("meeting-1"));

        book.replace(vec![reminder("1", now + TimeDelta::hours(1))]);

        assert!(book.active().is_empty());
        assert!(book.upcoming(now).is_empty());
    }

    #[test]
    fn upcoming_only_includes_future_reminders() {
        let now = Utc::now();
        let mut book = ReminderBook::new();
        book.replace(vec![
            reminder("past", now - TimeDelta::minutes(5)),
            reminder("now", now),
            reminder("future", now + TimeDelta::minutes(5)),
        ]);

        let upcoming = book.upcoming(now);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].id.as_str(), "meeting-future");
        assert_eq!(book.active().len(), 3);
    }

    #[test]
    fn due_reminder_is_taken_only_once() {
        let now = Utc::now();
        let tolerance = TimeDelta::seconds(60);
        let mut book = ReminderBook::new();
        book.replace(vec![reminder("1", now)]);

        assert_eq!(book.take_due(now, tolerance).len(), 1);
        assert!(book.take_due(now + TimeDelta::seconds(30), tolerance).is_empty());
    }

    #[test]
    fn tolerance_window_is_exclusive() {
        let now = Utc::now();
        let tolerance = TimeDelta::seconds(60);
        let r = reminder("1", now);

        assert!(is_due(&r, now + TimeDelta::seconds(59), tolerance));
        assert!(is_due(&r, now - TimeDelta::seconds(59), tolerance));
        assert!(!is_due(&r, now + TimeDelta::seconds(60), tolerance));
        assert!(!is_due(&r, now - TimeDelta::seconds(60), tolerance));
    }

    proptest! {
        #[test]
        fn dismissed_reminders_never_reappear(
            dismissals in proptest::collection::vec(0usize..8, 0..16),
            offsets in proptest::collection::vec(-120i64..120, 8)
        ) {
            let now = Utc::now();
            let reminders: Vec<Reminder> = offsets
                .iter()
                .enumerate()
                .map(|(i, offset)| reminder(&i.to_string(), now + TimeDelta::minutes(*offset)))
                .collect();
            let mut book = ReminderBook::new();
            book.replace(reminders.clone());

            let mut dismissed = HashSet::new();
            for index in dismissals {
                let id = reminders[index].id.clone();
                book.dismiss(&id);
                dismissed.insert(id);

                prop_assert!(book.active().iter().all(|r| !dismissed.contains(&r.id)));
                prop_assert!(book.upcoming(now).iter().all(|r| !dismissed.contains(&r.id)));
                prop_assert_eq!(book.active().len(), reminders.len() - dismissed.len());
            }
        }
    }
}
