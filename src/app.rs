use std::{sync::Arc, time::Duration};

use anyhow::Context;
use chrono::{DateTime, Utc};
use meetai_google::{AuthGrant, GoogleApiClient, IdentityCalendarClient};
use meetai_models::{reminder::ReminderId, settings::Settings};
use meetai_scheduler::{EngineSettings, ReminderEngine};
use meetai_storage::{InMemoryKeyValueStore, JsonFileStore, KeyValueStore, SessionStore};

use crate::{
    data_source::{DataSource, get_free_time_slots},
    delivery::ConsoleDeliveryChannel,
    views::{self, DigestView},
};

const ENGINE_STOP_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_SUGGESTION_COUNT: usize = 3;

pub enum Command {
    Digest,
    Suggest { count: Option<usize> },
    Reminders { once: bool, dismiss: Vec<String> },
    SignIn { grant: Option<AuthGrant> },
    SignOut,
    Account,
    AuthUrl,
}

pub struct App {
    settings: Settings,
    client: GoogleApiClient,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let store: Arc<dyn KeyValueStore> = match &settings.storage.path {
            Some(path) => {
                log::debug!("Using session file. [path = {path}]");
                Arc::new(JsonFileStore::new(path))
            }
            None => Arc::new(InMemoryKeyValueStore::new()),
        };
        let client = GoogleApiClient::new(settings.google.clone(), SessionStore::new(store));

        Self { settings, client }
    }

    pub async fn run(&self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Digest => self.digest().await,
            Command::Suggest { count } => {
                let source = DataSource::demo(self.today(), self.settings.timezone);
                let suggestions =
                    source.get_random_suggestions(count.unwrap_or(DEFAULT_SUGGESTION_COUNT));
                print!("{}", views::render_suggestions(&suggestions));
                Ok(())
            }
            Command::Reminders { once, dismiss } => self.reminders(once, dismiss).await,
            Command::SignIn { grant: Some(grant) } => {
                self.client.initialize().await?;
                let user = self
                    .client
                    .sign_in(grant)
                    .await
                    .context("Sign in failed")?;
                print!("{}", views::render_account(Some(&user)));
                Ok(())
            }
            Command::SignIn { grant: None } | Command::AuthUrl => {
                let url = self.client.authorization_url()?;
                println!("Open this page and pass the code to `meetai sign-in --code`:");
                println!("{url}");
                Ok(())
            }
            Command::SignOut => {
                self.client.sign_out().await?;
                println!("Signed out");
                Ok(())
            }
            Command::Account => {
                let user = self.client.get_current_user().await?;
                print!("{}", views::render_account(user.as_ref()));
                Ok(())
            }
        }
    }

    async fn digest(&self) -> anyhow::Result<()> {
        let now = Utc::now();
        let tz = self.settings.timezone;
        let source = todays_source(&self.client, self.today(), now, tz).await;

        let meetings = source.get_todays_meetings(now, tz);
        let bills = source.get_upcoming_bills(now, self.settings.reminders.bill_window_days);
        let free_slots = get_free_time_slots(&meetings, now, tz);
        let view = DigestView {
            meetings: &meetings,
            bills: &bills,
            free_slots: &free_slots,
            bill_window_days: self.settings.reminders.bill_window_days,
        };

        if let Some(user) = self.client.get_current_user().await? {
            println!("Good day, {}!", user.first_name());
            println!();
        }
        print!("{}", views::render_digest(&view, now, tz));
        Ok(())
    }

    async fn reminders(&self, once: bool, dismiss: Vec<String>) -> anyhow::Result<()> {
        let now = Utc::now();
        let tz = self.settings.timezone;
        let source = todays_source(&self.client, self.today(), now, tz).await;

        let channel = Arc::new(ConsoleDeliveryChannel::new(
            self.settings.reminders.notifications,
        ));
        let engine = ReminderEngine::start(
            channel,
            EngineSettings::from(&self.settings.reminders),
        )
        .await;

        engine
            .generate_reminders(source.meetings(), source.bills(), now)
            .await;
        for id in dismiss {
            engine.dismiss_reminder(&ReminderId::from(id.as_str())).await;
        }
        engine.check_for_reminders(now).await;

        print!(
            "{}",
            views::render_reminders(
                engine.notification_permission().await,
                &engine.active_reminders().await,
                &engine.upcoming_reminders(now).await,
                tz,
            )
        );

        if !once {
            println!("Watching for reminders, press Ctrl+C to stop");
            tokio::signal::ctrl_c()
                .await
                .context("Failed to listen for Ctrl+C")?;
        }

        engine.stop(ENGINE_STOP_TIMEOUT).await;
        Ok(())
    }

    fn today(&self) -> chrono::NaiveDate {
        Utc::now().with_timezone(&self.settings.timezone).date_naive()
    }
}

/// Demo data for `today`, with the meetings swapped for the signed-in user's calendar when it has any.
async fn todays_source(
    client: &dyn IdentityCalendarClient,
    today: chrono::NaiveDate,
    now: DateTime<Utc>,
    tz: chrono_tz::Tz,
) -> DataSource {
    let source = DataSource::demo(today, tz);

    match client.is_signed_in().await {
        Ok(true) => {}
        Ok(false) => return source,
        Err(error) => {
            log::warn!("Could not read session, using demo data. [error = {error}]");
            return source;
        }
    }

    match client.get_calendar_events().await {
        Ok(events) => {
            let meetings: Vec<_> = events.iter().filter_map(|e| e.to_meeting()).collect();
            if meetings.is_empty() {
                log::debug!("Calendar is empty, using demo meetings. [now = {now}]");
                source
            } else {
                source.with_meetings(meetings)
            }
        }
        Err(error) => {
            log::warn!("Could not load calendar, using demo data. [error = {error}]");
            source
        }
    }
}
