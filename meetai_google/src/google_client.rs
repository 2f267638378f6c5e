use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use meetai_models::{
    settings::{GoogleSettings, SignInMode},
    user::User,
};
use meetai_storage::SessionStore;
use reqwest::Url;
use tokio::sync::{OnceCell, RwLock};

use crate::{
    AuthGrant, CalendarEvent, EventDateTime, GoogleApiError, GoogleProfile, IdentityCalendarClient,
    model::{EventList, TokenResponse},
};

const AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const SCOPES: &str = "openid email profile \
    https://www.googleapis.com/auth/calendar.readonly \
    https://www.googleapis.com/auth/gmail.readonly";
const EVENT_WINDOW_HOURS: i64 = 24;

pub struct GoogleApiClient {
    settings: GoogleSettings,
    session: SessionStore,
    http: OnceCell<reqwest::Client>,
    access_token: RwLock<Option<String>>,
}

impl GoogleApiClient {
    pub fn new(settings: GoogleSettings, session: SessionStore) -> Self {
        Self {
            settings,
            session,
            http: OnceCell::new(),
            access_token: RwLock::new(None),
        }
    }

    /// Consent page the user opens to obtain an authorization code.
    pub fn authorization_url(&self) -> Result<Url, GoogleApiError> {
        Url::parse_with_params(
            AUTHORIZATION_ENDPOINT,
            &[
                ("client_id", self.settings.client_id.as_str()),
                ("redirect_uri", self.settings.redirect_uri.as_str()),
                ("response_type", "code"),
                ("access_type", "offline"),
                ("scope", SCOPES),
            ],
        )
        .map_err(|error| GoogleApiError::Configuration(error.to_string()))
    }

    async fn http(&self) -> Result<&reqwest::Client, GoogleApiError> {
        self.http
            .get_or_try_init(|| async {
                if self.settings.client_id.trim().is_empty() {
                    return Err(GoogleApiError::Configuration(
                        "client_id must be set".to_owned(),
                    ));
                }

                let client = reqwest::Client::builder()
                    .timeout(Duration::from_secs(self.settings.request_timeout_secs))
                    .user_agent(concat!("meetai/", env!("CARGO_PKG_VERSION")))
                    .build()?;

                log::info!("Google API client initialized");
                Ok(client)
            })
            .await
    }

    fn endpoint(base: &str, path: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), path)
    }

    async fn current_access_token(&self) -> Result<Option<String>, GoogleApiError> {
        if let Some(token) = self.access_token.read().await.clone() {
            return Ok(Some(token));
        }

        let stored = self.session.load_access_token().await?;
        if let Some(token) = &stored {
            *self.access_token.write().await = Some(token.clone());
        }
        Ok(stored)
    }

    async fn authenticate(&self, grant: AuthGrant) -> Result<User, GoogleApiError> {
        let http = self.http().await?;
        let token = self.exchange_grant(http, grant).await?;

        let profile: GoogleProfile = http
            .get(Self::endpoint(&self.settings.api_base_url, "oauth2/v2/userinfo"))
            .bearer_auth(&token.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let user = User::from(profile);
        self.session.save_user(&user).await?;
        self.session.save_access_token(&token.access_token).await?;
        *self.access_token.write().await = Some(token.access_token);

        log::info!("Signed in as {}", user.email);
        Ok(user)
    }

    async fn exchange_grant(
        &self,
        http: &reqwest::Client,
        grant: AuthGrant,
    ) -> Result<TokenResponse, GoogleApiError> {
        let mut form = vec![
            ("client_id", self.settings.client_id.clone()),
            ("client_secret", self.settings.client_secret.clone()),
        ];
        match grant {
            AuthGrant::AuthorizationCode(code) => {
                form.push(("code", code));
                form.push(("redirect_uri", self.settings.redirect_uri.clone()));
                form.push(("grant_type", "authorization_code".to_owned()));
            }
            AuthGrant::RefreshToken(refresh_token) => {
                form.push(("refresh_token", refresh_token));
                form.push(("grant_type", "refresh_token".to_owned()));
            }
        }

        let response = http
            .post(Self::endpoint(&self.settings.oauth_base_url, "token"))
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GoogleApiError::Authentication(format!(
                "token exchange failed: {status} - {body}"
            )));
        }

        Ok(response.json().await?)
    }

    async fn fetch_events(
        &self,
        token: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, GoogleApiError> {
        let http = self.http().await?;
        let events: EventList = http
            .get(Self::endpoint(
                &self.settings.api_base_url,
                "calendar/v3/calendars/primary/events",
            ))
            .query(&[
                ("timeMin", time_min.to_rfc3339()),
                ("timeMax", time_max.to_rfc3339()),
                ("singleEvents", "true".to_owned()),
                ("orderBy", "startTime".to_owned()),
            ])
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        log::debug!("Fetched {} calendar events", events.items.len());
        Ok(events.items)
    }
}

#[async_trait]
impl IdentityCalendarClient for GoogleApiClient {
    async fn initialize(&self) -> Result<(), GoogleApiError> {
        self.http().await.map(|_| ())
    }

    async fn sign_in(&self, grant: AuthGrant) -> Result<User, GoogleApiError> {
        match self.authenticate(grant).await {
            Ok(user) => Ok(user),
            Err(error) if self.settings.sign_in_mode == SignInMode::DemoFallback => {
                log::warn!("Sign in failed, continuing as demo user. [error = {error}]");
                let user = demo_user();
                *self.access_token.write().await = None;
                self.session.clear().await?;
                self.session.save_user(&user).await?;
                Ok(user)
            }
            Err(error) => Err(error.into_authentication()),
        }
    }

    async fn sign_out(&self) -> Result<(), GoogleApiError> {
        *self.access_token.write().await = None;
        self.session.clear().await?;
        log::info!("Signed out");
        Ok(())
    }

    async fn get_current_user(&self) -> Result<Option<User>, GoogleApiError> {
        Ok(self.session.load_user().await?)
    }

    async fn get_calendar_events(&self) -> Result<Vec<CalendarEvent>, GoogleApiError> {
        let token = self
            .current_access_token()
            .await?
            .ok_or(GoogleApiError::NotAuthenticated)?;

        let now = Utc::now();
        let time_max = now + TimeDelta::hours(EVENT_WINDOW_HOURS);
        match self.fetch_events(&token, now, time_max).await {
            Ok(events) => Ok(events),
            Err(error) => {
                log::error!("Error fetching calendar events, using placeholder. [error = {error}]");
                Ok(vec![placeholder_event(now)])
            }
        }
    }
}

/// Identity used when the sign-in flow fails in demo mode.
pub fn demo_user() -> User {
    User {
        id: "demo-user".to_owned(),
        email: "demo@meetai.com".to_owned(),
        name: "Demo User".to_owned(),
        picture: String::new(),
    }
}

/// Stand-in event returned when the calendar cannot be read.
pub fn placeholder_event(now: DateTime<Utc>) -> CalendarEvent {
    CalendarEvent {
        id: "mock-1".to_owned(),
        summary: "Team Meeting (Demo)".to_owned(),
        start: EventDateTime::at(now),
        end: EventDateTime::at(now + TimeDelta::hours(1)),
        location: Some("Conference Room".to_owned()),
    }
}
