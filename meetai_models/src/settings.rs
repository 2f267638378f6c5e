use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SignInMode {
    /// Authentication failures are returned to the caller.
    #[default]
    Strict,
    /// Authentication failures sign in a placeholder demo user instead.
    DemoFallback,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPermission {
    Granted,
    Denied,
    #[default]
    Undetermined,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct GoogleSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub api_base_url: String,
    pub oauth_base_url: String,
    pub sign_in_mode: SignInMode,
    pub request_timeout_secs: u64,
}

impl Default for GoogleSettings {
    fn default() -> Self {
        Self {
            client_id: "demo-client-id".to_owned(),
            client_secret: String::new(),
            redirect_uri: "urn:ietf:wg:oauth:2.0:oob".to_owned(),
            api_base_url: "https://www.googleapis.com".to_owned(),
            oauth_base_url: "https://oauth2.googleapis.com".to_owned(),
            sign_in_mode: SignInMode::Strict,
            request_timeout_secs: 10,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ReminderSettings {
    pub check_interval_secs: u64,
    pub tolerance_secs: u64,
    pub notifications: NotificationPermission,
    pub bill_window_days: i64,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            check_interval_secs: 60,
            tolerance_secs: 60,
            notifications: NotificationPermission::Undetermined,
            bill_window_days: 7,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct StorageSettings {
    /// JSON file holding the session. Sessions live in memory when unset.
    pub path: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Settings {
    pub timezone: chrono_tz::Tz,
    pub google: GoogleSettings,
    pub reminders: ReminderSettings,
    pub storage: StorageSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::UTC,
            google: GoogleSettings::default(),
            reminders: ReminderSettings::default(),
            storage: StorageSettings::default(),
        }
    }
}
