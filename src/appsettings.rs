use config::{Config, ConfigError, Environment, File};
use meetai_models::settings::Settings;

/// Layers `appsettings`, `appsettings.local` and `APP__*` variables over the defaults.
pub fn load(config_file: Option<&str>) -> Result<Settings, ConfigError> {
    let base = config_file.unwrap_or("appsettings");
    let settings = Config::builder()
        .add_source(File::with_name(base).required(config_file.is_some()))
        .add_source(File::with_name("appsettings.local").required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    settings.try_deserialize()
}
