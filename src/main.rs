mod app;
mod appsettings;
mod data_source;
mod delivery;
mod views;

use clap::{Parser, Subcommand};
use meetai_google::AuthGrant;

use crate::app::{App, Command};

#[derive(Parser)]
#[command(name = "meetai")]
#[command(about = "Personal assistant dashboard: meetings, bills, suggestions and reminders")]
struct Cli {
    /// Settings file to load instead of `appsettings`
    #[arg(short, long, global = true, env = "MEETAI_CONFIG", value_name = "FILE")]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Today's meetings, upcoming bills and free time
    Digest,
    /// Random picks from the suggestion pool
    Suggest {
        #[arg(short = 'n', long, value_name = "N")]
        count: Option<usize>,
    },
    /// Generate reminders and watch for due ones
    Reminders {
        /// Check once and exit instead of polling until Ctrl+C
        #[arg(long)]
        once: bool,
        /// Reminder ids to dismiss, e.g. `bill-1`
        #[arg(long, value_name = "ID")]
        dismiss: Vec<String>,
    },
    /// Sign in with an authorization code or refresh token
    SignIn {
        #[arg(long, value_name = "CODE", conflicts_with = "refresh_token")]
        code: Option<String>,
        #[arg(long, value_name = "TOKEN")]
        refresh_token: Option<String>,
    },
    SignOut,
    /// Show the signed-in account
    Account,
    /// Print the Google consent page URL
    AuthUrl,
}

impl From<CliCommand> for Command {
    fn from(command: CliCommand) -> Self {
        match command {
            CliCommand::Digest => Command::Digest,
            CliCommand::Suggest { count } => Command::Suggest { count },
            CliCommand::Reminders { once, dismiss } => Command::Reminders { once, dismiss },
            CliCommand::SignIn {
                code,
                refresh_token,
            } => {
                let grant = code
                    .map(AuthGrant::AuthorizationCode)
                    .or(refresh_token.map(AuthGrant::RefreshToken));
                Command::SignIn { grant }
            }
            CliCommand::SignOut => Command::SignOut,
            CliCommand::Account => Command::Account,
            CliCommand::AuthUrl => Command::AuthUrl,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let cli = Cli::parse();
    let settings = appsettings::load(cli.config.as_deref())?;
    log::debug!("Loaded settings. [timezone = {}]", settings.timezone);

    let app = App::new(settings);
    let command = cli.command.map(Command::from).unwrap_or(Command::Digest);

    app.run(command).await
}
