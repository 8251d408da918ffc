use clap::{Parser, Subcommand};

use crate::app::AppState;
use crate::domains::errors::ServiceError;

pub mod donations;
pub mod settings;
pub mod usernames;

#[derive(Parser)]
#[command(name = "guessr-server")]
#[command(about = "Guessr operator CLI")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run database migrations
    Migrate,
    /// Check a username against the offensiveness rules
    CheckUsername(usernames::CheckArgs),
    /// Show the avatar tiers unlocked by a user's donations or an amount
    Avatars(donations::TotalArgs),
    /// Check whether a single avatar is unlocked
    AvatarUnlocked(donations::AvatarArgs),
    /// Record donations
    #[command(subcommand)]
    Donation(donations::DonationCommand),
    /// Manage the banned-word list
    #[command(subcommand)]
    BannedWords(usernames::BannedWordsCommand),
    /// Read or write a setting
    #[command(subcommand)]
    Setting(settings::SettingCommand),
}

/// What a command prints on stdout and the process exit status.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub exit_code: i32,
}

impl CommandOutput {
    pub(crate) fn line(text: impl Into<String>) -> Self {
        let mut stdout = text.into();
        stdout.push('\n');
        Self {
            stdout,
            exit_code: 0,
        }
    }

    pub(crate) fn with_exit_code(mut self, exit_code: i32) -> Self {
        self.exit_code = exit_code;
        self
    }
}

pub fn parse_args() -> Command {
    Cli::parse().command
}

pub fn try_parse_from<I, T>(args: I) -> Result<Command, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args).map(|cli| cli.command)
}

pub async fn run(state: &AppState, command: Command) -> Result<CommandOutput, ServiceError> {
    match command {
        Command::Migrate => {
            state
                .store
                .pool()
                .migrate()
                .await
                .map_err(|err| ServiceError::Migrate(err.to_string()))?;
            tracing::info!(event = "migrations_applied");
            Ok(CommandOutput::line("migrations applied"))
        }
        Command::CheckUsername(args) => usernames::check(state, &args).await,
        Command::Avatars(args) => donations::avatars(state, &args).await,
        Command::AvatarUnlocked(args) => donations::avatar_unlocked(state, &args).await,
        Command::Donation(command) => donations::run(state, command).await,
        Command::BannedWords(command) => usernames::run_banned_words(state, command).await,
        Command::Setting(command) => settings::run(state, command).await,
    }
}
