use clap::Subcommand;
use guessr_core::SettingsSource;

use super::CommandOutput;
use crate::app::AppState;
use crate::domains::errors::ServiceError;

#[derive(Subcommand, Debug, Clone)]
pub enum SettingCommand {
    /// Print a setting, or the default when it is unset
    Get {
        key: String,
        #[arg(long, default_value = "")]
        default: String,
    },
    /// Create or overwrite a setting
    Set { key: String, value: String },
}

pub(super) async fn run(
    state: &AppState,
    command: SettingCommand,
) -> Result<CommandOutput, ServiceError> {
    match command {
        SettingCommand::Get { key, default } => {
            let value = state.store.get_setting(&key, &default).await?;
            Ok(CommandOutput::line(value))
        }
        SettingCommand::Set { key, value } => {
            let key = key.trim();
            if key.is_empty() {
                return Err(ServiceError::BadRequest("setting key must not be blank"));
            }
            state.store.set_setting(key, &value).await?;
            Ok(CommandOutput::line(format!("{key} = {value}")))
        }
    }
}
