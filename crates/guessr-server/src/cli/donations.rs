use clap::{Args, Subcommand};
use guessr_core::DonationTotal;

use super::CommandOutput;
use crate::app::AppState;
use crate::domains::donations::DonationSummary;
use crate::domains::errors::ServiceError;

#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct TotalArgs {
    /// Use the recorded donations of this user
    #[arg(long)]
    pub user_id: Option<i64>,
    /// Use this amount directly, e.g. 12.50
    #[arg(long)]
    pub total: Option<DonationTotal>,
}

#[derive(Args, Debug, Clone)]
pub struct AvatarArgs {
    pub avatar: String,
    #[command(flatten)]
    pub source: TotalArgs,
}

#[derive(Subcommand, Debug, Clone)]
pub enum DonationCommand {
    /// Append a donation to a user's ledger
    Record {
        #[arg(long)]
        user_id: i64,
        #[arg(long)]
        amount: DonationTotal,
    },
}

async fn resolve_total(state: &AppState, args: &TotalArgs) -> Result<DonationTotal, ServiceError> {
    match (args.user_id, args.total) {
        (Some(user_id), None) => Ok(state.donations.user_total_donations(user_id).await),
        (None, Some(total)) => Ok(total),
        _ => Err(ServiceError::BadRequest(
            "exactly one of --user-id or --total is required",
        )),
    }
}

pub(super) async fn avatars(
    state: &AppState,
    args: &TotalArgs,
) -> Result<CommandOutput, ServiceError> {
    let total = resolve_total(state, args).await?;
    let summary = DonationSummary::for_total(total);
    Ok(CommandOutput::line(serde_json::to_string_pretty(&summary)?))
}

pub(super) async fn avatar_unlocked(
    state: &AppState,
    args: &AvatarArgs,
) -> Result<CommandOutput, ServiceError> {
    let total = resolve_total(state, &args.source).await?;
    let unlocked = state.donations.is_avatar_unlocked(&args.avatar, total);
    Ok(CommandOutput::line(unlocked.to_string()))
}

pub(super) async fn run(
    state: &AppState,
    command: DonationCommand,
) -> Result<CommandOutput, ServiceError> {
    match command {
        DonationCommand::Record { user_id, amount } => {
            if amount.is_zero() {
                return Err(ServiceError::BadRequest("amount must be greater than zero"));
            }
            if user_id <= 0 {
                return Err(ServiceError::BadRequest("user id must be positive"));
            }
            let id = state.store.record_donation(user_id, amount).await?;
            let total = state.donations.user_total_donations(user_id).await;
            Ok(CommandOutput::line(format!(
                "recorded donation {id}: user {user_id} amount {amount} total {total}"
            )))
        }
    }
}
