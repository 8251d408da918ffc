use clap::{Args, Subcommand};
use guessr_core::{BannedWordSource, RejectReason, UsernameVerdict};

use super::CommandOutput;
use crate::app::AppState;
use crate::domains::errors::ServiceError;

/// Exit status of `check-username` for a rejected name.
pub const EXIT_REJECTED: i32 = 2;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    pub username: String,
    /// Print the verdict as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum BannedWordsCommand {
    /// Print every banned word, one per line
    List,
    /// Add words (stored trimmed and lowercased)
    Add {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Remove a word
    Remove { word: String },
}

fn describe(verdict: &UsernameVerdict) -> String {
    match verdict {
        UsernameVerdict::Accepted => "accepted".to_string(),
        UsernameVerdict::Rejected(RejectReason::BannedWord(word)) => {
            format!("rejected (banned_word: {word})")
        }
        UsernameVerdict::Rejected(reason) => format!("rejected ({reason})"),
    }
}

pub(super) async fn check(
    state: &AppState,
    args: &CheckArgs,
) -> Result<CommandOutput, ServiceError> {
    let verdict = state.usernames.evaluate(&args.username).await;
    let text = if args.json {
        serde_json::to_string(&verdict)?
    } else {
        describe(&verdict)
    };
    let exit_code = if verdict.is_rejected() { EXIT_REJECTED } else { 0 };
    Ok(CommandOutput::line(text).with_exit_code(exit_code))
}

pub(super) async fn run_banned_words(
    state: &AppState,
    command: BannedWordsCommand,
) -> Result<CommandOutput, ServiceError> {
    match command {
        BannedWordsCommand::List => {
            let words = state.store.list_banned_words().await?;
            let mut stdout = String::new();
            for word in words {
                stdout.push_str(&word);
                stdout.push('\n');
            }
            Ok(CommandOutput {
                stdout,
                exit_code: 0,
            })
        }
        BannedWordsCommand::Add { words } => {
            let mut lines = Vec::with_capacity(words.len());
            for word in &words {
                if word.trim().is_empty() {
                    return Err(ServiceError::BadRequest("banned word must not be blank"));
                }
                let added = state.store.add_banned_word(word).await?;
                let word = word.trim().to_lowercase();
                lines.push(if added {
                    format!("added {word}")
                } else {
                    format!("exists {word}")
                });
            }
            Ok(CommandOutput::line(lines.join("\n")))
        }
        BannedWordsCommand::Remove { word } => {
            if state.store.remove_banned_word(&word).await? {
                Ok(CommandOutput::line(format!("removed {}", word.trim().to_lowercase())))
            } else {
                Ok(CommandOutput::line(format!("not found {}", word.trim().to_lowercase()))
                    .with_exit_code(1))
            }
        }
    }
}
