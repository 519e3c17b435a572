use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::subscription::{SyncOutcome, handle_webhook};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use chrono::Utc;
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Webhook { payload, signature } = cmd {
        let body = fs::read_to_string(payload)?;
        let secret = cfg.resolved_webhook_secret();
        let pool = DbPool::new(&cfg.database)?;

        let outcome = handle_webhook(
            &pool,
            &body,
            signature.as_deref(),
            secret.as_deref(),
            Utc::now().timestamp(),
            cfg.webhook_tolerance_secs,
        )?;

        match outcome {
            SyncOutcome::Applied { profile_id, plan } => {
                success(format!("Profile #{profile_id} is now on the {plan} plan."))
            }
            SyncOutcome::Unmatched => warning("Event accepted, but no profile matched it."),
            SyncOutcome::Ignored(kind) => info(format!("Event '{kind}' ignored.")),
        }
    }
    Ok(())
}
