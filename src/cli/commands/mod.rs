pub mod action;
pub mod backup;
pub mod board;
pub mod config;
pub mod db;
pub mod export;
pub mod indicator;
pub mod init;
pub mod log;
pub mod notifications;
pub mod plan;
pub mod profile;
pub mod subtask;
pub mod webhook;

use crate::config::Config;
use crate::core::state::{self, AppState, Command, Outcome};
use crate::core::subscription::checkout_link;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::UserProfile;
use crate::ui::messages::{info, success, warning};
use chrono::Local;

pub(crate) fn open(cfg: &Config) -> AppResult<DbPool> {
    Ok(DbPool::new(&cfg.database)?)
}

pub(crate) fn load_state(pool: &DbPool, cfg: &Config) -> AppResult<AppState> {
    AppState::load(pool, cfg.active_profile)
}

/// Run one command against the active profile and report what it did.
/// A gate denial also prints the upgrade prompt before the error surfaces.
pub(crate) fn execute(pool: &DbPool, cfg: &Config, command: Command) -> AppResult<AppState> {
    let current = load_state(pool, cfg)?;

    match state::apply(pool, &current, command, Local::now()) {
        Ok((next, outcome)) => {
            report(&outcome);
            Ok(next)
        }
        Err(AppError::GateDenied(reason)) => {
            upgrade_prompt(cfg, &current.profile);
            Err(AppError::GateDenied(reason))
        }
        Err(e) => Err(e),
    }
}

fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Created { kind, id } => success(format!("{kind} #{id} created.")),
        Outcome::Updated { kind, id } => success(format!("{kind} #{id} updated.")),
        Outcome::Deleted { kind, id } => success(format!("{kind} #{id} deleted.")),
        Outcome::Toggled {
            kind,
            id,
            completed,
        } => success(format!(
            "{kind} #{id} {}.",
            if *completed { "completed" } else { "reopened" }
        )),
    }
}

pub(crate) fn upgrade_prompt(cfg: &Config, profile: &UserProfile) {
    warning("This feature requires the basic plan.");
    match cfg.checkout_url.as_deref().filter(|u| !u.trim().is_empty()) {
        Some(url) => info(format!(
            "Upgrade here: {}",
            checkout_link(url, profile.id, &profile.email)
        )),
        None => info("No checkout link configured (set `checkout_url` in the config file)."),
    }
}
