use crate::cli::commands::{execute, open};
use crate::cli::parser::{Commands, Switch};
use crate::config::Config;
use crate::core::state::Command;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Notifications { state } = cmd {
        let pool = open(cfg)?;
        let next = execute(&pool, cfg, Command::SetNotifications(*state == Switch::On))?;

        if next.profile.notifications_active() && next.profile.phone.is_none() {
            info("No phone number on file: set one with `metahub profile --phone`.");
        }
    }
    Ok(())
}
