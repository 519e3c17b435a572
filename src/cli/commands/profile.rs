use crate::cli::commands::{execute, load_state, open};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::state::Command;
use crate::errors::AppResult;
use crate::models::{ProfilePatch, UserProfile};
use crate::ui::messages::header;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Profile { name, email, phone } = cmd else {
        return Ok(());
    };

    let pool = open(cfg)?;

    let state = if name.is_none() && email.is_none() && phone.is_none() {
        load_state(&pool, cfg)?
    } else {
        let patch = ProfilePatch {
            name: name.clone(),
            email: email.clone(),
            phone: phone.clone().map(Some),
        };
        execute(&pool, cfg, Command::UpdateProfile(patch))?
    };

    print_profile(&state.profile);
    Ok(())
}

fn print_profile(p: &UserProfile) {
    header("Profile");
    println!("  ID            : {}", p.id);
    println!("  Name          : {}", p.name);
    println!(
        "  Email         : {}",
        if p.email.is_empty() { "-" } else { p.email.as_str() }
    );
    println!("  Phone         : {}", p.phone.as_deref().unwrap_or("-"));
    println!("  Plan          : {}", p.plan);
    println!(
        "  Notifications : {}",
        if p.notifications_active() { "on" } else { "off" }
    );
}
