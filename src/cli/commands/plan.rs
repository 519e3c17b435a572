use crate::cli::commands::{load_state, open, upgrade_prompt};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::gate::FREE_INDICATOR_LIMIT;
use crate::errors::AppResult;
use crate::models::PlanType;
use crate::ui::messages::{header, info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Plan { upgrade } = cmd else {
        return Ok(());
    };

    let pool = open(cfg)?;
    let state = load_state(&pool, cfg)?;
    let profile = &state.profile;

    header("Plan");
    println!("  Plan        : {}", profile.plan);
    match profile.plan {
        PlanType::Free => println!(
            "  Indicators  : {} of {}",
            state.indicator_count(),
            FREE_INDICATOR_LIMIT
        ),
        PlanType::Basic => println!("  Indicators  : {} (unlimited)", state.indicator_count()),
    }
    if let Some(status) = &profile.subscription_status {
        println!("  Subscription: {}", status);
    }

    if state.is_over_limit() {
        warning("You are above the free plan limit. Existing indicators stay available.");
    }

    if *upgrade {
        if profile.plan.is_basic() {
            success("You are already on the basic plan.");
        } else {
            upgrade_prompt(cfg, profile);
        }
    } else if !profile.plan.is_basic() {
        info("Run `metahub plan --upgrade` to get the checkout link.");
    }

    Ok(())
}
