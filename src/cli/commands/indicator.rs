use crate::cli::commands::{execute, load_state, open};
use crate::cli::parser::{Commands, IndicatorCommand};
use crate::config::Config;
use crate::core::gate::FREE_INDICATOR_LIMIT;
use crate::core::state::Command;
use crate::errors::AppResult;
use crate::models::{Baseline, IndicatorFields, IndicatorPatch};
use crate::ui::messages::{info, warning};
use crate::ui::prompt::ask_confirmation;
use crate::utils::format_value;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Indicator { command } = cmd else {
        return Ok(());
    };

    let pool = open(cfg)?;

    match command {
        IndicatorCommand::Add {
            title,
            unit,
            initial,
            target,
            description,
        } => {
            execute(
                &pool,
                cfg,
                Command::CreateIndicator(IndicatorFields {
                    title: title.clone(),
                    description: description.clone(),
                    unit: *unit,
                    initial_value: *initial,
                    target_value: *target,
                }),
            )?;
        }

        IndicatorCommand::Edit {
            id,
            title,
            description,
            unit,
            target,
            current,
            initial,
        } => {
            let baseline = match (current, initial) {
                (Some(c), _) => Some(Baseline::Current(*c)),
                (None, Some(i)) => Some(Baseline::Initial(*i)),
                (None, None) => None,
            };
            let patch = IndicatorPatch {
                title: title.clone(),
                description: description.clone().map(Some),
                unit: *unit,
                baseline,
                target_value: *target,
            };
            execute(&pool, cfg, Command::UpdateIndicator { id: *id, patch })?;
        }

        IndicatorCommand::Del { id } => {
            let state = load_state(&pool, cfg)?;
            let ind = state.indicator(*id)?;
            let prompt = format!(
                "Delete indicator #{} '{}' and its {} action(s)?",
                ind.id,
                ind.title,
                ind.actions.len()
            );
            if !ask_confirmation(&prompt) {
                info("Deletion cancelled.");
                return Ok(());
            }
            execute(&pool, cfg, Command::DeleteIndicator { id: *id })?;
        }

        IndicatorCommand::List => {
            let state = load_state(&pool, cfg)?;
            if state.indicators.is_empty() {
                info("No indicators yet. Create one with `metahub indicator add`.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 4),
                Column::new("Title", 28),
                Column::new("Unit", 8),
                Column::new("Current", 14),
                Column::new("Target", 14),
                Column::new("Gap", 14),
                Column::new("Pending", 8),
            ]);

            for ind in &state.indicators {
                let fmt = |v: f64| format_value(v, ind.unit, &cfg.currency_symbol);
                let pending = ind.actions.iter().filter(|a| a.is_pending()).count();
                table.add_row(vec![
                    ind.id.to_string(),
                    ind.title.clone(),
                    ind.unit.to_db_str().to_string(),
                    fmt(ind.current_value()),
                    fmt(ind.target_value),
                    fmt(ind.gap()),
                    format!("{}/{}", pending, ind.actions.len()),
                ]);
            }

            print!("{}", table.render(&cfg.separator_char));

            if state.is_over_limit() {
                warning(format!(
                    "The free plan allows {} indicators; you have {}. Upgrade to keep adding.",
                    FREE_INDICATOR_LIMIT,
                    state.indicator_count()
                ));
            }
        }
    }

    Ok(())
}
