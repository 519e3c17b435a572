use crate::cli::commands::{execute, load_state, open};
use crate::cli::parser::{ActionCommand, Commands};
use crate::config::Config;
use crate::core::state::Command;
use crate::errors::AppResult;
use crate::models::{ActionDraft, ActionPatch};
use crate::ui::messages::info;
use crate::ui::prompt::ask_confirmation;
use crate::utils::date::{parse_date_arg, parse_optional_date};
use crate::utils::formatting::format_value;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Action { command } = cmd else {
        return Ok(());
    };

    let pool = open(cfg)?;

    match command {
        ActionCommand::Add {
            indicator,
            title,
            responsible,
            contribution,
            deadline,
            description,
        } => {
            let draft = ActionDraft {
                title: title.clone(),
                description: description.clone(),
                responsible: responsible.clone(),
                contribution: Some(*contribution),
                deadline: Some(parse_date_arg(deadline)?),
            };
            execute(
                &pool,
                cfg,
                Command::AddAction {
                    indicator_id: *indicator,
                    draft,
                },
            )?;
        }

        ActionCommand::Edit {
            id,
            title,
            responsible,
            contribution,
            deadline,
            clear_deadline,
            description,
        } => {
            let deadline = if *clear_deadline {
                Some(None)
            } else if deadline.is_some() {
                Some(parse_optional_date(deadline.as_deref())?)
            } else {
                None
            };
            let patch = ActionPatch {
                title: title.clone(),
                description: description.clone().map(Some),
                responsible: responsible.clone(),
                contribution: *contribution,
                deadline,
            };
            execute(&pool, cfg, Command::EditAction { id: *id, patch })?;
        }

        ActionCommand::Toggle { id } => {
            let next = execute(&pool, cfg, Command::ToggleAction { id: *id })?;
            let (ind, _) = next.find_action(*id)?;
            info(format!(
                "'{}' is now at {}.",
                ind.title,
                format_value(ind.current_value(), ind.unit, &cfg.currency_symbol)
            ));
        }

        ActionCommand::Del { id } => {
            let state = load_state(&pool, cfg)?;
            let (_, action) = state.find_action(*id)?;
            let prompt = format!(
                "Delete action #{} '{}' and its {} sub-task(s)?",
                action.id,
                action.title,
                action.sub_tasks.len()
            );
            if !ask_confirmation(&prompt) {
                info("Deletion cancelled.");
                return Ok(());
            }
            execute(&pool, cfg, Command::DeleteAction { id: *id })?;
        }
    }

    Ok(())
}
