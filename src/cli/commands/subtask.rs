use crate::cli::commands::{execute, open};
use crate::cli::parser::{Commands, SubTaskCommand};
use crate::config::Config;
use crate::core::state::Command;
use crate::errors::AppResult;
use crate::models::{SubTaskDraft, SubTaskPatch};
use crate::utils::date::parse_optional_date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Subtask { command } = cmd else {
        return Ok(());
    };

    let pool = open(cfg)?;

    let command = match command {
        SubTaskCommand::Add {
            action,
            title,
            responsible,
            deadline,
        } => Command::AddSubTask {
            action_id: *action,
            draft: SubTaskDraft {
                title: title.clone(),
                responsible: responsible.clone(),
                deadline: parse_optional_date(deadline.as_deref())?,
            },
        },

        SubTaskCommand::Edit {
            id,
            title,
            responsible,
            deadline,
            clear_deadline,
        } => {
            let deadline = if *clear_deadline {
                Some(None)
            } else if deadline.is_some() {
                Some(parse_optional_date(deadline.as_deref())?)
            } else {
                None
            };
            Command::EditSubTask {
                id: *id,
                patch: SubTaskPatch {
                    title: title.clone(),
                    responsible: responsible.clone(),
                    deadline,
                },
            }
        }

        SubTaskCommand::Toggle { id } => Command::ToggleSubTask { id: *id },

        // checklist items go without confirmation
        SubTaskCommand::Del { id } => Command::DeleteSubTask { id: *id },
    };

    execute(&pool, cfg, command)?;
    Ok(())
}
