//! Application state and the command handler.
//!
//! `apply` never patches the state it is given: it issues one store mutation
//! and then re-fetches the whole tree. If anything fails, the caller still
//! holds the previous state unchanged.

use crate::core::{aggregator, gate, validation};
use crate::db::{IndicatorStore, ProfileStore};
use crate::errors::{AppError, AppResult};
use crate::models::{
    ActionDraft, ActionItem, ActionPatch, Baseline, Indicator, IndicatorFields, IndicatorPatch,
    ProfilePatch, SubTask, SubTaskDraft, SubTaskPatch, UserProfile,
};
use chrono::{DateTime, Local};

#[derive(Debug, Clone)]
pub struct AppState {
    pub user_id: i64,
    pub profile: UserProfile,
    pub indicators: Vec<Indicator>,
}

#[derive(Debug, Clone)]
pub enum Command {
    CreateIndicator(IndicatorFields),
    UpdateIndicator { id: i64, patch: IndicatorPatch },
    DeleteIndicator { id: i64 },
    AddAction { indicator_id: i64, draft: ActionDraft },
    EditAction { id: i64, patch: ActionPatch },
    ToggleAction { id: i64 },
    DeleteAction { id: i64 },
    AddSubTask { action_id: i64, draft: SubTaskDraft },
    EditSubTask { id: i64, patch: SubTaskPatch },
    ToggleSubTask { id: i64 },
    DeleteSubTask { id: i64 },
    UpdateProfile(ProfilePatch),
    SetNotifications(bool),
}

/// What a successful command did, for user feedback.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Created { kind: &'static str, id: i64 },
    Updated { kind: &'static str, id: i64 },
    Deleted { kind: &'static str, id: i64 },
    Toggled { kind: &'static str, id: i64, completed: bool },
}

impl AppState {
    /// Fetch the full indicator tree and profile of `user_id`.
    pub fn load<S>(store: &S, user_id: i64) -> AppResult<Self>
    where
        S: IndicatorStore + ProfileStore,
    {
        let profile = store.load_profile(user_id)?;
        let indicators = store.list_indicators(user_id)?;
        Ok(Self {
            user_id,
            profile,
            indicators,
        })
    }

    pub fn indicator(&self, id: i64) -> AppResult<&Indicator> {
        self.indicators
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| AppError::not_found("Indicator", id))
    }

    pub fn find_action(&self, id: i64) -> AppResult<(&Indicator, &ActionItem)> {
        self.indicators
            .iter()
            .find_map(|ind| ind.action(id).map(|a| (ind, a)))
            .ok_or_else(|| AppError::not_found("Action", id))
    }

    pub fn find_sub_task(&self, id: i64) -> AppResult<(&Indicator, &ActionItem, &SubTask)> {
        self.indicators
            .iter()
            .flat_map(|ind| ind.actions.iter().map(move |a| (ind, a)))
            .find_map(|(ind, a)| a.sub_task(id).map(|s| (ind, a, s)))
            .ok_or_else(|| AppError::not_found("Sub-task", id))
    }

    pub fn indicator_count(&self) -> usize {
        self.indicators.len()
    }

    pub fn can_create_indicator(&self) -> bool {
        gate::can_create_indicator(self.profile.plan, self.indicator_count())
    }

    pub fn is_over_limit(&self) -> bool {
        gate::is_over_limit(self.profile.plan, self.indicator_count())
    }
}

fn clean_optional(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let t = s.trim();
        if t.is_empty() { None } else { Some(t.to_string()) }
    })
}

fn resolve_indicator_fields(current: &Indicator, patch: &IndicatorPatch) -> IndicatorFields {
    let initial_value = match patch.baseline {
        Some(Baseline::Current(value)) => aggregator::initial_from_current(value, &current.actions),
        Some(Baseline::Initial(value)) => value,
        None => current.initial_value,
    };

    IndicatorFields {
        title: patch.title.clone().unwrap_or_else(|| current.title.clone()),
        description: match &patch.description {
            Some(d) => clean_optional(d.clone()),
            None => current.description.clone(),
        },
        unit: patch.unit.unwrap_or(current.unit),
        initial_value,
        target_value: patch.target_value.unwrap_or(current.target_value),
    }
}

/// Execute one command against the store and return the re-fetched state.
pub fn apply<S>(
    store: &S,
    state: &AppState,
    command: Command,
    now: DateTime<Local>,
) -> AppResult<(AppState, Outcome)>
where
    S: IndicatorStore + ProfileStore,
{
    let outcome = match command {
        Command::CreateIndicator(mut fields) => {
            validation::validate_indicator(&fields)?;
            if !state.can_create_indicator() {
                return Err(AppError::GateDenied(format!(
                    "the {} plan allows at most {} indicators",
                    state.profile.plan,
                    gate::FREE_INDICATOR_LIMIT
                )));
            }
            fields.description = clean_optional(fields.description);
            let id = store.create_indicator(state.user_id, &fields)?;
            store.record("add", &format!("indicator #{id}"), &fields.title);
            Outcome::Created { kind: "Indicator", id }
        }

        Command::UpdateIndicator { id, patch } => {
            validation::validate_indicator_patch(&patch)?;
            let current = state.indicator(id)?;
            let fields = resolve_indicator_fields(current, &patch);
            validation::validate_indicator(&fields)?;
            store.update_indicator(id, &fields)?;
            store.record(
                "edit",
                &format!("indicator #{id}"),
                &format!(
                    "initial={} target={}",
                    fields.initial_value, fields.target_value
                ),
            );
            Outcome::Updated { kind: "Indicator", id }
        }

        Command::DeleteIndicator { id } => {
            let current = state.indicator(id)?;
            store.delete_indicator(id)?;
            store.record(
                "del",
                &format!("indicator #{id}"),
                &format!("{} ({} actions)", current.title, current.actions.len()),
            );
            Outcome::Deleted { kind: "Indicator", id }
        }

        Command::AddAction {
            indicator_id,
            mut draft,
        } => {
            validation::validate_action(&draft, true)?;
            state.indicator(indicator_id)?;
            draft.description = clean_optional(draft.description);
            let id = store.create_action(indicator_id, &draft)?;
            store.record(
                "add",
                &format!("action #{id}"),
                &format!("{} → indicator #{indicator_id}", draft.title),
            );
            Outcome::Created { kind: "Action", id }
        }

        Command::EditAction { id, patch } => {
            let (_, action) = state.find_action(id)?;
            let mut draft = patch.merge(action);
            validation::validate_action(&draft, false)?;
            draft.description = clean_optional(draft.description);
            store.update_action(id, &draft)?;
            store.record("edit", &format!("action #{id}"), &draft.title);
            Outcome::Updated { kind: "Action", id }
        }

        Command::ToggleAction { id } => {
            let (_, action) = state.find_action(id)?;
            let completed = !action.completed;
            // stamped only on the pending → completed transition
            let completed_at = completed.then_some(now);
            store.set_action_completed(id, completed, completed_at)?;
            store.record(
                "toggle",
                &format!("action #{id}"),
                &format!(
                    "{} ({:+})",
                    if completed { "completed" } else { "reopened" },
                    action.contribution
                ),
            );
            Outcome::Toggled {
                kind: "Action",
                id,
                completed,
            }
        }

        Command::DeleteAction { id } => {
            let (_, action) = state.find_action(id)?;
            store.delete_action(id)?;
            store.record("del", &format!("action #{id}"), &action.title);
            Outcome::Deleted { kind: "Action", id }
        }

        Command::AddSubTask { action_id, draft } => {
            validation::validate_sub_task(&draft)?;
            state.find_action(action_id)?;
            let id = store.create_sub_task(action_id, &draft)?;
            store.record(
                "add",
                &format!("sub-task #{id}"),
                &format!("{} → action #{action_id}", draft.title),
            );
            Outcome::Created {
                kind: "Sub-task",
                id,
            }
        }

        Command::EditSubTask { id, patch } => {
            let (_, _, sub) = state.find_sub_task(id)?;
            let draft = patch.merge(sub);
            validation::validate_sub_task(&draft)?;
            store.update_sub_task(id, &draft)?;
            store.record("edit", &format!("sub-task #{id}"), &draft.title);
            Outcome::Updated {
                kind: "Sub-task",
                id,
            }
        }

        Command::ToggleSubTask { id } => {
            let (_, _, sub) = state.find_sub_task(id)?;
            let completed = !sub.completed;
            store.set_sub_task_completed(id, completed)?;
            store.record(
                "toggle",
                &format!("sub-task #{id}"),
                if completed { "completed" } else { "reopened" },
            );
            Outcome::Toggled {
                kind: "Sub-task",
                id,
                completed,
            }
        }

        Command::DeleteSubTask { id } => {
            let (_, _, sub) = state.find_sub_task(id)?;
            store.delete_sub_task(id)?;
            store.record("del", &format!("sub-task #{id}"), &sub.title);
            Outcome::Deleted {
                kind: "Sub-task",
                id,
            }
        }

        Command::UpdateProfile(patch) => {
            if let Some(name) = &patch.name
                && name.trim().is_empty()
            {
                return Err(AppError::validation("name is required"));
            }
            if let Some(email) = &patch.email {
                validation::validate_email(email)?;
            }
            let patch = ProfilePatch {
                phone: patch.phone.map(clean_optional),
                ..patch
            };
            store.update_profile(state.user_id, &patch)?;
            store.record("edit", &format!("profile #{}", state.user_id), "profile updated");
            Outcome::Updated {
                kind: "Profile",
                id: state.user_id,
            }
        }

        Command::SetNotifications(enabled) => {
            if !gate::can_toggle_notifications(state.profile.plan) {
                return Err(AppError::GateDenied(
                    "notifications require the basic plan".to_string(),
                ));
            }
            store.set_notifications(state.user_id, enabled)?;
            store.record(
                "edit",
                &format!("profile #{}", state.user_id),
                if enabled {
                    "notifications on"
                } else {
                    "notifications off"
                },
            );
            Outcome::Toggled {
                kind: "Notifications",
                id: state.user_id,
                completed: enabled,
            }
        }
    };

    let next = AppState::load(store, state.user_id)?;
    Ok((next, outcome))
}
