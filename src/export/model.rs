// src/export/model.rs

use crate::models::{ActionItem, Indicator};
use serde::Serialize;

/// Flat row: one per action, indicator columns repeated.
/// Indicators without actions still get one row with empty action columns.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ActionExport {
    pub indicator_id: i64,
    pub indicator: String,
    pub unit: String,
    pub initial_value: f64,
    pub current_value: f64,
    pub target_value: f64,
    pub action_id: Option<i64>,
    pub action: Option<String>,
    pub responsible: Option<String>,
    pub deadline: Option<String>,
    pub contribution: Option<f64>,
    pub completed: Option<bool>,
    pub completed_at: Option<String>,
    pub sub_tasks_done: Option<usize>,
    pub sub_tasks_total: Option<usize>,
}

impl ActionExport {
    fn indicator_only(ind: &Indicator) -> Self {
        Self {
            indicator_id: ind.id,
            indicator: ind.title.clone(),
            unit: ind.unit.to_db_str().to_string(),
            initial_value: ind.initial_value,
            current_value: ind.current_value(),
            target_value: ind.target_value,
            action_id: None,
            action: None,
            responsible: None,
            deadline: None,
            contribution: None,
            completed: None,
            completed_at: None,
            sub_tasks_done: None,
            sub_tasks_total: None,
        }
    }

    fn with_action(ind: &Indicator, a: &ActionItem) -> Self {
        Self {
            action_id: Some(a.id),
            action: Some(a.title.clone()),
            responsible: Some(a.responsible.clone()),
            deadline: a.deadline.map(|d| d.format("%Y-%m-%d").to_string()),
            contribution: Some(a.contribution),
            completed: Some(a.completed),
            completed_at: a.completed_at.map(|t| t.to_rfc3339()),
            sub_tasks_done: Some(a.sub_tasks.iter().filter(|s| s.completed).count()),
            sub_tasks_total: Some(a.sub_tasks.len()),
            ..Self::indicator_only(ind)
        }
    }
}

pub(crate) fn flatten(indicators: &[Indicator]) -> Vec<ActionExport> {
    indicators
        .iter()
        .flat_map(|ind| {
            if ind.actions.is_empty() {
                vec![ActionExport::indicator_only(ind)]
            } else {
                ind.actions
                    .iter()
                    .map(|a| ActionExport::with_action(ind, a))
                    .collect()
            }
        })
        .collect()
}
