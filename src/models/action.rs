use super::sub_task::SubTask;
use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionItem {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub responsible: String,
    pub deadline: Option<NaiveDate>,    // ⇔ actions.deadline (TEXT "YYYY-MM-DD")
    pub completed: bool,
    pub completed_at: Option<DateTime<Local>>, // ⇔ actions.completed_at (RFC 3339)
    /// Signed amount added to the indicator's current value once completed.
    pub contribution: f64,
    pub sub_tasks: Vec<SubTask>,
}

impl ActionItem {
    /// Pending action with no sub-tasks; mostly useful to build fixtures.
    pub fn new(id: i64, title: &str, contribution: f64, deadline: Option<NaiveDate>) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: None,
            responsible: "-".to_string(),
            deadline,
            completed: false,
            completed_at: None,
            contribution,
            sub_tasks: Vec::new(),
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.completed
    }

    pub fn sub_task(&self, id: i64) -> Option<&SubTask> {
        self.sub_tasks.iter().find(|s| s.id == id)
    }
}

/// Fields supplied by the action form.
#[derive(Debug, Clone, Default)]
pub struct ActionDraft {
    pub title: String,
    pub description: Option<String>,
    pub responsible: String,
    pub contribution: Option<f64>,
    pub deadline: Option<NaiveDate>,
}

/// Partial update from the edit form; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ActionPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub responsible: Option<String>,
    pub contribution: Option<f64>,
    pub deadline: Option<Option<NaiveDate>>,
}

impl ActionPatch {
    /// Overlay the patch on an existing action.
    pub fn merge(&self, action: &ActionItem) -> ActionDraft {
        ActionDraft {
            title: self.title.clone().unwrap_or_else(|| action.title.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| action.description.clone()),
            responsible: self
                .responsible
                .clone()
                .unwrap_or_else(|| action.responsible.clone()),
            contribution: Some(self.contribution.unwrap_or(action.contribution)),
            deadline: self.deadline.unwrap_or(action.deadline),
        }
    }
}
