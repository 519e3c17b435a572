use chrono::NaiveDate;
use serde::Serialize;

/// Checklist item nested under an action. Carries no numeric weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubTask {
    pub id: i64,
    pub title: String,
    pub responsible: String,
    pub deadline: Option<NaiveDate>,
    pub completed: bool,
}

/// Fields supplied by the sub-task form (create and edit).
#[derive(Debug, Clone, Default)]
pub struct SubTaskDraft {
    pub title: String,
    pub responsible: String,
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct SubTaskPatch {
    pub title: Option<String>,
    pub responsible: Option<String>,
    pub deadline: Option<Option<NaiveDate>>,
}

impl SubTaskPatch {
    pub fn merge(&self, sub: &SubTask) -> SubTaskDraft {
        SubTaskDraft {
            title: self.title.clone().unwrap_or_else(|| sub.title.clone()),
            responsible: self
                .responsible
                .clone()
                .unwrap_or_else(|| sub.responsible.clone()),
            deadline: self.deadline.unwrap_or(sub.deadline),
        }
    }
}
