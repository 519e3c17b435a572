//! SQLite implementation of [`IndicatorStore`].

use crate::db::pool::DbPool;
use crate::db::store::IndicatorStore;
use crate::errors::{AppError, AppResult};
use crate::models::{
    ActionDraft, ActionItem, Indicator, IndicatorFields, IndicatorUnit, SubTask, SubTaskDraft,
};
use chrono::{DateTime, Local, NaiveDate};
use rusqlite::{Connection, Result, Row, params};
use std::collections::HashMap;

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_deadline(raw: Option<String>, col: usize) -> Result<Option<NaiveDate>> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| conversion_error(col, AppError::InvalidDate(s))),
    }
}

fn deadline_to_db(d: Option<NaiveDate>) -> Option<String> {
    d.map(|d| d.format("%Y-%m-%d").to_string())
}

pub fn map_indicator(row: &Row) -> Result<Indicator> {
    let unit_str: String = row.get("unit")?;
    let unit = IndicatorUnit::from_db_str(&unit_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidUnit(unit_str.clone())))?;

    Ok(Indicator {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        unit,
        initial_value: row.get("initial_value")?,
        target_value: row.get("target_value")?,
        actions: Vec::new(),
    })
}

/// Maps an `actions` row; the owning indicator id comes back alongside.
pub fn map_action(row: &Row) -> Result<(i64, ActionItem)> {
    let completed_at: Option<String> = row.get("completed_at")?;
    let completed_at = match completed_at {
        Some(s) => Some(
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Local))
                .map_err(|_| conversion_error(0, AppError::InvalidDate(s.clone())))?,
        ),
        None => None,
    };

    let action = ActionItem {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        responsible: row.get("responsible")?,
        deadline: parse_deadline(row.get("deadline")?, 0)?,
        completed: row.get::<_, i32>("completed")? == 1,
        completed_at,
        contribution: row.get("contribution")?,
        sub_tasks: Vec::new(),
    };
    Ok((row.get("indicator_id")?, action))
}

pub fn map_sub_task(row: &Row) -> Result<(i64, SubTask)> {
    let sub = SubTask {
        id: row.get("id")?,
        title: row.get("title")?,
        responsible: row.get("responsible")?,
        deadline: parse_deadline(row.get("deadline")?, 0)?,
        completed: row.get::<_, i32>("completed")? == 1,
    };
    Ok((row.get("action_id")?, sub))
}

fn load_sub_tasks(conn: &Connection, user_id: i64) -> Result<HashMap<i64, Vec<SubTask>>> {
    let mut stmt = conn.prepare(
        "SELECT s.* FROM sub_tasks s
         JOIN actions a ON a.id = s.action_id
         JOIN indicators i ON i.id = a.indicator_id
         WHERE i.user_id = ?1
         ORDER BY s.id ASC",
    )?;

    let mut out: HashMap<i64, Vec<SubTask>> = HashMap::new();
    for r in stmt.query_map([user_id], map_sub_task)? {
        let (action_id, sub) = r?;
        out.entry(action_id).or_default().push(sub);
    }
    Ok(out)
}

fn load_actions(conn: &Connection, user_id: i64) -> Result<HashMap<i64, Vec<ActionItem>>> {
    let mut sub_tasks = load_sub_tasks(conn, user_id)?;

    let mut stmt = conn.prepare(
        "SELECT a.* FROM actions a
         JOIN indicators i ON i.id = a.indicator_id
         WHERE i.user_id = ?1
         ORDER BY a.id ASC",
    )?;

    let mut out: HashMap<i64, Vec<ActionItem>> = HashMap::new();
    for r in stmt.query_map([user_id], map_action)? {
        let (indicator_id, mut action) = r?;
        action.sub_tasks = sub_tasks.remove(&action.id).unwrap_or_default();
        out.entry(indicator_id).or_default().push(action);
    }
    Ok(out)
}

/// Fail with NotFound when an UPDATE/DELETE matched no row.
fn expect_one(changed: usize, kind: &'static str, id: i64) -> AppResult<()> {
    if changed == 0 {
        return Err(AppError::not_found(kind, id));
    }
    Ok(())
}

fn now_str() -> String {
    Local::now().to_rfc3339()
}

impl IndicatorStore for DbPool {
    fn list_indicators(&self, user_id: i64) -> AppResult<Vec<Indicator>> {
        let mut actions = load_actions(&self.conn, user_id)?;

        let mut stmt = self
            .conn
            .prepare("SELECT * FROM indicators WHERE user_id = ?1 ORDER BY id ASC")?;

        let mut out = Vec::new();
        for r in stmt.query_map([user_id], map_indicator)? {
            let mut ind = r?;
            ind.actions = actions.remove(&ind.id).unwrap_or_default();
            out.push(ind);
        }
        Ok(out)
    }

    fn create_indicator(&self, user_id: i64, fields: &IndicatorFields) -> AppResult<i64> {
        self.conn.execute(
            "INSERT INTO indicators (user_id, title, description, unit, initial_value, target_value, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                user_id,
                fields.title.trim(),
                fields.description,
                fields.unit.to_db_str(),
                fields.initial_value,
                fields.target_value,
                now_str(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_indicator(&self, id: i64, fields: &IndicatorFields) -> AppResult<()> {
        let changed = self.conn.execute(
            "UPDATE indicators
             SET title = ?1, description = ?2, unit = ?3, initial_value = ?4, target_value = ?5
             WHERE id = ?6",
            params![
                fields.title.trim(),
                fields.description,
                fields.unit.to_db_str(),
                fields.initial_value,
                fields.target_value,
                id,
            ],
        )?;
        expect_one(changed, "Indicator", id)
    }

    fn delete_indicator(&self, id: i64) -> AppResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM indicators WHERE id = ?1", [id])?;
        expect_one(changed, "Indicator", id)
    }

    fn create_action(&self, indicator_id: i64, draft: &ActionDraft) -> AppResult<i64> {
        self.conn.execute(
            "INSERT INTO actions (indicator_id, title, description, responsible, deadline, completed, contribution, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?7)",
            params![
                indicator_id,
                draft.title.trim(),
                draft.description,
                draft.responsible.trim(),
                deadline_to_db(draft.deadline),
                draft.contribution.unwrap_or_default(),
                now_str(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_action(&self, id: i64, draft: &ActionDraft) -> AppResult<()> {
        let changed = self.conn.execute(
            "UPDATE actions
             SET title = ?1, description = ?2, responsible = ?3, deadline = ?4, contribution = ?5
             WHERE id = ?6",
            params![
                draft.title.trim(),
                draft.description,
                draft.responsible.trim(),
                deadline_to_db(draft.deadline),
                draft.contribution.unwrap_or_default(),
                id,
            ],
        )?;
        expect_one(changed, "Action", id)
    }

    fn set_action_completed(
        &self,
        id: i64,
        completed: bool,
        completed_at: Option<DateTime<Local>>,
    ) -> AppResult<()> {
        let changed = self.conn.execute(
            "UPDATE actions SET completed = ?1, completed_at = ?2 WHERE id = ?3",
            params![
                if completed { 1 } else { 0 },
                completed_at.map(|t| t.to_rfc3339()),
                id
            ],
        )?;
        expect_one(changed, "Action", id)
    }

    fn delete_action(&self, id: i64) -> AppResult<()> {
        let changed = self.conn.execute("DELETE FROM actions WHERE id = ?1", [id])?;
        expect_one(changed, "Action", id)
    }

    fn create_sub_task(&self, action_id: i64, draft: &SubTaskDraft) -> AppResult<i64> {
        self.conn.execute(
            "INSERT INTO sub_tasks (action_id, title, responsible, deadline, completed, created_at)
             VALUES (?1, ?2, ?3, ?4, 0, ?5)",
            params![
                action_id,
                draft.title.trim(),
                draft.responsible.trim(),
                deadline_to_db(draft.deadline),
                now_str(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_sub_task(&self, id: i64, draft: &SubTaskDraft) -> AppResult<()> {
        let changed = self.conn.execute(
            "UPDATE sub_tasks SET title = ?1, responsible = ?2, deadline = ?3 WHERE id = ?4",
            params![
                draft.title.trim(),
                draft.responsible.trim(),
                deadline_to_db(draft.deadline),
                id
            ],
        )?;
        expect_one(changed, "Sub-task", id)
    }

    fn set_sub_task_completed(&self, id: i64, completed: bool) -> AppResult<()> {
        let changed = self.conn.execute(
            "UPDATE sub_tasks SET completed = ?1 WHERE id = ?2",
            params![if completed { 1 } else { 0 }, id],
        )?;
        expect_one(changed, "Sub-task", id)
    }

    fn delete_sub_task(&self, id: i64) -> AppResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM sub_tasks WHERE id = ?1", [id])?;
        expect_one(changed, "Sub-task", id)
    }
}
