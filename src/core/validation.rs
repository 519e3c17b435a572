//! Form-level required-field checks, run before any store call.

use crate::errors::{AppError, AppResult};
use crate::models::{ActionDraft, IndicatorFields, IndicatorPatch, SubTaskDraft};
use regex::Regex;
use std::sync::OnceLock;

fn require_text(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(())
}

fn require_number(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::validation(format!("{field} must be a finite number")));
    }
    Ok(())
}

pub fn validate_indicator(ind: &IndicatorFields) -> AppResult<()> {
    require_text(&ind.title, "title")?;
    require_number(ind.initial_value, "initial value")?;
    require_number(ind.target_value, "target value")
}

pub fn validate_indicator_patch(patch: &IndicatorPatch) -> AppResult<()> {
    if let Some(title) = &patch.title {
        require_text(title, "title")?;
    }
    if let Some(target) = patch.target_value {
        require_number(target, "target value")?;
    }
    Ok(())
}

/// The creation form requires a deadline; the edit form does not.
pub fn validate_action(draft: &ActionDraft, require_deadline: bool) -> AppResult<()> {
    require_text(&draft.title, "title")?;
    require_text(&draft.responsible, "responsible")?;

    match draft.contribution {
        Some(c) => require_number(c, "contribution")?,
        None => return Err(AppError::validation("contribution is required")),
    }

    if require_deadline && draft.deadline.is_none() {
        return Err(AppError::validation("deadline is required"));
    }
    Ok(())
}

pub fn validate_sub_task(draft: &SubTaskDraft) -> AppResult<()> {
    require_text(&draft.title, "title")?;
    require_text(&draft.responsible, "responsible")
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern compiles")
    })
}

pub fn validate_email(email: &str) -> AppResult<()> {
    require_text(email, "email")?;
    if !email_regex().is_match(email.trim()) {
        return Err(AppError::validation(format!("invalid email address '{email}'")));
    }
    Ok(())
}
