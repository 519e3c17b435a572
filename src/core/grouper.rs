//! Date buckets for the pending actions of an indicator.
//!
//! Groups are contiguous runs of the deadline-sorted pending actions that share
//! a label, so a label may in principle appear twice if another one sits in
//! between. Actions without a deadline never enter a group; see
//! [`undated_pending`].

use crate::models::ActionItem;
use chrono::{Datelike, Days, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineLabel {
    Overdue,
    Today,
    Tomorrow,
    /// Any later date; rendered as weekday + day + month.
    Day(NaiveDate),
}

impl DeadlineLabel {
    /// Human label. The year is appended for dates outside `today`'s year so
    /// the text stays unique per calendar date.
    pub fn render(&self, today: NaiveDate) -> String {
        match self {
            DeadlineLabel::Overdue => "Overdue".to_string(),
            DeadlineLabel::Today => "Today".to_string(),
            DeadlineLabel::Tomorrow => "Tomorrow".to_string(),
            DeadlineLabel::Day(d) if d.year() == today.year() => d.format("%a, %-d %b").to_string(),
            DeadlineLabel::Day(d) => d.format("%a, %-d %b %Y").to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActionGroup<'a> {
    pub label: DeadlineLabel,
    pub title: String,
    pub actions: Vec<&'a ActionItem>,
}

/// Classify a deadline relative to `today`.
pub fn label_for(deadline: NaiveDate, today: NaiveDate) -> DeadlineLabel {
    let tomorrow = today.checked_add_days(Days::new(1));

    if deadline < today {
        DeadlineLabel::Overdue
    } else if deadline == today {
        DeadlineLabel::Today
    } else if Some(deadline) == tomorrow {
        DeadlineLabel::Tomorrow
    } else {
        DeadlineLabel::Day(deadline)
    }
}

/// Bucket the pending, dated actions by deadline.
///
/// The sort is stable: actions sharing a deadline keep their list order.
pub fn group_pending_actions(actions: &[ActionItem], today: NaiveDate) -> Vec<ActionGroup<'_>> {
    let mut pending: Vec<&ActionItem> = actions.iter().filter(|a| !a.completed).collect();
    // None sorts last (treated as an unbounded deadline)
    pending.sort_by_key(|a| (a.deadline.is_none(), a.deadline));

    let mut groups: Vec<ActionGroup<'_>> = Vec::new();

    for action in pending {
        let Some(deadline) = action.deadline else {
            continue;
        };
        let label = label_for(deadline, today);

        match groups.last_mut() {
            Some(last) if last.label == label => last.actions.push(action),
            _ => groups.push(ActionGroup {
                label,
                title: label.render(today),
                actions: vec![action],
            }),
        }
    }

    groups
}

/// Pending actions without a deadline, in list order.
pub fn undated_pending(actions: &[ActionItem]) -> Vec<&ActionItem> {
    actions
        .iter()
        .filter(|a| !a.completed && a.deadline.is_none())
        .collect()
}
