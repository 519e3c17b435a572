use chrono::NaiveDate;
use metahub::core::aggregator::{
    compute_current_value, compute_missing_planned, gap, initial_from_current,
};
use metahub::core::gate::{can_create_indicator, can_toggle_notifications, is_over_limit};
use metahub::core::grouper::{DeadlineLabel, group_pending_actions, label_for, undated_pending};
use metahub::models::{ActionItem, Indicator, IndicatorUnit, PlanType};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn done(mut a: ActionItem) -> ActionItem {
    a.completed = true;
    a
}

fn sales(actions: Vec<ActionItem>) -> Indicator {
    Indicator {
        id: 1,
        title: "Sales".into(),
        description: None,
        unit: IndicatorUnit::Currency,
        initial_value: 100_000.0,
        target_value: 150_000.0,
        actions,
    }
}

#[test]
fn current_value_adds_only_completed_contributions() {
    let actions = vec![
        done(ActionItem::new(1, "A", 30_000.0, None)),
        ActionItem::new(2, "B", 20_000.0, None),
    ];

    let current = compute_current_value(100_000.0, &actions);
    assert_eq!(current, 130_000.0);
    assert_eq!(gap(150_000.0, current), 20_000.0);
    assert_eq!(compute_missing_planned(150_000.0, current, &actions), 0.0);

    let ind = sales(actions);
    assert!(!ind.is_under_planned());
}

#[test]
fn no_actions_means_current_equals_initial() {
    let ind = sales(vec![]);
    assert_eq!(ind.current_value(), 100_000.0);
    assert_eq!(ind.missing_planned(), 50_000.0);
    assert!(ind.is_under_planned());
}

#[test]
fn negative_contribution_reduces_value_and_missing_can_go_negative() {
    let actions = vec![
        done(ActionItem::new(1, "Churn", -5_000.0, None)),
        ActionItem::new(2, "Big deal", 80_000.0, None),
    ];
    let ind = sales(actions);

    assert_eq!(ind.current_value(), 95_000.0);
    // over-planned: pending work exceeds the gap
    assert_eq!(ind.missing_planned(), -25_000.0);
    assert!(!ind.is_under_planned());
}

#[test]
fn initial_from_current_inverts_completed_sum() {
    let actions = vec![
        done(ActionItem::new(1, "A", 30_000.0, None)),
        ActionItem::new(2, "B", 20_000.0, None),
    ];
    let initial = initial_from_current(140_000.0, &actions);
    assert_eq!(initial, 110_000.0);
    assert_eq!(compute_current_value(initial, &actions), 140_000.0);
}

#[test]
fn groups_follow_deadline_order_and_skip_undated() {
    let today = d("2025-03-10");
    let actions = vec![
        ActionItem::new(1, "tomorrow", 1.0, Some(d("2025-03-11"))),
        ActionItem::new(2, "undated", 1.0, None),
        ActionItem::new(3, "yesterday", 1.0, Some(d("2025-03-09"))),
        ActionItem::new(4, "today", 1.0, Some(d("2025-03-10"))),
    ];

    let groups = group_pending_actions(&actions, today);
    let titles: Vec<&str> = groups.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, ["Overdue", "Today", "Tomorrow"]);
    assert_eq!(groups[0].actions[0].id, 3);
    assert_eq!(groups[1].actions[0].id, 4);
    assert_eq!(groups[2].actions[0].id, 1);

    let undated: Vec<i64> = undated_pending(&actions).iter().map(|a| a.id).collect();
    assert_eq!(undated, [2]);
}

#[test]
fn overdue_actions_share_one_group_and_completed_are_excluded() {
    let today = d("2025-03-10");
    let actions = vec![
        ActionItem::new(1, "old", 1.0, Some(d("2025-02-01"))),
        done(ActionItem::new(2, "done", 1.0, Some(d("2025-03-01")))),
        ActionItem::new(3, "older", 1.0, Some(d("2025-01-15"))),
    ];

    let groups = group_pending_actions(&actions, today);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].label, DeadlineLabel::Overdue);
    let ids: Vec<i64> = groups[0].actions.iter().map(|a| a.id).collect();
    assert_eq!(ids, [3, 1]);
}

#[test]
fn same_deadline_keeps_list_order() {
    let today = d("2025-03-10");
    let due = Some(d("2025-03-20"));
    let actions = vec![
        ActionItem::new(7, "first", 1.0, due),
        ActionItem::new(3, "second", 1.0, due),
        ActionItem::new(5, "third", 1.0, due),
    ];

    let groups = group_pending_actions(&actions, today);
    assert_eq!(groups.len(), 1);
    let ids: Vec<i64> = groups[0].actions.iter().map(|a| a.id).collect();
    assert_eq!(ids, [7, 3, 5]);
}

#[test]
fn later_dates_use_weekday_labels() {
    let today = d("2025-03-10");
    let label = label_for(d("2025-03-14"), today);
    assert_eq!(label, DeadlineLabel::Day(d("2025-03-14")));
    assert_eq!(label.render(today), "Fri, 14 Mar");

    let next_year = label_for(d("2026-03-14"), today);
    assert_eq!(next_year.render(today), "Sat, 14 Mar 2026");
}

#[test]
fn current_value_ignores_action_order() {
    let mut actions = vec![
        done(ActionItem::new(1, "A", 30_000.0, None)),
        ActionItem::new(2, "B", 20_000.0, None),
        done(ActionItem::new(3, "C", -5_000.0, None)),
        done(ActionItem::new(4, "D", 12_500.0, None)),
    ];

    let forward = compute_current_value(100_000.0, &actions);
    actions.reverse();
    let reversed = compute_current_value(100_000.0, &actions);
    actions.swap(0, 2);
    let shuffled = compute_current_value(100_000.0, &actions);

    assert_eq!(forward, 137_500.0);
    assert_eq!(reversed, forward);
    assert_eq!(shuffled, forward);
}

#[test]
fn distinct_later_days_get_one_group_each() {
    let today = d("2025-03-10");
    let actions = vec![
        ActionItem::new(1, "late march", 1.0, Some(d("2025-03-20"))),
        ActionItem::new(2, "someday", 1.0, None),
        ActionItem::new(3, "weekend", 1.0, Some(d("2025-03-15"))),
        done(ActionItem::new(4, "finished", 1.0, Some(d("2025-03-15")))),
        ActionItem::new(5, "also late march", 1.0, Some(d("2025-03-20"))),
        ActionItem::new(6, "april", 1.0, Some(d("2025-04-02"))),
    ];

    let groups = group_pending_actions(&actions, today);
    let titles: Vec<&str> = groups.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, ["Sat, 15 Mar", "Thu, 20 Mar", "Wed, 2 Apr"]);
    assert_eq!(groups[0].label, DeadlineLabel::Day(d("2025-03-15")));

    let ids: Vec<Vec<i64>> = groups
        .iter()
        .map(|g| g.actions.iter().map(|a| a.id).collect())
        .collect();
    assert_eq!(ids, [vec![3], vec![1, 5], vec![6]]);

    let undated: Vec<i64> = undated_pending(&actions).iter().map(|a| a.id).collect();
    assert_eq!(undated, [2]);
}

#[test]
fn empty_list_gives_no_groups() {
    assert!(group_pending_actions(&[], d("2025-03-10")).is_empty());
}

#[test]
fn free_plan_is_limited_to_two_indicators() {
    assert!(can_create_indicator(PlanType::Free, 0));
    assert!(can_create_indicator(PlanType::Free, 1));
    assert!(!can_create_indicator(PlanType::Free, 2));
    assert!(can_create_indicator(PlanType::Basic, 50));

    assert!(!can_toggle_notifications(PlanType::Free));
    assert!(can_toggle_notifications(PlanType::Basic));

    assert!(!is_over_limit(PlanType::Free, 2));
    assert!(is_over_limit(PlanType::Free, 3));
    assert!(!is_over_limit(PlanType::Basic, 3));
}
