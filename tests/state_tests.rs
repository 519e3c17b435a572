use chrono::{Local, NaiveDate};
use metahub::core::state::{AppState, Command, Outcome, apply};
use metahub::db::{IndicatorStore, ProfileStore};
use metahub::errors::AppError;
use metahub::models::{
    ActionDraft, ActionPatch, Baseline, IndicatorFields, IndicatorPatch, IndicatorUnit, PlanType,
    ProfilePatch, SubTaskDraft, SubscriptionUpdate,
};

mod common;
use common::memory_pool;

fn fields(title: &str) -> IndicatorFields {
    IndicatorFields {
        title: title.to_string(),
        description: None,
        unit: IndicatorUnit::Currency,
        initial_value: 100_000.0,
        target_value: 150_000.0,
    }
}

fn draft(title: &str, contribution: f64) -> ActionDraft {
    ActionDraft {
        title: title.to_string(),
        description: None,
        responsible: "Ana".to_string(),
        contribution: Some(contribution),
        deadline: NaiveDate::from_ymd_opt(2030, 1, 10),
    }
}

fn run(
    pool: &metahub::db::DbPool,
    state: &AppState,
    command: Command,
) -> Result<(AppState, Outcome), AppError> {
    apply(pool, state, command, Local::now())
}

#[test]
fn toggle_updates_value_and_completion_timestamp() {
    let pool = memory_pool();
    let state = AppState::load(&pool, 1).unwrap();

    let (state, _) = run(&pool, &state, Command::CreateIndicator(fields("Sales"))).unwrap();
    let (state, _) = run(
        &pool,
        &state,
        Command::AddAction {
            indicator_id: 1,
            draft: draft("Deal", 30_000.0),
        },
    )
    .unwrap();
    assert_eq!(state.indicators[0].current_value(), 100_000.0);

    let (state, outcome) = run(&pool, &state, Command::ToggleAction { id: 1 }).unwrap();
    assert_eq!(
        outcome,
        Outcome::Toggled {
            kind: "Action",
            id: 1,
            completed: true
        }
    );
    let (_, action) = state.find_action(1).unwrap();
    assert!(action.completed);
    assert!(action.completed_at.is_some());
    assert_eq!(state.indicators[0].current_value(), 130_000.0);

    let (state, _) = run(&pool, &state, Command::ToggleAction { id: 1 }).unwrap();
    let (_, action) = state.find_action(1).unwrap();
    assert!(!action.completed);
    assert!(action.completed_at.is_none());
    assert_eq!(state.indicators[0].current_value(), 100_000.0);
}

#[test]
fn deleting_an_indicator_cascades_to_actions_and_sub_tasks() {
    let pool = memory_pool();
    let state = AppState::load(&pool, 1).unwrap();

    let (state, _) = run(&pool, &state, Command::CreateIndicator(fields("Sales"))).unwrap();
    let (state, _) = run(
        &pool,
        &state,
        Command::AddAction {
            indicator_id: 1,
            draft: draft("Deal", 10.0),
        },
    )
    .unwrap();
    let (state, _) = run(
        &pool,
        &state,
        Command::AddSubTask {
            action_id: 1,
            draft: SubTaskDraft {
                title: "Call".into(),
                responsible: "Bia".into(),
                deadline: None,
            },
        },
    )
    .unwrap();
    assert_eq!(state.indicators[0].actions[0].sub_tasks.len(), 1);

    let (state, _) = run(&pool, &state, Command::DeleteIndicator { id: 1 }).unwrap();
    assert!(state.indicators.is_empty());

    let orphans: i64 = pool
        .conn
        .query_row(
            "SELECT (SELECT COUNT(*) FROM actions) + (SELECT COUNT(*) FROM sub_tasks)",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(orphans, 0);
}

#[test]
fn third_indicator_is_denied_on_free_plan() {
    let pool = memory_pool();
    let state = AppState::load(&pool, 1).unwrap();

    let (state, _) = run(&pool, &state, Command::CreateIndicator(fields("A"))).unwrap();
    let (state, _) = run(&pool, &state, Command::CreateIndicator(fields("B"))).unwrap();
    let err = run(&pool, &state, Command::CreateIndicator(fields("C"))).unwrap_err();
    assert!(matches!(err, AppError::GateDenied(_)));
    assert_eq!(pool.list_indicators(1).unwrap().len(), 2);
}

#[test]
fn downgraded_profile_keeps_indicators_and_shows_banner() {
    let pool = memory_pool();
    pool.apply_subscription(
        1,
        &SubscriptionUpdate {
            stripe_customer_id: Some("cus_1".into()),
            stripe_subscription_id: Some("sub_1".into()),
            subscription_status: "active".into(),
            plan: PlanType::Basic,
        },
    )
    .unwrap();

    let mut state = AppState::load(&pool, 1).unwrap();
    for title in ["A", "B", "C"] {
        state = run(&pool, &state, Command::CreateIndicator(fields(title)))
            .unwrap()
            .0;
    }

    pool.apply_subscription(
        1,
        &SubscriptionUpdate {
            stripe_customer_id: None,
            stripe_subscription_id: None,
            subscription_status: "canceled".into(),
            plan: PlanType::Free,
        },
    )
    .unwrap();

    let state = AppState::load(&pool, 1).unwrap();
    assert_eq!(state.indicator_count(), 3);
    assert!(state.is_over_limit());
    assert!(!state.can_create_indicator());
    assert_eq!(state.profile.stripe_customer_id.as_deref(), Some("cus_1"));
}

#[test]
fn validation_fails_before_any_write() {
    let pool = memory_pool();
    let state = AppState::load(&pool, 1).unwrap();
    let (state, _) = run(&pool, &state, Command::CreateIndicator(fields("Sales"))).unwrap();

    assert!(matches!(
        run(&pool, &state, Command::CreateIndicator(fields("  "))),
        Err(AppError::Validation(_))
    ));

    let mut no_deadline = draft("Deal", 5.0);
    no_deadline.deadline = None;
    assert!(matches!(
        run(
            &pool,
            &state,
            Command::AddAction {
                indicator_id: 1,
                draft: no_deadline
            }
        ),
        Err(AppError::Validation(_))
    ));

    let mut no_owner = draft("Deal", 5.0);
    no_owner.responsible = String::new();
    assert!(matches!(
        run(
            &pool,
            &state,
            Command::AddAction {
                indicator_id: 1,
                draft: no_owner
            }
        ),
        Err(AppError::Validation(_))
    ));

    assert!(pool.list_indicators(1).unwrap()[0].actions.is_empty());
}

#[test]
fn editing_current_value_rewrites_initial_value() {
    let pool = memory_pool();
    let state = AppState::load(&pool, 1).unwrap();
    let (state, _) = run(&pool, &state, Command::CreateIndicator(fields("Sales"))).unwrap();
    let (state, _) = run(
        &pool,
        &state,
        Command::AddAction {
            indicator_id: 1,
            draft: draft("Deal", 30_000.0),
        },
    )
    .unwrap();
    let (state, _) = run(&pool, &state, Command::ToggleAction { id: 1 }).unwrap();

    let patch = IndicatorPatch {
        baseline: Some(Baseline::Current(140_000.0)),
        ..Default::default()
    };
    let (state, _) = run(&pool, &state, Command::UpdateIndicator { id: 1, patch }).unwrap();

    let ind = state.indicator(1).unwrap();
    assert_eq!(ind.initial_value, 110_000.0);
    assert_eq!(ind.current_value(), 140_000.0);
}

#[test]
fn edit_action_can_clear_deadline_and_keeps_other_fields() {
    let pool = memory_pool();
    let state = AppState::load(&pool, 1).unwrap();
    let (state, _) = run(&pool, &state, Command::CreateIndicator(fields("Sales"))).unwrap();
    let (state, _) = run(
        &pool,
        &state,
        Command::AddAction {
            indicator_id: 1,
            draft: draft("Deal", 30_000.0),
        },
    )
    .unwrap();

    let patch = ActionPatch {
        deadline: Some(None),
        ..Default::default()
    };
    let (state, _) = run(&pool, &state, Command::EditAction { id: 1, patch }).unwrap();

    let (_, action) = state.find_action(1).unwrap();
    assert_eq!(action.deadline, None);
    assert_eq!(action.title, "Deal");
    assert_eq!(action.contribution, 30_000.0);
}

#[test]
fn unknown_ids_are_reported_as_not_found() {
    let pool = memory_pool();
    let state = AppState::load(&pool, 1).unwrap();

    let err = run(&pool, &state, Command::ToggleAction { id: 42 }).unwrap_err();
    assert!(matches!(err, AppError::NotFound { kind: "Action", id: 42 }));
}

#[test]
fn notifications_require_basic_plan() {
    let pool = memory_pool();
    let state = AppState::load(&pool, 1).unwrap();

    let err = run(&pool, &state, Command::SetNotifications(true)).unwrap_err();
    assert!(matches!(err, AppError::GateDenied(_)));

    pool.apply_subscription(
        1,
        &SubscriptionUpdate {
            stripe_customer_id: Some("cus_1".into()),
            stripe_subscription_id: None,
            subscription_status: "active".into(),
            plan: PlanType::Basic,
        },
    )
    .unwrap();
    let state = AppState::load(&pool, 1).unwrap();
    let (state, _) = run(&pool, &state, Command::SetNotifications(true)).unwrap();
    assert!(state.profile.notifications_active());
}

#[test]
fn profile_update_validates_email() {
    let pool = memory_pool();
    let state = AppState::load(&pool, 1).unwrap();

    let bad = ProfilePatch {
        email: Some("not-an-email".into()),
        ..Default::default()
    };
    assert!(matches!(
        run(&pool, &state, Command::UpdateProfile(bad)),
        Err(AppError::Validation(_))
    ));

    let good = ProfilePatch {
        name: Some("Ana".into()),
        email: Some("ana@example.com".into()),
        phone: Some(Some("+55 11 99999-0000".into())),
    };
    let (state, _) = run(&pool, &state, Command::UpdateProfile(good)).unwrap();
    assert_eq!(state.profile.email, "ana@example.com");
    assert_eq!(state.profile.phone.as_deref(), Some("+55 11 99999-0000"));
}

#[test]
fn mutations_are_written_to_the_audit_log() {
    let pool = memory_pool();
    let state = AppState::load(&pool, 1).unwrap();
    run(&pool, &state, Command::CreateIndicator(fields("Sales"))).unwrap();

    let n: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'add' AND target = 'indicator #1'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(n, 1);
}
