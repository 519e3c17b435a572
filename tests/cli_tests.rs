use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init, init_with_sales, mh_db, setup_test_db};

#[test]
fn test_init_creates_default_profile() {
    let db_path = setup_test_db("init_profile");
    init(&db_path);

    mh_db(&db_path, &["profile"])
        .assert()
        .success()
        .stdout(contains("MetaHub User"))
        .stdout(contains("free"));
}

#[test]
fn test_show_groups_pending_actions() {
    let db_path = setup_test_db("show_groups");
    init_with_sales(&db_path);

    mh_db(&db_path, &["show", "--today", "2030-01-10"])
        .assert()
        .success()
        .stdout(contains("R$ 100.000"))
        .stdout(contains("Today"))
        .stdout(contains("Sun, 20 Jan"))
        .stdout(contains("Close deal A"));
}

#[test]
fn test_toggle_action_moves_current_value() {
    let db_path = setup_test_db("toggle_value");
    init_with_sales(&db_path);

    mh_db(&db_path, &["action", "toggle", "1"])
        .assert()
        .success()
        .stdout(contains("completed"))
        .stdout(contains("R$ 130.000"));

    mh_db(&db_path, &["indicator", "list"])
        .assert()
        .success()
        .stdout(contains("R$ 130.000"))
        .stdout(contains("R$ 20.000"));

    mh_db(&db_path, &["action", "toggle", "1"])
        .assert()
        .success()
        .stdout(contains("reopened"))
        .stdout(contains("R$ 100.000"));
}

#[test]
fn test_under_planned_warning() {
    let db_path = setup_test_db("under_planned");
    init(&db_path);

    mh_db(
        &db_path,
        &[
            "indicator", "add", "--title", "NPS", "--unit", "percent", "--initial", "40",
            "--target", "70",
        ],
    )
    .assert()
    .success();

    mh_db(&db_path, &["show", "1"])
        .assert()
        .success()
        .stdout(contains("Still 30% to plan"))
        .stdout(contains("No pending actions"));
}

#[test]
fn test_free_plan_blocks_third_indicator() {
    let db_path = setup_test_db("gate_third");
    init(&db_path);

    for title in ["One", "Two"] {
        mh_db(
            &db_path,
            &["indicator", "add", "--title", title, "--initial", "0", "--target", "10"],
        )
        .assert()
        .success();
    }

    mh_db(
        &db_path,
        &["indicator", "add", "--title", "Three", "--initial", "0", "--target", "10"],
    )
    .assert()
    .failure()
    .stdout(contains("requires the basic plan"))
    .stderr(contains("Upgrade required"));

    mh_db(&db_path, &["indicator", "list"])
        .assert()
        .success()
        .stdout(contains("One").and(contains("Two")))
        .stdout(contains("Three").not());
}

#[test]
fn test_action_requires_valid_deadline() {
    let db_path = setup_test_db("action_deadline");
    init_with_sales(&db_path);

    mh_db(
        &db_path,
        &[
            "action",
            "add",
            "1",
            "--title",
            "Bad",
            "--responsible",
            "Ana",
            "--contribution",
            "10",
            "--deadline",
            "2030-13-45",
        ],
    )
    .assert()
    .failure()
    .stderr(contains("Invalid date format"));

    mh_db(
        &db_path,
        &[
            "action",
            "add",
            "1",
            "--title",
            "   ",
            "--responsible",
            "Ana",
            "--contribution",
            "10",
            "--deadline",
            "2030-01-01",
        ],
    )
    .assert()
    .failure()
    .stderr(contains("Validation error: title is required"));
}

#[test]
fn test_negative_contribution_is_accepted() {
    let db_path = setup_test_db("negative_contribution");
    init_with_sales(&db_path);

    mh_db(
        &db_path,
        &[
            "action",
            "add",
            "1",
            "--title",
            "Refund",
            "--responsible",
            "Ana",
            "--contribution",
            "-5000",
            "--deadline",
            "2030-02-01",
        ],
    )
    .assert()
    .success();

    mh_db(&db_path, &["action", "toggle", "3"])
        .assert()
        .success()
        .stdout(contains("R$ 95.000"));
}

#[test]
fn test_delete_indicator_asks_confirmation() {
    let db_path = setup_test_db("delete_confirm");
    init_with_sales(&db_path);

    mh_db(&db_path, &["indicator", "del", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Deletion cancelled"));

    mh_db(&db_path, &["indicator", "del", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("Indicator #1 deleted"));

    mh_db(&db_path, &["show"])
        .assert()
        .success()
        .stdout(contains("No indicators yet"));
}

#[test]
fn test_subtasks_lifecycle() {
    let db_path = setup_test_db("subtasks");
    init_with_sales(&db_path);

    mh_db(
        &db_path,
        &[
            "subtask",
            "add",
            "1",
            "--title",
            "Send proposal",
            "--responsible",
            "Bia",
        ],
    )
    .assert()
    .success()
    .stdout(contains("Sub-task #1 created"));

    mh_db(&db_path, &["subtask", "toggle", "1"])
        .assert()
        .success();

    mh_db(&db_path, &["show", "--today", "2030-01-01"])
        .assert()
        .success()
        .stdout(contains("[x] #1 Send proposal (Bia)"));

    mh_db(&db_path, &["subtask", "del", "1"])
        .assert()
        .success()
        .stdout(contains("Sub-task #1 deleted"));
}

#[test]
fn test_notifications_gated_on_free_plan() {
    let db_path = setup_test_db("notifications_gate");
    init(&db_path);

    mh_db(&db_path, &["notifications", "on"])
        .assert()
        .failure()
        .stderr(contains("Upgrade required"));
}

#[test]
fn test_unknown_action_is_not_found() {
    let db_path = setup_test_db("not_found");
    init(&db_path);

    mh_db(&db_path, &["action", "toggle", "99"])
        .assert()
        .failure()
        .stderr(contains("Action #99 not found"));
}

#[test]
fn test_profile_rejects_bad_email() {
    let db_path = setup_test_db("profile_email");
    init(&db_path);

    mh_db(&db_path, &["profile", "--email", "nope"])
        .assert()
        .failure()
        .stderr(contains("email"));

    mh_db(&db_path, &["profile", "--name", "Ana", "--email", "ana@example.com"])
        .assert()
        .success()
        .stdout(contains("ana@example.com"));
}

#[test]
fn test_log_print_lists_operations() {
    let db_path = setup_test_db("log_print");
    init_with_sales(&db_path);

    mh_db(&db_path, &["log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("indicator #1"));
}
