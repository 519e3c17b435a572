#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use metahub::db::initialize::init_db;
use metahub::db::pool::DbPool;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn mh() -> Command {
    cargo_bin_cmd!("metahub")
}

/// `metahub --db <db> --test <args…>`
pub fn mh_db(db_path: &str, args: &[&str]) -> Command {
    let mut cmd = mh();
    cmd.args(["--db", db_path, "--test"]).args(args);
    cmd.env_remove("METAHUB_WEBHOOK_SECRET");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_metahub.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn init(db_path: &str) {
    mh_db(db_path, &["init"]).assert().success();
}

/// Fresh database with one currency indicator (#1, 100000 → 150000) and two
/// actions: #1 +30000 due 2030-01-10, #2 +20000 due 2030-01-20.
pub fn init_with_sales(db_path: &str) {
    init(db_path);

    mh_db(
        db_path,
        &[
            "indicator", "add", "--title", "Sales", "--unit", "currency", "--initial", "100000",
            "--target", "150000",
        ],
    )
    .assert()
    .success();

    for (title, amount, due) in [
        ("Close deal A", "30000", "2030-01-10"),
        ("Close deal B", "20000", "2030-01-20"),
    ] {
        mh_db(
            db_path,
            &[
                "action",
                "add",
                "1",
                "--title",
                title,
                "--responsible",
                "Ana",
                "--contribution",
                amount,
                "--deadline",
                due,
            ],
        )
        .assert()
        .success();
    }
}

/// In-memory store with schema and default profile, for library tests.
pub fn memory_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}
