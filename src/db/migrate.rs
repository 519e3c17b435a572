use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// A schema step, applied once and recorded in the `log` table.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250110_0001_create_profiles",
        description: "Created profiles table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id                      INTEGER PRIMARY KEY AUTOINCREMENT,
            name                    TEXT NOT NULL,
            email                   TEXT NOT NULL DEFAULT '',
            phone                   TEXT,
            plan                    TEXT NOT NULL DEFAULT 'free' CHECK(plan IN ('free','basic')),
            whatsapp_notifications  INTEGER NOT NULL DEFAULT 0,
            created_at              TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_profiles_email ON profiles(email);
        "#,
    },
    Migration {
        version: "20250110_0002_create_indicators",
        description: "Created indicators, actions and sub_tasks tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS indicators (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id        INTEGER NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
            title          TEXT NOT NULL,
            description    TEXT,
            unit           TEXT NOT NULL DEFAULT 'number' CHECK(unit IN ('number','percent','currency')),
            initial_value  REAL NOT NULL DEFAULT 0,
            target_value   REAL NOT NULL,
            created_at     TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS actions (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            indicator_id  INTEGER NOT NULL REFERENCES indicators(id) ON DELETE CASCADE,
            title         TEXT NOT NULL,
            description   TEXT,
            responsible   TEXT NOT NULL,
            deadline      TEXT,
            completed     INTEGER NOT NULL DEFAULT 0,
            completed_at  TEXT,
            contribution  REAL NOT NULL DEFAULT 0,
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sub_tasks (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            action_id    INTEGER NOT NULL REFERENCES actions(id) ON DELETE CASCADE,
            title        TEXT NOT NULL,
            responsible  TEXT NOT NULL,
            deadline     TEXT,
            completed    INTEGER NOT NULL DEFAULT 0,
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_indicators_user ON indicators(user_id);
        CREATE INDEX IF NOT EXISTS idx_actions_indicator ON actions(indicator_id);
        CREATE INDEX IF NOT EXISTS idx_sub_tasks_action ON sub_tasks(action_id);
        "#,
    },
    Migration {
        version: "20250302_0003_add_subscription_columns",
        description: "Added payment-provider subscription columns to profiles",
        sql: r#"
        ALTER TABLE profiles ADD COLUMN stripe_customer_id TEXT;
        ALTER TABLE profiles ADD COLUMN stripe_subscription_id TEXT;
        ALTER TABLE profiles ADD COLUMN subscription_status TEXT;
        CREATE INDEX IF NOT EXISTS idx_profiles_customer ON profiles(stripe_customer_id);
        "#,
    },
];

/// Ensure that the `log` table exists; it also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;
    tx.commit()?;

    log::info!("migration {} applied", m.version);
    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Names of the migrations not yet recorded in the `log` table.
pub fn pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_log_table(conn)?;
    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations, in order.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            apply(conn, m)?;
        }
    }

    Ok(())
}
