use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, params};

/// Name given to the profile created on first initialization.
pub const DEFAULT_PROFILE_NAME: &str = "MetaHub User";

/// Initialize the database.
/// Schema comes exclusively from the migration engine.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;
    ensure_default_profile(conn)?;
    Ok(())
}

/// Seed profile #1 on an empty database so every command has an owner.
fn ensure_default_profile(conn: &Connection) -> AppResult<()> {
    let inserted = conn.execute(
        "INSERT INTO profiles (id, name, email, plan, whatsapp_notifications, created_at)
         SELECT 1, ?1, '', 'free', 0, ?2
         WHERE NOT EXISTS (SELECT 1 FROM profiles)",
        params![DEFAULT_PROFILE_NAME, Local::now().to_rfc3339()],
    )?;

    if inserted > 0 {
        log::info!("created default profile");
    }
    Ok(())
}
