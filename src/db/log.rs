use crate::db::pool::DbPool;
use crate::db::store::AuditLog;
use crate::errors::AppResult;
use chrono::Local;
use rusqlite::Connection;
use rusqlite::params;

/// Write an audit line into the `log` table.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let now = Local::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![now, operation, target, message])?;
    log::debug!("audit: {operation} ({target}) {message}");

    Ok(())
}

/// Audit a mutation without failing the command that performed it.
pub fn ttlog_quiet(conn: &Connection, operation: &str, target: &str, message: &str) {
    if let Err(e) = ttlog(conn, operation, target, message) {
        log::warn!("failed to write audit log: {e}");
    }
}

impl AuditLog for DbPool {
    fn record(&self, operation: &str, target: &str, message: &str) {
        ttlog_quiet(&self.conn, operation, target, message);
    }
}
