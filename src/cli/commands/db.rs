use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::{pending_migrations, run_pending_migrations};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{error, header, info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if *migrate {
            info("Running migrations…");
            run_pending_migrations(&pool.conn)?;
            success("Migration completed.");
        }

        if *show_info {
            print_db_info(&pool, &cfg.database)?;
        }

        if *check {
            info("Running integrity check…");
            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                success("Integrity check passed.");
            } else {
                error(format!("Integrity check failed: {}", integrity));
            }
        }

        if *vacuum {
            info("Running VACUUM…");
            pool.conn.execute_batch("VACUUM;")?;
            success("Vacuum completed.");
        }
    }

    Ok(())
}

fn count(pool: &DbPool, table: &str) -> AppResult<i64> {
    let n = pool
        .conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?;
    Ok(n)
}

fn print_db_info(pool: &DbPool, path: &str) -> AppResult<()> {
    header("Database");
    println!("📁 Path        : {}", path);
    if let Ok(meta) = std::fs::metadata(path) {
        println!("💾 Size        : {:.1} KB", meta.len() as f64 / 1024.0);
    }

    for table in ["profiles", "indicators", "actions", "sub_tasks", "log"] {
        println!("📊 {:<11} : {}", table, count(pool, table)?);
    }

    let pending = pending_migrations(&pool.conn)?;
    if pending.is_empty() {
        println!("🧩 Migrations  : up to date");
    } else {
        println!("🧩 Migrations  : {} pending ({})", pending.len(), pending.join(", "));
    }
    Ok(())
}
