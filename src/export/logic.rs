// src/export/logic.rs

use crate::db::IndicatorStore;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{ActionExport, flatten};
use crate::ui::messages::warning;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export every indicator of `user_id` with its actions.
    ///
    /// `file` must be an absolute path; an existing file is only replaced
    /// with `force` or after confirmation.
    pub fn export(
        pool: &DbPool,
        user_id: i64,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        let rows = Self::rows(pool, user_id)?;
        if rows.is_empty() {
            warning("No indicators to export.");
            return Ok(0);
        }

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        crate::db::log::ttlog_quiet(
            &pool.conn,
            "export",
            file,
            &format!("{} rows as {}", rows.len(), format.as_str()),
        );

        Ok(rows.len())
    }

    pub fn rows(pool: &DbPool, user_id: i64) -> AppResult<Vec<ActionExport>> {
        let indicators = pool.list_indicators(user_id)?;
        Ok(flatten(&indicators))
    }
}
