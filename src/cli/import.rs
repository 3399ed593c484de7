use std::path::PathBuf;

use colored::Colorize;
use rusqlite::Connection;

use crate::audit::log_activity;
use crate::db::get_connection;
use crate::error::{CaixaError, Result};
use crate::importer::import_file;
use crate::models::ImportBatch;
use crate::settings::{active_company, db_path, load_settings};

fn account_id_by_name(conn: &Connection, company: &str, name: &str) -> Result<i64> {
    conn.query_row(
        "SELECT id FROM accounts WHERE company_code = ?1 AND name = ?2 AND is_active = 1",
        rusqlite::params![company, name],
        |row| row.get(0),
    )
    .map_err(|_| CaixaError::UnknownAccount(name.to_string()))
}

fn get_batch(conn: &Connection, company: &str, batch_id: i64) -> Result<ImportBatch> {
    Ok(conn.query_row(
        "SELECT id, company_code, account_id, file_kind, filename, imported_at, \
                period_start, period_end, total_in_file, total_deduplicated, \
                total_imported, total_unknown_after_import \
         FROM import_batches WHERE company_code = ?1 AND id = ?2",
        rusqlite::params![company, batch_id],
        |row| {
            Ok(ImportBatch {
                id: row.get(0)?,
                company_code: row.get(1)?,
                account_id: row.get(2)?,
                file_kind: row.get(3)?,
                filename: row.get(4)?,
                imported_at: row.get(5)?,
                period_start: row.get(6)?,
                period_end: row.get(7)?,
                total_in_file: row.get(8)?,
                total_deduplicated: row.get(9)?,
                total_imported: row.get(10)?,
                total_unknown_after_import: row.get(11)?,
            })
        },
    )?)
}

pub fn run(file: &str, account: &str) -> Result<()> {
    let file_path = PathBuf::from(file);
    let settings = load_settings();
    let company = active_company()?;
    let conn = get_connection(&db_path())?;

    let account_id = account_id_by_name(&conn, &company, account)?;
    let user = if settings.user_name.is_empty() { None } else { Some(settings.user_name.as_str()) };
    let batch_id = import_file(&conn, &company, account_id, user, &file_path)?;
    let batch = get_batch(&conn, &company, batch_id)?;

    log_activity(
        &conn,
        &company,
        "import_file",
        &format!(
            "batch {batch_id} ({}): {} in file, {} duplicates, {} unknown",
            batch.filename, batch.total_in_file, batch.total_deduplicated,
            batch.total_unknown_after_import
        ),
        "importer",
    )?;

    let staged = batch.total_in_file - batch.total_deduplicated;
    println!(
        "Batch {batch_id} ({}): {} lines in file, {} staged, {} duplicates, {} unclassified",
        batch.file_kind, batch.total_in_file, staged, batch.total_deduplicated,
        batch.total_unknown_after_import
    );
    if batch.file_kind == "PDF" {
        println!("{}", "PDF statements are recognized but not parsed yet; batch is empty.".yellow());
    }
    println!("Review with 'caixa staging list --batch {batch_id}', then 'caixa staging commit --batch {batch_id}'.");
    Ok(())
}
