use rusqlite::Connection;

use crate::audit::log_activity;
use crate::error::Result;
use crate::util::now_iso;

/// A staging row as shown for review: raw fields plus the resolved
/// suggested category name, when any.
pub struct StagingView {
    pub id: i64,
    pub entry_date: Option<String>,
    pub description: String,
    pub counterparty_text: String,
    pub amount: f64,
    pub payment_method: Option<String>,
    pub category_name: Option<String>,
    pub suggestion_origin: String,
    pub classification_status: String,
}

pub fn list_staging(conn: &Connection, company_code: &str, batch_id: i64) -> Result<Vec<StagingView>> {
    let mut stmt = conn.prepare(
        "SELECT s.id, s.entry_date, s.description, s.counterparty_text, s.amount, \
                s.payment_method, c.name, s.suggestion_origin, s.classification_status \
         FROM staging_lines s \
         LEFT JOIN categories c ON c.id = s.suggested_category_id \
         WHERE s.company_code = ?1 AND s.batch_id = ?2 \
         ORDER BY s.id",
    )?;
    let rows = stmt
        .query_map(rusqlite::params![company_code, batch_id], |row| {
            Ok(StagingView {
                id: row.get(0)?,
                entry_date: row.get(1)?,
                description: row.get(2)?,
                counterparty_text: row.get(3)?,
                amount: row.get(4)?,
                payment_method: row.get(5)?,
                category_name: row.get(6)?,
                suggestion_origin: row.get(7)?,
                classification_status: row.get(8)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Move a reviewed batch into the ledger. One transaction: every staging
/// row of the batch becomes one ledger row, with whatever category,
/// cost center and description the row holds at call time (human edits
/// included), then the batch's imported counter is set. Staging rows are
/// left in place and dedup is not re-run; callers must not commit a batch
/// twice.
pub fn commit_import(conn: &Connection, company_code: &str, batch_id: i64) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let committed = {
        let mut stmt = tx.prepare(
            "SELECT account_id, entry_date, description, counterparty_text, amount, \
                    payment_method, suggested_category_id, suggested_cost_center_id, \
                    suggested_description, line_hash \
             FROM staging_lines WHERE company_code = ?1 AND batch_id = ?2 ORDER BY id",
        )?;
        type Row = (
            i64,
            Option<String>,
            String,
            String,
            f64,
            Option<String>,
            Option<i64>,
            Option<i64>,
            Option<String>,
            Option<String>,
        );
        let rows: Vec<Row> = stmt
            .query_map(rusqlite::params![company_code, batch_id], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                    row.get(7)?,
                    row.get(8)?,
                    row.get(9)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let now = now_iso();
        let mut committed = 0usize;
        for (
            account_id,
            entry_date,
            description,
            _counterparty,
            amount,
            payment_method,
            category_id,
            cost_center_id,
            suggested_description,
            hash,
        ) in rows
        {
            // Sign decides the movement kind; zero counts as a debit.
            let movement_kind = if amount > 0.0 { "credit" } else { "debit" };
            let treated = suggested_description.unwrap_or_else(|| description.clone());
            tx.execute(
                "INSERT INTO transactions \
                    (company_code, account_id, entry_date, competence_date, \
                     statement_description, treated_description, movement_kind, amount, \
                     category_id, cost_center_id, payment_method, batch_id, unique_hash, \
                     created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)",
                rusqlite::params![
                    company_code,
                    account_id,
                    entry_date,
                    description,
                    treated,
                    movement_kind,
                    amount,
                    category_id,
                    cost_center_id,
                    payment_method,
                    batch_id,
                    hash,
                    now,
                ],
            )?;
            committed += 1;
        }

        tx.execute(
            "UPDATE import_batches SET total_imported = ?1 WHERE id = ?2",
            rusqlite::params![committed as i64, batch_id],
        )?;
        log_activity(
            &tx,
            company_code,
            "commit_import",
            &format!("batch {batch_id}: {committed} committed"),
            "staging",
        )?;
        committed
    };
    tx.commit()?;
    Ok(committed)
}
