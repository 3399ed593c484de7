use comfy_table::Table;

use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::money;
use crate::models::LedgerTransaction;
use crate::settings::{active_company, db_path};

pub fn list(search: Option<&str>, from: Option<&str>, to: Option<&str>, limit: i64) -> Result<()> {
    let company = active_company()?;
    let conn = get_connection(&db_path())?;

    let mut sql = String::from(
        "SELECT t.id, t.company_code, t.account_id, t.entry_date, t.competence_date, \
                t.statement_description, t.treated_description, t.movement_kind, t.amount, \
                t.category_id, t.cost_center_id, t.payment_method, t.batch_id, t.unique_hash, \
                t.is_reconciled, c.name \
         FROM transactions t \
         LEFT JOIN categories c ON c.id = t.category_id \
         WHERE t.company_code = ?1",
    );
    let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = vec![Box::new(company.clone())];
    if let Some(s) = search {
        sql.push_str(" AND (t.statement_description LIKE ?2 OR t.treated_description LIKE ?2)");
        params.push(Box::new(format!("%{s}%")));
    }
    if let Some(d) = from {
        sql.push_str(&format!(" AND DATE(t.entry_date) >= DATE(?{})", params.len() + 1));
        params.push(Box::new(d.to_string()));
    }
    if let Some(d) = to {
        sql.push_str(&format!(" AND DATE(t.entry_date) <= DATE(?{})", params.len() + 1));
        params.push(Box::new(d.to_string()));
    }
    sql.push_str(&format!(
        " ORDER BY t.entry_date DESC, t.id DESC LIMIT ?{}",
        params.len() + 1
    ));
    params.push(Box::new(limit));

    let mut stmt = conn.prepare(&sql)?;
    let rows: Vec<(LedgerTransaction, Option<String>)> = stmt
        .query_map(rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())), |row| {
            Ok((
                LedgerTransaction {
                    id: row.get(0)?,
                    company_code: row.get(1)?,
                    account_id: row.get(2)?,
                    entry_date: row.get(3)?,
                    competence_date: row.get(4)?,
                    statement_description: row.get(5)?,
                    treated_description: row.get(6)?,
                    movement_kind: row.get(7)?,
                    amount: row.get(8)?,
                    category_id: row.get(9)?,
                    cost_center_id: row.get(10)?,
                    payment_method: row.get(11)?,
                    batch_id: row.get(12)?,
                    unique_hash: row.get(13)?,
                    is_reconciled: row.get::<_, i64>(14)? != 0,
                },
                row.get(15)?,
            ))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Description", "Kind", "Amount", "Category", "Batch"]);
    for (t, category_name) in &rows {
        table.add_row(vec![
            t.id.to_string(),
            t.entry_date.clone(),
            t.treated_description
                .clone()
                .or_else(|| t.statement_description.clone())
                .unwrap_or_default(),
            t.movement_kind.clone(),
            money(t.amount),
            category_name.clone().unwrap_or_default(),
            t.batch_id.map(|b| b.to_string()).unwrap_or_default(),
        ]);
    }
    println!("Transactions ({company}): {} shown\n{table}", rows.len());
    Ok(())
}
