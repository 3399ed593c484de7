use std::str::FromStr;

use comfy_table::Table;
use rusqlite::Connection;

use crate::db::get_connection;
use crate::error::{CaixaError, Result};
use crate::rules::{MatchKind, TargetField};
use crate::settings::{active_company, db_path};

fn category_id_by_name(conn: &Connection, company: &str, name: &str) -> Result<i64> {
    conn.query_row(
        "SELECT id FROM categories WHERE company_code = ?1 AND name = ?2",
        rusqlite::params![company, name],
        |row| row.get(0),
    )
    .map_err(|_| CaixaError::UnknownCategory(name.to_string()))
}

fn cost_center_id_by_name(conn: &Connection, company: &str, name: &str) -> Result<i64> {
    conn.query_row(
        "SELECT id FROM cost_centers WHERE company_code = ?1 AND name = ?2",
        rusqlite::params![company, name],
        |row| row.get(0),
    )
    .map_err(|_| CaixaError::Other(format!("Unknown cost center: {name}")))
}

#[allow(clippy::too_many_arguments)]
pub fn add(
    pattern: &str,
    target: &str,
    match_kind: &str,
    category: Option<&str>,
    cost_center: Option<&str>,
    description: Option<&str>,
    payment_method: Option<&str>,
    priority: i64,
) -> Result<()> {
    // Validate before touching the DB so typos fail with a clear message.
    let target = TargetField::from_str(target).map_err(CaixaError::Other)?;
    let match_kind = MatchKind::from_str(match_kind).map_err(CaixaError::Other)?;

    let company = active_company()?;
    let conn = get_connection(&db_path())?;

    let category_id = category
        .map(|name| category_id_by_name(&conn, &company, name))
        .transpose()?;
    let cost_center_id = cost_center
        .map(|name| cost_center_id_by_name(&conn, &company, name))
        .transpose()?;

    conn.execute(
        "INSERT INTO rules \
            (company_code, target_field, match_kind, pattern, category_id, cost_center_id, \
             suggested_description, fixed_payment_method, priority) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        rusqlite::params![
            company,
            target.key(),
            match_kind.key(),
            pattern,
            category_id,
            cost_center_id,
            description,
            payment_method,
            priority
        ],
    )?;
    println!("Added rule: {} {} '{pattern}'", target.key(), match_kind.key());
    Ok(())
}

pub fn list() -> Result<()> {
    let company = active_company()?;
    let conn = get_connection(&db_path())?;
    let mut stmt = conn.prepare(
        "SELECT r.id, r.target_field, r.match_kind, r.pattern, c.name, cc.name, r.priority \
         FROM rules r \
         LEFT JOIN categories c ON c.id = r.category_id \
         LEFT JOIN cost_centers cc ON cc.id = r.cost_center_id \
         WHERE r.company_code = ?1 AND r.is_active = 1 \
         ORDER BY r.priority DESC, r.id",
    )?;
    let rows: Vec<(i64, String, String, String, Option<String>, Option<String>, i64)> = stmt
        .query_map([&company], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
            ))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Field", "Match", "Pattern", "Category", "Cost center", "Priority"]);
    for (id, field, kind, pattern, cat, cc, priority) in rows {
        table.add_row(vec![
            id.to_string(),
            field,
            kind,
            pattern,
            cat.unwrap_or_default(),
            cc.unwrap_or_default(),
            priority.to_string(),
        ]);
    }
    println!("Rules ({company})\n{table}");
    Ok(())
}

pub fn delete(id: i64) -> Result<()> {
    let company = active_company()?;
    let conn = get_connection(&db_path())?;

    let row: std::result::Result<(String, i64), _> = conn.query_row(
        "SELECT pattern, is_active FROM rules WHERE id = ?1 AND company_code = ?2",
        rusqlite::params![id, company],
        |row| Ok((row.get(0)?, row.get(1)?)),
    );

    match row {
        Err(_) => Err(CaixaError::Other(format!("No rule with ID {id}"))),
        Ok((_, 0)) => Err(CaixaError::Other(format!("Rule {id} is already inactive"))),
        Ok((pattern, _)) => {
            conn.execute("UPDATE rules SET is_active = 0 WHERE id = ?1", [id])?;
            println!("Deactivated rule {id}: '{pattern}'");
            Ok(())
        }
    }
}
