use comfy_table::Table;

use crate::db::get_connection;
use crate::error::Result;
use crate::models::CostCenter;
use crate::settings::{active_company, db_path};

pub fn add(name: &str) -> Result<()> {
    let company = active_company()?;
    let conn = get_connection(&db_path())?;
    conn.execute(
        "INSERT INTO cost_centers (company_code, name) VALUES (?1, ?2)",
        rusqlite::params![company, name],
    )?;
    println!("Added cost center: {name}");
    Ok(())
}

pub fn list() -> Result<()> {
    let company = active_company()?;
    let conn = get_connection(&db_path())?;
    let mut stmt = conn.prepare(
        "SELECT id, company_code, name, is_active FROM cost_centers \
         WHERE company_code = ?1 AND is_active = 1 ORDER BY name",
    )?;
    let rows: Vec<CostCenter> = stmt
        .query_map([&company], |row| {
            Ok(CostCenter {
                id: row.get(0)?,
                company_code: row.get(1)?,
                name: row.get(2)?,
                is_active: row.get::<_, i64>(3)? != 0,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name"]);
    for cc in rows {
        table.add_row(vec![cc.id.to_string(), cc.name]);
    }
    println!("Cost centers ({company})\n{table}");
    Ok(())
}
