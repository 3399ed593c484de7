use comfy_table::Table;

use crate::db::get_connection;
use crate::error::Result;
use crate::models::Category;
use crate::settings::{active_company, db_path};

pub fn add(name: &str, category_type: &str, group: Option<&str>) -> Result<()> {
    let company = active_company()?;
    let conn = get_connection(&db_path())?;
    conn.execute(
        "INSERT INTO categories (company_code, name, category_type, grp) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![company, name, category_type, group],
    )?;
    println!("Added category: {name} ({category_type})");
    Ok(())
}

pub fn list() -> Result<()> {
    let company = active_company()?;
    let conn = get_connection(&db_path())?;
    let mut stmt = conn.prepare(
        "SELECT id, company_code, name, category_type, grp FROM categories \
         WHERE company_code = ?1 ORDER BY category_type, grp, name",
    )?;
    let rows: Vec<Category> = stmt
        .query_map([&company], |row| {
            Ok(Category {
                id: row.get(0)?,
                company_code: row.get(1)?,
                name: row.get(2)?,
                category_type: row.get(3)?,
                grp: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Type", "Group"]);
    for c in rows {
        table.add_row(vec![c.id.to_string(), c.name, c.category_type, c.grp.unwrap_or_default()]);
    }
    println!("Categories ({company})\n{table}");
    Ok(())
}
