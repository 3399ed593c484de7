use comfy_table::Table;

use crate::db::{company_exists, get_connection, seed_default_categories};
use crate::error::{CaixaError, Result};
use crate::models::Company;
use crate::settings::{db_path, load_settings, save_settings};

pub fn add(code: &str, legal_name: Option<&str>, name: Option<&str>) -> Result<()> {
    let conn = get_connection(&db_path())?;
    conn.execute(
        "INSERT INTO companies (code, legal_name, display_name) VALUES (?1, ?2, ?3)",
        rusqlite::params![code, legal_name, name],
    )?;
    seed_default_categories(&conn, code)?;

    let mut settings = load_settings();
    settings.company_code = code.to_string();
    save_settings(&settings)?;

    println!("Added company {code} and made it active");
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = get_connection(&db_path())?;
    let active = load_settings().company_code;
    let mut stmt = conn.prepare(
        "SELECT code, legal_name, display_name, is_active FROM companies ORDER BY code",
    )?;
    let rows: Vec<Company> = stmt
        .query_map([], |row| {
            Ok(Company {
                code: row.get(0)?,
                legal_name: row.get(1)?,
                display_name: row.get(2)?,
                is_active: row.get::<_, i64>(3)? != 0,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut table = Table::new();
    table.set_header(vec!["Code", "Name", "Legal name", "Active"]);
    for c in rows {
        let marker = if c.code == active { format!("{} *", c.code) } else { c.code.clone() };
        table.add_row(vec![
            marker,
            c.display_name.unwrap_or_default(),
            c.legal_name.unwrap_or_default(),
            if c.is_active { "yes".into() } else { "no".into() },
        ]);
    }
    println!("Companies\n{table}");
    Ok(())
}

pub fn use_company(code: &str) -> Result<()> {
    let conn = get_connection(&db_path())?;
    if !company_exists(&conn, code)? {
        return Err(CaixaError::UnknownCompany(code.to_string()));
    }
    let mut settings = load_settings();
    settings.company_code = code.to_string();
    save_settings(&settings)?;
    println!("Active company is now {code}");
    Ok(())
}
