use comfy_table::Table;

use crate::db::get_connection;
use crate::error::Result;
use crate::models::Account;
use crate::settings::{active_company, db_path};

pub fn add(name: &str, account_type: &str, bank: Option<&str>) -> Result<()> {
    let company = active_company()?;
    let conn = get_connection(&db_path())?;
    conn.execute(
        "INSERT INTO accounts (company_code, name, account_type, bank) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![company, name, account_type, bank],
    )?;
    println!("Added account: {name} ({account_type})");
    Ok(())
}

pub fn list() -> Result<()> {
    let company = active_company()?;
    let conn = get_connection(&db_path())?;
    let mut stmt = conn.prepare(
        "SELECT id, company_code, name, account_type, bank, currency FROM accounts \
         WHERE company_code = ?1 AND is_active = 1 ORDER BY name",
    )?;
    let rows: Vec<Account> = stmt
        .query_map([&company], |row| {
            Ok(Account {
                id: row.get(0)?,
                company_code: row.get(1)?,
                name: row.get(2)?,
                account_type: row.get(3)?,
                bank: row.get(4)?,
                currency: row.get(5)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Type", "Bank", "Currency"]);
    for a in rows {
        table.add_row(vec![
            a.id.to_string(),
            a.name,
            a.account_type,
            a.bank.unwrap_or_default(),
            a.currency,
        ]);
    }
    println!("Accounts ({company})\n{table}");
    Ok(())
}
