use colored::Colorize;
use comfy_table::Table;

use crate::classifier::{run_classifier_pass, HeuristicClassifier};
use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::money;
use crate::settings::{active_company, db_path};
use crate::staging::{commit_import, list_staging};

pub fn list(batch: i64) -> Result<()> {
    let company = active_company()?;
    let conn = get_connection(&db_path())?;
    let rows = list_staging(&conn, &company, batch)?;

    let mut table = Table::new();
    table.set_header(vec![
        "ID", "Date", "Description", "Counterparty", "Amount", "Payment", "Category", "Origin", "Status",
    ]);
    for r in &rows {
        table.add_row(vec![
            r.id.to_string(),
            r.entry_date.clone().unwrap_or_default(),
            r.description.clone(),
            r.counterparty_text.clone(),
            money(r.amount),
            r.payment_method.clone().unwrap_or_default(),
            r.category_name.clone().unwrap_or_else(|| "unknown".to_string()),
            r.suggestion_origin.clone(),
            r.classification_status.clone(),
        ]);
    }
    println!("Staging batch {batch} ({company}): {} lines\n{table}", rows.len());
    Ok(())
}

pub fn classify(batch: i64) -> Result<()> {
    let company = active_company()?;
    let conn = get_connection(&db_path())?;
    let result = run_classifier_pass(&conn, &company, batch, &HeuristicClassifier)?;
    if result.sent == 0 {
        println!("No unclassified lines in batch {batch}.");
    } else {
        println!(
            "{} lines sent to the classifier, {} got suggestions",
            result.sent, result.classified
        );
    }
    Ok(())
}

pub fn commit(batch: i64) -> Result<()> {
    let company = active_company()?;
    let conn = get_connection(&db_path())?;
    let committed = commit_import(&conn, &company, batch)?;
    println!("{}", format!("Committed {committed} transactions from batch {batch}.").green());
    Ok(())
}
