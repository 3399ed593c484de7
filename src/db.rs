use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS companies (
    id INTEGER PRIMARY KEY,
    code TEXT NOT NULL UNIQUE,
    legal_name TEXT,
    display_name TEXT,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS accounts (
    id INTEGER PRIMARY KEY,
    company_code TEXT NOT NULL,
    name TEXT NOT NULL,
    account_type TEXT NOT NULL,
    bank TEXT,
    currency TEXT NOT NULL DEFAULT 'BRL',
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY,
    company_code TEXT NOT NULL,
    name TEXT NOT NULL,
    category_type TEXT NOT NULL,
    grp TEXT,
    sort_order INTEGER DEFAULT 0
);

CREATE TABLE IF NOT EXISTS cost_centers (
    id INTEGER PRIMARY KEY,
    company_code TEXT NOT NULL,
    name TEXT NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS import_batches (
    id INTEGER PRIMARY KEY,
    company_code TEXT NOT NULL,
    account_id INTEGER NOT NULL,
    file_kind TEXT NOT NULL,
    filename TEXT NOT NULL,
    imported_at TEXT NOT NULL,
    imported_by TEXT,
    period_start TEXT,
    period_end TEXT,
    total_in_file INTEGER NOT NULL DEFAULT 0,
    total_deduplicated INTEGER NOT NULL DEFAULT 0,
    total_imported INTEGER NOT NULL DEFAULT 0,
    total_unknown_after_import INTEGER NOT NULL DEFAULT 0,
    FOREIGN KEY (account_id) REFERENCES accounts(id)
);

CREATE TABLE IF NOT EXISTS staging_lines (
    id INTEGER PRIMARY KEY,
    company_code TEXT NOT NULL,
    batch_id INTEGER NOT NULL,
    account_id INTEGER NOT NULL,
    entry_date TEXT,
    description TEXT NOT NULL DEFAULT '',
    counterparty_text TEXT NOT NULL DEFAULT '',
    amount REAL NOT NULL,
    payment_method TEXT,
    suggested_category_id INTEGER,
    suggested_cost_center_id INTEGER,
    suggested_description TEXT,
    suggestion_origin TEXT NOT NULL DEFAULT 'unknown',
    classification_status TEXT NOT NULL DEFAULT 'unknown',
    line_hash TEXT,
    notes TEXT,
    FOREIGN KEY (batch_id) REFERENCES import_batches(id) ON DELETE CASCADE,
    FOREIGN KEY (account_id) REFERENCES accounts(id),
    FOREIGN KEY (suggested_category_id) REFERENCES categories(id),
    FOREIGN KEY (suggested_cost_center_id) REFERENCES cost_centers(id)
);

CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY,
    company_code TEXT NOT NULL,
    account_id INTEGER NOT NULL,
    entry_date TEXT NOT NULL,
    competence_date TEXT,
    statement_description TEXT,
    treated_description TEXT,
    movement_kind TEXT NOT NULL,
    amount REAL NOT NULL,
    category_id INTEGER,
    cost_center_id INTEGER,
    payment_method TEXT,
    batch_id INTEGER,
    unique_hash TEXT,
    is_reconciled INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (account_id) REFERENCES accounts(id),
    FOREIGN KEY (category_id) REFERENCES categories(id),
    FOREIGN KEY (cost_center_id) REFERENCES cost_centers(id),
    FOREIGN KEY (batch_id) REFERENCES import_batches(id)
);

CREATE TABLE IF NOT EXISTS rules (
    id INTEGER PRIMARY KEY,
    company_code TEXT NOT NULL,
    target_field TEXT NOT NULL,
    match_kind TEXT NOT NULL DEFAULT 'contains',
    pattern TEXT NOT NULL,
    category_id INTEGER,
    cost_center_id INTEGER,
    suggested_description TEXT,
    fixed_payment_method TEXT,
    priority INTEGER NOT NULL DEFAULT 0,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY (category_id) REFERENCES categories(id),
    FOREIGN KEY (cost_center_id) REFERENCES cost_centers(id)
);

CREATE TABLE IF NOT EXISTS activity_log (
    id INTEGER PRIMARY KEY,
    company_code TEXT NOT NULL,
    logged_at TEXT NOT NULL,
    action TEXT NOT NULL,
    details TEXT,
    module TEXT
);
";

// (name, category_type, grp) seeded per company so the heuristic
// classifier's fallback names always resolve.
pub const DEFAULT_CATEGORIES: &[(&str, &str, Option<&str>)] = &[
    ("Unclassified revenue", "income", None),
    ("Unclassified expense", "expense", None),
];

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Seed the fallback categories for a company if it has none yet.
pub fn seed_default_categories(conn: &Connection, company_code: &str) -> Result<()> {
    let count: i64 = conn.query_row(
        "SELECT count(*) FROM categories WHERE company_code = ?1",
        [company_code],
        |row| row.get(0),
    )?;
    if count == 0 {
        for (name, category_type, grp) in DEFAULT_CATEGORIES {
            conn.execute(
                "INSERT INTO categories (company_code, name, category_type, grp) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![company_code, name, category_type, grp],
            )?;
        }
    }
    Ok(())
}

pub fn company_exists(conn: &Connection, code: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT 1 FROM companies WHERE code = ?1 AND is_active = 1")?;
    Ok(stmt.exists([code])?)
}
