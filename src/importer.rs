use std::path::Path;

use rusqlite::Connection;

use crate::error::{CaixaError, Result};
use crate::models::RawLine;
use crate::rules::RuleSet;
use crate::util::{line_hash, now_iso, parse_date};

// ---------------------------------------------------------------------------
// Format detection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Ofx,
    Csv,
    /// Recognized at the boundary but not parsed; imports an empty batch.
    Pdf,
}

impl FileKind {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Ofx => "OFX",
            Self::Csv => "CSV",
            Self::Pdf => "PDF",
        }
    }
}

pub fn detect_format(path: &Path) -> Result<FileKind> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "ofx" => Ok(FileKind::Ofx),
        "csv" => Ok(FileKind::Csv),
        "pdf" => Ok(FileKind::Pdf),
        _ => Err(CaixaError::UnsupportedFormat(format!(".{ext}"))),
    }
}

// ---------------------------------------------------------------------------
// OFX parser
// ---------------------------------------------------------------------------

#[derive(Default)]
struct PendingEntry {
    date: Option<String>,
    amount: Option<f64>,
    memo: Option<String>,
}

/// Parse the SGML-ish OFX transaction list. Decoding is lossy on purpose:
/// bank statements arrive in whatever single-byte encoding the bank felt
/// like, and a bad byte must not kill the import. Records missing a date
/// or amount are dropped silently.
pub fn parse_ofx(path: &Path) -> Result<Vec<RawLine>> {
    let bytes = std::fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);

    let mut lines = Vec::new();
    let mut current = PendingEntry::default();

    for raw_line in content.lines() {
        let line = raw_line.trim();
        if let Some(rest) = line.strip_prefix("<DTPOSTED>") {
            // Only the leading YYYYMMDD matters; banks append time zones.
            let compact: String = rest.trim().chars().take(8).collect();
            current.date = parse_date(&compact);
        } else if let Some(rest) = line.strip_prefix("<TRNAMT>") {
            let raw_amount = rest.trim().replace(',', ".");
            current.amount = Some(raw_amount.parse().unwrap_or(0.0));
        } else if let Some(rest) = line.strip_prefix("<MEMO>") {
            current.memo = Some(rest.trim().to_string());
        } else if line.starts_with("</STMTTRN>") {
            if let (Some(date), Some(amount)) = (current.date.take(), current.amount) {
                let memo = current.memo.take().unwrap_or_default();
                lines.push(RawLine {
                    entry_date: Some(date),
                    description: memo.clone(),
                    counterparty_text: memo,
                    amount,
                });
            }
            current = PendingEntry::default();
        } else if line.starts_with("<STMTTRN>") {
            current = PendingEntry::default();
        }
    }
    Ok(lines)
}

// ---------------------------------------------------------------------------
// CSV parser
// ---------------------------------------------------------------------------

const DATE_HEADERS: &[&str] = &["data", "dt", "date"];
const DESCRIPTION_HEADERS: &[&str] = &[
    "descricao",
    "descrição",
    "historico",
    "histórico",
    "memo",
    "description",
];
const AMOUNT_HEADERS: &[&str] = &["valor", "amount", "vl", "debito", "crédito", "credito"];

fn find_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|c| headers.iter().position(|h| h == c))
}

/// Parse a semicolon-delimited statement with a header row. Column roles
/// are resolved by case-insensitive synonym lists; a role whose column is
/// missing is treated as absent for every row (date None, description
/// empty, amount 0). Fully blank rows are skipped.
pub fn parse_csv(path: &Path) -> Result<Vec<RawLine>> {
    let bytes = std::fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes).into_owned();

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b';')
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = rdr.records();
    let Some(header) = records.next().transpose()? else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let idx_date = find_column(&headers, DATE_HEADERS);
    let idx_desc = find_column(&headers, DESCRIPTION_HEADERS);
    let idx_amount = find_column(&headers, AMOUNT_HEADERS);

    let mut lines = Vec::new();
    for result in records {
        let record = result?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let entry_date = idx_date
            .and_then(|i| record.get(i))
            .and_then(parse_date);
        let description = idx_desc
            .and_then(|i| record.get(i))
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        let raw_amount = idx_amount.and_then(|i| record.get(i)).unwrap_or("0");
        let amount = crate::util::br_amount(raw_amount);
        lines.push(RawLine {
            entry_date,
            counterparty_text: description.clone(),
            description,
            amount,
        });
    }
    Ok(lines)
}

// ---------------------------------------------------------------------------
// Dedup
// ---------------------------------------------------------------------------

/// Coarse fingerprint against the permanent ledger: same company and
/// account, identical entry date, amount and raw description. Lines are
/// never compared against each other within one file, so intra-file
/// duplicates stage as separate rows.
fn is_duplicate_line(
    conn: &Connection,
    company_code: &str,
    account_id: i64,
    line: &RawLine,
) -> Result<bool> {
    let mut stmt = conn.prepare_cached(
        "SELECT 1 FROM transactions \
         WHERE company_code = ?1 AND account_id = ?2 \
           AND entry_date = ?3 AND amount = ?4 AND statement_description = ?5",
    )?;
    Ok(stmt.exists(rusqlite::params![
        company_code,
        account_id,
        line.entry_date,
        line.amount,
        line.description,
    ])?)
}

// ---------------------------------------------------------------------------
// Import pipeline: file -> parse -> dedup -> rules -> staging
// ---------------------------------------------------------------------------

pub fn import_file(
    conn: &Connection,
    company_code: &str,
    account_id: i64,
    imported_by: Option<&str>,
    file_path: &Path,
) -> Result<i64> {
    // Unknown extensions fail before anything touches the store.
    let kind = detect_format(file_path)?;

    let tx = conn.unchecked_transaction()?;
    let result = stage_file(&tx, company_code, account_id, imported_by, file_path, kind);
    match result {
        Ok(batch_id) => {
            tx.commit()?;
            Ok(batch_id)
        }
        // Dropping the transaction rolls everything back: a mid-parse or
        // mid-stage failure leaves no partial batch behind.
        Err(e) => Err(CaixaError::Import {
            file: file_path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("?")
                .to_string(),
            source: Box::new(e),
        }),
    }
}

fn stage_file(
    conn: &Connection,
    company_code: &str,
    account_id: i64,
    imported_by: Option<&str>,
    file_path: &Path,
    kind: FileKind,
) -> Result<i64> {
    let filename = file_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_string();

    conn.execute(
        "INSERT INTO import_batches (company_code, account_id, file_kind, filename, imported_at, imported_by) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![company_code, account_id, kind.key(), filename, now_iso(), imported_by],
    )?;
    let batch_id = conn.last_insert_rowid();

    let lines = match kind {
        FileKind::Ofx => parse_ofx(file_path)?,
        FileKind::Csv => parse_csv(file_path)?,
        FileKind::Pdf => Vec::new(),
    };

    // Loaded once per batch so every line sees the same rule ordering,
    // even if rules are edited mid-import.
    let rules = RuleSet::load(conn, company_code)?;

    let total_in_file = lines.len() as i64;
    let (total_deduplicated, total_unknown) =
        stage_lines(conn, company_code, account_id, batch_id, &lines, &rules)?;

    let dates: Vec<&str> = lines
        .iter()
        .filter_map(|l| l.entry_date.as_deref())
        .collect();
    let period_start = dates.iter().min().copied();
    let period_end = dates.iter().max().copied();

    conn.execute(
        "UPDATE import_batches \
         SET total_in_file = ?1, total_deduplicated = ?2, total_unknown_after_import = ?3, \
             period_start = ?4, period_end = ?5 \
         WHERE id = ?6",
        rusqlite::params![
            total_in_file,
            total_deduplicated,
            total_unknown,
            period_start,
            period_end,
            batch_id
        ],
    )?;
    Ok(batch_id)
}

fn stage_lines(
    conn: &Connection,
    company_code: &str,
    account_id: i64,
    batch_id: i64,
    lines: &[RawLine],
    rules: &RuleSet,
) -> Result<(i64, i64)> {
    let mut total_deduplicated = 0i64;
    let mut total_unknown = 0i64;

    for line in lines {
        if is_duplicate_line(conn, company_code, account_id, line)? {
            total_deduplicated += 1;
            continue;
        }

        let hash = line_hash(&[
            company_code,
            &account_id.to_string(),
            line.entry_date.as_deref().unwrap_or(""),
            &line.description,
            &line.amount.to_string(),
        ]);

        let suggestion = rules.apply(&line.description, &line.counterparty_text, None);
        // Only category/cost-center/description suggestions count as a
        // classification; a payment-method override alone does not.
        let classified = suggestion.category_id.is_some()
            || suggestion.cost_center_id.is_some()
            || suggestion.description.is_some();
        let (origin, status) = if classified {
            ("rule", "suggested")
        } else {
            total_unknown += 1;
            ("unknown", "unknown")
        };

        conn.execute(
            "INSERT INTO staging_lines \
                (company_code, batch_id, account_id, entry_date, description, counterparty_text, \
                 amount, payment_method, suggested_category_id, suggested_cost_center_id, \
                 suggested_description, suggestion_origin, classification_status, line_hash) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            rusqlite::params![
                company_code,
                batch_id,
                account_id,
                line.entry_date,
                line.description,
                line.counterparty_text,
                line.amount,
                suggestion.payment_method,
                suggestion.category_id,
                suggestion.cost_center_id,
                suggestion.description,
                origin,
                status,
                hash,
            ],
        )?;
    }

    Ok((total_deduplicated, total_unknown))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    // ── detect_format ─────────────────────────────────────────────────────

    #[test]
    fn test_detect_format_by_extension() {
        assert_eq!(detect_format(Path::new("a.ofx")).unwrap(), FileKind::Ofx);
        assert_eq!(detect_format(Path::new("a.OFX")).unwrap(), FileKind::Ofx);
        assert_eq!(detect_format(Path::new("b.csv")).unwrap(), FileKind::Csv);
        assert_eq!(detect_format(Path::new("c.Pdf")).unwrap(), FileKind::Pdf);
    }

    #[test]
    fn test_detect_format_unsupported() {
        assert!(matches!(
            detect_format(Path::new("x.xlsx")),
            Err(CaixaError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            detect_format(Path::new("noext")),
            Err(CaixaError::UnsupportedFormat(_))
        ));
    }

    // ── OFX ───────────────────────────────────────────────────────────────

    const SAMPLE_OFX: &str = "\
OFXHEADER:100
DATA:OFXSGML

<OFX>
<BANKTRANLIST>
<STMTTRN>
<TRNTYPE>DEBIT
<DTPOSTED>20240115120000[-3:BRT]
<TRNAMT>-49,90
<MEMO>UBER *TRIP
</STMTTRN>
<STMTTRN>
<TRNTYPE>CREDIT
<DTPOSTED>20240120
<TRNAMT>1500.00
<MEMO>PIX RECEBIDO CLIENTE
</STMTTRN>
</BANKTRANLIST>
</OFX>
";

    #[test]
    fn test_parse_ofx_basic() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "extrato.ofx", SAMPLE_OFX);
        let lines = parse_ofx(&path).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].entry_date.as_deref(), Some("2024-01-15"));
        assert_eq!(lines[0].amount, -49.90);
        assert_eq!(lines[0].description, "UBER *TRIP");
        assert_eq!(lines[0].counterparty_text, "UBER *TRIP");
        assert_eq!(lines[1].entry_date.as_deref(), Some("2024-01-20"));
        assert_eq!(lines[1].amount, 1500.0);
    }

    #[test]
    fn test_parse_ofx_incomplete_records_dropped() {
        let content = "\
<STMTTRN>
<MEMO>NO DATE NO AMOUNT
</STMTTRN>
<STMTTRN>
<DTPOSTED>20240101
<MEMO>DATE BUT NO AMOUNT
</STMTTRN>
<STMTTRN>
<TRNAMT>10.00
<MEMO>AMOUNT BUT NO DATE
</STMTTRN>
<STMTTRN>
<DTPOSTED>20240102
<TRNAMT>5.00
</STMTTRN>
";
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "partial.ofx", content);
        let lines = parse_ofx(&path).unwrap();
        // Only the last record has both date and amount; missing memo is
        // an empty description, not a drop.
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].description, "");
        assert_eq!(lines[0].amount, 5.0);
    }

    #[test]
    fn test_parse_ofx_unparseable_amount_defaults_to_zero() {
        let content = "\
<STMTTRN>
<DTPOSTED>20240103
<TRNAMT>abc
<MEMO>WEIRD
</STMTTRN>
";
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "weird.ofx", content);
        let lines = parse_ofx(&path).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].amount, 0.0);
    }

    #[test]
    fn test_parse_ofx_tolerates_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.ofx");
        // "CARTÃO" in latin-1: the 0xC3 byte alone is invalid UTF-8.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"<STMTTRN>\n<DTPOSTED>20240104\n<TRNAMT>-1.00\n<MEMO>CART\xC3O\n</STMTTRN>\n");
        std::fs::write(&path, bytes).unwrap();
        let lines = parse_ofx(&path).unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].description.starts_with("CART"));
    }

    // ── CSV ───────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_csv_portuguese_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "extrato.csv",
            "Data;Descrição;Valor\n15/01/2024;UBER *TRIP;-49,90\n20/01/2024;PIX RECEBIDO;1.500,00\n",
        );
        let lines = parse_csv(&path).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].entry_date.as_deref(), Some("2024-01-15"));
        assert_eq!(lines[0].amount, -49.90);
        assert_eq!(lines[1].amount, 1500.0);
    }

    #[test]
    fn test_parse_csv_english_headers_equivalent() {
        let dir = tempfile::tempdir().unwrap();
        let pt = write_file(&dir, "pt.csv", "Data;Descrição;Valor\n15/01/2024;X;-1,00\n");
        let en = write_file(&dir, "en.csv", "date;description;amount\n15/01/2024;X;-1,00\n");
        let a = parse_csv(&pt).unwrap();
        let b = parse_csv(&en).unwrap();
        assert_eq!(a.len(), b.len());
        assert_eq!(a[0].entry_date, b[0].entry_date);
        assert_eq!(a[0].description, b[0].description);
        assert_eq!(a[0].amount, b[0].amount);
    }

    #[test]
    fn test_parse_csv_blank_rows_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "blanks.csv",
            "data;descricao;valor\n15/01/2024;A;1,00\n;;\n\n16/01/2024;B;2,00\n",
        );
        let lines = parse_csv(&path).unwrap();
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_parse_csv_missing_columns_default() {
        let dir = tempfile::tempdir().unwrap();
        // No recognizable date or amount column.
        let path = write_file(&dir, "odd.csv", "foo;descricao\nx;COMPRA\n");
        let lines = parse_csv(&path).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].entry_date, None);
        assert_eq!(lines[0].description, "COMPRA");
        assert_eq!(lines[0].amount, 0.0);
    }

    #[test]
    fn test_parse_csv_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "empty.csv", "");
        assert!(parse_csv(&path).unwrap().is_empty());
    }

    // ── pipeline ──────────────────────────────────────────────────────────

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = crate::db::get_connection(&dir.path().join("test.db")).unwrap();
        crate::db::init_db(&conn).unwrap();
        conn.execute(
            "INSERT INTO companies (code, display_name) VALUES ('ACME', 'Acme Ltda')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO accounts (company_code, name, account_type) VALUES ('ACME', 'Banco X', 'checking')",
            [],
        )
        .unwrap();
        (dir, conn)
    }

    fn batch_counters(conn: &Connection, batch_id: i64) -> (i64, i64, i64, i64) {
        conn.query_row(
            "SELECT total_in_file, total_deduplicated, total_imported, total_unknown_after_import \
             FROM import_batches WHERE id = ?1",
            [batch_id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .unwrap()
    }

    #[test]
    fn test_import_csv_counters_and_staging() {
        let (dir, conn) = test_db();
        conn.execute(
            "INSERT INTO categories (company_code, name, category_type) VALUES ('ACME', 'Transporte', 'expense')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO rules (company_code, target_field, match_kind, pattern, category_id, priority) \
             VALUES ('ACME', 'description', 'contains', 'uber', 1, 10)",
            [],
        )
        .unwrap();
        let path = write_file(
            &dir,
            "extrato.csv",
            "data;descricao;valor\n15/01/2024;UBER *TRIP;-49,90\n16/01/2024;PADARIA;-12,00\n",
        );
        let batch_id = import_file(&conn, "ACME", 1, Some("tester"), &path).unwrap();

        let (in_file, deduped, imported, unknown) = batch_counters(&conn, batch_id);
        assert_eq!(in_file, 2);
        assert_eq!(deduped, 0);
        // total_imported untouched until ledger commit.
        assert_eq!(imported, 0);
        assert_eq!(unknown, 1);

        let (origin, status, cat): (String, String, Option<i64>) = conn
            .query_row(
                "SELECT suggestion_origin, classification_status, suggested_category_id \
                 FROM staging_lines WHERE batch_id = ?1 AND description = 'UBER *TRIP'",
                [batch_id],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!(origin, "rule");
        assert_eq!(status, "suggested");
        assert_eq!(cat, Some(1));
    }

    #[test]
    fn test_import_dedups_against_ledger_only() {
        let (dir, conn) = test_db();
        conn.execute(
            "INSERT INTO transactions \
                (company_code, account_id, entry_date, statement_description, movement_kind, amount, created_at, updated_at) \
             VALUES ('ACME', 1, '2024-01-15', 'UBER *TRIP', 'debit', -49.9, datetime('now'), datetime('now'))",
            [],
        )
        .unwrap();
        // The ledger twin is deduplicated; the intra-file twins both stage.
        let path = write_file(
            &dir,
            "extrato.csv",
            "data;descricao;valor\n\
             15/01/2024;UBER *TRIP;-49,90\n\
             16/01/2024;PADARIA;-12,00\n\
             16/01/2024;PADARIA;-12,00\n",
        );
        let batch_id = import_file(&conn, "ACME", 1, None, &path).unwrap();
        let (in_file, deduped, _, _) = batch_counters(&conn, batch_id);
        assert_eq!(in_file, 3);
        assert_eq!(deduped, 1);
        let staged: i64 = conn
            .query_row(
                "SELECT count(*) FROM staging_lines WHERE batch_id = ?1",
                [batch_id],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(staged, 2);
        // Invariant: total_in_file = total_deduplicated + staged.
        assert_eq!(in_file, deduped + staged);
    }

    #[test]
    fn test_import_pdf_stages_nothing() {
        let (dir, conn) = test_db();
        let path = write_file(&dir, "statement.pdf", "%PDF-1.4 not actually parsed");
        let batch_id = import_file(&conn, "ACME", 1, None, &path).unwrap();
        let (in_file, deduped, _, unknown) = batch_counters(&conn, batch_id);
        assert_eq!((in_file, deduped, unknown), (0, 0, 0));
        let kind: String = conn
            .query_row(
                "SELECT file_kind FROM import_batches WHERE id = ?1",
                [batch_id],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(kind, "PDF");
    }

    #[test]
    fn test_import_unsupported_creates_nothing() {
        let (dir, conn) = test_db();
        let path = write_file(&dir, "stmt.xlsx", "bytes");
        assert!(import_file(&conn, "ACME", 1, None, &path).is_err());
        let batches: i64 = conn
            .query_row("SELECT count(*) FROM import_batches", [], |r| r.get(0))
            .unwrap();
        assert_eq!(batches, 0);
    }

    #[test]
    fn test_import_sets_period_bounds() {
        let (dir, conn) = test_db();
        let path = write_file(
            &dir,
            "extrato.csv",
            "data;descricao;valor\n20/01/2024;B;1,00\n15/01/2024;A;1,00\n",
        );
        let batch_id = import_file(&conn, "ACME", 1, None, &path).unwrap();
        let (start, end): (Option<String>, Option<String>) = conn
            .query_row(
                "SELECT period_start, period_end FROM import_batches WHERE id = ?1",
                [batch_id],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!(start.as_deref(), Some("2024-01-15"));
        assert_eq!(end.as_deref(), Some("2024-01-20"));
    }

    #[test]
    fn test_import_error_carries_filename() {
        let (dir, conn) = test_db();
        let path = dir.path().join("missing.csv");
        let err = import_file(&conn, "ACME", 1, None, &path).unwrap_err();
        assert!(err.to_string().contains("missing.csv"));
    }

    #[test]
    fn test_payment_method_only_rule_stays_unknown() {
        let (dir, conn) = test_db();
        conn.execute(
            "INSERT INTO rules (company_code, target_field, match_kind, pattern, fixed_payment_method, priority) \
             VALUES ('ACME', 'description', 'contains', 'pix', 'PIX', 10)",
            [],
        )
        .unwrap();
        let path = write_file(&dir, "e.csv", "data;descricao;valor\n15/01/2024;PIX ENVIADO;-5,00\n");
        let batch_id = import_file(&conn, "ACME", 1, None, &path).unwrap();
        let (origin, method): (String, Option<String>) = conn
            .query_row(
                "SELECT suggestion_origin, payment_method FROM staging_lines WHERE batch_id = ?1",
                [batch_id],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        // The fixed payment method is stored but does not count as a
        // classification on its own.
        assert_eq!(method.as_deref(), Some("PIX"));
        assert_eq!(origin, "unknown");
        let (_, _, _, unknown) = batch_counters(&conn, batch_id);
        assert_eq!(unknown, 1);
    }
}
