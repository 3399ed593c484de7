use chrono::NaiveDate;
use sha2::{Digest, Sha256};

/// Normalize a statement date into ISO `YYYY-MM-DD`.
///
/// Tries ISO, `dd/mm/yyyy`, `dd-mm-yyyy` and compact `yyyymmdd`, in that
/// order. Returns None for empty or unrecognized input; callers treat a
/// missing date as a droppable/defaultable field, never an error.
pub fn parse_date(raw: &str) -> Option<String> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y%m%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }
    None
}

/// Parse an amount written with Brazilian locale conventions:
/// `.` is a thousands separator, `,` the decimal separator.
/// Empty or unparseable input yields 0.0 rather than an error.
pub fn br_amount(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    let s = s.replace('.', "").replace(',', ".");
    s.parse().unwrap_or(0.0)
}

/// Audit timestamp: `YYYY-MM-DD HH:MM:SS`, local time.
pub fn now_iso() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Content fingerprint of a statement line: SHA-256 over the `|`-joined
/// parts, hex encoded. Stored for future uniqueness enforcement; the
/// dedup check itself compares columns directly.
pub fn line_hash(parts: &[&str]) -> String {
    let joined = parts.join("|");
    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hex::encode(hasher.finalize())
}
