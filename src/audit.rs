use rusqlite::Connection;

use crate::error::Result;
use crate::util::now_iso;

/// Append one row to the activity log. Best-effort audit trail: the
/// pipeline calls this after the interesting mutation, inside the same
/// transaction when there is one.
pub fn log_activity(
    conn: &Connection,
    company_code: &str,
    action: &str,
    details: &str,
    module: &str,
) -> Result<()> {
    conn.execute(
        "INSERT INTO activity_log (company_code, logged_at, action, details, module) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![company_code, now_iso(), action, details, module],
    )?;
    Ok(())
}
