#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Company {
    pub code: String,
    pub legal_name: Option<String>,
    pub display_name: Option<String>,
    pub is_active: bool,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub company_code: String,
    pub name: String,
    pub account_type: String,
    pub bank: Option<String>,
    pub currency: String,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Category {
    pub id: i64,
    pub company_code: String,
    pub name: String,
    pub category_type: String,
    pub grp: Option<String>,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct CostCenter {
    pub id: i64,
    pub company_code: String,
    pub name: String,
    pub is_active: bool,
}

/// Intermediate representation of one parsed statement entry, before
/// dedup and staging. Discarded once the staging row is written.
#[derive(Debug, Clone)]
pub struct RawLine {
    pub entry_date: Option<String>,
    pub description: String,
    pub counterparty_text: String,
    pub amount: f64,
}

/// One file-import attempt and its aggregate counters. Counters are set
/// once at the end of staging; total_imported only moves when the batch
/// is committed to the ledger.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct ImportBatch {
    pub id: i64,
    pub company_code: String,
    pub account_id: i64,
    pub file_kind: String,
    pub filename: String,
    pub imported_at: String,
    pub period_start: Option<String>,
    pub period_end: Option<String>,
    pub total_in_file: i64,
    pub total_deduplicated: i64,
    pub total_imported: i64,
    pub total_unknown_after_import: i64,
}

/// A provisional, not-yet-committed transaction awaiting review.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct StagingLine {
    pub id: i64,
    pub company_code: String,
    pub batch_id: i64,
    pub account_id: i64,
    pub entry_date: Option<String>,
    pub description: String,
    pub counterparty_text: String,
    pub amount: f64,
    pub payment_method: Option<String>,
    pub suggested_category_id: Option<i64>,
    pub suggested_cost_center_id: Option<i64>,
    pub suggested_description: Option<String>,
    pub suggestion_origin: String,
    pub classification_status: String,
    pub line_hash: String,
    pub notes: Option<String>,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct LedgerTransaction {
    pub id: i64,
    pub company_code: String,
    pub account_id: i64,
    pub entry_date: String,
    pub competence_date: Option<String>,
    pub statement_description: Option<String>,
    pub treated_description: Option<String>,
    pub movement_kind: String,
    pub amount: f64,
    pub category_id: Option<i64>,
    pub cost_center_id: Option<i64>,
    pub payment_method: Option<String>,
    pub batch_id: Option<i64>,
    pub unique_hash: Option<String>,
    pub is_reconciled: bool,
}
