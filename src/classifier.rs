use std::collections::HashMap;

use rusqlite::Connection;

use crate::audit::log_activity;
use crate::error::Result;

/// One staged line handed to a classifier.
#[derive(Debug, Clone)]
pub struct ClassifyItem {
    pub staging_id: i64,
    pub description: String,
    pub counterparty_text: String,
    pub amount: f64,
}

/// What a classifier proposes for one staged line. Names, not ids: the
/// classifier knows nothing about this database.
#[derive(Debug, Clone)]
pub struct ClassifierSuggestion {
    pub category_name: String,
    pub treated_description: String,
    pub cost_center_name: Option<String>,
}

/// Batch classification for staged lines no rule resolved. Implementations
/// may answer for any subset of the input; absent ids simply stay
/// unresolved. A failing implementation degrades the pass to a no-op, it
/// never fails the batch.
pub trait Classifier {
    fn classify(
        &self,
        company_code: &str,
        items: &[ClassifyItem],
    ) -> Result<HashMap<i64, ClassifierSuggestion>>;
}

/// Sign-based fallback used until a real model service is wired in.
pub struct HeuristicClassifier;

impl Classifier for HeuristicClassifier {
    fn classify(
        &self,
        _company_code: &str,
        items: &[ClassifyItem],
    ) -> Result<HashMap<i64, ClassifierSuggestion>> {
        let mut results = HashMap::new();
        for item in items {
            let category_name = if item.amount > 0.0 {
                "Unclassified revenue"
            } else {
                "Unclassified expense"
            };
            let treated = item.description.trim();
            let treated_description = if treated.is_empty() {
                "Entry without description".to_string()
            } else {
                treated.to_string()
            };
            results.insert(
                item.staging_id,
                ClassifierSuggestion {
                    category_name: category_name.to_string(),
                    treated_description,
                    cost_center_name: None,
                },
            );
        }
        Ok(results)
    }
}

/// Upper bound on lines sent to a classifier in one call.
pub const CLASSIFY_BATCH_CAP: usize = 200;

pub struct ClassifierPassResult {
    pub sent: usize,
    pub classified: usize,
}

/// Run a classifier over the batch's still-unknown staging lines and fold
/// the answers back in: matched rows get origin `ai` / status `suggested`,
/// a category id when one with the suggested name exists, and the
/// classifier's text in notes. Classifier failure leaves every row as it
/// was.
pub fn run_classifier_pass(
    conn: &Connection,
    company_code: &str,
    batch_id: i64,
    classifier: &dyn Classifier,
) -> Result<ClassifierPassResult> {
    let mut stmt = conn.prepare(
        "SELECT id, description, counterparty_text, amount FROM staging_lines \
         WHERE company_code = ?1 AND batch_id = ?2 \
           AND (classification_status = 'unknown' OR suggested_category_id IS NULL) \
         ORDER BY id LIMIT ?3",
    )?;
    let items: Vec<ClassifyItem> = stmt
        .query_map(
            rusqlite::params![company_code, batch_id, CLASSIFY_BATCH_CAP as i64],
            |row| {
                Ok(ClassifyItem {
                    staging_id: row.get(0)?,
                    description: row.get(1)?,
                    counterparty_text: row.get(2)?,
                    amount: row.get(3)?,
                })
            },
        )?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if items.is_empty() {
        return Ok(ClassifierPassResult { sent: 0, classified: 0 });
    }

    let suggestions = match classifier.classify(company_code, &items) {
        Ok(s) => s,
        // Collaborator unavailable: rows keep status 'unknown'.
        Err(_) => HashMap::new(),
    };

    let mut classified = 0usize;
    for item in &items {
        let Some(sug) = suggestions.get(&item.staging_id) else {
            continue;
        };
        let category_id: Option<i64> = conn
            .query_row(
                "SELECT id FROM categories WHERE company_code = ?1 AND name = ?2",
                rusqlite::params![company_code, sug.category_name],
                |row| row.get(0),
            )
            .ok();
        conn.execute(
            "UPDATE staging_lines \
             SET suggestion_origin = 'ai', classification_status = 'suggested', \
                 suggested_category_id = COALESCE(?1, suggested_category_id), \
                 suggested_description = ?2, \
                 notes = ?3 \
             WHERE id = ?4",
            rusqlite::params![
                category_id,
                sug.treated_description,
                format!("classifier: {}", sug.category_name),
                item.staging_id
            ],
        )?;
        classified += 1;
    }

    log_activity(
        conn,
        company_code,
        "classifier_pass",
        &format!("{} sent, {} classified", items.len(), classified),
        "classifier",
    )?;

    Ok(ClassifierPassResult {
        sent: items.len(),
        classified,
    })
}
