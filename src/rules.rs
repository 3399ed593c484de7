use std::str::FromStr;

use regex::Regex;
use rusqlite::Connection;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetField {
    Description,
    Counterparty,
    PaymentMethod,
}

impl TargetField {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Counterparty => "counterparty",
            Self::PaymentMethod => "payment_method",
        }
    }
}

impl FromStr for TargetField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "description" => Ok(Self::Description),
            "counterparty" => Ok(Self::Counterparty),
            "payment_method" => Ok(Self::PaymentMethod),
            other => Err(format!("Unknown target field: '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchKind {
    #[default]
    Contains,
    Equals,
    Prefix,
    Suffix,
    Regex,
}

impl MatchKind {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::Equals => "equals",
            Self::Prefix => "prefix",
            Self::Suffix => "suffix",
            Self::Regex => "regex",
        }
    }
}

impl FromStr for MatchKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "contains" => Ok(Self::Contains),
            "equals" => Ok(Self::Equals),
            "prefix" => Ok(Self::Prefix),
            "suffix" => Ok(Self::Suffix),
            "regex" => Ok(Self::Regex),
            other => Err(format!("Unknown match kind: '{other}'")),
        }
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: i64,
    pub target_field: TargetField,
    pub match_kind: MatchKind,
    pub pattern: String,
    pub category_id: Option<i64>,
    pub cost_center_id: Option<i64>,
    pub suggested_description: Option<String>,
    pub fixed_payment_method: Option<String>,
    pub priority: i64,
}

/// What a matched rule suggests for a staged line. Any field may be
/// absent; all absent means no rule matched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Suggestion {
    pub category_id: Option<i64>,
    pub cost_center_id: Option<i64>,
    pub description: Option<String>,
    pub payment_method: Option<String>,
}

impl Suggestion {
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none()
            && self.cost_center_id.is_none()
            && self.description.is_none()
            && self.payment_method.is_none()
    }
}

struct CompiledRule {
    rule: Rule,
    // None for non-regex kinds and for malformed patterns; a malformed
    // pattern simply never matches.
    compiled_regex: Option<Regex>,
}

/// A company's active rules, loaded once per import batch and evaluated
/// in strictly descending priority order. First match wins.
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    pub fn new(mut rules: Vec<Rule>) -> Self {
        // The DB query already orders by priority; sort again so callers
        // constructing rule sets by hand get the same guarantee. Ties keep
        // their incoming order (not load-bearing).
        rules.sort_by(|a, b| b.priority.cmp(&a.priority));
        let rules = rules
            .into_iter()
            .map(|rule| {
                let compiled_regex = if rule.match_kind == MatchKind::Regex {
                    Regex::new(&rule.pattern).ok()
                } else {
                    None
                };
                CompiledRule { rule, compiled_regex }
            })
            .collect();
        Self { rules }
    }

    pub fn load(conn: &Connection, company_code: &str) -> Result<Self> {
        let mut stmt = conn.prepare(
            "SELECT id, target_field, match_kind, pattern, category_id, cost_center_id, \
                    suggested_description, fixed_payment_method, priority \
             FROM rules WHERE company_code = ?1 AND is_active = 1 \
             ORDER BY priority DESC, id",
        )?;
        let rules: Vec<Rule> = stmt
            .query_map([company_code], |row| {
                Ok(Rule {
                    id: row.get(0)?,
                    target_field: TargetField::from_str(&row.get::<_, String>(1)?)
                        .unwrap_or(TargetField::Description),
                    match_kind: MatchKind::from_str(&row.get::<_, String>(2)?)
                        .unwrap_or_default(),
                    pattern: row.get(3)?,
                    category_id: row.get(4)?,
                    cost_center_id: row.get(5)?,
                    suggested_description: row.get(6)?,
                    fixed_payment_method: row.get(7)?,
                    priority: row.get(8)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self::new(rules))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Evaluate the rules against one staged line's fields. Empty target
    /// fields never match, whatever the pattern.
    pub fn apply(
        &self,
        description: &str,
        counterparty_text: &str,
        payment_method_hint: Option<&str>,
    ) -> Suggestion {
        for cr in &self.rules {
            let value = match cr.rule.target_field {
                TargetField::Description => description,
                TargetField::Counterparty => counterparty_text,
                TargetField::PaymentMethod => payment_method_hint.unwrap_or(""),
            };
            if value.is_empty() {
                continue;
            }
            if rule_matches(cr, value) {
                return Suggestion {
                    category_id: cr.rule.category_id,
                    cost_center_id: cr.rule.cost_center_id,
                    description: cr.rule.suggested_description.clone(),
                    payment_method: cr.rule.fixed_payment_method.clone(),
                };
            }
        }
        Suggestion::default()
    }
}

fn rule_matches(cr: &CompiledRule, value: &str) -> bool {
    let value_upper = value.to_uppercase();
    let pattern_upper = cr.rule.pattern.to_uppercase();
    match cr.rule.match_kind {
        MatchKind::Contains => value_upper.contains(&pattern_upper),
        MatchKind::Equals => value_upper == pattern_upper,
        MatchKind::Prefix => value_upper.starts_with(&pattern_upper),
        MatchKind::Suffix => value_upper.ends_with(&pattern_upper),
        // Regex runs against the original-case value.
        MatchKind::Regex => cr
            .compiled_regex
            .as_ref()
            .is_some_and(|re| re.is_match(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_rule(
        target: TargetField,
        kind: MatchKind,
        pattern: &str,
        category_id: Option<i64>,
        priority: i64,
    ) -> Rule {
        Rule {
            id: 0,
            target_field: target,
            match_kind: kind,
            pattern: pattern.to_string(),
            category_id,
            cost_center_id: None,
            suggested_description: None,
            fixed_payment_method: None,
            priority,
        }
    }

    #[test]
    fn test_contains_case_insensitive() {
        let set = RuleSet::new(vec![make_rule(
            TargetField::Description,
            MatchKind::Contains,
            "uber",
            Some(1),
            0,
        )]);
        assert_eq!(set.apply("UBER *TRIP SAO PAULO", "", None).category_id, Some(1));
        assert!(set.apply("PADARIA DO ZE", "", None).is_empty());
    }

    #[test]
    fn test_equals_full_match_only() {
        let set = RuleSet::new(vec![make_rule(
            TargetField::Description,
            MatchKind::Equals,
            "pix recebido",
            Some(2),
            0,
        )]);
        assert_eq!(set.apply("PIX RECEBIDO", "", None).category_id, Some(2));
        assert!(set.apply("PIX RECEBIDO 123", "", None).is_empty());
    }

    #[test]
    fn test_prefix_and_suffix() {
        let set = RuleSet::new(vec![
            make_rule(TargetField::Description, MatchKind::Prefix, "ted ", Some(3), 5),
            make_rule(TargetField::Description, MatchKind::Suffix, "tarifa", Some(4), 0),
        ]);
        assert_eq!(set.apply("TED CLIENTE ACME", "", None).category_id, Some(3));
        assert_eq!(set.apply("DEBITO TARIFA", "", None).category_id, Some(4));
    }

    #[test]
    fn test_regex_original_case() {
        let set = RuleSet::new(vec![make_rule(
            TargetField::Description,
            MatchKind::Regex,
            r"^PIX (ENV|REC)",
            Some(5),
            0,
        )]);
        assert_eq!(set.apply("PIX ENV 123", "", None).category_id, Some(5));
        // Lowercase does not match: regex is not upper-cased.
        assert!(set.apply("pix env 123", "", None).is_empty());
    }

    #[test]
    fn test_malformed_regex_never_matches_never_panics() {
        let set = RuleSet::new(vec![
            make_rule(TargetField::Description, MatchKind::Regex, "(unclosed", Some(6), 10),
            make_rule(TargetField::Description, MatchKind::Contains, "aluguel", Some(7), 0),
        ]);
        // Broken higher-priority rule is skipped; scan continues.
        assert_eq!(set.apply("ALUGUEL SALA 12", "", None).category_id, Some(7));
        assert!(set.apply("(unclosed", "", None).is_empty());
    }

    #[test]
    fn test_priority_descending_first_match_wins() {
        let low = make_rule(TargetField::Description, MatchKind::Contains, "mercado", Some(10), 5);
        let high = make_rule(TargetField::Description, MatchKind::Contains, "mercado", Some(20), 10);
        // Insertion order must not matter.
        for rules in [vec![low.clone(), high.clone()], vec![high, low]] {
            let set = RuleSet::new(rules);
            assert_eq!(set.apply("MERCADO LIVRE", "", None).category_id, Some(20));
        }
    }

    #[test]
    fn test_empty_field_never_matches() {
        let set = RuleSet::new(vec![make_rule(
            TargetField::Counterparty,
            MatchKind::Contains,
            "",
            Some(8),
            0,
        )]);
        // Empty counterparty text is skipped even for an empty pattern.
        assert!(set.apply("SOME DESCRIPTION", "", None).is_empty());
        // Non-empty counterparty matches the empty pattern (contains "").
        assert_eq!(set.apply("X", "FORNECEDOR", None).category_id, Some(8));
    }

    #[test]
    fn test_payment_method_target_uses_hint() {
        let set = RuleSet::new(vec![make_rule(
            TargetField::PaymentMethod,
            MatchKind::Equals,
            "pix",
            Some(9),
            0,
        )]);
        assert!(set.apply("DESC", "FAV", None).is_empty());
        assert_eq!(set.apply("DESC", "FAV", Some("PIX")).category_id, Some(9));
    }

    #[test]
    fn test_no_accumulation_outputs_returned_as_is() {
        let mut first = make_rule(TargetField::Description, MatchKind::Contains, "luz", None, 10);
        first.suggested_description = Some("Energia".to_string());
        let second = make_rule(TargetField::Description, MatchKind::Contains, "luz", Some(11), 5);
        let set = RuleSet::new(vec![first, second]);
        let s = set.apply("CONTA DE LUZ", "", None);
        // First match wins outright; the lower rule's category is not merged in.
        assert_eq!(s.category_id, None);
        assert_eq!(s.description.as_deref(), Some("Energia"));
    }

    #[test]
    fn test_load_orders_by_priority() {
        let dir = tempfile::tempdir().unwrap();
        let conn = crate::db::get_connection(&dir.path().join("t.db")).unwrap();
        crate::db::init_db(&conn).unwrap();
        conn.execute(
            "INSERT INTO categories (company_code, name, category_type) \
             VALUES ('ACME', 'A', 'expense'), ('ACME', 'B', 'expense'), ('OTHER', 'C', 'expense')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO rules (company_code, target_field, match_kind, pattern, category_id, priority) \
             VALUES ('ACME', 'description', 'contains', 'x', 1, 1), \
                    ('ACME', 'description', 'contains', 'x', 2, 9), \
                    ('OTHER', 'description', 'contains', 'x', 3, 99)",
            [],
        )
        .unwrap();
        let set = RuleSet::load(&conn, "ACME").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.apply("XY", "", None).category_id, Some(2));
    }

    #[test]
    fn test_inactive_rules_not_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let conn = crate::db::get_connection(&dir.path().join("t.db")).unwrap();
        crate::db::init_db(&conn).unwrap();
        conn.execute(
            "INSERT INTO categories (company_code, name, category_type) \
             VALUES ('ACME', 'A', 'expense')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO rules (company_code, target_field, match_kind, pattern, category_id, is_active) \
             VALUES ('ACME', 'description', 'contains', 'x', 1, 0)",
            [],
        )
        .unwrap();
        let set = RuleSet::load(&conn, "ACME").unwrap();
        assert_eq!(set.len(), 0);
    }
}
