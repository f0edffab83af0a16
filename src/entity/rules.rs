//! The ordered rule table used by the entity extractor.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::entity::types::{EntityType, ExtractedEntity};
use crate::error::Result;

/// Turns one regex match into an entity value, or `None` to skip the match.
pub type ValueFn = fn(&Captures<'_>) -> Option<String>;

/// Whether a rule emits every match or only the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Emit an entity for every non-overlapping match.
    All,
    /// Emit at most one entity, from the leftmost match.
    First,
}

/// One extraction rule: a matcher, the entity type it produces, and the
/// function that derives the normalized value from a match.
#[derive(Debug, Clone)]
pub struct EntityRule {
    name: &'static str,
    entity_type: EntityType,
    pattern: Regex,
    mode: MatchMode,
    value: ValueFn,
}

lazy_static! {
    static ref DIGIT_RUN: Regex = Regex::new(r"\d{6,20}").expect("digit run pattern is valid");
}

const ACCOUNT_CLASSES: &str = "savings|checking|salary|current|wallet";
const AMOUNT: &str = r"\d+(?:,\d{3})*(?:\.\d+)?";

impl EntityRule {
    /// Compile a new rule.
    pub fn new(
        name: &'static str,
        entity_type: EntityType,
        pattern: &str,
        mode: MatchMode,
        value: ValueFn,
    ) -> Result<Self> {
        Ok(Self {
            name,
            entity_type,
            pattern: Regex::new(pattern)?,
            mode,
            value,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Append the entities this rule finds in `text` to `out`.
    pub fn apply(&self, text: &str, out: &mut Vec<ExtractedEntity>) {
        match self.mode {
            MatchMode::All => {
                for caps in self.pattern.captures_iter(text) {
                    self.push(&caps, out);
                }
            }
            MatchMode::First => {
                if let Some(caps) = self.pattern.captures(text) {
                    self.push(&caps, out);
                }
            }
        }
    }

    fn push(&self, caps: &Captures<'_>, out: &mut Vec<ExtractedEntity>) {
        if let Some(value) = (self.value)(caps) {
            out.push(ExtractedEntity::new(self.entity_type, value));
        }
    }
}

/// Strip thousands separators, trim and upper-case.
pub(crate) fn normalize(raw: &str) -> String {
    raw.replace(',', "").trim().to_uppercase()
}

fn verbatim(caps: &Captures<'_>) -> Option<String> {
    caps.get(0).map(|m| m.as_str().to_string())
}

fn first_digit_run(caps: &Captures<'_>) -> Option<String> {
    let span = caps.get(0)?.as_str();
    DIGIT_RUN.find(span).map(|m| m.as_str().to_string())
}

fn normalized_match(caps: &Captures<'_>) -> Option<String> {
    caps.get(0).map(|m| normalize(m.as_str()))
}

fn normalized_group(caps: &Captures<'_>) -> Option<String> {
    caps.get(1).map(|m| normalize(m.as_str()))
}

fn lowercase_group(caps: &Captures<'_>) -> Option<String> {
    caps.get(1).map(|m| m.as_str().to_lowercase())
}

/// The built-in rules, in application order.
pub fn default_rules() -> Result<Vec<EntityRule>> {
    let account_class = |preposition: &str| {
        format!(r"(?i)\b{preposition}\s+(?:(?:my|the|your|our)\s+)?({ACCOUNT_CLASSES})\b")
    };

    Ok(vec![
        EntityRule::new(
            "txn_keyword",
            EntityType::Txn,
            r"(?i)\b(?:txn|transaction)\s*[:\-]?\s*[A-Z0-9\-]{4,20}\b",
            MatchMode::All,
            verbatim,
        )?,
        EntityRule::new(
            "utr",
            EntityType::Txn,
            r"(?i)\bUTR[: ]?[A-Z0-9]{6,20}\b",
            MatchMode::All,
            verbatim,
        )?,
        EntityRule::new(
            "account_keyword",
            EntityType::Account,
            r"(?i)\b(?:account|acct|a/c|ac)\s*(no\.?|number)?\s*[:\-]?\s*\d{6,20}\b",
            MatchMode::All,
            first_digit_run,
        )?,
        EntityRule::new(
            "to_account_number",
            EntityType::Account,
            r"(?i)\bto\s+account\s+\d{6,20}\b",
            MatchMode::All,
            first_digit_run,
        )?,
        EntityRule::new(
            "currency_code_amount",
            EntityType::Amount,
            &format!(r"(?i)\b(?:rs|inr|usd|eur)\s*[.:]?\s*{AMOUNT}\b"),
            MatchMode::All,
            normalized_match,
        )?,
        EntityRule::new(
            "currency_symbol_amount",
            EntityType::Amount,
            &format!(r"[₹$€]\s*{AMOUNT}\b"),
            MatchMode::All,
            normalized_match,
        )?,
        EntityRule::new(
            "verb_amount",
            EntityType::Amount,
            &format!(r"(?i)\b(?:transfer|send|withdraw|deposit|pay|give|move)\s+({AMOUNT})\b"),
            MatchMode::All,
            normalized_group,
        )?,
        EntityRule::new(
            "from_account_class",
            EntityType::FromAccount,
            &account_class("from"),
            MatchMode::First,
            lowercase_group,
        )?,
        EntityRule::new(
            "to_account_class",
            EntityType::ToAccount,
            &account_class("to"),
            MatchMode::First,
            lowercase_group,
        )?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(rule_name: &str, text: &str) -> Vec<String> {
        let rule = default_rules()
            .unwrap()
            .into_iter()
            .find(|r| r.name() == rule_name)
            .unwrap();
        let mut out = Vec::new();
        rule.apply(text, &mut out);
        out.into_iter().map(|e| e.value).collect()
    }

    #[test]
    fn test_default_rule_order() {
        let names: Vec<&str> = default_rules().unwrap().iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec![
                "txn_keyword",
                "utr",
                "account_keyword",
                "to_account_number",
                "currency_code_amount",
                "currency_symbol_amount",
                "verb_amount",
                "from_account_class",
                "to_account_class",
            ]
        );
    }

    #[test]
    fn test_only_account_classes_stop_at_first_match() {
        for rule in default_rules().unwrap() {
            let expected = match rule.entity_type() {
                EntityType::FromAccount | EntityType::ToAccount => MatchMode::First,
                _ => MatchMode::All,
            };
            assert_eq!(rule.mode(), expected, "rule {}", rule.name());
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(" rs. 1,20,000 "), "RS. 120000");
        assert_eq!(normalize("5,000.50"), "5000.50");
    }

    #[test]
    fn test_txn_keyword_keeps_span() {
        assert_eq!(run("txn_keyword", "where is txn: AB-1234?"), vec!["txn: AB-1234"]);
        assert_eq!(run("txn_keyword", "Transaction 9X8Y7Z"), vec!["Transaction 9X8Y7Z"]);
        assert!(run("txn_keyword", "txn ab").is_empty());
    }

    #[test]
    fn test_utr_variants() {
        assert_eq!(run("utr", "utr:ABC123456"), vec!["utr:ABC123456"]);
        assert_eq!(run("utr", "UTR 998877"), vec!["UTR 998877"]);
        assert!(run("utr", "UTR12345").is_empty());
    }

    #[test]
    fn test_account_keyword_keeps_digits_only() {
        assert_eq!(run("account_keyword", "a/c no. 00112233"), vec!["00112233"]);
        assert_eq!(run("account_keyword", "acct:4455667788"), vec!["4455667788"]);
        assert!(run("account_keyword", "account 12345").is_empty());
    }

    #[test]
    fn test_currency_amounts() {
        assert_eq!(run("currency_code_amount", "pay INR 1,500.75"), vec!["INR 1500.75"]);
        assert_eq!(run("currency_symbol_amount", "₹2,000 and $15"), vec!["₹2000", "$15"]);
    }

    #[test]
    fn test_verb_amount_keeps_number() {
        assert_eq!(run("verb_amount", "Withdraw 12,000 now"), vec!["12000"]);
        assert!(run("verb_amount", "send rs 100").is_empty());
    }

    #[test]
    fn test_account_class_first_match_only() {
        assert_eq!(
            run("from_account_class", "from Savings or from wallet"),
            vec!["savings"]
        );
        assert_eq!(run("to_account_class", "to the current account"), vec!["current"]);
        assert!(run("to_account_class", "to a savings account").is_empty());
    }
}
