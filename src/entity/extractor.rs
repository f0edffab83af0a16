//! Entity extractor.

use std::collections::HashSet;

use lazy_static::lazy_static;
use log::debug;

use crate::entity::rules::{EntityRule, default_rules};
use crate::entity::types::ExtractedEntity;

lazy_static! {
    static ref DEFAULT_RULES: Vec<EntityRule> =
        default_rules().expect("built-in entity patterns are valid");
}

/// Applies an ordered rule table to text.
///
/// Rules are independent regex passes: the same substring may yield entities
/// of different types. Duplicates are suppressed by `(type, value)` identity,
/// keeping the first occurrence in rule order.
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    rules: Vec<EntityRule>,
}

impl EntityExtractor {
    /// Create an extractor with the built-in rules.
    pub fn new() -> Self {
        Self::with_rules(DEFAULT_RULES.clone())
    }

    /// Create an extractor with a custom rule table.
    pub fn with_rules(rules: Vec<EntityRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[EntityRule] {
        &self.rules
    }

    /// Extract entities in discovery order, without duplicates.
    pub fn extract(&self, text: &str) -> Vec<ExtractedEntity> {
        let mut found = Vec::new();
        for rule in &self.rules {
            rule.apply(text, &mut found);
        }

        let total = found.len();
        let mut seen = HashSet::new();
        found.retain(|entity| seen.insert(entity.clone()));

        debug!(
            "extracted {} entities ({} duplicates dropped)",
            found.len(),
            total - found.len()
        );
        found
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}
