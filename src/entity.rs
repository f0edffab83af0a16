//! Pattern-driven entity extraction for banking requests.
//!
//! The extractor runs an ordered table of [`EntityRule`]s over the raw text
//! and returns typed, normalized entities with duplicates removed:
//!
//! | order | rule              | entity type                     | value                          |
//! |-------|-------------------|---------------------------------|--------------------------------|
//! | 1     | transaction ids   | `txn`                           | matched span, verbatim         |
//! | 2     | account numbers   | `account`                       | embedded digit run             |
//! | 3     | currency amounts  | `amount`                        | span without commas, uppercase |
//! | 4     | bare amounts      | `amount`                        | number without commas          |
//! | 5     | account classes   | `from_account` / `to_account`   | lower-cased class word         |
//!
//! # Example
//!
//! ```
//! use bankbot_nlu::entity::{EntityExtractor, EntityType};
//!
//! let extractor = EntityExtractor::new();
//! let entities = extractor.extract("transfer 5,000 from savings to wallet");
//!
//! assert_eq!(entities[0].entity_type, EntityType::Amount);
//! assert_eq!(entities[0].value, "5000");
//! assert_eq!(entities[1].value, "savings");
//! assert_eq!(entities[2].value, "wallet");
//! ```

mod extractor;
mod rules;
mod types;

use lazy_static::lazy_static;

pub use extractor::EntityExtractor;
pub use rules::{EntityRule, MatchMode, ValueFn, default_rules};
pub use types::{EntityType, ExtractedEntity};

lazy_static! {
    static ref SHARED_EXTRACTOR: EntityExtractor = EntityExtractor::new();
}

/// Extract entities with a process-wide extractor using the default rules.
pub fn extract(text: &str) -> Vec<ExtractedEntity> {
    SHARED_EXTRACTOR.extract(text)
}
