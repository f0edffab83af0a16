//! Integration tests for rule-based entity extraction

use bankbot_nlu::entity;
use bankbot_nlu::prelude::*;

fn pairs(entities: &[ExtractedEntity]) -> Vec<(&str, &str)> {
    entities
        .iter()
        .map(|e| (e.entity_type.as_str(), e.value.as_str()))
        .collect()
}

#[test]
fn test_transaction_id_reported_once() {
    let extractor = EntityExtractor::new();
    let entities = extractor.extract("Status of UTR123456? I already asked about UTR123456.");

    assert_eq!(pairs(&entities), vec![("txn", "UTR123456")]);
}

#[test]
fn test_account_number() {
    let entities = entity::extract("please check account number 123456789012");
    assert_eq!(pairs(&entities), vec![("account", "123456789012")]);
}

#[test]
fn test_transfer_to_savings() {
    let entities = entity::extract("transfer 5,000 to my savings account");

    assert_eq!(
        pairs(&entities),
        vec![("amount", "5000"), ("to_account", "savings")]
    );
    assert!(
        entities
            .iter()
            .all(|e| e.entity_type != EntityType::FromAccount)
    );
}

#[test]
fn test_currency_amount_with_accounts() {
    let entities = entity::extract("send rs. 2000 from salary to wallet");

    assert_eq!(
        pairs(&entities),
        vec![
            ("amount", "RS. 2000"),
            ("from_account", "salary"),
            ("to_account", "wallet"),
        ]
    );
}

#[test]
fn test_repeated_amount_collapses() {
    let entities = entity::extract("pay 500 now, yes pay 500");
    assert_eq!(pairs(&entities), vec![("amount", "500")]);
}

#[test]
fn test_entity_free_text() {
    assert!(entity::extract("").is_empty());
    assert!(entity::extract("hello, how are you?").is_empty());
}

#[test]
fn test_extraction_is_idempotent() {
    let extractor = EntityExtractor::new();
    let text = "move 1,250.50 from checking to the current account, txn: AB12-3456";
    assert_eq!(extractor.extract(text), extractor.extract(text));
}

#[test]
fn test_entities_serialize_with_type_field() {
    let entities = entity::extract("deposit $250 to wallet");
    let json = serde_json::to_value(&entities).unwrap();

    assert_eq!(json[0]["type"], "amount");
    assert_eq!(json[0]["value"], "$250");
    assert_eq!(json[1]["type"], "to_account");
}
