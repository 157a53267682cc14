use super::common::*;

use crate::receipts::scoring::{score, RuleKind, ScoringEngine};

#[test]
fn target_receipt_scores_twenty_eight() {
    let card = ScoringEngine::new().evaluate(&target_receipt());

    assert_eq!(card.total, 28);
    let points = |rule| card.component(rule).expect("component present").points;
    assert_eq!(points(RuleKind::RetailerName), 6);
    assert_eq!(points(RuleKind::RoundDollarTotal), 0);
    assert_eq!(points(RuleKind::QuarterMultipleTotal), 0);
    assert_eq!(points(RuleKind::ItemPairs), 10);
    assert_eq!(points(RuleKind::ItemDescriptions), 6);
    assert_eq!(points(RuleKind::OddPurchaseDay), 6);
    assert_eq!(points(RuleKind::AfternoonPurchaseTime), 0);
}

#[test]
fn corner_market_receipt_scores_one_hundred_nine() {
    let card = ScoringEngine::new().evaluate(&corner_market_receipt());

    assert_eq!(card.total, 109);
    let points = |rule| card.component(rule).expect("component present").points;
    assert_eq!(points(RuleKind::RetailerName), 14);
    assert_eq!(points(RuleKind::RoundDollarTotal), 50);
    assert_eq!(points(RuleKind::QuarterMultipleTotal), 25);
    assert_eq!(points(RuleKind::ItemPairs), 10);
    assert_eq!(points(RuleKind::ItemDescriptions), 0);
    assert_eq!(points(RuleKind::AfternoonPurchaseTime), 10);
}

#[test]
fn card_lists_every_rule_once_and_sums_to_total() {
    let card = ScoringEngine::new().evaluate(&target_receipt());

    let rules: Vec<RuleKind> = card.components.iter().map(|c| c.rule).collect();
    assert_eq!(rules, RuleKind::ALL.to_vec());
    let sum: u64 = card.components.iter().map(|c| c.points).sum();
    assert_eq!(sum, card.total);
}

#[test]
fn scoring_is_idempotent_and_leaves_receipt_untouched() {
    let receipt = target_receipt();
    let snapshot = receipt.clone();

    let first = score(&receipt);
    let second = score(&receipt);

    assert_eq!(first, second);
    assert_eq!(receipt, snapshot);
}

#[test]
fn malformed_fields_zero_only_their_own_rules() {
    let mut receipt = corner_market_receipt();
    receipt.purchase_date = "20/03/2022".to_string();
    receipt.purchase_time = "half past two".to_string();
    receipt.total = "nine.00".to_string();

    let card = ScoringEngine::new().evaluate(&receipt);

    // Round-dollar is textual, so it still applies to "nine.00".
    assert_eq!(card.total, 14 + 50 + 10);
    let quarter = card
        .component(RuleKind::QuarterMultipleTotal)
        .expect("quarter component");
    assert_eq!(quarter.points, 0);
    assert!(quarter.notes.contains("nine.00"));
    let day = card.component(RuleKind::OddPurchaseDay).expect("day component");
    assert!(day.notes.contains("20/03/2022"));
}

#[test]
fn whitespace_only_description_still_earns_price_bonus() {
    let mut receipt = plain_receipt("A");
    receipt.items = vec![item("      ", "4.00")];

    assert_eq!(score(&receipt), 1 + 1);
}

#[test]
fn unparseable_price_skips_that_item_only() {
    let mut receipt = plain_receipt("A");
    receipt.items = vec![item("abc", "free"), item("xyz", "10.00")];

    // One pair (+5), one qualifying item (+2), retailer (+1).
    assert_eq!(score(&receipt), 5 + 2 + 1);
}

#[test]
fn afternoon_window_includes_two_pm_and_excludes_four_pm() {
    let mut receipt = plain_receipt("A");

    receipt.purchase_time = "14:00".to_string();
    assert_eq!(score(&receipt), 11);

    receipt.purchase_time = "16:00".to_string();
    assert_eq!(score(&receipt), 1);
}

#[test]
fn whole_dollar_total_earns_round_and_quarter_bonuses() {
    let mut receipt = plain_receipt("A");
    receipt.total = "10.00".to_string();

    let card = ScoringEngine::new().evaluate(&receipt);
    assert_eq!(card.total, 1 + 50 + 25);
}

#[test]
fn empty_receipt_scores_zero() {
    let receipt = crate::receipts::Receipt {
        retailer: String::new(),
        purchase_date: String::new(),
        purchase_time: String::new(),
        items: Vec::new(),
        total: String::new(),
    };

    assert_eq!(score(&receipt), 0);
}
