mod amount;
mod rules;

pub use amount::{Amount, AmountError};
pub use rules::{RuleError, RuleKind};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::Receipt;
use rules::Award;

/// Stateless evaluator applying the fixed points rubric to a receipt.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    /// Point total for a receipt. Malformed sub-fields contribute zero.
    pub fn score(&self, receipt: &Receipt) -> u64 {
        self.evaluate(receipt).total
    }

    /// Full breakdown, one component per rule in [`RuleKind::ALL`] order.
    pub fn evaluate(&self, receipt: &Receipt) -> ScoreCard {
        let components: Vec<ScoreComponent> = RuleKind::ALL
            .iter()
            .map(|rule| settle(*rule, apply(*rule, receipt)))
            .collect();
        let total: u64 = components.iter().map(|component| component.points).sum();

        debug!(retailer = %receipt.retailer, total, "receipt scored");

        ScoreCard { total, components }
    }
}

/// Shorthand for [`ScoringEngine::score`].
pub fn score(receipt: &Receipt) -> u64 {
    ScoringEngine.score(receipt)
}

fn apply(rule: RuleKind, receipt: &Receipt) -> Result<Award, RuleError> {
    match rule {
        RuleKind::RetailerName => Ok(rules::retailer_name(&receipt.retailer)),
        RuleKind::RoundDollarTotal => Ok(rules::round_dollar_total(&receipt.total)),
        RuleKind::QuarterMultipleTotal => rules::quarter_multiple_total(&receipt.total),
        RuleKind::ItemPairs => Ok(rules::item_pairs(&receipt.items)),
        RuleKind::ItemDescriptions => Ok(rules::item_descriptions(&receipt.items)),
        RuleKind::OddPurchaseDay => rules::odd_purchase_day(&receipt.purchase_date),
        RuleKind::AfternoonPurchaseTime => rules::afternoon_purchase_time(&receipt.purchase_time),
    }
}

fn settle(rule: RuleKind, outcome: Result<Award, RuleError>) -> ScoreComponent {
    match outcome {
        Ok(award) => ScoreComponent {
            rule,
            points: award.points,
            notes: award.notes,
        },
        Err(error) => {
            warn!(rule = rule.label(), %error, "rule skipped");
            ScoreComponent {
                rule,
                points: 0,
                notes: error.to_string(),
            }
        }
    }
}

/// Discrete contribution to a receipt's score, kept for audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub rule: RuleKind,
    pub points: u64,
    pub notes: String,
}

/// Total points plus the per-rule trail that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub total: u64,
    pub components: Vec<ScoreComponent>,
}

impl ScoreCard {
    pub fn component(&self, rule: RuleKind) -> Option<&ScoreComponent> {
        self.components.iter().find(|component| component.rule == rule)
    }
}
