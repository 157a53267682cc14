use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::amount::{Amount, AmountError};
use crate::receipts::domain::Item;

const ROUND_DOLLAR_SUFFIX: &str = ".00";
const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_CENTS: i128 = 25;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const ITEM_PAIR_POINTS: u64 = 5;
const DESCRIPTION_LENGTH_MULTIPLE: usize = 3;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_START_HOUR: u32 = 14;
const AFTERNOON_END_HOUR: u32 = 16;
const AFTERNOON_POINTS: u64 = 10;

/// Identifies the independent criteria that make up a receipt's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    RetailerName,
    RoundDollarTotal,
    QuarterMultipleTotal,
    ItemPairs,
    ItemDescriptions,
    OddPurchaseDay,
    AfternoonPurchaseTime,
}

impl RuleKind {
    pub const ALL: [RuleKind; 7] = [
        RuleKind::RetailerName,
        RuleKind::RoundDollarTotal,
        RuleKind::QuarterMultipleTotal,
        RuleKind::ItemPairs,
        RuleKind::ItemDescriptions,
        RuleKind::OddPurchaseDay,
        RuleKind::AfternoonPurchaseTime,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RuleKind::RetailerName => "retailer name",
            RuleKind::RoundDollarTotal => "round dollar total",
            RuleKind::QuarterMultipleTotal => "quarter multiple total",
            RuleKind::ItemPairs => "item pairs",
            RuleKind::ItemDescriptions => "item descriptions",
            RuleKind::OddPurchaseDay => "odd purchase day",
            RuleKind::AfternoonPurchaseTime => "afternoon purchase time",
        }
    }
}

/// A sub-field the owning rule could not interpret. Never fatal to scoring.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleError {
    #[error("total '{value}' is not a decimal amount: {source}")]
    Total { value: String, source: AmountError },
    #[error("price '{value}' is not a decimal amount: {source}")]
    Price { value: String, source: AmountError },
    #[error("purchase date '{value}' is not YYYY-MM-DD: {source}")]
    PurchaseDate {
        value: String,
        source: chrono::ParseError,
    },
    #[error("purchase time '{value}' is not HH:MM: {source}")]
    PurchaseTime {
        value: String,
        source: chrono::ParseError,
    },
}

pub(crate) struct Award {
    pub points: u64,
    pub notes: String,
}

impl Award {
    fn new(points: u64, notes: impl Into<String>) -> Self {
        Self {
            points,
            notes: notes.into(),
        }
    }
}

pub(crate) fn retailer_name(retailer: &str) -> Award {
    let count = retailer
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .count() as u64;
    Award::new(count, format!("{count} alphanumeric character(s) in retailer"))
}

pub(crate) fn round_dollar_total(total: &str) -> Award {
    if total.ends_with(ROUND_DOLLAR_SUFFIX) {
        Award::new(ROUND_DOLLAR_POINTS, format!("total {total} is a round dollar amount"))
    } else {
        Award::new(0, format!("total {total} has cents"))
    }
}

pub(crate) fn quarter_multiple_total(total: &str) -> Result<Award, RuleError> {
    let cents = total
        .parse::<Amount>()
        .and_then(|amount| amount.cents())
        .map_err(|source| RuleError::Total {
            value: total.to_string(),
            source,
        })?;

    if cents % QUARTER_CENTS == 0 {
        Ok(Award::new(
            QUARTER_MULTIPLE_POINTS,
            format!("total {total} is a multiple of 0.25"),
        ))
    } else {
        Ok(Award::new(0, format!("total {total} is not a multiple of 0.25")))
    }
}

pub(crate) fn item_pairs(items: &[Item]) -> Award {
    let pairs = (items.len() / 2) as u64;
    Award::new(
        pairs * ITEM_PAIR_POINTS,
        format!("{pairs} pair(s) across {} item(s)", items.len()),
    )
}

pub(crate) fn item_descriptions(items: &[Item]) -> Award {
    let mut points = 0;
    let mut qualifying = 0;

    for (index, item) in items.iter().enumerate() {
        match item_description(item) {
            Ok(Some(bonus)) => {
                qualifying += 1;
                points += bonus;
            }
            Ok(None) => {}
            Err(error) => {
                warn!(
                    rule = RuleKind::ItemDescriptions.label(),
                    item = index,
                    %error,
                    "item skipped"
                );
            }
        }
    }

    Award::new(
        points,
        format!("{qualifying} item(s) with description length divisible by 3"),
    )
}

/// `None` when the trimmed description length is not a multiple of three.
fn item_description(item: &Item) -> Result<Option<u64>, RuleError> {
    // Byte length of the trimmed text; an empty description counts as a multiple.
    let trimmed = item.short_description.trim();
    if trimmed.len() % DESCRIPTION_LENGTH_MULTIPLE != 0 {
        return Ok(None);
    }

    let price: Amount = item.price.parse().map_err(|source| RuleError::Price {
        value: item.price.clone(),
        source,
    })?;

    Ok(Some(price.ceil_fraction(1, 5)))
}

pub(crate) fn odd_purchase_day(purchase_date: &str) -> Result<Award, RuleError> {
    let date = NaiveDate::parse_from_str(purchase_date, "%Y-%m-%d").map_err(|source| {
        RuleError::PurchaseDate {
            value: purchase_date.to_string(),
            source,
        }
    })?;

    if date.day() % 2 == 1 {
        Ok(Award::new(ODD_DAY_POINTS, format!("day {} is odd", date.day())))
    } else {
        Ok(Award::new(0, format!("day {} is even", date.day())))
    }
}

pub(crate) fn afternoon_purchase_time(purchase_time: &str) -> Result<Award, RuleError> {
    let time = NaiveTime::parse_from_str(purchase_time, "%H:%M").map_err(|source| {
        RuleError::PurchaseTime {
            value: purchase_time.to_string(),
            source,
        }
    })?;

    if (AFTERNOON_START_HOUR..AFTERNOON_END_HOUR).contains(&time.hour()) {
        Ok(Award::new(
            AFTERNOON_POINTS,
            format!("purchased at {purchase_time}, between 14:00 and 16:00"),
        ))
    } else {
        Ok(Award::new(
            0,
            format!("purchased at {purchase_time}, outside 14:00 to 16:00"),
        ))
    }
}
