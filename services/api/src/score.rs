use clap::Args;
use receipt_points::error::AppError;
use receipt_points::receipts::{Receipt, ScoreCard, ScoringEngine};
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a receipt JSON document
    pub(crate) receipt: PathBuf,
    /// Print the breakdown as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.receipt)?;
    let receipt: Receipt = serde_json::from_str(&raw)?;
    let card = ScoringEngine::new().evaluate(&receipt);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&card)?);
    } else {
        print!("{}", render_breakdown(&receipt, &card));
    }
    Ok(())
}

pub(crate) fn render_breakdown(receipt: &Receipt, card: &ScoreCard) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Receipt from {} on {} at {} ({} item(s), total {})",
        receipt.retailer,
        receipt.purchase_date,
        receipt.purchase_time,
        receipt.items.len(),
        receipt.total
    );
    for component in &card.components {
        let _ = writeln!(
            out,
            "  {:<24} {:>5}  {}",
            component.rule.label(),
            component.points,
            component.notes
        );
    }
    let _ = writeln!(out, "  {:<24} {:>5}", "total", card.total);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use receipt_points::receipts::Item;

    fn receipt() -> Receipt {
        Receipt {
            retailer: "M&M Corner Market".to_string(),
            purchase_date: "2022-03-20".to_string(),
            purchase_time: "14:33".to_string(),
            items: vec![
                Item {
                    short_description: "Gatorade".to_string(),
                    price: "2.25".to_string(),
                };
                4
            ],
            total: "9.00".to_string(),
        }
    }

    #[test]
    fn breakdown_lists_each_rule_and_the_total() {
        let receipt = receipt();
        let card = ScoringEngine::new().evaluate(&receipt);
        let rendered = render_breakdown(&receipt, &card);

        assert!(rendered.starts_with("Receipt from M&M Corner Market"));
        assert!(rendered.contains("round dollar total"));
        assert!(rendered.contains("afternoon purchase time"));
        let last = rendered.lines().last().expect("total line");
        assert!(last.contains("total") && last.trim_end().ends_with("109"));
    }

    #[test]
    fn missing_receipt_file_is_an_io_error() {
        let err = run_score(ScoreArgs {
            receipt: PathBuf::from("/nonexistent/receipt.json"),
            json: false,
        })
        .expect_err("file is missing");
        assert!(matches!(err, AppError::Io(_)));
    }
}
