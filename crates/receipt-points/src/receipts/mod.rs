//! Receipt intake, scoring, and points lookup.
//!
//! Receipts are scored by [`ScoringEngine`], the result is kept in a
//! [`ScoreStore`] under a freshly minted [`ReceiptId`], and the HTTP router
//! serves both halves of the exchange.

pub mod domain;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{Item, PointsView, ProcessedReceiptView, Receipt, ReceiptId};
pub use router::receipt_router;
pub use scoring::{score, RuleError, RuleKind, ScoreCard, ScoreComponent, ScoringEngine};
pub use service::{ReceiptService, ReceiptServiceError};
pub use store::{IdGenerator, ScoreStore, UuidGenerator};
