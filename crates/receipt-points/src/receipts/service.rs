use tracing::info;

use super::domain::{Receipt, ReceiptId};
use super::scoring::ScoringEngine;
use super::store::{IdGenerator, ScoreStore, UuidGenerator};

/// Service composing the scoring engine with the score store.
pub struct ReceiptService<G = UuidGenerator> {
    engine: ScoringEngine,
    store: ScoreStore<G>,
}

impl ReceiptService<UuidGenerator> {
    pub fn new() -> Self {
        Self::with_store(ScoreStore::new())
    }
}

impl Default for ReceiptService<UuidGenerator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> ReceiptService<G>
where
    G: IdGenerator,
{
    pub fn with_store(store: ScoreStore<G>) -> Self {
        Self {
            engine: ScoringEngine::new(),
            store,
        }
    }

    /// Score a receipt and remember the result under a fresh identifier.
    pub fn process(&self, receipt: &Receipt) -> ReceiptId {
        let points = self.engine.score(receipt);
        let id = self.store.put(points);
        info!(%id, points, "receipt processed");
        id
    }

    /// Points previously recorded for `id`.
    pub fn points(&self, id: &ReceiptId) -> Result<u64, ReceiptServiceError> {
        self.store
            .get(id)
            .ok_or_else(|| ReceiptServiceError::NotFound(id.clone()))
    }

    pub fn store(&self) -> &ScoreStore<G> {
        &self.store
    }
}

/// Error raised by the receipt service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReceiptServiceError {
    #[error("no receipt found for id {0}")]
    NotFound(ReceiptId),
}
