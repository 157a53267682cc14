use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::warn;
use uuid::Uuid;

use super::domain::ReceiptId;

const MAX_GENERATOR_ATTEMPTS: usize = 8;

/// Source of fresh receipt identifiers.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> ReceiptId;
}

/// Random 128-bit (v4 UUID) identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> ReceiptId {
        ReceiptId::from(Uuid::new_v4())
    }
}

/// Write-once, in-memory mapping from issued identifiers to points.
///
/// Each `put` and `get` holds the lock for a single map operation, so readers
/// never see a partially written record and concurrent writers never lose one.
pub struct ScoreStore<G = UuidGenerator> {
    records: RwLock<HashMap<ReceiptId, u64>>,
    ids: G,
}

impl ScoreStore<UuidGenerator> {
    pub fn new() -> Self {
        Self::with_generator(UuidGenerator)
    }
}

impl Default for ScoreStore<UuidGenerator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> ScoreStore<G>
where
    G: IdGenerator,
{
    pub fn with_generator(ids: G) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            ids,
        }
    }

    /// Stores `points` under a newly minted identifier and returns it.
    ///
    /// An identifier already held by the store is never reissued. Candidates
    /// are generated outside the lock; after `MAX_GENERATOR_ATTEMPTS`
    /// collisions the store falls back to random v4 identifiers.
    pub fn put(&self, points: u64) -> ReceiptId {
        for _ in 0..MAX_GENERATOR_ATTEMPTS {
            if let Some(id) = self.insert_vacant(self.ids.generate(), points) {
                return id;
            }
        }

        warn!(
            attempts = MAX_GENERATOR_ATTEMPTS,
            "identifier generator keeps colliding; using random identifiers"
        );
        loop {
            if let Some(id) = self.insert_vacant(UuidGenerator.generate(), points) {
                return id;
            }
        }
    }

    fn insert_vacant(&self, candidate: ReceiptId, points: u64) -> Option<ReceiptId> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        match records.entry(candidate) {
            Entry::Vacant(slot) => {
                let id = slot.key().clone();
                slot.insert(points);
                Some(id)
            }
            Entry::Occupied(slot) => {
                warn!(id = %slot.key(), "generated identifier already issued; retrying");
                None
            }
        }
    }

    /// Points for a previously issued identifier, `None` when unknown.
    pub fn get(&self, id: &ReceiptId) -> Option<u64> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        records.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
