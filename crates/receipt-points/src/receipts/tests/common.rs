use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::receipts::domain::{Item, Receipt, ReceiptId};
use crate::receipts::store::{IdGenerator, ScoreStore};
use crate::receipts::{receipt_router, ReceiptService};

pub(super) fn item(description: &str, price: &str) -> Item {
    Item {
        short_description: description.to_string(),
        price: price.to_string(),
    }
}

pub(super) fn target_receipt() -> Receipt {
    Receipt {
        retailer: "Target".to_string(),
        purchase_date: "2022-01-01".to_string(),
        purchase_time: "13:01".to_string(),
        items: vec![
            item("Mountain Dew 12PK", "6.49"),
            item("Emils Cheese Pizza", "12.25"),
            item("Knorr Creamy Chicken", "1.26"),
            item("Doritos Nacho Cheese", "3.35"),
            item("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
        ],
        total: "35.35".to_string(),
    }
}

pub(super) fn corner_market_receipt() -> Receipt {
    Receipt {
        retailer: "M&M Corner Market".to_string(),
        purchase_date: "2022-03-20".to_string(),
        purchase_time: "14:33".to_string(),
        items: vec![item("Gatorade", "2.25"); 4],
        total: "9.00".to_string(),
    }
}

/// Receipt that only earns the retailer rule: no items, odd cents, even day, morning.
pub(super) fn plain_receipt(retailer: &str) -> Receipt {
    Receipt {
        retailer: retailer.to_string(),
        purchase_date: "2022-03-20".to_string(),
        purchase_time: "09:15".to_string(),
        items: Vec::new(),
        total: "1.01".to_string(),
    }
}

pub(super) fn target_receipt_json() -> Value {
    serde_json::to_value(target_receipt()).expect("receipt serializes")
}

/// Deterministic identifiers, `receipt-1`, `receipt-2`, ...
#[derive(Default)]
pub(super) struct SequentialIds {
    next: AtomicU64,
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> ReceiptId {
        let id = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        ReceiptId(format!("receipt-{id}"))
    }
}

/// Replays a scripted list of identifiers, then falls back to a sequence.
pub(super) struct ScriptedIds {
    script: Mutex<Vec<ReceiptId>>,
    fallback: SequentialIds,
}

impl ScriptedIds {
    pub(super) fn new(ids: &[&str]) -> Self {
        let mut script: Vec<ReceiptId> = ids.iter().map(|id| ReceiptId(id.to_string())).collect();
        script.reverse();
        Self {
            script: Mutex::new(script),
            fallback: SequentialIds::default(),
        }
    }
}

impl IdGenerator for ScriptedIds {
    fn generate(&self) -> ReceiptId {
        let next = self.script.lock().expect("script mutex poisoned").pop();
        next.unwrap_or_else(|| self.fallback.generate())
    }
}

/// Always hands out the same identifier.
pub(super) struct ConstantIds(pub(super) &'static str);

impl IdGenerator for ConstantIds {
    fn generate(&self) -> ReceiptId {
        ReceiptId(self.0.to_string())
    }
}

pub(super) fn build_service() -> Arc<ReceiptService<SequentialIds>> {
    Arc::new(ReceiptService::with_store(ScoreStore::with_generator(
        SequentialIds::default(),
    )))
}

pub(super) fn router_with_service(service: Arc<ReceiptService<SequentialIds>>) -> axum::Router {
    receipt_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
