use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLineRequest {
    pub barcode: String,
    pub quantity: i32,
}

/// One aggregated submission for the whole cart. The server ledgers each
/// line as a separate sale record or rejects the batch as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSaleRequest {
    pub items: Vec<SaleLineRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

/// Per-line confirmation returned by the sales endpoint. `price` is the
/// authoritative unit price the server charged, `total` the line total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleConfirmation {
    pub barcode: String,
    pub quantity: i32,
    pub price: i64,
    pub total: i64,
}

/// Aggregate shown to the operator after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleSummary {
    pub lines_sold: usize,
    pub total_amount: i64,
}
