use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Inventory item as served by the backend. `barcode` is the identity key;
/// `price` is in minor units (cents).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub barcode: String,
    pub name: String,
    pub price: i64,
    pub stock: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Roles known to the permission tables. Servers may grow new roles before
/// the client does, so unrecognized values decode to `Unknown`, which every
/// permission check denies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", from = "String")]
pub enum Role {
    SuperUser,
    Admin,
    Seller,
    Viewer,
    Unknown,
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "SUPER_USER" => Self::SuperUser,
            "ADMIN" => Self::Admin,
            "SELLER" => Self::Seller,
            "VIEWER" => Self::Viewer,
            _ => Self::Unknown,
        }
    }
}

/// One row of the sales ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: Uuid,
    pub barcode: String,
    pub item_name: String,
    pub quantity: i32,
    pub price: i64,
    pub total: i64,
    pub sold_at: DateTime<Utc>,
    pub device_id: Option<String>,
    pub cashier: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DailySummary {
    pub total_sales: i64,
    pub total_items_sold: i64,
    pub total_revenue: i64,
}

/// Render minor units as a dollar amount, e.g. `2500` -> `$25.00`.
pub fn format_money(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}
