//! The inventory backend contract.
//!
//! The workflow code depends on this trait rather than on a concrete HTTP
//! client, so tests drive it with an in-memory implementation. [`http`]
//! holds the reqwest adapter used by the binary.

use async_trait::async_trait;

use crate::{
    dto::sales::{NewSaleRequest, SaleConfirmation},
    error::ApiError,
    models::{DailySummary, Item, Sale, User},
};

pub mod http;

pub use http::HttpBackend;

#[async_trait]
pub trait Backend: Send + Sync {
    /// Authenticate and retain the session credential for later calls.
    async fn login(&self, email: &str, password: &str) -> Result<(), ApiError>;

    /// Drop the session credential.
    fn sign_out(&self);

    async fn current_user(&self) -> Result<User, ApiError>;

    /// Single-item read. A missing barcode surfaces as [`ApiError::NotFound`].
    async fn lookup_item(&self, barcode: &str) -> Result<Item, ApiError>;

    /// One call per completed cart; the authoritative stock and price check
    /// happens server-side. Returns per-line sale confirmations.
    async fn submit_sale(
        &self,
        request: &NewSaleRequest,
    ) -> Result<Vec<SaleConfirmation>, ApiError>;

    async fn recent_sales(&self, limit: i64) -> Result<Vec<Sale>, ApiError>;

    async fn daily_summary(&self) -> Result<DailySummary, ApiError>;

    async fn low_stock(&self, threshold: i32) -> Result<Vec<Item>, ApiError>;
}
