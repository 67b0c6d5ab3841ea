//! The sale-entry workflow: barcode lookup, cart accumulation, and the
//! aggregated submission.
//!
//! One [`SaleEntry`] exists per entry session. Lookup transitions
//! `Idle -> Searching -> Found | NotFound` while the cart persists across
//! them; `finalize` moves through `Submitting` and either clears everything
//! on success or leaves the cart intact for retry on failure.

use std::time::Duration;

use uuid::Uuid;

use crate::{
    api::Backend,
    cart::{self, Cart},
    dto::sales::SaleSummary,
    error::{ApiError, AppResult, CartError},
    models::{Item, Sale},
};

/// Lookups fire once the entered code reaches this length.
pub const MIN_LOOKUP_LEN: usize = 3;

/// How long the driver waits after a completed sale before refreshing the
/// ledger and closing the entry session.
pub const POST_SALE_REFRESH_DELAY: Duration = Duration::from_secs(2);

pub const RECENT_SALES_LIMIT: i64 = 100;

pub const ITEM_NOT_FOUND: &str = "item not found";
pub const LOOKUP_FAILED: &str = "could not look up item";
pub const ADDED_TO_CART: &str = "item added to cart";

#[derive(Debug, Clone, Default)]
pub enum LookupState {
    #[default]
    Idle,
    Searching,
    Found(Item),
    NotFound(String),
}

#[derive(Debug, Default)]
pub struct SaleEntry {
    barcode_input: String,
    quantity_input: String,
    device_id: Option<String>,
    cashier_override: Option<Uuid>,
    lookup: LookupState,
    cart: Cart,
    submitting: bool,
}

impl SaleEntry {
    pub fn new(device_id: Option<String>) -> Self {
        Self {
            quantity_input: "1".to_owned(),
            device_id,
            ..Self::default()
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn lookup(&self) -> &LookupState {
        &self.lookup
    }

    pub fn barcode_input(&self) -> &str {
        &self.barcode_input
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_quantity_input(&mut self, raw: impl Into<String>) {
        self.quantity_input = raw.into();
    }

    /// Record a sale on behalf of another user; `None` means the current
    /// session user.
    pub fn assign_cashier(&mut self, user_id: Option<Uuid>) {
        self.cashier_override = user_id;
    }

    /// Update the barcode field. Below [`MIN_LOOKUP_LEN`] characters no
    /// lookup fires; at or above it, the backend is queried and the result
    /// (or a not-found message) held as the lookup state. Only a 401
    /// propagates; other failures are operator feedback, not errors.
    pub async fn enter_barcode(
        &mut self,
        backend: &dyn Backend,
        barcode: impl Into<String>,
    ) -> Result<(), ApiError> {
        self.barcode_input = barcode.into();
        self.lookup = LookupState::Idle;
        if self.barcode_input.len() < MIN_LOOKUP_LEN {
            return Ok(());
        }

        self.lookup = LookupState::Searching;
        match backend.lookup_item(&self.barcode_input).await {
            Ok(item) => {
                self.lookup = LookupState::Found(item);
            }
            Err(ApiError::NotFound) => {
                self.lookup = LookupState::NotFound(ITEM_NOT_FOUND.to_owned());
            }
            Err(ApiError::Unauthorized) => {
                self.lookup = LookupState::Idle;
                return Err(ApiError::Unauthorized);
            }
            Err(error) => {
                tracing::warn!(barcode = %self.barcode_input, error = %error, "item lookup failed");
                self.lookup = LookupState::NotFound(LOOKUP_FAILED.to_owned());
            }
        }
        Ok(())
    }

    /// Move the looked-up item into the cart using the current quantity
    /// field. On success the lookup field and held snapshot are cleared and
    /// the quantity field reset for the next scan.
    pub fn add_to_cart(&mut self) -> Result<(), CartError> {
        if self.barcode_input.is_empty() {
            return Err(CartError::BarcodeRequired);
        }
        let LookupState::Found(item) = &self.lookup else {
            return Err(CartError::NoItemSelected);
        };
        let quantity = cart::parse_quantity(&self.quantity_input)?;
        self.cart.add(item, quantity)?;

        self.barcode_input.clear();
        self.lookup = LookupState::Idle;
        self.quantity_input = "1".to_owned();
        Ok(())
    }

    pub fn remove_line(&mut self, barcode: &str) {
        self.cart.remove(barcode);
    }

    pub fn set_line_quantity(&mut self, barcode: &str, quantity: i32) -> Result<(), CartError> {
        self.cart.set_quantity(barcode, quantity)
    }

    /// Submit the whole cart as one aggregated request. An empty cart is
    /// rejected before any network call; a call while a submission is
    /// outstanding is refused. On failure the cart is kept intact so the
    /// operator can retry without re-entering items.
    pub async fn finalize(&mut self, backend: &dyn Backend) -> AppResult<SaleSummary> {
        if self.cart.is_empty() {
            return Err(CartError::EmptyCart.into());
        }
        if self.submitting {
            return Err(CartError::SubmissionInFlight.into());
        }

        self.submitting = true;
        let request = self.cart.to_request(self.device_id.clone(), self.cashier_override);
        let result = backend.submit_sale(&request).await;
        self.submitting = false;

        let confirmations = result?;
        let summary = SaleSummary {
            lines_sold: confirmations.len(),
            total_amount: confirmations.iter().map(|line| line.total).sum(),
        };
        self.cart.clear();
        self.barcode_input.clear();
        self.lookup = LookupState::Idle;
        self.quantity_input = "1".to_owned();
        tracing::info!(
            lines = summary.lines_sold,
            total = summary.total_amount,
            "sale recorded"
        );
        Ok(summary)
    }

    /// Discard the cart unconditionally. Not undoable.
    pub fn cancel(&mut self) {
        self.cart.clear();
        self.barcode_input.clear();
        self.lookup = LookupState::Idle;
        self.quantity_input = "1".to_owned();
    }
}

/// Case-insensitive substring filter over the ledger view.
pub fn filter_sales<'a>(sales: &'a [Sale], needle: &str) -> Vec<&'a Sale> {
    if needle.is_empty() {
        return sales.iter().collect();
    }
    let needle = needle.to_lowercase();
    sales
        .iter()
        .filter(|sale| {
            sale.item_name.to_lowercase().contains(&needle)
                || sale.barcode.to_lowercase().contains(&needle)
                || sale
                    .device_id
                    .as_deref()
                    .is_some_and(|device| device.to_lowercase().contains(&needle))
                || sale
                    .cashier
                    .as_deref()
                    .is_some_and(|cashier| cashier.to_lowercase().contains(&needle))
        })
        .collect()
}
