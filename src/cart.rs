//! In-memory cart for one sale-entry session.
//!
//! Lines are kept in insertion order and keyed by barcode; a barcode appears
//! at most once, re-adding merges quantities. Each line carries the stock
//! value observed when the item was added (or last re-looked-up), and local
//! validation never lets the quantity exceed that snapshot. The server
//! re-checks stock authoritatively at submission time.

use uuid::Uuid;

use crate::{
    dto::sales::{NewSaleRequest, SaleLineRequest},
    error::CartError,
    models::Item,
};

#[derive(Debug, Clone)]
pub struct CartLine {
    pub barcode: String,
    pub name: String,
    pub unit_price: i64,
    pub available_stock: i32,
    pub quantity: i32,
}

impl CartLine {
    pub fn subtotal(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

#[derive(Debug, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` of `item`, merging into an existing line for the same
    /// barcode. Rejections leave the cart unchanged.
    pub fn add(&mut self, item: &Item, quantity: i32) -> Result<(), CartError> {
        if quantity <= 0 {
            return Err(CartError::InvalidQuantity);
        }
        if quantity > item.stock {
            return Err(CartError::InsufficientStock {
                available: item.stock,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.barcode == item.barcode) {
            let merged = line.quantity + quantity;
            if merged > item.stock {
                return Err(CartError::InsufficientStockMerged {
                    available: item.stock,
                    in_cart: line.quantity,
                });
            }
            line.quantity = merged;
            // The caller just looked the item up, so refresh the snapshot.
            line.available_stock = item.stock;
        } else {
            self.lines.push(CartLine {
                barcode: item.barcode.clone(),
                name: item.name.clone(),
                unit_price: item.price,
                available_stock: item.stock,
                quantity,
            });
        }
        Ok(())
    }

    /// Idempotent: removing an absent barcode is a no-op.
    pub fn remove(&mut self, barcode: &str) {
        self.lines.retain(|line| line.barcode != barcode);
    }

    /// Replace a line's quantity. Zero or negative removes the line; more
    /// than the stock snapshot is rejected and the line kept as it was.
    pub fn set_quantity(&mut self, barcode: &str, quantity: i32) -> Result<(), CartError> {
        if quantity <= 0 {
            self.remove(barcode);
            return Ok(());
        }
        let Some(line) = self.lines.iter_mut().find(|l| l.barcode == barcode) else {
            return Ok(());
        };
        if quantity > line.available_stock {
            return Err(CartError::InsufficientStock {
                available: line.available_stock,
            });
        }
        line.quantity = quantity;
        Ok(())
    }

    /// Cart total in minor units, recomputed on demand.
    pub fn total(&self) -> i64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Build the single aggregated submission for the whole cart.
    pub fn to_request(&self, device_id: Option<String>, user_id: Option<Uuid>) -> NewSaleRequest {
        NewSaleRequest {
            items: self
                .lines
                .iter()
                .map(|line| SaleLineRequest {
                    barcode: line.barcode.clone(),
                    quantity: line.quantity,
                })
                .collect(),
            device_id,
            user_id,
        }
    }
}

/// Strict quantity parse: non-numeric, zero, and negative input are invalid,
/// never coerced.
pub fn parse_quantity(raw: &str) -> Result<i32, CartError> {
    match raw.trim().parse::<i32>() {
        Ok(quantity) if quantity > 0 => Ok(quantity),
        _ => Err(CartError::InvalidQuantity),
    }
}
