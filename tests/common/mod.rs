#![allow(dead_code)]

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use pos_terminal::{
    api::Backend,
    dto::sales::{NewSaleRequest, SaleConfirmation},
    error::ApiError,
    models::{DailySummary, Item, Role, Sale, User},
};

pub fn item(barcode: &str, name: &str, price: i64, stock: i32) -> Item {
    Item {
        barcode: barcode.to_owned(),
        name: name.to_owned(),
        price,
        stock,
    }
}

pub fn user_with_role(role: Option<Role>) -> User {
    User {
        id: Uuid::new_v4(),
        name: "Test Cashier".to_owned(),
        email: "cashier@example.com".to_owned(),
        role,
    }
}

/// In-memory stand-in for the inventory API. Seeded with items; records
/// submissions and appends them to an internal ledger so refresh behavior
/// can be asserted.
#[derive(Default)]
pub struct FakeBackend {
    pub items: Vec<Item>,
    pub user: Option<User>,
    submitted: Mutex<Vec<NewSaleRequest>>,
    ledger: Mutex<Vec<Sale>>,
    submit_failure: Mutex<Option<ApiError>>,
    lookup_failure: Mutex<Option<ApiError>>,
    pub lookup_calls: AtomicUsize,
    pub submit_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items,
            user: Some(user_with_role(Some(Role::Admin))),
            ..Self::default()
        }
    }

    pub fn fail_next_submit(&self, error: ApiError) {
        *self.submit_failure.lock().unwrap() = Some(error);
    }

    pub fn fail_next_lookup(&self, error: ApiError) {
        *self.lookup_failure.lock().unwrap() = Some(error);
    }

    pub fn submitted_requests(&self) -> Vec<NewSaleRequest> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn lookup_count(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    pub fn submit_count(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn login(&self, _email: &str, password: &str) -> Result<(), ApiError> {
        if password == "wrong" {
            return Err(ApiError::Unauthorized);
        }
        Ok(())
    }

    fn sign_out(&self) {}

    async fn current_user(&self) -> Result<User, ApiError> {
        self.user.clone().ok_or(ApiError::Unauthorized)
    }

    async fn lookup_item(&self, barcode: &str) -> Result<Item, ApiError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.lookup_failure.lock().unwrap().take() {
            return Err(error);
        }
        self.items
            .iter()
            .find(|item| item.barcode == barcode)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    async fn submit_sale(
        &self,
        request: &NewSaleRequest,
    ) -> Result<Vec<SaleConfirmation>, ApiError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.submit_failure.lock().unwrap().take() {
            return Err(error);
        }

        let mut confirmations = Vec::new();
        let mut rows = Vec::new();
        for line in &request.items {
            let item = self
                .items
                .iter()
                .find(|item| item.barcode == line.barcode)
                .ok_or_else(|| ApiError::Server(format!("unknown barcode {}", line.barcode)))?;
            let total = item.price * i64::from(line.quantity);
            confirmations.push(SaleConfirmation {
                barcode: line.barcode.clone(),
                quantity: line.quantity,
                price: item.price,
                total,
            });
            rows.push(Sale {
                id: Uuid::new_v4(),
                barcode: item.barcode.clone(),
                item_name: item.name.clone(),
                quantity: line.quantity,
                price: item.price,
                total,
                sold_at: Utc::now(),
                device_id: request.device_id.clone(),
                cashier: None,
            });
        }

        self.submitted.lock().unwrap().push(request.clone());
        self.ledger.lock().unwrap().extend(rows);
        Ok(confirmations)
    }

    async fn recent_sales(&self, limit: i64) -> Result<Vec<Sale>, ApiError> {
        let ledger = self.ledger.lock().unwrap();
        Ok(ledger.iter().rev().take(limit as usize).cloned().collect())
    }

    async fn daily_summary(&self) -> Result<DailySummary, ApiError> {
        let ledger = self.ledger.lock().unwrap();
        Ok(DailySummary {
            total_sales: ledger.len() as i64,
            total_items_sold: ledger.iter().map(|sale| i64::from(sale.quantity)).sum(),
            total_revenue: ledger.iter().map(|sale| sale.total).sum(),
        })
    }

    async fn low_stock(&self, threshold: i32) -> Result<Vec<Item>, ApiError> {
        Ok(self
            .items
            .iter()
            .filter(|item| item.stock <= threshold)
            .cloned()
            .collect())
    }
}
