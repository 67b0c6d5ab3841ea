//! Reqwest adapter for the inventory API.
//!
//! Owns transport details only: request construction, the bearer credential,
//! timeout, HTTP status classification, and JSON decoding. A 401 from any
//! endpoint drops the stored credential so the caller is forced back through
//! sign-in.

use std::sync::RwLock;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::{
    api::Backend,
    config::AppConfig,
    dto::{
        auth::{LoginRequest, LoginResponse},
        sales::{NewSaleRequest, SaleConfirmation},
    },
    error::ApiError,
    models::{DailySummary, Item, Sale, User},
};

use async_trait::async_trait;

pub struct HttpBackend {
    client: Client,
    base: String,
    token: RwLock<Option<String>>,
}

impl HttpBackend {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.http_timeout).build()?;
        Ok(Self {
            client,
            base: config.api_url.as_str().trim_end_matches('/').to_owned(),
            token: RwLock::new(None),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base)
    }

    fn bearer(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn store_token(&self, token: Option<String>) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = token;
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.bearer() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Pass successful responses through; classify everything else.
    async fn check(&self, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            self.store_token(None);
        }
        let retry_after = retry_after_secs(&response);
        let detail = error_detail(response).await;
        Err(ApiError::from_status(status, retry_after, detail))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.authorized(self.client.get(self.url(path))).send().await?;
        let response = self.check(response).await?;
        response.json().await.map_err(|_| ApiError::InvalidResponse)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let payload = LoginRequest {
            email: email.to_owned(),
            password: password.to_owned(),
        };
        let response = self
            .client
            .post(self.url("auth/login"))
            .json(&payload)
            .send()
            .await?;
        let response = self.check(response).await?;
        let body: LoginResponse = response.json().await.map_err(|_| ApiError::InvalidResponse)?;
        self.store_token(Some(body.access_token));
        Ok(())
    }

    fn sign_out(&self) {
        self.store_token(None);
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.get_json("auth/me").await
    }

    async fn lookup_item(&self, barcode: &str) -> Result<Item, ApiError> {
        self.get_json(&format!("items/{barcode}")).await
    }

    async fn submit_sale(
        &self,
        request: &NewSaleRequest,
    ) -> Result<Vec<SaleConfirmation>, ApiError> {
        tracing::debug!(lines = request.items.len(), "submitting sale");
        let response = self
            .authorized(self.client.post(self.url("sales")).json(request))
            .send()
            .await?;
        let response = self.check(response).await?;
        response.json().await.map_err(|_| ApiError::InvalidResponse)
    }

    async fn recent_sales(&self, limit: i64) -> Result<Vec<Sale>, ApiError> {
        self.get_json(&format!("sales?limit={limit}")).await
    }

    async fn daily_summary(&self) -> Result<DailySummary, ApiError> {
        self.get_json("sales/daily").await
    }

    async fn low_stock(&self, threshold: i32) -> Result<Vec<Item>, ApiError> {
        self.get_json(&format!("inventory/low-stock?threshold={threshold}"))
            .await
    }
}

fn retry_after_secs(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

async fn error_detail(response: Response) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: Option<String>,
    }
    response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail)
}
