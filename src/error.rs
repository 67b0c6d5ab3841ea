use reqwest::StatusCode;
use thiserror::Error;

/// Validation failures detected locally in the cart workflow. These never
/// reach the network; the cart is left unchanged when one is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("barcode is required")]
    BarcodeRequired,

    #[error("search for a valid item first")]
    NoItemSelected,

    #[error("quantity must be greater than 0")]
    InvalidQuantity,

    #[error("insufficient stock, available: {available}")]
    InsufficientStock { available: i32 },

    #[error("insufficient stock, available: {available}, already {in_cart} in cart")]
    InsufficientStockMerged { available: i32, in_cart: i32 },

    #[error("cart is empty")]
    EmptyCart,

    #[error("a sale submission is already in progress")]
    SubmissionInFlight,
}

/// Errors surfaced from the HTTP boundary, classified by status semantics.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("session expired, sign in again")]
    Unauthorized,

    #[error("you do not have permission to perform this action")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("too many requests, try again later{}", retry_hint(.retry_after))]
    RateLimited { retry_after: Option<u64> },

    #[error("request payload too large")]
    PayloadTooLarge,

    #[error("{0}")]
    Server(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response from server")]
    InvalidResponse,
}

fn retry_hint(retry_after: &Option<u64>) -> String {
    retry_after
        .map(|secs| format!(" (retry in {secs}s)"))
        .unwrap_or_default()
}

impl ApiError {
    /// Map a non-success HTTP status to its error variant. `detail` is the
    /// server-provided message extracted from the response body, if any.
    pub fn from_status(
        status: StatusCode,
        retry_after: Option<u64>,
        detail: Option<String>,
    ) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::FORBIDDEN => Self::Forbidden,
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited { retry_after },
            StatusCode::PAYLOAD_TOO_LARGE => Self::PayloadTooLarge,
            status => Self::Server(
                detail.unwrap_or_else(|| format!("request failed with status {status}")),
            ),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type AppResult<T> = Result<T, AppError>;
