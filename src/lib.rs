//! Point-of-sale front-end core.
//!
//! The two load-bearing pieces are the cart engine ([`cart`], [`sales`]),
//! covering barcode-driven lookup, stock-aware quantity merging, and the
//! single aggregated sale submission, and the role-based access-control
//! evaluator ([`permissions`]) that gates every page and mutating action.
//! The rest is plumbing around them: the backend contract and its reqwest
//! adapter ([`api`]), the explicit session context ([`session`]), and the
//! wire types.

pub mod api;
pub mod cart;
pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod permissions;
pub mod sales;
pub mod session;
