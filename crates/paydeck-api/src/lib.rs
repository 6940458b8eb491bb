//! Async Rust client for the paydeck back-office REST API.
//!
//! The back office is a plain JSON/HTTPS API rooted at a configurable
//! base URL. Every list endpoint shares the same pagination envelope
//! (`{count, results}`) and query parameter family (`page`, `page_size`,
//! `search`, `ordering`, categorical filters, creation-date window);
//! [`ListParams`] builds those parameters and [`Page`] decodes the
//! envelope.
//!
//! - [`BackofficeClient`] — one method per endpoint: typed lists, detail
//!   fetches, and the operator mutations (cancellation decisions, partner
//!   and platform activation, device approval/revocation, commission
//!   payout).
//! - [`Error`] — transport and API failures, with 401 surfaced as
//!   [`Error::SessionExpired`] so consumers can route session expiry to
//!   its own UI path.
//! - [`TransportConfig`] — shared `reqwest::Client` construction (TLS
//!   mode, timeout, bearer token header).
//!
//! Responses are decoded into typed DTOs ([`types`]) at the boundary;
//! monetary amounts are `rust_decimal::Decimal`.

pub mod client;
pub mod error;
pub mod query;
pub mod transport;
pub mod types;

pub use client::BackofficeClient;
pub use error::Error;
pub use query::{ListParams, SortDirection};
pub use transport::{TlsMode, TransportConfig};
pub use types::Page;
