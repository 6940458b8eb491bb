//! View-model layer between `paydeck-api` and UI consumers (CLI / TUI).
//!
//! This crate owns the behavior every back-office screen shares, factored
//! out of the per-page duplication the original dashboards accumulate:
//!
//! - **[`RemoteList<T>`]** — THE generic list controller: search, filters,
//!   sort, date window, and page state; builds the server query; commits
//!   responses behind a monotonic sequence guard so out-of-order responses
//!   are dropped instead of racing. Search/filter/sort/date changes reset
//!   to page 1; pagination keeps the chosen page; failures clear the rows
//!   and store a display message, with 401-shaped failures routed to a
//!   distinct [`FailureKind::AuthExpired`].
//!
//! - **[`Picker<T>`]** — bounded candidate set with client-side substring
//!   filtering, behind the record-picker dialogs.
//!
//! - **[`Backoffice`]** — typed facade over the HTTP client. No cache, no
//!   background refresh: the standard policy after any mutation is to
//!   refetch the current page.
//!
//! - **[`CoreError`]** — display-ready diagnostics; consumers never see
//!   transport errors raw.

pub mod backoffice;
pub mod config;
pub mod error;
pub mod list;
pub mod picker;

pub use backoffice::Backoffice;
pub use config::{ClientConfig, TlsVerification};
pub use error::CoreError;
pub use list::{Applied, FailureKind, LoadPhase, RemoteList, Sort, Ticket};
pub use picker::{Picker, PickerItem};

// Wire types are the domain types: one API surface, one typed DTO set.
pub use paydeck_api::types::{
    Aggregator, Commission, CommissionConfig, CommissionConfigUpdate, CommissionStatus,
    DashboardStats, DeviceAuthStatus, DeviceAuthorization, Page, Partner, Platform,
    PlatformMapping, Transaction, TransactionStats, TransactionStatus, Transfer, TransferStatus,
};
pub use paydeck_api::{ListParams, SortDirection};
