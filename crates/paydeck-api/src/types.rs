//! Response and request types for the back-office REST API.
//!
//! All types match the JSON payloads served under `/api/admin/`. Field
//! names are snake_case on the wire, so no serde renaming is needed
//! except on enum variants. Monetary amounts arrive as decimal strings
//! and deserialize into [`rust_decimal::Decimal`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// ── Pagination ───────────────────────────────────────────────────────

/// Pagination envelope returned by every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// An empty first page.
    pub fn empty() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

// ── Transactions ─────────────────────────────────────────────────────

/// Transaction lifecycle state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
    CancellationRequested,
    Cancelled,
    /// Forward-compatible catch-all for states this build doesn't know.
    #[serde(other)]
    Unknown,
}

/// Transaction — from `GET /api/admin/transactions/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub uid: Uuid,
    pub reference: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: TransactionStatus,
    /// e.g. `purchase`, `refund`, `payout`.
    pub transaction_type: String,
    pub partner_name: Option<String>,
    pub platform_name: Option<String>,
    /// Reason supplied by the partner when requesting cancellation.
    pub cancellation_reason: Option<String>,
    /// Notes recorded by the operator who decided a cancellation.
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Aggregate transaction counters — from `GET /api/admin/transactions/stats/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionStats {
    pub total: u64,
    pub volume: Decimal,
    pub currency: String,
    /// Count per lifecycle state, keyed by the wire status name.
    #[serde(default)]
    pub by_status: HashMap<String, u64>,
}

// ── Partners ─────────────────────────────────────────────────────────

/// Partner (merchant) account — from `GET /api/admin/partners/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub uid: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub is_active: bool,
    pub balance: Decimal,
    pub currency: String,
    /// Back-office permission flags granted to this partner's users.
    #[serde(default)]
    pub permissions: Vec<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Per-partner commission terms — from
/// `GET /api/admin/partners/{uid}/commission-config/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionConfig {
    /// Percentage taken per transaction, e.g. `1.75`.
    pub rate_pct: Decimal,
    /// Flat fee added per transaction.
    pub fixed_fee: Decimal,
    pub currency: String,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial update for commission terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_pct: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_fee: Option<Decimal>,
}

// ── Platforms ────────────────────────────────────────────────────────

/// Integration platform owned by a partner — from `GET /api/admin/platforms/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub uid: Uuid,
    pub name: String,
    /// Short identifier used in payment references.
    pub code: String,
    pub partner_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Routing entry mapping a platform onto a payment aggregator — from
/// `GET /api/admin/platforms/{uid}/mappings/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformMapping {
    pub uid: Uuid,
    pub platform: Uuid,
    pub aggregator: Uuid,
    pub aggregator_name: Option<String>,
    /// Merchant identifier on the aggregator side.
    pub external_id: String,
    pub is_active: bool,
    /// Aggregator-specific routing knobs — kept opaque.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Upstream payment aggregator — from `GET /api/admin/aggregators/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregator {
    pub uid: Uuid,
    pub name: String,
    pub code: String,
    pub is_active: bool,
    /// Connector capabilities vary per aggregator — kept opaque.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

// ── Device authorizations ────────────────────────────────────────────

/// Device authorization state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeviceAuthStatus {
    Pending,
    Approved,
    Revoked,
    #[serde(other)]
    Unknown,
}

/// Payment-terminal authorization request — from `GET /api/admin/devices/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceAuthorization {
    pub uid: Uuid,
    pub serial_number: String,
    pub label: Option<String>,
    pub partner_name: Option<String>,
    pub status: DeviceAuthStatus,
    pub requested_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
    /// Operator who approved or revoked the device.
    pub decided_by: Option<String>,
    pub notes: Option<String>,
}

// ── Commissions ──────────────────────────────────────────────────────

/// Commission settlement state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CommissionStatus {
    Accrued,
    Paid,
    #[serde(other)]
    Unknown,
}

/// Accrued commission entry — from `GET /api/admin/commissions/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commission {
    pub uid: Uuid,
    pub partner_name: Option<String>,
    /// Accounting period, e.g. `2026-07`.
    pub period: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: CommissionStatus,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
}

// ── Transfers ────────────────────────────────────────────────────────

/// Transfer settlement state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransferStatus {
    Pending,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

/// Balance transfer (payout or top-up) — from `GET /api/admin/transfers/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub uid: Uuid,
    pub reference: String,
    pub partner_name: Option<String>,
    pub amount: Decimal,
    pub currency: String,
    /// `payout` or `top_up`.
    pub direction: String,
    pub status: TransferStatus,
    pub created_at: DateTime<Utc>,
}

// ── Dashboard stats ──────────────────────────────────────────────────

/// Back-office overview counters — from `GET /api/admin/stats/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub transactions_today: u64,
    pub volume_today: Decimal,
    pub currency: String,
    pub pending_cancellations: u64,
    pub active_partners: u64,
    pub pending_device_authorizations: u64,
    pub unpaid_commissions_total: Decimal,
    /// Additional counters added server-side land here.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_values_do_not_fail_deserialization() {
        let status: TransactionStatus = serde_json::from_str(r#""charged_back""#).unwrap();
        assert_eq!(status, TransactionStatus::Unknown);
    }

    #[test]
    fn decimal_amounts_parse_from_strings() {
        let json = r#"{
            "count": 1,
            "results": [{
                "uid": "4be9e1a9-7cbd-42ea-8f5a-3ac027a1ed28",
                "reference": "TX-1001",
                "amount": "149.90",
                "currency": "EUR",
                "status": "completed",
                "transaction_type": "purchase",
                "partner_name": "Acme GmbH",
                "platform_name": null,
                "cancellation_reason": null,
                "admin_notes": null,
                "created_at": "2026-08-01T09:30:00Z",
                "updated_at": null
            }]
        }"#;
        let page: Page<Transaction> = serde_json::from_str(json).unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].amount, Decimal::new(14990, 2));
        assert_eq!(page.results[0].status, TransactionStatus::Completed);
    }
}
