// Async HTTP client for the back-office admin API.
//
// Base path: /api/admin/
// Auth: Authorization: Bearer <token> (injected by TransportConfig)

use std::future::Future;

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::error::flatten_error_body;
use crate::query::ListParams;
use crate::{Error, types};

/// Async client for the back-office admin API.
///
/// One instance per configured environment; cheap to clone (the inner
/// `reqwest::Client` is an `Arc`).
#[derive(Debug, Clone)]
pub struct BackofficeClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BackofficeClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL, bearer token, and transport config.
    pub fn new(
        base_url: &str,
        token: &secrecy::SecretString,
        transport: &crate::TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client(token)?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Normalize the configured base URL to `…/api/admin/`.
    ///
    /// Trailing slashes on the configured value are stripped before the
    /// admin prefix is appended, so `https://host`, `https://host/`, and
    /// `https://host/api/admin/` all resolve to the same base.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with("/api/admin") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/admin/"));
        }
        Ok(url)
    }

    /// Join a relative path (e.g. `"transactions/"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        // base_url always ends with `/api/admin/`, so joining works.
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &ListParams,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        let pairs = params.to_pairs();
        debug!("GET {url} params={pairs:?}");

        let resp = self.http.get(url).query(&pairs).send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).send().await?;
        self.handle_response(resp).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PATCH {url}");

        let resp = self.http.patch(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview = &body[..body.len().min(200)];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let messages = flatten_error_body(&raw);

        match status {
            StatusCode::UNAUTHORIZED => Error::SessionExpired,
            StatusCode::FORBIDDEN => Error::Forbidden {
                message: messages
                    .map(|m| m.join("; "))
                    .unwrap_or_else(|| status.to_string()),
            },
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => match messages {
                Some(messages) => Error::Validation { messages },
                None => Error::Api {
                    status: status.as_u16(),
                    message: if raw.is_empty() { status.to_string() } else { raw },
                },
            },
            _ => Error::Api {
                status: status.as_u16(),
                message: messages
                    .map(|m| m.join("; "))
                    .unwrap_or_else(|| if raw.is_empty() { status.to_string() } else { raw }),
            },
        }
    }

    // ── Pagination helper ────────────────────────────────────────────

    /// Collect all pages of a list endpoint into a single `Vec<T>`.
    ///
    /// Intended for bounded reference data (aggregators, pickers) and the
    /// CLI's `--all` flag, not for unbounded transaction history.
    pub async fn paginate_all<T, F, Fut>(&self, params: ListParams, fetch: F) -> Result<Vec<T>, Error>
    where
        F: Fn(ListParams) -> Fut,
        Fut: Future<Output = Result<types::Page<T>, Error>>,
    {
        let page_size = usize::try_from(params.page_size()).unwrap_or(usize::MAX);
        let mut all = Vec::new();
        let mut page_no: u32 = 1;

        loop {
            let page = fetch(params.clone().page(page_no)).await?;
            let received = page.results.len();
            all.extend(page.results);

            if received < page_size || u64::try_from(all.len()).unwrap_or(u64::MAX) >= page.count {
                break;
            }
            page_no += 1;
        }

        Ok(all)
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Transactions ─────────────────────────────────────────────────

    pub async fn list_transactions(
        &self,
        params: &ListParams,
    ) -> Result<types::Page<types::Transaction>, Error> {
        self.get_with_params("transactions/", params).await
    }

    pub async fn get_transaction(&self, uid: &Uuid) -> Result<types::Transaction, Error> {
        self.get(&format!("transactions/{uid}/")).await
    }

    /// Approve a partner's cancellation request, recording operator notes.
    pub async fn approve_cancellation(
        &self,
        uid: &Uuid,
        admin_notes: &str,
    ) -> Result<types::Transaction, Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            admin_notes: &'a str,
        }

        self.post(
            &format!("transactions/{uid}/approve-cancellation/"),
            &Body { admin_notes },
        )
        .await
    }

    /// Reject a partner's cancellation request, recording operator notes.
    pub async fn reject_cancellation(
        &self,
        uid: &Uuid,
        admin_notes: &str,
    ) -> Result<types::Transaction, Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            admin_notes: &'a str,
        }

        self.post(
            &format!("transactions/{uid}/reject-cancellation/"),
            &Body { admin_notes },
        )
        .await
    }

    pub async fn transaction_stats(&self) -> Result<types::TransactionStats, Error> {
        self.get("transactions/stats/").await
    }

    // ── Partners ─────────────────────────────────────────────────────

    pub async fn list_partners(
        &self,
        params: &ListParams,
    ) -> Result<types::Page<types::Partner>, Error> {
        self.get_with_params("partners/", params).await
    }

    pub async fn get_partner(&self, uid: &Uuid) -> Result<types::Partner, Error> {
        self.get(&format!("partners/{uid}/")).await
    }

    /// Activate or deactivate a partner, recording why.
    pub async fn set_partner_active(
        &self,
        uid: &Uuid,
        is_active: bool,
        notes: &str,
    ) -> Result<types::Partner, Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            is_active: bool,
            notes: &'a str,
        }

        self.patch(&format!("partners/{uid}/"), &Body { is_active, notes })
            .await
    }

    pub async fn get_commission_config(
        &self,
        partner_uid: &Uuid,
    ) -> Result<types::CommissionConfig, Error> {
        self.get(&format!("partners/{partner_uid}/commission-config/"))
            .await
    }

    pub async fn update_commission_config(
        &self,
        partner_uid: &Uuid,
        update: &types::CommissionConfigUpdate,
    ) -> Result<types::CommissionConfig, Error> {
        self.patch(&format!("partners/{partner_uid}/commission-config/"), update)
            .await
    }

    // ── Platforms ────────────────────────────────────────────────────

    pub async fn list_platforms(
        &self,
        params: &ListParams,
    ) -> Result<types::Page<types::Platform>, Error> {
        self.get_with_params("platforms/", params).await
    }

    pub async fn get_platform(&self, uid: &Uuid) -> Result<types::Platform, Error> {
        self.get(&format!("platforms/{uid}/")).await
    }

    pub async fn set_platform_active(
        &self,
        uid: &Uuid,
        is_active: bool,
        notes: &str,
    ) -> Result<types::Platform, Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            is_active: bool,
            notes: &'a str,
        }

        self.patch(&format!("platforms/{uid}/"), &Body { is_active, notes })
            .await
    }

    pub async fn list_platform_mappings(
        &self,
        platform_uid: &Uuid,
        params: &ListParams,
    ) -> Result<types::Page<types::PlatformMapping>, Error> {
        self.get_with_params(&format!("platforms/{platform_uid}/mappings/"), params)
            .await
    }

    /// Route a platform onto an aggregator.
    pub async fn create_platform_mapping(
        &self,
        platform_uid: &Uuid,
        aggregator: &Uuid,
        external_id: &str,
    ) -> Result<types::PlatformMapping, Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            aggregator: &'a Uuid,
            external_id: &'a str,
        }

        self.post(
            &format!("platforms/{platform_uid}/mappings/"),
            &Body {
                aggregator,
                external_id,
            },
        )
        .await
    }

    // ── Aggregators ──────────────────────────────────────────────────

    pub async fn list_aggregators(
        &self,
        params: &ListParams,
    ) -> Result<types::Page<types::Aggregator>, Error> {
        self.get_with_params("aggregators/", params).await
    }

    // ── Device authorizations ────────────────────────────────────────

    pub async fn list_devices(
        &self,
        params: &ListParams,
    ) -> Result<types::Page<types::DeviceAuthorization>, Error> {
        self.get_with_params("devices/", params).await
    }

    pub async fn get_device(&self, uid: &Uuid) -> Result<types::DeviceAuthorization, Error> {
        self.get(&format!("devices/{uid}/")).await
    }

    pub async fn approve_device(
        &self,
        uid: &Uuid,
        notes: Option<&str>,
    ) -> Result<types::DeviceAuthorization, Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            notes: Option<&'a str>,
        }

        self.post(&format!("devices/{uid}/approve/"), &Body { notes })
            .await
    }

    pub async fn revoke_device(
        &self,
        uid: &Uuid,
        reason: &str,
    ) -> Result<types::DeviceAuthorization, Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            reason: &'a str,
        }

        self.post(&format!("devices/{uid}/revoke/"), &Body { reason })
            .await
    }

    // ── Commissions ──────────────────────────────────────────────────

    pub async fn list_commissions(
        &self,
        params: &ListParams,
    ) -> Result<types::Page<types::Commission>, Error> {
        self.get_with_params("commissions/", params).await
    }

    pub async fn get_commission(&self, uid: &Uuid) -> Result<types::Commission, Error> {
        self.get(&format!("commissions/{uid}/")).await
    }

    /// Mark an accrued commission as paid out.
    pub async fn pay_commission(&self, uid: &Uuid) -> Result<types::Commission, Error> {
        self.post_empty(&format!("commissions/{uid}/pay/")).await
    }

    // ── Transfers ────────────────────────────────────────────────────

    pub async fn list_transfers(
        &self,
        params: &ListParams,
    ) -> Result<types::Page<types::Transfer>, Error> {
        self.get_with_params("transfers/", params).await
    }

    pub async fn get_transfer(&self, uid: &Uuid) -> Result<types::Transfer, Error> {
        self.get(&format!("transfers/{uid}/")).await
    }

    // ── Stats ────────────────────────────────────────────────────────

    pub async fn dashboard_stats(&self) -> Result<types::DashboardStats, Error> {
        self.get("stats/").await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_normalization_is_idempotent() {
        let a = BackofficeClient::normalize_base_url("https://ops.example.com").unwrap();
        let b = BackofficeClient::normalize_base_url("https://ops.example.com/").unwrap();
        let c = BackofficeClient::normalize_base_url("https://ops.example.com/api/admin/").unwrap();
        assert_eq!(a.as_str(), "https://ops.example.com/api/admin/");
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn base_url_keeps_path_prefix() {
        let url =
            BackofficeClient::normalize_base_url("https://ops.example.com/backoffice/").unwrap();
        assert_eq!(url.as_str(), "https://ops.example.com/backoffice/api/admin/");
    }
}
