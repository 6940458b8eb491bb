// ── Back-office facade ──
//
// Thin typed surface over `BackofficeClient` for the CLI and TUI.
// Translates transport errors into `CoreError`, attaches entity context
// to 404s, and hosts the picker candidate loaders. There is no cache or
// background refresh: every screen fetches on demand and owns its state.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use paydeck_api::types::{
    Aggregator, Commission, CommissionConfig, CommissionConfigUpdate, DashboardStats,
    DeviceAuthorization, Page, Partner, Platform, PlatformMapping, Transaction, TransactionStats,
    Transfer,
};
use paydeck_api::{BackofficeClient, ListParams};

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::picker::{Picker, PickerItem};

/// The main entry point for consumers. Cheaply cloneable.
#[derive(Debug, Clone)]
pub struct Backoffice {
    client: Arc<BackofficeClient>,
}

impl Backoffice {
    /// Build a facade from configuration. Does not perform any request;
    /// call [`check_connection`](Self::check_connection) to verify
    /// reachability and credentials.
    pub fn new(config: &ClientConfig) -> Result<Self, CoreError> {
        let client =
            BackofficeClient::new(config.base_url.as_str(), &config.token, &config.transport())?;
        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Wrap an existing client (tests, custom transports).
    pub fn from_client(client: BackofficeClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// One cheap authenticated request to verify URL and token.
    pub async fn check_connection(&self) -> Result<(), CoreError> {
        self.client.dashboard_stats().await?;
        debug!("back office reachable");
        Ok(())
    }

    // ── Transactions ─────────────────────────────────────────────────

    pub async fn list_transactions(
        &self,
        params: &ListParams,
    ) -> Result<Page<Transaction>, CoreError> {
        Ok(self.client.list_transactions(params).await?)
    }

    pub async fn get_transaction(&self, uid: &Uuid) -> Result<Transaction, CoreError> {
        self.client
            .get_transaction(uid)
            .await
            .map_err(|e| CoreError::from(e).or_not_found("transaction", &uid.to_string()))
    }

    pub async fn approve_cancellation(
        &self,
        uid: &Uuid,
        admin_notes: &str,
    ) -> Result<Transaction, CoreError> {
        self.client
            .approve_cancellation(uid, admin_notes)
            .await
            .map_err(|e| CoreError::from(e).or_not_found("transaction", &uid.to_string()))
    }

    pub async fn reject_cancellation(
        &self,
        uid: &Uuid,
        admin_notes: &str,
    ) -> Result<Transaction, CoreError> {
        self.client
            .reject_cancellation(uid, admin_notes)
            .await
            .map_err(|e| CoreError::from(e).or_not_found("transaction", &uid.to_string()))
    }

    pub async fn transaction_stats(&self) -> Result<TransactionStats, CoreError> {
        Ok(self.client.transaction_stats().await?)
    }

    // ── Partners ─────────────────────────────────────────────────────

    pub async fn list_partners(&self, params: &ListParams) -> Result<Page<Partner>, CoreError> {
        Ok(self.client.list_partners(params).await?)
    }

    pub async fn get_partner(&self, uid: &Uuid) -> Result<Partner, CoreError> {
        self.client
            .get_partner(uid)
            .await
            .map_err(|e| CoreError::from(e).or_not_found("partner", &uid.to_string()))
    }

    pub async fn set_partner_active(
        &self,
        uid: &Uuid,
        is_active: bool,
        notes: &str,
    ) -> Result<Partner, CoreError> {
        self.client
            .set_partner_active(uid, is_active, notes)
            .await
            .map_err(|e| CoreError::from(e).or_not_found("partner", &uid.to_string()))
    }

    pub async fn get_commission_config(
        &self,
        partner_uid: &Uuid,
    ) -> Result<CommissionConfig, CoreError> {
        self.client
            .get_commission_config(partner_uid)
            .await
            .map_err(|e| CoreError::from(e).or_not_found("partner", &partner_uid.to_string()))
    }

    pub async fn update_commission_config(
        &self,
        partner_uid: &Uuid,
        update: &CommissionConfigUpdate,
    ) -> Result<CommissionConfig, CoreError> {
        self.client
            .update_commission_config(partner_uid, update)
            .await
            .map_err(|e| CoreError::from(e).or_not_found("partner", &partner_uid.to_string()))
    }

    // ── Platforms ────────────────────────────────────────────────────

    pub async fn list_platforms(&self, params: &ListParams) -> Result<Page<Platform>, CoreError> {
        Ok(self.client.list_platforms(params).await?)
    }

    pub async fn get_platform(&self, uid: &Uuid) -> Result<Platform, CoreError> {
        self.client
            .get_platform(uid)
            .await
            .map_err(|e| CoreError::from(e).or_not_found("platform", &uid.to_string()))
    }

    pub async fn set_platform_active(
        &self,
        uid: &Uuid,
        is_active: bool,
        notes: &str,
    ) -> Result<Platform, CoreError> {
        self.client
            .set_platform_active(uid, is_active, notes)
            .await
            .map_err(|e| CoreError::from(e).or_not_found("platform", &uid.to_string()))
    }

    pub async fn list_platform_mappings(
        &self,
        platform_uid: &Uuid,
        params: &ListParams,
    ) -> Result<Page<PlatformMapping>, CoreError> {
        self.client
            .list_platform_mappings(platform_uid, params)
            .await
            .map_err(|e| CoreError::from(e).or_not_found("platform", &platform_uid.to_string()))
    }

    pub async fn create_platform_mapping(
        &self,
        platform_uid: &Uuid,
        aggregator: &Uuid,
        external_id: &str,
    ) -> Result<PlatformMapping, CoreError> {
        self.client
            .create_platform_mapping(platform_uid, aggregator, external_id)
            .await
            .map_err(|e| CoreError::from(e).or_not_found("platform", &platform_uid.to_string()))
    }

    // ── Aggregators ──────────────────────────────────────────────────

    pub async fn list_aggregators(
        &self,
        params: &ListParams,
    ) -> Result<Page<Aggregator>, CoreError> {
        Ok(self.client.list_aggregators(params).await?)
    }

    // ── Device authorizations ────────────────────────────────────────

    pub async fn list_devices(
        &self,
        params: &ListParams,
    ) -> Result<Page<DeviceAuthorization>, CoreError> {
        Ok(self.client.list_devices(params).await?)
    }

    pub async fn get_device(&self, uid: &Uuid) -> Result<DeviceAuthorization, CoreError> {
        self.client
            .get_device(uid)
            .await
            .map_err(|e| CoreError::from(e).or_not_found("device", &uid.to_string()))
    }

    pub async fn approve_device(
        &self,
        uid: &Uuid,
        notes: Option<&str>,
    ) -> Result<DeviceAuthorization, CoreError> {
        self.client
            .approve_device(uid, notes)
            .await
            .map_err(|e| CoreError::from(e).or_not_found("device", &uid.to_string()))
    }

    pub async fn revoke_device(
        &self,
        uid: &Uuid,
        reason: &str,
    ) -> Result<DeviceAuthorization, CoreError> {
        self.client
            .revoke_device(uid, reason)
            .await
            .map_err(|e| CoreError::from(e).or_not_found("device", &uid.to_string()))
    }

    // ── Commissions ──────────────────────────────────────────────────

    pub async fn list_commissions(
        &self,
        params: &ListParams,
    ) -> Result<Page<Commission>, CoreError> {
        Ok(self.client.list_commissions(params).await?)
    }

    pub async fn get_commission(&self, uid: &Uuid) -> Result<Commission, CoreError> {
        self.client
            .get_commission(uid)
            .await
            .map_err(|e| CoreError::from(e).or_not_found("commission", &uid.to_string()))
    }

    pub async fn pay_commission(&self, uid: &Uuid) -> Result<Commission, CoreError> {
        self.client
            .pay_commission(uid)
            .await
            .map_err(|e| CoreError::from(e).or_not_found("commission", &uid.to_string()))
    }

    // ── Transfers ────────────────────────────────────────────────────

    pub async fn list_transfers(&self, params: &ListParams) -> Result<Page<Transfer>, CoreError> {
        Ok(self.client.list_transfers(params).await?)
    }

    pub async fn get_transfer(&self, uid: &Uuid) -> Result<Transfer, CoreError> {
        self.client
            .get_transfer(uid)
            .await
            .map_err(|e| CoreError::from(e).or_not_found("transfer", &uid.to_string()))
    }

    // ── Stats ────────────────────────────────────────────────────────

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, CoreError> {
        Ok(self.client.dashboard_stats().await?)
    }

    // ── Pickers ──────────────────────────────────────────────────────

    /// Load the aggregator picker: one capped request, filtering happens
    /// client-side.
    pub async fn aggregator_picker(&self) -> Result<Picker<Aggregator>, CoreError> {
        let params = ListParams::new(Picker::<Aggregator>::CANDIDATE_LIMIT)
            .filter("is_active", "true");
        let page = self.client.list_aggregators(&params).await?;
        Ok(Picker::new(page.results))
    }

    /// Load the partner picker (active partners only).
    pub async fn partner_picker(&self) -> Result<Picker<Partner>, CoreError> {
        let params =
            ListParams::new(Picker::<Partner>::CANDIDATE_LIMIT).filter("is_active", "true");
        let page = self.client.list_partners(&params).await?;
        Ok(Picker::new(page.results))
    }

    // ── Bulk export ──────────────────────────────────────────────────

    /// Every aggregator, across pages. Bounded reference data.
    pub async fn all_aggregators(&self) -> Result<Vec<Aggregator>, CoreError> {
        let client = Arc::clone(&self.client);
        let all = client
            .paginate_all(ListParams::new(100), |p| {
                let client = Arc::clone(&client);
                async move { client.list_aggregators(&p).await }
            })
            .await?;
        Ok(all)
    }
}

// ── Picker display fields ────────────────────────────────────────────

impl PickerItem for Aggregator {
    fn haystacks(&self) -> Vec<String> {
        vec![self.name.clone(), self.code.clone()]
    }
}

impl PickerItem for Partner {
    fn haystacks(&self) -> Vec<String> {
        vec![self.name.clone(), self.email.clone()]
    }
}
