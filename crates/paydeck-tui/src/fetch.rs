//! Background fetch tasks — the bridge between screens and the API.
//!
//! Screens never block the event loop: every request runs on a spawned
//! task that reports back through the action channel as a
//! [`Payload`](crate::action::Payload) addressed to the requesting
//! screen. List responses carry the `Ticket` from `RemoteList`, so the
//! screen drops anything a newer request has superseded.

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;
use uuid::Uuid;

use paydeck_core::{Backoffice, ListParams, Ticket};

use crate::action::{Action, Payload};
use crate::screen::ScreenId;

/// Per-screen handle for spawning background requests.
#[derive(Clone)]
pub struct Fetcher {
    backoffice: Backoffice,
    action_tx: UnboundedSender<Action>,
    screen: ScreenId,
}

impl Fetcher {
    pub fn new(backoffice: Backoffice, action_tx: UnboundedSender<Action>, screen: ScreenId) -> Self {
        Self {
            backoffice,
            action_tx,
            screen,
        }
    }

    fn deliver(&self, payload: Payload) {
        let _ = self.action_tx.send(Action::Deliver {
            screen: self.screen,
            payload,
        });
    }

    // ── List loads ───────────────────────────────────────────────────

    pub fn load_transactions(&self, ticket: Ticket, params: ListParams) {
        let this = self.clone();
        tokio::spawn(async move {
            debug!(screen = %this.screen, "loading transactions");
            let result = this.backoffice.list_transactions(&params).await;
            this.deliver(Payload::Transactions { ticket, result });
        });
    }

    pub fn load_partners(&self, ticket: Ticket, params: ListParams) {
        let this = self.clone();
        tokio::spawn(async move {
            let result = this.backoffice.list_partners(&params).await;
            this.deliver(Payload::Partners { ticket, result });
        });
    }

    pub fn load_platforms(&self, ticket: Ticket, params: ListParams) {
        let this = self.clone();
        tokio::spawn(async move {
            let result = this.backoffice.list_platforms(&params).await;
            this.deliver(Payload::Platforms { ticket, result });
        });
    }

    pub fn load_devices(&self, ticket: Ticket, params: ListParams) {
        let this = self.clone();
        tokio::spawn(async move {
            let result = this.backoffice.list_devices(&params).await;
            this.deliver(Payload::Devices { ticket, result });
        });
    }

    pub fn load_commissions(&self, ticket: Ticket, params: ListParams) {
        let this = self.clone();
        tokio::spawn(async move {
            let result = this.backoffice.list_commissions(&params).await;
            this.deliver(Payload::Commissions { ticket, result });
        });
    }

    pub fn load_transfers(&self, ticket: Ticket, params: ListParams) {
        let this = self.clone();
        tokio::spawn(async move {
            let result = this.backoffice.list_transfers(&params).await;
            this.deliver(Payload::Transfers { ticket, result });
        });
    }

    // ── Overview ─────────────────────────────────────────────────────

    pub fn load_overview(&self) {
        let this = self.clone();
        tokio::spawn(async move {
            let dashboard = this.backoffice.dashboard_stats().await;
            let result = match dashboard {
                Ok(dashboard) => this
                    .backoffice
                    .transaction_stats()
                    .await
                    .map(|tx| (dashboard, tx)),
                Err(e) => Err(e),
            };
            this.deliver(Payload::Overview { result });
        });
    }

    // ── Pickers ──────────────────────────────────────────────────────

    pub fn load_aggregator_picker(&self) {
        let this = self.clone();
        tokio::spawn(async move {
            let result = this.backoffice.aggregator_picker().await;
            this.deliver(Payload::AggregatorPicker { result });
        });
    }

    // ── Mutations ────────────────────────────────────────────────────
    //
    // Each reports a toast message on success; the screen refetches its
    // current page on either outcome.

    pub fn approve_cancellation(&self, uid: Uuid, notes: String) {
        let this = self.clone();
        tokio::spawn(async move {
            let result = this
                .backoffice
                .approve_cancellation(&uid, &notes)
                .await
                .map(|tx| format!("Cancellation approved for {}", tx.reference));
            this.deliver(Payload::Mutation { result });
        });
    }

    pub fn reject_cancellation(&self, uid: Uuid, notes: String) {
        let this = self.clone();
        tokio::spawn(async move {
            let result = this
                .backoffice
                .reject_cancellation(&uid, &notes)
                .await
                .map(|tx| format!("Cancellation rejected for {}", tx.reference));
            this.deliver(Payload::Mutation { result });
        });
    }

    pub fn set_partner_active(&self, uid: Uuid, is_active: bool, notes: String) {
        let this = self.clone();
        tokio::spawn(async move {
            let result = this
                .backoffice
                .set_partner_active(&uid, is_active, &notes)
                .await
                .map(|p| {
                    if p.is_active {
                        format!("Partner {} activated", p.name)
                    } else {
                        format!("Partner {} disabled", p.name)
                    }
                });
            this.deliver(Payload::Mutation { result });
        });
    }

    pub fn set_platform_active(&self, uid: Uuid, is_active: bool, notes: String) {
        let this = self.clone();
        tokio::spawn(async move {
            let result = this
                .backoffice
                .set_platform_active(&uid, is_active, &notes)
                .await
                .map(|p| {
                    if p.is_active {
                        format!("Platform {} activated", p.name)
                    } else {
                        format!("Platform {} disabled", p.name)
                    }
                });
            this.deliver(Payload::Mutation { result });
        });
    }

    pub fn create_platform_mapping(&self, platform: Uuid, aggregator: Uuid, external_id: String) {
        let this = self.clone();
        tokio::spawn(async move {
            let result = this
                .backoffice
                .create_platform_mapping(&platform, &aggregator, &external_id)
                .await
                .map(|m| format!("Mapping created ({})", m.external_id));
            this.deliver(Payload::Mutation { result });
        });
    }

    pub fn approve_device(&self, uid: Uuid, notes: Option<String>) {
        let this = self.clone();
        tokio::spawn(async move {
            let result = this
                .backoffice
                .approve_device(&uid, notes.as_deref())
                .await
                .map(|d| format!("Device {} approved", d.serial_number));
            this.deliver(Payload::Mutation { result });
        });
    }

    pub fn revoke_device(&self, uid: Uuid, reason: String) {
        let this = self.clone();
        tokio::spawn(async move {
            let result = this
                .backoffice
                .revoke_device(&uid, &reason)
                .await
                .map(|d| format!("Device {} revoked", d.serial_number));
            this.deliver(Payload::Mutation { result });
        });
    }

    pub fn pay_commission(&self, uid: Uuid) {
        let this = self.clone();
        tokio::spawn(async move {
            let result = this
                .backoffice
                .pay_commission(&uid)
                .await
                .map(|c| format!("Commission for {} paid", c.period));
            this.deliver(Payload::Mutation { result });
        });
    }
}
