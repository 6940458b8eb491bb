//! Actions — messages flowing through the app's dispatch loop.
//!
//! Key handlers and background fetch tasks produce actions; the app loop
//! consumes them, handling global ones itself and routing data deliveries
//! to the screen that requested them.

use paydeck_core::{
    Aggregator, Commission, CoreError, DashboardStats, DeviceAuthorization, Page, Partner,
    Picker, Platform, Ticket, Transaction, TransactionStats, Transfer,
};

use crate::screen::ScreenId;

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Transient toast shown in the status bar.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
        }
    }
}

/// Top-level action type.
#[derive(Debug)]
pub enum Action {
    Quit,
    SwitchScreen(ScreenId),
    /// Session expired (401 anywhere) — open the dedicated popup.
    SessionExpired,
    DismissSessionPopup,
    Notify(Notification),
    /// A background task finished work for `screen`.
    Deliver { screen: ScreenId, payload: Payload },
}

/// Typed results delivered back to the requesting screen.
///
/// List payloads carry the [`Ticket`] of the request that produced them;
/// the screen's `RemoteList` drops stale deliveries.
#[derive(Debug)]
pub enum Payload {
    Transactions {
        ticket: Ticket,
        result: Result<Page<Transaction>, CoreError>,
    },
    Partners {
        ticket: Ticket,
        result: Result<Page<Partner>, CoreError>,
    },
    Platforms {
        ticket: Ticket,
        result: Result<Page<Platform>, CoreError>,
    },
    Devices {
        ticket: Ticket,
        result: Result<Page<DeviceAuthorization>, CoreError>,
    },
    Commissions {
        ticket: Ticket,
        result: Result<Page<Commission>, CoreError>,
    },
    Transfers {
        ticket: Ticket,
        result: Result<Page<Transfer>, CoreError>,
    },
    Overview {
        result: Result<(DashboardStats, TransactionStats), CoreError>,
    },
    AggregatorPicker {
        result: Result<Picker<Aggregator>, CoreError>,
    },
    /// A mutation finished; `Ok` carries the toast message. The screen
    /// refetches its current page either way — the single refresh policy.
    Mutation { result: Result<String, CoreError> },
}
