//! Screen implementations. Each screen is a top-level Component.

pub mod commissions;
pub mod devices;
pub mod overview;
pub mod partners;
pub mod platforms;
pub mod transactions;
pub mod transfers;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create all screens in tab bar order.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Overview,
            Box::new(overview::OverviewScreen::new()),
        ),
        (
            ScreenId::Transactions,
            Box::new(transactions::TransactionsScreen::new()),
        ),
        (
            ScreenId::Partners,
            Box::new(partners::PartnersScreen::new()),
        ),
        (
            ScreenId::Platforms,
            Box::new(platforms::PlatformsScreen::new()),
        ),
        (ScreenId::Devices, Box::new(devices::DevicesScreen::new())),
        (
            ScreenId::Commissions,
            Box::new(commissions::CommissionsScreen::new()),
        ),
        (
            ScreenId::Transfers,
            Box::new(transfers::TransfersScreen::new()),
        ),
    ]
}
