//! Screen identifiers for the tab bar and action routing.

use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ScreenId {
    Overview,
    Transactions,
    Partners,
    Platforms,
    Devices,
    Commissions,
    Transfers,
}

impl ScreenId {
    /// Tab bar order. Number keys 1..=7 map onto this.
    pub const ALL: [Self; 7] = [
        Self::Overview,
        Self::Transactions,
        Self::Partners,
        Self::Platforms,
        Self::Devices,
        Self::Commissions,
        Self::Transfers,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }
}
