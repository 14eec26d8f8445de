use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Inclusive price bounds applied while extracting
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min_price: i64,
    pub max_price: i64,
}

impl PriceRange {
    pub fn contains(&self, price: i64) -> bool {
        price >= self.min_price && price <= self.max_price
    }
}

/// How to wait for the page after a "next page" click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// Wait for the navigation triggered by the click to finish
    Navigation,
    /// Wait for the navigation, then sleep a fixed delay for late re-renders
    NavigationThenDelay(Duration),
    /// Content is swapped in place; only a fixed delay applies
    Delay(Duration),
}

/// The action that advances a source to its next result page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAdvance {
    /// CSS selector of the control to click
    pub selector: String,
    pub settle: Settle,
}

/// Tuning shared by every adapter in a run
#[derive(Debug, Clone, Copy)]
pub struct ScanSettings {
    pub navigation_timeout: Duration,
    pub settle_delay: Duration,
    pub page_cap: usize,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            navigation_timeout: Duration::from_secs(60),
            settle_delay: Duration::from_millis(2000),
            page_cap: 200,
        }
    }
}
