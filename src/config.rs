use crate::scrapers::types::{PriceRange, ScanSettings};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// A source that is scanned from a single search URL
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    pub url: String,
}

/// Centris also bounds the price range
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CentrisConfig {
    pub url: String,
    pub min_price: i64,
    pub max_price: i64,
}

impl CentrisConfig {
    pub fn price_range(&self) -> PriceRange {
        PriceRange {
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}

/// Optional timing knobs
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanConfig {
    pub navigation_timeout_secs: u64,
    pub settle_delay_ms: u64,
    pub page_cap: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        let defaults = ScanSettings::default();
        Self {
            navigation_timeout_secs: defaults.navigation_timeout.as_secs(),
            settle_delay_ms: defaults.settle_delay.as_millis() as u64,
            page_cap: defaults.page_cap,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub duproprio: SiteConfig,
    pub royallepage: SiteConfig,
    pub centris: CentrisConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("duproprio", &self.duproprio.url),
            ("royallepage", &self.royallepage.url),
            ("centris", &self.centris.url),
        ] {
            if url.trim().is_empty() {
                bail!("{}.url must not be empty", name);
            }
        }
        if self.centris.min_price > self.centris.max_price {
            bail!(
                "centris.minPrice ({}) is above centris.maxPrice ({})",
                self.centris.min_price,
                self.centris.max_price
            );
        }
        if self.scan.navigation_timeout_secs == 0 {
            bail!("scan.navigationTimeoutSecs must be at least 1");
        }
        if self.scan.page_cap == 0 {
            bail!("scan.pageCap must be at least 1");
        }
        Ok(())
    }

    pub fn scan_settings(&self) -> ScanSettings {
        ScanSettings {
            navigation_timeout: Duration::from_secs(self.scan.navigation_timeout_secs),
            settle_delay: Duration::from_millis(self.scan.settle_delay_ms),
            page_cap: self.scan.page_cap,
        }
    }
}
