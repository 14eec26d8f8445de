use crate::config::Config;
use crate::error::RunFailure;
use crate::models::{Listing, ListingMap, Source};
use crate::notify::Notifier;
use crate::reconcile::reconcile;
use crate::scrapers::{
    scan_source, CentrisScraper, ChromeNavigator, DuProprioScraper, PageNavigator,
    RoyalLePageScraper, ScanSettings, SourceAdapter,
};
use crate::store::ListingStore;
use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, info};

/// Last high-level step reached, reported if the run fails
#[derive(Debug)]
pub struct RunContext {
    status: String,
}

impl RunContext {
    pub fn new() -> Self {
        Self {
            status: "Starting".to_string(),
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        debug!("Status: {}", self.status);
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    fn fail(&self, cause: anyhow::Error) -> RunFailure {
        RunFailure::new(self.status.clone(), cause)
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

/// What a completed run found
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub per_source: Vec<(Source, usize)>,
    pub new_count: usize,
    pub stored_count: usize,
}

impl RunSummary {
    pub fn message(&self) -> String {
        let counts = self
            .per_source
            .iter()
            .map(|(source, count)| format!("{} {}", source, count))
            .collect::<Vec<_>>()
            .join(", ");
        if self.new_count == 0 {
            format!("No new listings (scanned: {})", counts)
        } else {
            format!("Found {} new listings (scanned: {})", self.new_count, counts)
        }
    }
}

/// The three sources in scan order
pub fn build_adapters(config: &Config, settings: ScanSettings) -> Vec<Box<dyn SourceAdapter>> {
    vec![
        Box::new(DuProprioScraper::new(config.duproprio.url.clone())),
        Box::new(RoyalLePageScraper::new(
            config.royallepage.url.clone(),
            settings.settle_delay,
        )),
        Box::new(CentrisScraper::new(
            config.centris.url.clone(),
            config.centris.price_range(),
            settings.settle_delay,
            settings.page_cap,
        )),
    ]
}

/// Scan every source in turn over one navigator and merge the results
pub fn scan_all(
    navigator: &dyn PageNavigator,
    adapters: &[Box<dyn SourceAdapter>],
    today: NaiveDate,
    ctx: &mut RunContext,
) -> (ListingMap, Vec<(Source, usize)>) {
    let mut merged = ListingMap::new();
    let mut per_source = Vec::with_capacity(adapters.len());

    for adapter in adapters {
        ctx.set_status(format!("Scanning {}", adapter.source()));
        let found = scan_source(navigator, adapter.as_ref(), today);
        per_source.push((adapter.source(), found.len()));
        merged.extend(found);
    }

    (merged, per_source)
}

/// Scan, reconcile against the store, then persist and notify if anything is new
pub async fn run(
    navigator: &dyn PageNavigator,
    adapters: &[Box<dyn SourceAdapter>],
    store: &ListingStore,
    notifier: &dyn Notifier,
    today: NaiveDate,
    ctx: &mut RunContext,
) -> Result<RunSummary> {
    ctx.set_status("Loading persisted listings");
    let persisted = store.load().await?;

    let (scanned, per_source) = scan_all(navigator, adapters, today, ctx);
    info!("Scanned {} listings in total", scanned.len());

    ctx.set_status("Reconciling listings");
    let reconciliation = reconcile(&scanned, persisted);
    let new_count = reconciliation.new.len();
    info!("{} new listings", new_count);

    if reconciliation.has_new() {
        ctx.set_status("Saving listings");
        store.save(&reconciliation.persisted).await?;

        ctx.set_status("Sending notification");
        let new_listings: Vec<Listing> = reconciliation.new.into_values().collect();
        notifier.notify(&new_listings, new_count).await?;
    }

    ctx.set_status("Done");
    Ok(RunSummary {
        per_source,
        new_count,
        stored_count: reconciliation.persisted.len(),
    })
}

/// Launch the browser, run every source, and shut the browser down again
/// whether or not the run succeeded.
pub async fn execute(
    config: &Config,
    store: &ListingStore,
    notifier: &dyn Notifier,
    today: NaiveDate,
) -> std::result::Result<RunSummary, RunFailure> {
    let mut ctx = RunContext::new();
    let settings = config.scan_settings();

    ctx.set_status("Launching browser");
    let navigator = ChromeNavigator::launch(settings.navigation_timeout).map_err(|e| ctx.fail(e))?;

    let adapters = build_adapters(config, settings);
    let outcome = run(&navigator, &adapters, store, notifier, today, &mut ctx).await;

    navigator.shutdown();
    outcome.map_err(|e| ctx.fail(e))
}
