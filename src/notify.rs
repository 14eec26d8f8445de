use crate::models::Listing;
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// Receives the listings discovered in a run
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, listings: &[Listing], count: usize) -> Result<()>;
}

/// Stand-in sink that only logs what would be delivered
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, listings: &[Listing], count: usize) -> Result<()> {
        info!("🏠 {} new listings", count);
        for listing in listings {
            info!("{}", summary_line(listing));
        }
        Ok(())
    }
}

/// One-line human summary of a listing
pub fn summary_line(listing: &Listing) -> String {
    let place = match (&listing.address, &listing.city) {
        (Some(address), Some(city)) => format!("{}, {}", address, city),
        (Some(address), None) => address.clone(),
        (None, Some(city)) => city.clone(),
        (None, None) => "Unknown location".to_string(),
    };
    format!("[{}] {} ({} $) {}", listing.source, place, listing.price, listing.url)
}
