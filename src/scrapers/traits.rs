use crate::models::{Listing, Source};
use crate::scrapers::types::PageAdvance;
use anyhow::Result;
use chrono::NaiveDate;
use scraper::Html;

/// Loads pages and performs page actions in a browsing session.
///
/// Every method returns only once the page has settled, so callers may read
/// the content right after.
pub trait PageNavigator {
    /// Open a URL and wait for it to finish loading
    fn open(&self, url: &str) -> Result<()>;

    /// Serialized HTML of the currently loaded page
    fn content(&self) -> Result<String>;

    /// Click the element matching `advance.selector` and wait per its settle mode
    fn advance(&self, advance: &PageAdvance) -> Result<()>;
}

/// Site-specific knowledge needed to walk one source's paginated results.
///
/// Extraction works on a parsed snapshot of the page, so adapters never
/// touch the browser directly.
pub trait SourceAdapter {
    fn source(&self) -> Source;

    /// First results page
    fn start_url(&self) -> &str;

    /// Valid, unsold listings visible on the page
    fn extract_listings(&self, page: &Html, today: NaiveDate) -> Vec<Listing>;

    /// Site-specific terminal condition
    fn is_last_page(&self, page: &Html) -> bool;

    fn next_page(&self) -> PageAdvance;

    /// Upper bound on visited pages, for sites whose terminal signal can stall
    fn page_cap(&self) -> Option<usize> {
        None
    }
}
