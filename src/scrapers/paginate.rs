use crate::models::ListingMap;
use crate::scrapers::traits::{PageNavigator, SourceAdapter};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use scraper::Html;
use tracing::{debug, error, info, warn};

/// Walk every result page of one source.
///
/// Failures stop this source only: whatever was collected before the error
/// is returned and the error is logged.
pub fn scan_source(
    navigator: &dyn PageNavigator,
    adapter: &dyn SourceAdapter,
    today: NaiveDate,
) -> ListingMap {
    let source = adapter.source();
    let mut found = ListingMap::new();

    match walk_pages(navigator, adapter, today, &mut found) {
        Ok(pages) => info!("{}: {} listings across {} pages", source, found.len(), pages),
        Err(e) => error!(
            "{}: scan aborted with {} listings collected: {:#}",
            source,
            found.len(),
            e
        ),
    }

    found
}

fn walk_pages(
    navigator: &dyn PageNavigator,
    adapter: &dyn SourceAdapter,
    today: NaiveDate,
    found: &mut ListingMap,
) -> Result<usize> {
    let source = adapter.source();
    navigator
        .open(adapter.start_url())
        .with_context(|| format!("Failed to open {} search page", source))?;

    let mut page_number = 1;
    loop {
        let html = navigator
            .content()
            .with_context(|| format!("Failed to read {} page {}", source, page_number))?;
        let page = Html::parse_document(&html);

        let listings = adapter.extract_listings(&page, today);
        debug!("{} page {}: {} listings", source, page_number, listings.len());
        for listing in listings {
            found.insert(listing.id.clone(), listing);
        }

        if adapter.is_last_page(&page) {
            return Ok(page_number);
        }
        if adapter.page_cap().is_some_and(|cap| page_number >= cap) {
            warn!("{}: stopping at page cap {}", source, page_number);
            return Ok(page_number);
        }

        navigator
            .advance(&adapter.next_page())
            .with_context(|| format!("Failed to advance {} past page {}", source, page_number))?;
        page_number += 1;
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedNavigator;
    use super::*;
    use crate::models::{Listing, Source};
    use crate::scrapers::types::{PageAdvance, Settle};

    const START: &str = "https://example.test/search";

    /// Pages look like `<p data-id="7" data-price="250000">` items and a `<i class="last">` marker
    struct FakeAdapter {
        cap: Option<usize>,
        selector: scraper::Selector,
    }

    impl FakeAdapter {
        fn new(cap: Option<usize>) -> Self {
            Self {
                cap,
                selector: scraper::Selector::parse("p[data-id]").unwrap(),
            }
        }
    }

    impl SourceAdapter for FakeAdapter {
        fn source(&self) -> Source {
            Source::DuProprio
        }

        fn start_url(&self) -> &str {
            START
        }

        fn extract_listings(&self, page: &Html, today: NaiveDate) -> Vec<Listing> {
            page.select(&self.selector)
                .filter_map(|p| {
                    let price = p
                        .value()
                        .attr("data-price")
                        .and_then(|price| price.parse().ok())
                        .unwrap_or(100_000);
                    p.value().attr("data-id").map(|id| (id, price))
                })
                .map(|(id, price)| Listing {
                    id: Source::DuProprio.listing_id(id),
                    price,
                    city: None,
                    address: None,
                    description: String::new(),
                    image_url: format!("https://example.test/{id}.jpg"),
                    url: format!("https://example.test/{id}"),
                    date_scanned: today,
                    source: Source::DuProprio,
                })
                .collect()
        }

        fn is_last_page(&self, page: &Html) -> bool {
            page.select(&scraper::Selector::parse("i.last").unwrap()).next().is_some()
        }

        fn next_page(&self) -> PageAdvance {
            PageAdvance {
                selector: "a.next".to_string(),
                settle: Settle::Navigation,
            }
        }

        fn page_cap(&self) -> Option<usize> {
            self.cap
        }
    }

    fn page(ids: &[u32], last: bool) -> String {
        let items: String = ids.iter().map(|id| format!("<p data-id=\"{id}\"></p>")).collect();
        let marker = if last { "<i class=\"last\"></i>" } else { "" };
        format!("<html><body>{items}{marker}</body></html>")
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn visits_exactly_n_pages_and_unions_their_listings() {
        let navigator = ScriptedNavigator::default().with_pages(
            START,
            vec![page(&[1, 2], false), page(&[3], false), page(&[4, 5], true)],
        );

        let found = scan_source(&navigator, &FakeAdapter::new(None), today());

        assert_eq!(navigator.pages_read(START), 3);
        assert_eq!(navigator.clicks().len(), 2);
        let ids: Vec<_> = found.keys().cloned().collect();
        assert_eq!(
            ids,
            vec!["duproprio-1", "duproprio-2", "duproprio-3", "duproprio-4", "duproprio-5"]
        );
    }

    #[test]
    fn repeated_id_keeps_the_later_page() {
        let navigator = ScriptedNavigator::default().with_pages(
            START,
            vec![
                r#"<html><body><p data-id="1" data-price="250000"></p></body></html>"#.to_string(),
                r#"<html><body><p data-id="1" data-price="240000"></p><i class="last"></i></body></html>"#
                    .to_string(),
            ],
        );

        let found = scan_source(&navigator, &FakeAdapter::new(None), today());

        assert_eq!(navigator.pages_read(START), 2);
        assert_eq!(found.len(), 1);
        assert_eq!(found["duproprio-1"].price, 240_000);
    }

    #[test]
    fn single_page_never_clicks_next() {
        let navigator = ScriptedNavigator::default().with_pages(START, vec![page(&[1], true)]);

        let found = scan_source(&navigator, &FakeAdapter::new(None), today());

        assert_eq!(found.len(), 1);
        assert!(navigator.clicks().is_empty());
    }

    #[test]
    fn failed_advance_keeps_partial_results() {
        let navigator = ScriptedNavigator::default()
            .with_pages(START, vec![page(&[1], false), page(&[2], false), page(&[3], true)])
            .failing_advance_after(START, 2);

        let found = scan_source(&navigator, &FakeAdapter::new(None), today());

        assert_eq!(found.len(), 2);
        assert!(found.contains_key("duproprio-1"));
        assert!(found.contains_key("duproprio-2"));
    }

    #[test]
    fn failed_open_yields_empty_map() {
        let navigator = ScriptedNavigator::default()
            .with_pages(START, vec![page(&[1], true)])
            .failing_open(START);

        let found = scan_source(&navigator, &FakeAdapter::new(None), today());

        assert!(found.is_empty());
    }

    #[test]
    fn page_cap_stops_a_stalled_pager() {
        let pages = (1..=10).map(|id| page(&[id], false)).collect();
        let navigator = ScriptedNavigator::default().with_pages(START, pages);

        let found = scan_source(&navigator, &FakeAdapter::new(Some(4)), today());

        assert_eq!(navigator.pages_read(START), 4);
        assert_eq!(found.len(), 4);
    }
}
