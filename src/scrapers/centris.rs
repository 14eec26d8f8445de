use crate::models::{Listing, Source};
use crate::scrapers::helpers::{absolute_url, attr_of, parse_price, selector, text_of};
use crate::scrapers::traits::SourceAdapter;
use crate::scrapers::types::{PageAdvance, PriceRange, Settle};
use chrono::NaiveDate;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::debug;

const ORIGIN: &str = "https://www.centris.ca";

/// Centris search results.
///
/// The result list is replaced in place when "next" is clicked, so there is
/// no navigation to wait for; a fixed delay stands in for it. Listings outside
/// the configured price range are dropped during extraction.
pub struct CentrisScraper {
    start_url: String,
    price_range: PriceRange,
    settle_delay: Duration,
    page_cap: usize,
    item: Selector,
    native_id: Selector,
    link: Selector,
    image: Selector,
    price: Selector,
    city: Selector,
    address: Selector,
    category: Selector,
    next_item: Selector,
    id_shape: Regex,
}

impl CentrisScraper {
    pub fn new(
        start_url: impl Into<String>,
        price_range: PriceRange,
        settle_delay: Duration,
        page_cap: usize,
    ) -> Self {
        Self {
            start_url: start_url.into(),
            price_range,
            settle_delay,
            page_cap,
            item: selector("div.property-thumbnail-item"),
            native_id: selector("[data-id]"),
            link: selector("a.property-thumbnail-summary-link"),
            image: selector("img"),
            price: selector(".price"),
            city: selector(".address .city"),
            address: selector(".address .street"),
            category: selector(".category"),
            next_item: selector("ul.pager li.next"),
            id_shape: Regex::new(r"^\d+$").expect("static regex"),
        }
    }

    fn parse_item(&self, item: ElementRef<'_>, today: NaiveDate) -> Option<Listing> {
        let native_id = attr_of(item, &self.native_id, "data-id")
            .filter(|id| self.id_shape.is_match(id))?;

        let price = text_of(item, &self.price).and_then(|text| parse_price(&text))?;
        if !self.price_range.contains(price) {
            debug!("Centris {} at {} is outside the price range", native_id, price);
            return None;
        }

        let url = attr_of(item, &self.link, "href")?;
        let image_url = attr_of(item, &self.image, "src")?;

        Some(Listing {
            id: Source::Centris.listing_id(&native_id),
            price,
            city: text_of(item, &self.city),
            address: text_of(item, &self.address),
            description: text_of(item, &self.category).unwrap_or_default(),
            image_url: absolute_url(ORIGIN, &image_url),
            url: absolute_url(ORIGIN, &url),
            date_scanned: today,
            source: Source::Centris,
        })
    }
}

impl SourceAdapter for CentrisScraper {
    fn source(&self) -> Source {
        Source::Centris
    }

    fn start_url(&self) -> &str {
        &self.start_url
    }

    fn extract_listings(&self, page: &Html, today: NaiveDate) -> Vec<Listing> {
        page.select(&self.item)
            .filter_map(|item| self.parse_item(item, today))
            .collect()
    }

    fn is_last_page(&self, page: &Html) -> bool {
        match page.select(&self.next_item).next() {
            Some(next) => next.value().classes().any(|class| class == "inactive"),
            None => true,
        }
    }

    fn next_page(&self) -> PageAdvance {
        PageAdvance {
            selector: "ul.pager li.next > a".to_string(),
            settle: Settle::Delay(self.settle_delay),
        }
    }

    fn page_cap(&self) -> Option<usize> {
        Some(self.page_cap)
    }
}
