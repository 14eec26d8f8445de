use crate::models::{Listing, Source};
use crate::scrapers::helpers::{absolute_url, attr_of, parse_price, selector, text_of};
use crate::scrapers::traits::SourceAdapter;
use crate::scrapers::types::{PageAdvance, Settle};
use chrono::NaiveDate;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

const ORIGIN: &str = "https://duproprio.com";
const SOLD_CLASS: &str = "search-results-listings-list__item--sold";

/// DuProprio search results: one `li#listing-<digits>` per listing and a
/// numbered pager whose active entry is the current page.
pub struct DuProprioScraper {
    start_url: String,
    item: Selector,
    link: Selector,
    image: Selector,
    price: Selector,
    city: Selector,
    address: Selector,
    description: Selector,
    active_page: Selector,
    id_shape: Regex,
}

impl DuProprioScraper {
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            item: selector("li[id^=\"listing-\"]"),
            link: selector("a.search-results-listings-list__item-image-link"),
            image: selector("img.search-results-listings-list__item-photo"),
            price: selector(".search-results-listings-list__item-description__price"),
            city: selector(".search-results-listings-list__item-description__city"),
            address: selector(".search-results-listings-list__item-description__address"),
            description: selector(".search-results-listings-list__item-description__type-and-intro"),
            active_page: selector("ul.pagination li.pagination__item--active"),
            id_shape: Regex::new(r"^listing-(\d+)$").expect("static regex"),
        }
    }

    fn parse_item(&self, item: ElementRef<'_>, today: NaiveDate) -> Option<Listing> {
        let native_id = item
            .value()
            .id()
            .and_then(|id| self.id_shape.captures(id))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())?;

        let price = text_of(item, &self.price).and_then(|text| parse_price(&text))?;
        let url = attr_of(item, &self.link, "href")?;
        let image_url = attr_of(item, &self.image, "src")?;

        Some(Listing {
            id: Source::DuProprio.listing_id(&native_id),
            price,
            city: text_of(item, &self.city),
            address: text_of(item, &self.address),
            description: text_of(item, &self.description).unwrap_or_default(),
            image_url: absolute_url(ORIGIN, &image_url),
            url: absolute_url(ORIGIN, &url),
            date_scanned: today,
            source: Source::DuProprio,
        })
    }
}

impl SourceAdapter for DuProprioScraper {
    fn source(&self) -> Source {
        Source::DuProprio
    }

    fn start_url(&self) -> &str {
        &self.start_url
    }

    fn extract_listings(&self, page: &Html, today: NaiveDate) -> Vec<Listing> {
        page.select(&self.item)
            .filter(|item| !item.value().classes().any(|class| class == SOLD_CLASS))
            .filter_map(|item| {
                let listing = self.parse_item(item, today);
                if listing.is_none() {
                    debug!("Skipped DuProprio item {:?}", item.value().id());
                }
                listing
            })
            .collect()
    }

    fn is_last_page(&self, page: &Html) -> bool {
        // No pager at all means a single page of results
        match page.select(&self.active_page).next() {
            Some(active) => !active.next_siblings().any(|node| node.value().is_element()),
            None => true,
        }
    }

    fn next_page(&self) -> PageAdvance {
        PageAdvance {
            selector: "ul.pagination li.pagination__item--active + li a".to_string(),
            settle: Settle::Navigation,
        }
    }
}
