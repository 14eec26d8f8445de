use crate::models::{Listing, Source};
use crate::scrapers::helpers::{absolute_url, attr_of, parse_price, selector, text_of};
use crate::scrapers::traits::SourceAdapter;
use crate::scrapers::types::{PageAdvance, Settle};
use chrono::NaiveDate;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::debug;

const ORIGIN: &str = "https://www.royallepage.ca";

/// Royal LePage search results: cards keyed by `data-listing-id` and a
/// "next" control that is hidden or disabled on the last page.
pub struct RoyalLePageScraper {
    start_url: String,
    settle_delay: Duration,
    card: Selector,
    sold_flag: Selector,
    link: Selector,
    image: Selector,
    price: Selector,
    city: Selector,
    address: Selector,
    description: Selector,
    next: Selector,
    id_shape: Regex,
}

impl RoyalLePageScraper {
    pub fn new(start_url: impl Into<String>, settle_delay: Duration) -> Self {
        Self {
            start_url: start_url.into(),
            settle_delay,
            card: selector("[data-listing-id]"),
            sold_flag: selector(".card__flag--sold"),
            link: selector("a.card__link"),
            image: selector("img.card__image"),
            price: selector(".card__price"),
            city: selector(".card__city"),
            address: selector(".card__address"),
            description: selector(".card__description"),
            next: selector("a.pager__next"),
            id_shape: Regex::new(r"^[A-Za-z0-9]+$").expect("static regex"),
        }
    }

    fn parse_card(&self, card: ElementRef<'_>, today: NaiveDate) -> Option<Listing> {
        let native_id = card
            .value()
            .attr("data-listing-id")
            .map(str::trim)
            .filter(|id| self.id_shape.is_match(id))?;

        let price = text_of(card, &self.price).and_then(|text| parse_price(&text))?;
        let url = attr_of(card, &self.link, "href")?;
        // Lazy-loaded images keep the real source in data-src
        let image_url =
            attr_of(card, &self.image, "data-src").or_else(|| attr_of(card, &self.image, "src"))?;

        Some(Listing {
            id: Source::RoyalLePage.listing_id(native_id),
            price,
            city: text_of(card, &self.city),
            address: text_of(card, &self.address),
            description: text_of(card, &self.description).unwrap_or_default(),
            image_url: absolute_url(ORIGIN, &image_url),
            url: absolute_url(ORIGIN, &url),
            date_scanned: today,
            source: Source::RoyalLePage,
        })
    }
}

/// The next control counts as gone when it or its wrapping element is hidden
fn is_disabled(control: ElementRef<'_>) -> bool {
    hides(control) || control.parent().and_then(ElementRef::wrap).is_some_and(hides)
}

fn hides(element: ElementRef<'_>) -> bool {
    let el = element.value();
    el.classes().any(|class| class == "is-disabled" || class == "disabled" || class == "hidden")
        || el.attr("hidden").is_some()
        || el.attr("aria-disabled") == Some("true")
        || el
            .attr("style")
            .map(|style| style.replace(' ', "").contains("display:none"))
            .unwrap_or(false)
}

impl SourceAdapter for RoyalLePageScraper {
    fn source(&self) -> Source {
        Source::RoyalLePage
    }

    fn start_url(&self) -> &str {
        &self.start_url
    }

    fn extract_listings(&self, page: &Html, today: NaiveDate) -> Vec<Listing> {
        page.select(&self.card)
            .filter(|card| card.select(&self.sold_flag).next().is_none())
            .filter_map(|card| {
                let listing = self.parse_card(card, today);
                if listing.is_none() {
                    debug!("Skipped Royal LePage card {:?}", card.value().attr("data-listing-id"));
                }
                listing
            })
            .collect()
    }

    fn is_last_page(&self, page: &Html) -> bool {
        page.select(&self.next).next().map(is_disabled).unwrap_or(true)
    }

    fn next_page(&self) -> PageAdvance {
        PageAdvance {
            selector: "a.pager__next".to_string(),
            settle: Settle::NavigationThenDelay(self.settle_delay),
        }
    }
}
