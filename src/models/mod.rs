use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Listings keyed by their namespaced id
pub type ListingMap = BTreeMap<String, Listing>;

/// Source of the listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    DuProprio,
    RoyalLePage,
    Centris,
}

impl Source {
    /// Prefix used to namespace native ids
    pub fn prefix(self) -> &'static str {
        match self {
            Source::DuProprio => "duproprio",
            Source::RoyalLePage => "royallepage",
            Source::Centris => "centris",
        }
    }

    /// Build the globally unique id for a native site id
    pub fn listing_id(self, native_id: &str) -> String {
        format!("{}-{}", self.prefix(), native_id)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Source::DuProprio => "DuProprio",
            Source::RoyalLePage => "Royal LePage",
            Source::Centris => "Centris",
        };
        f.write_str(name)
    }
}

/// One normalized listing scanned from a source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub price: i64,
    pub city: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub description: String,
    pub image_url: String,
    pub url: String,
    pub date_scanned: NaiveDate,
    pub source: Source,
}
