pub mod browser;
pub mod centris;
pub mod duproprio;
pub mod helpers;
pub mod paginate;
pub mod royallepage;
pub mod traits;
pub mod types;

pub use browser::ChromeNavigator;
pub use centris::CentrisScraper;
pub use duproprio::DuProprioScraper;
pub use paginate::scan_source;
pub use royallepage::RoyalLePageScraper;
pub use traits::{PageNavigator, SourceAdapter};
pub use types::ScanSettings;
