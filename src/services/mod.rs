pub mod droid;
pub mod export;
pub mod extractor;
pub mod listing_scraper;
pub mod page;
pub mod paginator;

#[cfg(test)]
pub(crate) mod fixtures;

pub use droid::*;
pub use export::*;
pub use extractor::*;
pub use listing_scraper::*;
pub use page::*;
pub use paginator::*;
