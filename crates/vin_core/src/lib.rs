//! VIN harvester core: pure domain types and the listing URL builder.
mod query;
mod record;
mod search_url;
mod vin;

pub use query::Query;
pub use record::{ExtractionResult, VinRecord};
pub use search_url::{build_url, page_url, SearchUrl, SearchUrlBuilder, UrlError, DEFAULT_BASE_URL};
pub use vin::{Vin, VinError, VIN_LEN};
