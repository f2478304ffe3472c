#![allow(dead_code)]

use std::sync::Once;
use std::time::Duration;

use vin_engine::RetryPolicy;

static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(vin_logging::initialize_for_tests);
}

/// A valid, distinct VIN for each index.
pub fn vin_at(index: usize) -> String {
    format!("1FA6P8CF{index:09}")
}

pub fn vins(range: std::ops::Range<usize>) -> Vec<String> {
    range.map(vin_at).collect()
}

/// Listing page with all VINs in one inline JSON script, the way the site
/// embeds its search results.
pub fn listing_page(vins: &[String]) -> String {
    let listings: Vec<String> = vins
        .iter()
        .map(|vin| format!(r#"{{"vin":"{vin}","price":41995}}"#))
        .collect();
    format!(
        r#"<html><head><title>Listings</title></head><body>
<div class="card">Ford Mustang</div>
<script type="application/json">{{"listings":[{}]}}</script>
</body></html>"#,
        listings.join(",")
    )
}

/// Listing page with one script node per VIN.
pub fn listing_page_per_node(vins: &[String]) -> String {
    let scripts: String = vins
        .iter()
        .map(|vin| format!(r#"<script type="application/json">{{"vin":"{vin}"}}</script>"#))
        .collect();
    format!("<html><body>{scripts}</body></html>")
}

pub fn empty_page() -> String {
    "<html><body><p>No matching vehicles.</p></body></html>".to_string()
}

pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        delay: Duration::from_millis(10),
    }
}
