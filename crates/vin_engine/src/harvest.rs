use std::sync::Arc;
use std::time::Duration;

use vin_core::{page_url, Vin};
use vin_logging::{vin_debug, vin_warn};

use crate::decode::decode_body;
use crate::fetch::Fetcher;
use crate::scan::{scan_page, PageScan, VinSet};
use crate::{EventSink, FetchOutput, ScrapeEvent, StopReason};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestLimits {
    pub max_vins: usize,
    pub max_pages: u32,
}

impl Default for HarvestLimits {
    fn default() -> Self {
        Self {
            max_vins: 30,
            max_pages: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Wait between two attempts on the same page.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

/// VINs found for one search URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Harvest {
    pub vins: Vec<Vin>,
    pub pages_fetched: u32,
    pub stop: StopReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    Continue,
    Stop(StopReason),
}

/// Pagination policy, applied after each scanned page.
///
/// A page without any VIN field ends the search: the site is assumed to
/// serve nothing further, even if the page was merely unparseable.
pub fn next_step(scan: &PageScan, collected: usize, page: u32, limits: &HarvestLimits) -> PageStep {
    if scan.reached_cap || collected >= limits.max_vins {
        PageStep::Stop(StopReason::CapReached)
    } else if scan.matched_nodes == 0 {
        PageStep::Stop(StopReason::EmptyPage)
    } else if page >= limits.max_pages {
        PageStep::Stop(StopReason::PageLimit)
    } else {
        PageStep::Continue
    }
}

/// Paginates listing pages for a search URL and collects VINs.
pub struct Harvester {
    fetcher: Arc<dyn Fetcher>,
    limits: HarvestLimits,
    retry: RetryPolicy,
}

impl Harvester {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            limits: HarvestLimits::default(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_limits(mut self, limits: HarvestLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn limits(&self) -> HarvestLimits {
        self.limits
    }

    pub fn retry(&self) -> RetryPolicy {
        self.retry
    }

    /// Collects up to `max_vins` distinct VINs from pages `1..=max_pages` of
    /// `base_url`. Fetch failures are reported to `sink` and shorten the
    /// harvest; they are never returned as errors.
    pub async fn extract_vins(&self, base_url: &str, sink: &dyn EventSink) -> Harvest {
        let limits = self.limits;
        let mut found = VinSet::new();
        let mut pages_fetched = 0;

        if limits.max_vins == 0 {
            return Harvest {
                vins: Vec::new(),
                pages_fetched,
                stop: StopReason::CapReached,
            };
        }

        let mut stop = StopReason::PageLimit;
        for page in 1..=limits.max_pages {
            let url = page_url(base_url, page);
            let Some(output) = self.fetch_with_retry(&url, sink).await else {
                stop = StopReason::FetchAbandoned;
                break;
            };
            pages_fetched += 1;

            let html = decode_body(&output.body, output.metadata.content_type.as_deref());
            let scan = scan_page(&html, &mut found, limits.max_vins);
            vin_debug!(
                "Scanned {} ({} bytes): {} vin nodes, {} new",
                url,
                output.metadata.byte_len,
                scan.matched_nodes,
                scan.new_vins
            );
            sink.emit(ScrapeEvent::PageScanned {
                url,
                page,
                matched_nodes: scan.matched_nodes,
                new_vins: scan.new_vins,
                total_vins: found.len(),
            });

            if let PageStep::Stop(reason) = next_step(&scan, found.len(), page, &limits) {
                stop = reason;
                break;
            }
        }

        let mut vins = found.into_vec();
        vins.truncate(limits.max_vins);
        Harvest {
            vins,
            pages_fetched,
            stop,
        }
    }

    async fn fetch_with_retry(&self, url: &str, sink: &dyn EventSink) -> Option<FetchOutput> {
        let max_attempts = self.retry.max_attempts.max(1);
        for attempt in 1..=max_attempts {
            vin_debug!("GET {} (attempt {}/{})", url, attempt, max_attempts);
            match self.fetcher.fetch(url).await {
                Ok(output) => return Some(output),
                Err(error) => {
                    vin_warn!("Attempt {}/{} for {} failed: {}", attempt, max_attempts, url, error);
                    sink.emit(ScrapeEvent::AttemptFailed {
                        url: url.to_string(),
                        attempt,
                        max_attempts,
                        error,
                    });
                    if attempt < max_attempts {
                        tokio::time::sleep(self.retry.delay).await;
                    }
                }
            }
        }

        sink.emit(ScrapeEvent::PageAbandoned {
            url: url.to_string(),
            attempts: max_attempts,
        });
        None
    }
}
