use std::fmt;

use vin_core::{Query, SearchUrl};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub body: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub url: String,
    pub final_url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Why pagination stopped for one search URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `max_vins` distinct VINs were collected.
    CapReached,
    /// A page carried no VIN fields; later pages are assumed empty too.
    EmptyPage,
    /// Every attempt for a page failed.
    FetchAbandoned,
    /// `max_pages` pages were scanned.
    PageLimit,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            StopReason::CapReached => "vin cap reached",
            StopReason::EmptyPage => "no more listings",
            StopReason::FetchAbandoned => "page fetch abandoned",
            StopReason::PageLimit => "page limit reached",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventLevel {
    Info,
    Warning,
}

/// Notices produced while a run progresses, in the order they happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeEvent {
    QueryStarted {
        query: Query,
        url: SearchUrl,
    },
    PageScanned {
        url: String,
        page: u32,
        matched_nodes: usize,
        new_vins: usize,
        total_vins: usize,
    },
    AttemptFailed {
        url: String,
        attempt: u32,
        max_attempts: u32,
        error: FetchError,
    },
    PageAbandoned {
        url: String,
        attempts: u32,
    },
    NoVinsFound {
        query: Query,
    },
    QueryFinished {
        query: Query,
        vins: usize,
        stop: StopReason,
    },
}

impl ScrapeEvent {
    pub fn level(&self) -> EventLevel {
        match self {
            ScrapeEvent::AttemptFailed { .. }
            | ScrapeEvent::PageAbandoned { .. }
            | ScrapeEvent::NoVinsFound { .. } => EventLevel::Warning,
            ScrapeEvent::QueryStarted { .. }
            | ScrapeEvent::PageScanned { .. }
            | ScrapeEvent::QueryFinished { .. } => EventLevel::Info,
        }
    }

    pub fn is_warning(&self) -> bool {
        self.level() == EventLevel::Warning
    }
}

impl fmt::Display for ScrapeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeEvent::QueryStarted { query, url } => write!(f, "Searching {query}: {url}"),
            ScrapeEvent::PageScanned {
                url,
                page,
                new_vins,
                total_vins,
                ..
            } => write!(
                f,
                "Page {page}: {new_vins} new VINs ({total_vins} total) from {url}"
            ),
            ScrapeEvent::AttemptFailed {
                url,
                attempt,
                max_attempts,
                error,
            } => match error.kind {
                FailureKind::HttpStatus(code) => write!(
                    f,
                    "Status code {code} for: {url} (attempt {attempt}/{max_attempts})"
                ),
                _ => write!(
                    f,
                    "Attempt {attempt}/{max_attempts} failed for {url}: {error}"
                ),
            },
            ScrapeEvent::PageAbandoned { url, attempts } => {
                write!(f, "Skipping {url} after {attempts} failed attempts.")
            }
            ScrapeEvent::NoVinsFound { query } => write!(f, "No VINs found for {query}"),
            ScrapeEvent::QueryFinished { query, vins, stop } => {
                write!(f, "{query}: {vins} VINs ({stop})")
            }
        }
    }
}
