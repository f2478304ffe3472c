//! VIN harvester engine: listing fetch, VIN scan, pagination and CSV IO.
mod decode;
mod export;
mod fetch;
mod harvest;
mod input;
mod persist;
mod run;
mod scan;
mod sink;
mod types;

pub use decode::{decode_body, decode_html, DecodeError, DecodedHtml};
pub use export::{
    export_to_dir, to_csv_string, write_csv, ExportError, ExportSummary, EXPORT_CONTENT_TYPE,
    EXPORT_FILENAME, EXPORT_HEADER,
};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use harvest::{next_step, Harvest, HarvestLimits, Harvester, PageStep, RetryPolicy};
pub use input::{read_queries, read_queries_from_path, InputError, MODEL_COLUMN, TRIM_COLUMN};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use run::run_queries;
pub use scan::{scan_page, vin_text_nodes, vins_in_text, PageScan, VinSet};
pub use sink::{CollectingSink, EventSink, LogSink};
pub use types::{
    EventLevel, FailureKind, FetchError, FetchMetadata, FetchOutput, ScrapeEvent, StopReason,
};
