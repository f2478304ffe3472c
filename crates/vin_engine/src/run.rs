use vin_core::{ExtractionResult, Query, SearchUrlBuilder};
use vin_logging::vin_info;

use crate::{EventSink, Harvester, ScrapeEvent};

/// Resolves every query in order, one at a time, and gathers the rows.
///
/// A query that yields nothing produces a `NoVinsFound` warning and no rows.
pub async fn run_queries(
    harvester: &Harvester,
    builder: &SearchUrlBuilder,
    queries: &[Query],
    sink: &dyn EventSink,
) -> ExtractionResult {
    let mut result = ExtractionResult::new();

    for query in queries {
        let url = builder.build(query);
        sink.emit(ScrapeEvent::QueryStarted {
            query: query.clone(),
            url: url.clone(),
        });

        let harvest = harvester.extract_vins(url.as_str(), sink).await;
        if harvest.vins.is_empty() {
            sink.emit(ScrapeEvent::NoVinsFound {
                query: query.clone(),
            });
        }
        let added = result.push_query(query, &url, &harvest.vins);
        vin_info!(
            "{}: {} VINs over {} pages ({})",
            query,
            added,
            harvest.pages_fetched,
            harvest.stop
        );
        sink.emit(ScrapeEvent::QueryFinished {
            query: query.clone(),
            vins: added,
            stop: harvest.stop,
        });
    }

    result
}
