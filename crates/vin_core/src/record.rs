use crate::{Query, SearchUrl, Vin};

/// One output row: a VIN found for a query, with the URL it was searched at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VinRecord {
    pub query: Query,
    pub vin: Vin,
    pub search_url: SearchUrl,
}

/// All rows of one run, in query order then discovery order.
///
/// The same VIN may appear under two queries; rows are never deduplicated
/// across queries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractionResult {
    records: Vec<VinRecord>,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one record per VIN. Returns the number of records added.
    pub fn push_query(&mut self, query: &Query, search_url: &SearchUrl, vins: &[Vin]) -> usize {
        self.records.extend(vins.iter().map(|vin| VinRecord {
            query: query.clone(),
            vin: vin.clone(),
            search_url: search_url.clone(),
        }));
        vins.len()
    }

    pub fn records(&self) -> &[VinRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VinRecord> {
        self.records.iter()
    }

    pub fn rows_for<'a>(&'a self, query: &'a Query) -> impl Iterator<Item = &'a VinRecord> + 'a {
        self.records.iter().filter(move |record| &record.query == query)
    }
}

impl<'a> IntoIterator for &'a ExtractionResult {
    type Item = &'a VinRecord;
    type IntoIter = std::slice::Iter<'a, VinRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
