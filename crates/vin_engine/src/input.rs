use std::fs::File;
use std::io::Read;
use std::path::Path;

use vin_core::Query;

pub const MODEL_COLUMN: &str = "Model";
pub const TRIM_COLUMN: &str = "Trim";

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("CSV must contain 'Model' and 'Trim' columns (missing: {})", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads `(Model, Trim)` queries from CSV.
///
/// Header names are case-sensitive; other columns are ignored. A missing
/// required column fails the whole read before any row is returned.
pub fn read_queries<R: Read>(reader: R) -> Result<Vec<Query>, InputError> {
    let mut csv = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = csv.headers()?.clone();

    let model_idx = headers.iter().position(|h| h == MODEL_COLUMN);
    let trim_idx = headers.iter().position(|h| h == TRIM_COLUMN);
    let (model_idx, trim_idx) = match (model_idx, trim_idx) {
        (Some(model), Some(trim)) => (model, trim),
        (model, trim) => {
            let mut missing = Vec::new();
            if model.is_none() {
                missing.push(MODEL_COLUMN.to_string());
            }
            if trim.is_none() {
                missing.push(TRIM_COLUMN.to_string());
            }
            return Err(InputError::MissingColumns { missing });
        }
    };

    let mut queries = Vec::new();
    for record in csv.records() {
        let record = record?;
        queries.push(Query::new(
            record.get(model_idx).unwrap_or_default(),
            record.get(trim_idx).unwrap_or_default(),
        ));
    }
    Ok(queries)
}

pub fn read_queries_from_path(path: &Path) -> Result<Vec<Query>, InputError> {
    read_queries(File::open(path)?)
}
