use std::io::Write;
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;

use vin_core::ExtractionResult;
use vin_logging::vin_info;

use crate::persist::{AtomicFileWriter, PersistError};

pub const EXPORT_FILENAME: &str = "extracted_vins.csv";
pub const EXPORT_CONTENT_TYPE: &str = "text/csv";
pub const EXPORT_HEADER: [&str; 4] = ["Model", "Trim", "VIN", "TrueCar URL"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub row_count: usize,
    pub output_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("export is not valid utf-8: {0}")]
    Encoding(#[from] FromUtf8Error),
}

/// Writes the header and one row per record. The header is written even
/// for an empty result.
pub fn write_csv<W: Write>(result: &ExtractionResult, writer: W) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(EXPORT_HEADER)?;
    for record in result {
        csv.write_record([
            record.query.model.as_str(),
            record.query.trim.as_str(),
            record.vin.as_str(),
            record.search_url.as_str(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

pub fn to_csv_string(result: &ExtractionResult) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(result, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Atomically writes `extracted_vins.csv` into `output_dir`.
pub fn export_to_dir(
    result: &ExtractionResult,
    output_dir: &Path,
) -> Result<ExportSummary, ExportError> {
    let content = to_csv_string(result)?;
    let output_path = AtomicFileWriter::new(output_dir).write(EXPORT_FILENAME, content)?;
    vin_info!("Wrote {} rows to {}", result.len(), output_path.display());
    Ok(ExportSummary {
        row_count: result.len(),
        output_path,
    })
}
