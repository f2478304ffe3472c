use std::fmt::Write;

use vin_core::{ExtractionResult, Query};
use vin_engine::{EventLevel, HarvestLimits, ScrapeEvent, EXPORT_FILENAME, EXPORT_HEADER};

const TITLE: &str = "Ford VIN Extractor Dashboard (TrueCar - New Cars Only)";

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;max-width:72rem}\
table{border-collapse:collapse}td,th{border:1px solid #ccc;padding:.3rem .6rem;text-align:left}\
.warning{color:#8a5300}.error{color:#a00}.info{color:#555}";

pub fn index(limits: &HarvestLimits) -> String {
    let body = format!(
        r#"<p>Upload a CSV with Ford models and trims to extract up to <strong>{max_vins} VINs per model</strong> from TrueCar (new car listings only).</p>
<form action="/extract" method="post" enctype="multipart/form-data">
<input type="file" name="file" accept=".csv,text/csv" required>
<button type="submit">Extract VINs</button>
</form>
<p class="info">The CSV must contain <code>Model</code> and <code>Trim</code> columns. At most {max_pages} result pages are read per row.</p>"#,
        max_vins = limits.max_vins,
        max_pages = limits.max_pages,
    );
    layout(TITLE, &body)
}

pub fn message(heading: &str, detail: &str) -> String {
    let body = format!(
        r#"<h2 class="error">{}</h2><p>{}</p><p><a href="/">Back</a></p>"#,
        escape(heading),
        escape(detail)
    );
    layout(TITLE, &body)
}

pub fn results(
    queries: &[Query],
    result: &ExtractionResult,
    events: &[ScrapeEvent],
    generated: &str,
) -> String {
    let mut body = String::new();

    let _ = write!(
        body,
        "<p>{} rows processed, {} VINs extracted ({}).</p>",
        queries.len(),
        result.len(),
        escape(generated)
    );

    body.push_str("<h2>Input</h2><table><thead><tr><th>Model</th><th>Trim</th></tr></thead><tbody>");
    for query in queries {
        let _ = write!(
            body,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape(&query.model),
            escape(&query.trim)
        );
    }
    body.push_str("</tbody></table>");

    let warnings: Vec<_> = events
        .iter()
        .filter(|event| event.level() == EventLevel::Warning)
        .collect();
    if !warnings.is_empty() {
        body.push_str("<h2>Warnings</h2><ul>");
        for warning in warnings {
            let _ = write!(
                body,
                r#"<li class="warning">{}</li>"#,
                escape(&warning.to_string())
            );
        }
        body.push_str("</ul>");
    }

    body.push_str("<h2>Extracted VINs</h2>");
    if result.is_empty() {
        body.push_str(r#"<p class="info">No VINs were found.</p>"#);
    } else {
        body.push_str("<table><thead><tr>");
        for column in EXPORT_HEADER {
            let _ = write!(body, "<th>{column}</th>");
        }
        body.push_str("</tr></thead><tbody>");
        for record in result {
            let url = escape(record.search_url.as_str());
            let _ = write!(
                body,
                r#"<tr><td>{}</td><td>{}</td><td>{}</td><td><a href="{url}">{url}</a></td></tr>"#,
                escape(&record.query.model),
                escape(&record.query.trim),
                record.vin,
            );
        }
        body.push_str("</tbody></table>");
    }

    let _ = write!(
        body,
        r#"<p><a href="/download" download="{EXPORT_FILENAME}">Download VINs as CSV</a> · <a href="/">New upload</a></p>"#
    );
    layout(TITLE, &body)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title>\
<style>{STYLE}</style></head><body><h1>{title}</h1>{body}</body></html>",
        title = escape(title),
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
