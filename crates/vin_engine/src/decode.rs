use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use vin_logging::vin_debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode page with {encoding}")]
    Malformed { encoding: String },
}

/// Decode a listing page to UTF-8.
///
/// Order of precedence: byte order mark, `charset` in the Content-Type
/// header, then `chardetng` detection over the whole body.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedHtml, DecodeError> {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| {
            content_type
                .and_then(charset_label)
                .and_then(|label| Encoding::for_label(label.as_bytes()))
        })
        .unwrap_or_else(|| detect(bytes));

    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DecodeError::Malformed {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(DecodedHtml {
        html: text.into_owned(),
        encoding_label: encoding.name().to_string(),
    })
}

/// Like [`decode_html`], but never fails: malformed input is decoded lossily
/// as UTF-8 so a VIN scan can still run over the readable parts.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    match decode_html(bytes, content_type) {
        Ok(decoded) => decoded.html,
        Err(err) => {
            vin_debug!("{err}; falling back to lossy utf-8");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

fn detect(bytes: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

fn charset_label(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_string())
    })
}
