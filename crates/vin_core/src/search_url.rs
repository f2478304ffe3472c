use std::fmt;

use url::Url;

use crate::Query;

/// TrueCar new-car listings for Ford.
pub const DEFAULT_BASE_URL: &str = "https://www.truecar.com/new-cars-for-sale/listings/ford";

/// Listing search URL for a single query, without a page parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchUrl(String);

impl SearchUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// URL of the given 1-based results page.
    pub fn page(&self, page: u32) -> String {
        page_url(&self.0, page)
    }
}

impl fmt::Display for SearchUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SearchUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("invalid base url {base:?}: {message}")]
    InvalidBase { base: String, message: String },
}

/// Builds `<base>/<model>/?trim=<trim>` search URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchUrlBuilder {
    base: String,
}

impl SearchUrlBuilder {
    pub fn new(base: &str) -> Result<Self, UrlError> {
        let parsed = Url::parse(base).map_err(|err| UrlError::InvalidBase {
            base: base.to_string(),
            message: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(UrlError::InvalidBase {
                base: base.to_string(),
                message: format!("unsupported scheme {}", parsed.scheme()),
            });
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(UrlError::InvalidBase {
                base: base.to_string(),
                message: "base must not carry a query or fragment".to_string(),
            });
        }
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn build(&self, query: &Query) -> SearchUrl {
        self.build_parts(&query.model, &query.trim)
    }

    pub fn build_parts(&self, model: &str, trim: &str) -> SearchUrl {
        SearchUrl(format!(
            "{base}/{model}/?trim={trim}",
            base = self.base,
            model = slug(model),
            trim = slug(trim)
        ))
    }
}

impl Default for SearchUrlBuilder {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Search URL for `(model, trim)` against [`DEFAULT_BASE_URL`].
///
/// Inputs are lowercased and every space becomes a hyphen. Nothing is
/// validated: an unknown model simply yields a URL with no listings.
pub fn build_url(model: &str, trim: &str) -> SearchUrl {
    SearchUrlBuilder::default().build_parts(model, trim)
}

/// Appends the `page` parameter to a search URL.
pub fn page_url(search_url: &str, page: u32) -> String {
    let separator = if search_url.contains('?') { '&' } else { '?' };
    format!("{search_url}{separator}page={page}")
}

fn slug(input: &str) -> String {
    input.to_lowercase().replace(' ', "-")
}
