use std::fmt;

/// One row of user input: a model and the trim to search for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    pub model: String,
    pub trim: String,
}

impl Query {
    pub fn new(model: impl Into<String>, trim: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            trim: trim.into(),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.model, self.trim)
    }
}
