use thiserror::Error;

/// Why a single CSV field could not be normalized. Never fatal on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("field is empty")]
    Empty,
    #[error("field does not have the expected shape")]
    Shape,
    #[error("field is not numeric")]
    NotNumeric,
    #[error("field is outside the representable range")]
    OutOfRange,
}

/// Fatal failures of a pipeline run. Nothing is rendered when one of these occurs.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no trade records found in the CSV input")]
    EmptyInput,

    #[error("no valid trade dates found in column `{column}`")]
    NoValidDates { column: String },

    #[error("failed to fetch {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {source}")]
    HttpClient {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{name} is not valid UTF-8 text")]
    Encoding { name: String },
}

impl LoadError {
    /// True for failures to obtain the CSV payload, as opposed to failures of its content.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            LoadError::HttpStatus { .. }
                | LoadError::Transport { .. }
                | LoadError::HttpClient { .. }
                | LoadError::Io { .. }
                | LoadError::Encoding { .. }
        )
    }
}
