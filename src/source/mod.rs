pub mod file;
pub mod http;
pub mod upload;

pub use file::FileSource;
pub use http::HttpSource;
pub use upload::UploadSource;

use async_trait::async_trait;
use std::time::Duration;

use crate::config::Config;
use crate::error::LoadError;

/// Where a CSV payload comes from. The whole payload is read in one go.
#[async_trait]
pub trait CsvSource: Send + Sync {
    /// Short human-readable origin, used in logs.
    fn describe(&self) -> String;

    async fn read_all(&self) -> Result<String, LoadError>;
}

/// Pick a source for `location`: URLs are fetched, anything else is a file path.
pub fn from_location(location: &str, cfg: &Config) -> Result<Box<dyn CsvSource>, LoadError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        let source = HttpSource::new(location, Duration::from_secs(cfg.http_timeout_secs))?;
        Ok(Box::new(source))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}

/// The configured source: `CSV_URL` when set, otherwise `CSV_PATH`.
pub fn from_config(cfg: &Config) -> Result<Box<dyn CsvSource>, LoadError> {
    match &cfg.csv_url {
        Some(url) => from_location(url, cfg),
        None => from_location(&cfg.csv_path, cfg),
    }
}
