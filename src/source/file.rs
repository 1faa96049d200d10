use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::LoadError;
use crate::source::CsvSource;

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CsvSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_all(&self) -> Result<String, LoadError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.describe(),
                source,
            })
    }
}
