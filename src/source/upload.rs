use async_trait::async_trait;

use crate::error::LoadError;
use crate::source::CsvSource;

/// A file the user handed over directly, already in memory.
pub struct UploadSource {
    name: String,
    bytes: Vec<u8>,
}

impl UploadSource {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl CsvSource for UploadSource {
    fn describe(&self) -> String {
        format!("upload {} ({} bytes)", self.name, self.bytes.len())
    }

    async fn read_all(&self) -> Result<String, LoadError> {
        String::from_utf8(self.bytes.clone()).map_err(|_| LoadError::Encoding {
            name: self.name.clone(),
        })
    }
}
