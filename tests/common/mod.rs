use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use trade_calendar::error::LoadError;
use trade_calendar::source::CsvSource;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).unwrap()
}

/// A source serving canned text, or failing like an unreachable server.
pub struct MockSource {
    body: Option<String>,
    reads: AtomicUsize,
}

impl MockSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            body: None,
            reads: AtomicUsize::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CsvSource for MockSource {
    fn describe(&self) -> String {
        "mock".to_string()
    }

    async fn read_all(&self) -> Result<String, LoadError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        match &self.body {
            Some(body) => Ok(body.clone()),
            None => Err(LoadError::HttpStatus {
                url: "http://mock/trades.csv".to_string(),
                status: 503,
            }),
        }
    }
}
