use serde::{Deserialize, Serialize};

use crate::models::trade::{Columns, AMOUNT_COLUMN, DATE_COLUMN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str_loose(s: &str) -> Option<OutputFormat> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Input
    pub csv_path: String,
    pub csv_url: Option<String>,
    pub http_timeout_secs: u64,

    // Columns feeding the aggregation
    pub date_column: String,
    pub amount_column: String,

    // Output
    pub output: OutputFormat,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        Config {
            csv_path: env("CSV_PATH", "trades.csv"),
            csv_url: std::env::var("CSV_URL").ok().filter(|u| !u.trim().is_empty()),
            http_timeout_secs: env("HTTP_TIMEOUT_SECS", "30").parse().unwrap_or(30),
            date_column: env("DATE_COLUMN", DATE_COLUMN),
            amount_column: env("AMOUNT_COLUMN", AMOUNT_COLUMN),
            output: OutputFormat::from_str_loose(&env("OUTPUT_FORMAT", "text"))
                .unwrap_or(OutputFormat::Text),
            log_level: env("LOG_LEVEL", "info"),
        }
    }

    pub fn columns(&self) -> Columns {
        Columns {
            date: self.date_column.clone(),
            amount: self.amount_column.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            csv_path: "trades.csv".to_string(),
            csv_url: None,
            http_timeout_secs: 30,
            date_column: DATE_COLUMN.to_string(),
            amount_column: AMOUNT_COLUMN.to_string(),
            output: OutputFormat::Text,
            log_level: "info".to_string(),
        }
    }
}
