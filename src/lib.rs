pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod report;
pub mod source;
#[cfg(test)]
pub mod test_helpers;
pub mod trading;
