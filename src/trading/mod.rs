pub mod closed_trades;
