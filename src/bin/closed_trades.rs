use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use trade_calendar::config::Config;
use trade_calendar::report::ClosedTradesSummary;
use trade_calendar::source;
use trade_calendar::trading::closed_trades::{pair_closed_trades, transactions_from_csv};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    // Optional path or URL, otherwise the configured source
    let args: Vec<String> = std::env::args().collect();
    let source = match args.get(1) {
        Some(loc) => source::from_location(loc, &cfg)?,
        None => source::from_config(&cfg)?,
    };

    let text = source.read_all().await?;
    let transactions = transactions_from_csv(&text, &cfg.columns());
    info!(
        "Read {} transactions from {}",
        transactions.len(),
        source.describe()
    );

    let report = pair_closed_trades(transactions);
    print!("{}", ClosedTradesSummary::new(&report));

    Ok(())
}
