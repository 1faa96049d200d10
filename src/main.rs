use anyhow::{bail, Context, Result};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use trade_calendar::app::{render, AppState, View};
use trade_calendar::config::{Config, OutputFormat};
use trade_calendar::report::{CalendarReport, DayDetail};
use trade_calendar::source;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    // Initialize tracing on stderr; stdout carries the calendar
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI args: [path-or-url] [--json] [--day N]
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut location: Option<String> = None;
    let mut output = cfg.output;
    let mut day: Option<u32> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => output = OutputFormat::Json,
            "--day" => {
                let value = iter.next().context("--day needs a day of the month")?;
                let parsed = value
                    .parse()
                    .with_context(|| format!("invalid day `{}`", value))?;
                day = Some(parsed);
            }
            other => location = Some(other.to_string()),
        }
    }

    let source = match &location {
        Some(loc) => source::from_location(loc, &cfg)?,
        None => source::from_config(&cfg)?,
    };

    let mut state = render(AppState::new(), source.as_ref(), &cfg.columns()).await;

    let calendar = match state.view() {
        View::Ready(calendar) => calendar,
        View::Failed(message) => bail!("{}", message),
        View::Loading => bail!("load of {} did not finish", source.describe()),
    };
    let target = calendar.target;

    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&calendar.snapshot())?)
        }
        OutputFormat::Text => print!("{}", CalendarReport::new(calendar)),
    }

    if let Some(day) = day {
        match state.select_day(day) {
            Some(cell) => match output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(cell)?),
                OutputFormat::Text => {
                    println!();
                    print!("{}", DayDetail::new(target, cell));
                }
            },
            None => warn!("{} has no weekday {} on the grid", target, day),
        }
    }

    Ok(())
}
