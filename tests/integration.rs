mod common;

use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use trade_calendar::app::{handle_upload, render, AppState, View};
use trade_calendar::core::pipeline::{build_calendar, load_calendar};
use trade_calendar::error::LoadError;
use trade_calendar::models::{Columns, Sentiment, TargetMonth};
use trade_calendar::report::{CalendarReport, ClosedTradesSummary, DayDetail};
use trade_calendar::source::{CsvSource, FileSource, HttpSource, UploadSource};
use trade_calendar::trading::closed_trades::{pair_closed_trades, transactions_from_csv};

use common::{fixture, fixture_path, MockSource};

const OCTOBER: &str = "october_2025.csv";

/// Serve one HTTP response on a local port and return the URL to fetch.
async fn serve_once(status_line: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });

    format!("http://{}/trades.csv", addr)
}

fn local_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

// ============================================================
// Full pipeline
// ============================================================

#[tokio::test]
async fn test_full_month_from_mock_source() {
    let source = MockSource::new(fixture(OCTOBER));
    let cal = load_calendar(&source, &Columns::default()).await.unwrap();
    assert_eq!(source.reads(), 1);

    assert_eq!(cal.label, "October 2025");
    assert_eq!(cal.target, TargetMonth::new(2025, 10).unwrap());
    assert_eq!(cal.matrix.weeks().len(), 5);
    assert_eq!(cal.matrix.cell_count(), 23);

    // October 1st 2025 is a Wednesday.
    let first_week = &cal.matrix.weeks()[0];
    assert!(first_week[0].is_none());
    assert!(first_week[1].is_none());
    assert_eq!(first_week[2].as_ref().unwrap().date, 1);

    let stats = cal.monthly_stats();
    assert_eq!(stats.active_days, 21);
    assert!((stats.net - 2453.0).abs() < 1e-6);
    assert!((stats.avg - 2453.0 / 21.0).abs() < 1e-6);
    assert_eq!(stats.sentiment(), Sentiment::Positive);

    let weekly_net: f64 = cal.weekly_stats().iter().map(|w| w.net).sum();
    assert!((weekly_net - stats.net).abs() < 1e-6);
}

#[tokio::test]
async fn test_fixture_day_cells() {
    let cal = build_calendar(&fixture(OCTOBER), &Columns::default()).unwrap();

    let oct1 = cal.select_day(1).unwrap();
    assert!(oct1.has_trades);
    assert!((oct1.profit + 165.0).abs() < 1e-6);

    let oct6 = cal.select_day(6).unwrap();
    assert_eq!(oct6.trades, 2);
    assert!((oct6.profit - 435.0).abs() < 1e-6);
    assert!((oct6.win_rate - 50.0).abs() < 1e-9);

    // Two weekdays without activity.
    for day in [15, 28] {
        let idle = cal.select_day(day).unwrap();
        assert!(!idle.has_trades);
        assert_eq!(idle.trades, 0);
        assert_eq!(idle.profit, 0.0);
    }

    // Weekends never appear.
    assert!(cal.select_day(4).is_none());
    assert!(cal.select_day(5).is_none());

    // The expiration row has no amount and still counts as a trade.
    let oct17 = cal.select_day(17).unwrap();
    assert!(oct17
        .records
        .iter()
        .any(|r| r.record.get("Trans Code") == "OEXP" && r.amount == 0.0));
}

#[tokio::test]
async fn test_unreachable_source_fails_the_run() {
    let source = MockSource::unreachable();
    let err = load_calendar(&source, &Columns::default()).await.unwrap_err();
    assert!(err.is_transport());
    assert!(err.to_string().contains("503"));
}

// ============================================================
// Sources
// ============================================================

#[tokio::test]
async fn test_file_source_reads_fixture() {
    let source = FileSource::new(fixture_path(OCTOBER));
    let text = source.read_all().await.unwrap();
    assert!(text.starts_with("Activity Date,"));

    let cal = load_calendar(&source, &Columns::default()).await.unwrap();
    assert_eq!(cal.label, "October 2025");
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let path = std::env::temp_dir().join(format!(
        "trade-calendar-missing-{}.csv",
        std::process::id()
    ));
    let err = FileSource::new(&path).read_all().await.unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_file_source_temp_file() {
    let path = std::env::temp_dir().join(format!("trade-calendar-{}.csv", std::process::id()));
    tokio::fs::write(&path, "Activity Date,Amount\n3/4/24,\"$1,250.00\"\n")
        .await
        .unwrap();

    let cal = load_calendar(&FileSource::new(&path), &Columns::default())
        .await
        .unwrap();
    tokio::fs::remove_file(&path).await.ok();

    assert_eq!(cal.label, "March 2024");
    assert!((cal.select_day(4).unwrap().profit - 1250.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_http_source_fetches_body() {
    let url = serve_once("200 OK", fixture(OCTOBER)).await;
    let source = HttpSource::with_client(url.clone(), local_client());
    assert_eq!(source.describe(), url);

    let cal = load_calendar(&source, &Columns::default()).await.unwrap();
    assert_eq!(cal.monthly_stats().active_days, 21);
}

#[tokio::test]
async fn test_http_error_status_is_reported() {
    let url = serve_once("404 Not Found", "missing".to_string()).await;
    let source = HttpSource::with_client(url, local_client());

    match source.read_all().await {
        Err(LoadError::HttpStatus { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected HTTP status error, got {:?}", other.map(|t| t.len())),
    }
}

#[tokio::test]
async fn test_http_source_applies_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // Accept and never answer.
    tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let source = HttpSource::new(
        format!("http://{}/slow.csv", addr),
        Duration::from_millis(200),
    )
    .unwrap();

    let started = std::time::Instant::now();
    let err = source.read_all().await.unwrap_err();
    assert!(err.is_transport());
    assert!(started.elapsed() < Duration::from_secs(10));
}

// ============================================================
// Application state
// ============================================================

#[tokio::test]
async fn test_render_then_failed_upload_keeps_calendar() {
    let columns = Columns::default();
    let state = render(AppState::new(), &MockSource::new(fixture(OCTOBER)), &columns).await;
    assert_eq!(state.calendar().unwrap().label, "October 2025");

    let bad = UploadSource::new("notes.csv", "Symbol,Notes\nSPY,none\n");
    let state = handle_upload(state, bad, &columns).await;
    assert_eq!(state.calendar().unwrap().label, "October 2025");
    assert!(state
        .banner()
        .unwrap()
        .starts_with("Could not build the calendar"));

    let good = UploadSource::new("march.csv", "Activity Date,Amount\n3/4/24,$10\n");
    let mut state = handle_upload(state, good, &columns).await;
    assert_eq!(state.calendar().unwrap().label, "March 2024");
    assert!(state.banner().is_none());
    assert!(state.select_day(4).is_some());
}

#[tokio::test]
async fn test_initial_render_failure() {
    let state = render(AppState::new(), &MockSource::unreachable(), &Columns::default()).await;
    match state.view() {
        View::Failed(msg) => assert!(msg.starts_with("Could not load trades")),
        other => panic!("expected failure view, got {:?}", other),
    }
}

// ============================================================
// Reports
// ============================================================

#[test]
fn test_text_report_for_fixture() {
    let cal = build_calendar(&fixture(OCTOBER), &Columns::default()).unwrap();
    let text = CalendarReport::new(&cal).to_string();

    assert!(text.contains("October 2025"));
    assert!(text.contains("Monthly stats: +$2.45K • 21 days"));
    assert!(text.contains("21 active days • Avg +$117"));
    assert!(text.contains("Week 5"));
    assert_eq!(text.matches("No data").count(), 2);
    assert_eq!(text.matches("No trades").count(), 2);

    let detail = DayDetail::new(cal.target, cal.select_day(6).unwrap()).to_string();
    assert!(detail.contains("Monday, October 6, 2025"));
    assert!(detail.contains("SPY 10/6/2025 Put $660.00"));
    assert!(detail.contains("+$1.03K"));
}

#[test]
fn test_json_snapshot_for_fixture() {
    let cal = build_calendar(&fixture(OCTOBER), &Columns::default()).unwrap();
    let json = serde_json::to_value(cal.snapshot()).unwrap();

    assert_eq!(json["year"], 2025);
    assert_eq!(json["monthly"]["activeDays"], 21);
    assert_eq!(json["weeks"].as_array().unwrap().len(), 5);
    assert_eq!(json["weekly"].as_array().unwrap().len(), 5);
    assert!(json["weeks"][4][4].is_object());
}

// ============================================================
// Closed trades
// ============================================================

#[test]
fn test_closed_trades_on_fixture() {
    let report = pair_closed_trades(transactions_from_csv(
        &fixture(OCTOBER),
        &Columns::default(),
    ));

    assert_eq!(report.closed.len(), 47);
    assert!((report.total_profit() - 2683.0).abs() < 1e-6);

    let open: Vec<&str> = report.open_positions.keys().map(String::as_str).collect();
    assert_eq!(
        open,
        vec!["SPY 11/3/2025 Call $680.00", "QQQ 11/7/2025 Call $620.00"]
    );

    let text = ClosedTradesSummary::new(&report).to_string();
    assert!(text.starts_with("Closed trades and profitability:"));
    assert!(text.contains("Total profit across closed trades: +2683.00"));
    assert!(text.contains("Open positions that were not matched with a closing trade:"));
}
