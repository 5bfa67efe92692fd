use chrono::NaiveDate;
use std::fs;
use tempfile::TempDir;
use wiremock::MockServer;

mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn mount_timeseries(
        mock_server: &MockServer,
        base: &str,
        status: u16,
        mock_response: &str,
        expected_calls: u64,
    ) {
        Mock::given(method("GET"))
            .and(path("/timeseries"))
            .and(query_param("base", base))
            .and(query_param("symbols", "JPY"))
            .and(query_param("start_date", "2023-01-01"))
            .and(query_param("end_date", "2023-02-28"))
            .respond_with(ResponseTemplate::new(status).set_body_string(mock_response))
            .expect(expected_calls)
            .mount(mock_server)
            .await;
    }

    pub const USD_RESPONSE: &str = r#"{
        "success": true,
        "base": "USD",
        "rates": {
            "2023-01-05": {"JPY": 100.0},
            "2023-01-20": {"JPY": 102.0},
            "2023-02-10": {"JPY": 104.0}
        }
    }"#;

    pub const EUR_RESPONSE: &str = r#"{
        "success": true,
        "base": "EUR",
        "rates": {
            "2023-02-01": {"JPY": 140.0},
            "2023-02-02": {"JPY": 142.0},
            "2023-02-03": {}
        }
    }"#;
}

fn write_config(dir: &TempDir, mock_server: &MockServer) -> String {
    let config_path = dir.path().join("config.yaml");
    let config_content = format!(
        r#"
        providers:
          exchangerate:
            base_url: {}
            timeout_secs: 5
        target_currency: "JPY"
    "#,
        mock_server.uri()
    );
    fs::write(&config_path, &config_content).expect("Failed to write config file");
    config_path.to_string_lossy().into_owned()
}

fn range() -> fxavg::RangeOptions {
    fxavg::RangeOptions {
        start: NaiveDate::from_ymd_opt(2023, 1, 1),
        end: NaiveDate::from_ymd_opt(2023, 2, 28),
    }
}

#[test_log::test(tokio::test)]
async fn test_report_flow_fetches_each_currency_once() {
    let mock_server = MockServer::start().await;
    test_utils::mount_timeseries(&mock_server, "USD", 200, test_utils::USD_RESPONSE, 1).await;
    test_utils::mount_timeseries(&mock_server, "EUR", 200, test_utils::EUR_RESPONSE, 1).await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir, &mock_server);
    let output = temp_dir.path().join("fx_monthly_avg.xlsx");

    let result = fxavg::run_command(
        fxavg::AppCommand::Report {
            output: output.clone(),
        },
        Some(&config_path),
        range(),
    )
    .await;
    assert!(
        result.is_ok(),
        "Report command failed with: {:?}",
        result.err()
    );

    let bytes = fs::read(&output).expect("Export file should exist");
    assert!(bytes.starts_with(b"PK"));
}

#[test_log::test(tokio::test)]
async fn test_export_skipped_when_one_currency_is_empty() {
    let mock_server = MockServer::start().await;
    test_utils::mount_timeseries(&mock_server, "USD", 200, test_utils::USD_RESPONSE, 1).await;
    test_utils::mount_timeseries(&mock_server, "EUR", 200, r#"{"rates": {}}"#, 1).await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir, &mock_server);
    let output = temp_dir.path().join("fx_monthly_avg.xlsx");

    let result = fxavg::run_command(
        fxavg::AppCommand::Export {
            output: output.clone(),
        },
        Some(&config_path),
        range(),
    )
    .await;
    assert!(result.is_ok(), "Export failed with: {:?}", result.err());
    assert!(!output.exists());
}

#[test_log::test(tokio::test)]
async fn test_chart_survives_unreachable_currency() {
    let mock_server = MockServer::start().await;
    test_utils::mount_timeseries(&mock_server, "USD", 200, test_utils::USD_RESPONSE, 1).await;
    test_utils::mount_timeseries(&mock_server, "EUR", 500, "", 1).await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir, &mock_server);

    let result = fxavg::run_command(fxavg::AppCommand::Chart, Some(&config_path), range()).await;
    assert!(result.is_ok(), "Chart failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_report_requests_unreachable_currency_once() {
    let mock_server = MockServer::start().await;
    test_utils::mount_timeseries(&mock_server, "USD", 200, test_utils::USD_RESPONSE, 1).await;
    test_utils::mount_timeseries(&mock_server, "EUR", 500, "", 1).await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir, &mock_server);
    let output = temp_dir.path().join("fx_monthly_avg.xlsx");

    let result = fxavg::run_command(
        fxavg::AppCommand::Report {
            output: output.clone(),
        },
        Some(&config_path),
        range(),
    )
    .await;
    assert!(result.is_ok(), "Report failed with: {:?}", result.err());
    assert!(!output.exists());
}

#[test_log::test(tokio::test)]
async fn test_unreachable_currency_does_not_hide_other_series() {
    use fxavg::cli::chart::render_series;
    use fxavg::core::config::ExchangeRateProviderConfig;
    use fxavg::core::dashboard::load_all;
    use fxavg::core::rates::{BASE_CURRENCIES, DateRange, RateQuery, RateRecord};
    use fxavg::core::SeriesState;
    use fxavg::providers::caching::CachingRateProvider;
    use fxavg::providers::exchangerate_host::ExchangeRateHostProvider;
    use fxavg::store::MemoryCache;
    use std::sync::Arc;

    let mock_server = MockServer::start().await;
    test_utils::mount_timeseries(&mock_server, "USD", 200, test_utils::USD_RESPONSE, 1).await;
    test_utils::mount_timeseries(&mock_server, "EUR", 500, "", 1).await;

    let config = ExchangeRateProviderConfig {
        base_url: mock_server.uri(),
        ..Default::default()
    };
    let upstream = ExchangeRateHostProvider::new(&config).expect("Failed to build provider");
    let cache = Arc::new(MemoryCache::<RateQuery, Vec<RateRecord>>::new());
    let provider = CachingRateProvider::new(upstream, cache, None);

    let options = range();
    let date_range = DateRange::new(options.start.unwrap(), options.end.unwrap()).unwrap();
    let series = load_all(&provider, &BASE_CURRENCIES, "JPY", date_range, &|| ()).await;

    assert_eq!(series[0].base, "USD");
    let usd_monthly = series[0].monthly().expect("USD series should be ready");
    assert_eq!(usd_monthly.len(), 2);
    assert_eq!(usd_monthly[0].average_rate, 101.0);

    assert_eq!(series[1].base, "EUR");
    assert!(matches!(series[1].state, SeriesState::Unavailable(ref e) if e.contains("500")));

    assert!(render_series(&series[0]).contains("2023-01"));
    assert!(render_series(&series[1]).contains("Could not fetch EUR → JPY"));
}

#[test_log::test(tokio::test)]
async fn test_reversed_range_is_rejected_before_fetching() {
    let mock_server = MockServer::start().await;
    test_utils::mount_timeseries(&mock_server, "USD", 200, test_utils::USD_RESPONSE, 0).await;
    test_utils::mount_timeseries(&mock_server, "EUR", 200, test_utils::EUR_RESPONSE, 0).await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir, &mock_server);

    let reversed = fxavg::RangeOptions {
        start: NaiveDate::from_ymd_opt(2023, 2, 28),
        end: NaiveDate::from_ymd_opt(2023, 1, 1),
    };
    let result = fxavg::run_command(fxavg::AppCommand::Chart, Some(&config_path), reversed).await;
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Invalid date range")
    );
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file_is_reported() {
    let result = fxavg::run_command(
        fxavg::AppCommand::Chart,
        Some("/nonexistent/fxavg/config.yaml"),
        range(),
    )
    .await;
    assert!(result.is_err());
}
