use vitals_client::{MetricKind, VitalsSource, config::Config, http_client::ReqwestVitalsClient};
use vitals_stats::{Thresholds, summarize};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Example: expects VITALS_API_KEY and VITALS_USER_ID in env
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {}", e);
            return Ok(());
        }
    };
    let client = ReqwestVitalsClient::from_config(&cfg);
    let measurements = client.fetch_measurements().await?;
    let thresholds = Thresholds::default();

    for kind in MetricKind::ALL {
        let summary = summarize(&measurements, kind, &thresholds);
        if let Some(current) = summary.current {
            println!(
                "{}: {} {} ({:?}, change {})",
                kind,
                current,
                kind.canonical_unit(),
                summary.trend,
                summary.change
            );
        }
    }
    Ok(())
}
