// ==========================================
// Cycle Radar - command line entry
// ==========================================
// Usage:
//   cycle-radar [DB_PATH] [--locale LOCALE] [--kpis]
//   cycle-radar --csv EXPORT_DIR [--locale LOCALE] [--kpis]
// Prints the fleet summary (or KPI snapshot) as JSON on stdout.
// ==========================================

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use cycle_radar::api::DashboardApi;
use cycle_radar::config::{resolve_db_path, AnalyticsConfig};
use cycle_radar::i18n::resolve_locale;
use cycle_radar::logging;
use cycle_radar::repository::CsvProductionSource;

#[derive(Debug, Default)]
struct CliArgs {
    db_path: Option<String>,
    csv_dir: Option<String>,
    locale: Option<String>,
    kpis: bool,
}

fn parse_args() -> Result<CliArgs> {
    let mut args = CliArgs::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--csv" => args.csv_dir = Some(iter.next().context("--csv needs a directory")?),
            "--locale" => args.locale = Some(iter.next().context("--locale needs a value")?),
            "--kpis" => args.kpis = true,
            flag if flag.starts_with("--") => bail!("unknown option: {}", flag),
            path => args.db_path = Some(path.to_string()),
        }
    }
    Ok(args)
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let args = parse_args()?;

    tracing::info!("{} v{}", cycle_radar::APP_NAME, cycle_radar::VERSION);

    let mut api = match &args.csv_dir {
        Some(dir) => {
            tracing::info!(dir = %dir, "reading CSV export");
            DashboardApi::new(
                Arc::new(CsvProductionSource::new(dir)),
                AnalyticsConfig::default(),
            )
        }
        None => {
            let db_path = resolve_db_path(args.db_path.as_deref());
            tracing::info!(path = %db_path, "reading SQLite dataset");
            DashboardApi::from_sqlite(&db_path)
                .await
                .with_context(|| format!("cannot open dataset {}", db_path))?
        }
    };

    if let Some(locale) = &args.locale {
        let config = api.config().clone().with_locale(resolve_locale(locale));
        api = api.with_config(config);
    }
    let locale = api.config().locale.clone();

    let output = if args.kpis {
        api.get_kpis().await.map(|k| serde_json::to_string_pretty(&k))
    } else {
        api.compute_fleet_summary()
            .await
            .map(|s| serde_json::to_string_pretty(&s))
    };

    match output {
        Ok(json) => {
            println!("{}", json?);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e.user_message(&locale));
            Err(e.into())
        }
    }
}
