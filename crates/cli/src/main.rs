//! CLI application for the Fundatlas fund directory service.

mod api;

use clap::{Parser, Subcommand};
use fundatlas_catalog::{load_catalog, SqliteFundSource};
use fundatlas_db::DbPool;
use fundatlas_telemetry::{init_logging, Metrics};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::sleep;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "fundatlas")]
#[command(about = "Fund directory service for founders browsing venture-capital funds")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the directory HTTP service
    Serve {
        /// Database path
        #[arg(long, default_value = "fundatlas.db")]
        database_path: String,

        /// HTTP bind address
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind_address: String,

        /// Catalog refresh interval in seconds
        #[arg(long, default_value = "300")]
        refresh_interval_seconds: u64,

        /// Log level
        #[arg(long)]
        log_level: Option<String>,

        /// Audit output path for generated intro drafts
        #[arg(long)]
        audit_output_path: Option<String>,
    },
    /// Import or refresh funds from a CSV file
    ImportFunds {
        /// Database path
        #[arg(long, default_value = "fundatlas.db")]
        database_path: String,

        /// Funds CSV path
        #[arg(long, default_value = "data/funds_example.csv")]
        funds_csv: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            database_path,
            bind_address,
            refresh_interval_seconds,
            log_level,
            audit_output_path,
        } => {
            init_logging(log_level.as_deref())?;
            run_serve(
                &database_path,
                &bind_address,
                refresh_interval_seconds,
                audit_output_path,
            )
            .await?;
        }
        Commands::ImportFunds {
            database_path,
            funds_csv,
        } => {
            init_logging(None)?;
            import_funds(&database_path, &funds_csv).await?;
        }
    }

    Ok(())
}

async fn run_serve(
    db_path: &str,
    bind_address: &str,
    refresh_interval: u64,
    audit_output_path: Option<String>,
) -> anyhow::Result<()> {
    info!("Starting Fundatlas directory service");

    let db = DbPool::new(db_path).await?;
    db.migrate().await?;

    let metrics = Metrics::new()?;
    let source = SqliteFundSource::new(db.clone());

    let catalog = load_catalog(&source).await?;
    metrics.inc_catalog_loads();
    metrics.inc_funds_loaded(catalog.len() as u64);
    if catalog.is_empty() {
        warn!("Catalog is empty; run import-funds to seed the directory");
    }

    let state = Arc::new(api::AppState {
        db,
        catalog: RwLock::new(catalog),
        metrics: metrics.clone(),
        audit_output_path,
    });

    // Background refresh keeps the in-memory snapshot in step with
    // externally written rows.
    let refresh_state = state.clone();
    let refresh_duration = Duration::from_secs(refresh_interval.max(1));
    tokio::spawn(async move {
        loop {
            sleep(refresh_duration).await;
            match load_catalog(&SqliteFundSource::new(refresh_state.db.clone())).await {
                Ok(fresh) => {
                    refresh_state.metrics.inc_catalog_loads();
                    refresh_state.metrics.inc_funds_loaded(fresh.len() as u64);
                    info!("Refreshed catalog snapshot with {} funds", fresh.len());
                    *refresh_state.catalog.write().await = fresh;
                }
                Err(e) => {
                    refresh_state.metrics.inc_db_errors();
                    error!("Catalog refresh failed: {}", e);
                }
            }
        }
    });

    let app = api::router(state);
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!("Directory service listening on http://{}", bind_address);
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(serde::Deserialize)]
struct FundRecord {
    name: String,
    description: Option<String>,
    domain: Option<String>,
    linkedin_url: Option<String>,
    first_cheque_minimum: Option<i64>,
    first_cheque_maximum: Option<i64>,
    investor_type: Option<String>,
    investment_focus: Option<String>,
    /// Semicolon-separated stage names.
    stages: Option<String>,
    /// Semicolon-separated theme names.
    themes: Option<String>,
}

async fn import_funds(db_path: &str, csv_path: &str) -> anyhow::Result<()> {
    info!("Importing funds from {}", csv_path);

    let db = DbPool::new(db_path).await?;
    db.migrate().await?;
    let mut reader = csv::Reader::from_path(csv_path)?;

    let mut count = 0;
    for result in reader.deserialize() {
        let record: FundRecord = result?;
        import_fund_record(&db, &record).await?;
        count += 1;
    }

    info!("Imported {} funds", count);
    Ok(())
}

async fn import_fund_record(db: &DbPool, record: &FundRecord) -> anyhow::Result<()> {
    let investor_type_id = match record.investor_type.as_deref() {
        Some(name) if !name.trim().is_empty() => {
            Some(ensure_named_row(db, "investor_types", name.trim()).await?)
        }
        _ => None,
    };
    let investment_focus_id = match record.investment_focus.as_deref() {
        Some(name) if !name.trim().is_empty() => {
            Some(ensure_named_row(db, "investment_focuses", name.trim()).await?)
        }
        _ => None,
    };

    sqlx::query(
        r#"
        INSERT INTO funds (
            name, description, domain, linkedin_url,
            first_cheque_minimum, first_cheque_maximum,
            investor_type_id, investment_focus_id, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, datetime('now'))
        ON CONFLICT(name) DO UPDATE SET
            description = excluded.description,
            domain = excluded.domain,
            linkedin_url = excluded.linkedin_url,
            first_cheque_minimum = excluded.first_cheque_minimum,
            first_cheque_maximum = excluded.first_cheque_maximum,
            investor_type_id = excluded.investor_type_id,
            investment_focus_id = excluded.investment_focus_id,
            updated_at = datetime('now')
        "#,
    )
    .bind(&record.name)
    .bind(&record.description)
    .bind(&record.domain)
    .bind(&record.linkedin_url)
    .bind(record.first_cheque_minimum)
    .bind(record.first_cheque_maximum)
    .bind(investor_type_id)
    .bind(investment_focus_id)
    .execute(db.pool())
    .await?;

    let fund_id: i64 = sqlx::query_scalar("SELECT id FROM funds WHERE name = ?")
        .bind(&record.name)
        .fetch_one(db.pool())
        .await?;

    // Join rows are replaced wholesale so the CSV stays authoritative.
    sqlx::query("DELETE FROM fund_stages WHERE fund_id = ?")
        .bind(fund_id)
        .execute(db.pool())
        .await?;
    for name in split_names(record.stages.as_deref()) {
        let stage_id = ensure_named_row(db, "stages", &name).await?;
        sqlx::query("INSERT OR IGNORE INTO fund_stages (fund_id, stage_id) VALUES (?, ?)")
            .bind(fund_id)
            .bind(stage_id)
            .execute(db.pool())
            .await?;
    }

    sqlx::query("DELETE FROM fund_themes WHERE fund_id = ?")
        .bind(fund_id)
        .execute(db.pool())
        .await?;
    for name in split_names(record.themes.as_deref()) {
        let theme_id = ensure_named_row(db, "themes", &name).await?;
        sqlx::query("INSERT OR IGNORE INTO fund_themes (fund_id, theme_id) VALUES (?, ?)")
            .bind(fund_id)
            .bind(theme_id)
            .execute(db.pool())
            .await?;
    }

    Ok(())
}

fn split_names(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Insert a name-keyed lookup row if missing and return its id.
///
/// `table` must be one of the fixed lookup table names; it is never
/// user-supplied.
async fn ensure_named_row(db: &DbPool, table: &str, name: &str) -> anyhow::Result<i64> {
    sqlx::query(&format!(
        "INSERT OR IGNORE INTO {} (name) VALUES (?)",
        table
    ))
    .bind(name)
    .execute(db.pool())
    .await?;

    let id: i64 = sqlx::query_scalar(&format!("SELECT id FROM {} WHERE name = ?", table))
        .bind(name)
        .fetch_one(db.pool())
        .await?;
    Ok(id)
}
