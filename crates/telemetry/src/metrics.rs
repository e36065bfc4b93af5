//! Prometheus metrics for the fund directory service.

use prometheus::{
    register_histogram_vec, register_int_counter, Encoder, HistogramVec, IntCounter, TextEncoder,
};

/// Metrics collector for the Fundatlas service.
#[derive(Clone)]
pub struct Metrics {
    catalog_loads: IntCounter,
    funds_loaded: IntCounter,
    directory_queries: IntCounter,
    intro_drafts: IntCounter,
    db_errors: IntCounter,
    query_latency: HistogramVec,
}

impl Metrics {
    /// Create a new metrics instance.
    pub fn new() -> anyhow::Result<Self> {
        let catalog_loads = register_int_counter!(
            "fundatlas_catalog_loads_total",
            "Total number of catalog snapshot loads"
        )?;

        let funds_loaded = register_int_counter!(
            "fundatlas_funds_loaded_total",
            "Total number of fund profiles loaded into catalog snapshots"
        )?;

        let directory_queries = register_int_counter!(
            "fundatlas_directory_queries_total",
            "Total number of filtered directory queries served"
        )?;

        let intro_drafts = register_int_counter!(
            "fundatlas_intro_drafts_total",
            "Total number of introduction email drafts generated"
        )?;

        let db_errors = register_int_counter!(
            "fundatlas_db_errors_total",
            "Total number of database errors"
        )?;

        let query_latency = register_histogram_vec!(
            "fundatlas_query_latency_seconds",
            "Database query latency in seconds",
            &["operation"]
        )?;

        Ok(Self {
            catalog_loads,
            funds_loaded,
            directory_queries,
            intro_drafts,
            db_errors,
            query_latency,
        })
    }

    /// Increment the catalog loads counter.
    pub fn inc_catalog_loads(&self) {
        self.catalog_loads.inc();
    }

    /// Increment the funds loaded counter.
    pub fn inc_funds_loaded(&self, count: u64) {
        self.funds_loaded.inc_by(count);
    }

    /// Increment the directory queries counter.
    pub fn inc_directory_queries(&self) {
        self.directory_queries.inc();
    }

    /// Increment the intro drafts counter.
    pub fn inc_intro_drafts(&self) {
        self.intro_drafts.inc();
    }

    /// Increment the database errors counter.
    pub fn inc_db_errors(&self) {
        self.db_errors.inc();
    }

    /// Record query latency.
    pub fn observe_query_latency(&self, operation: &str, duration_secs: f64) {
        self.query_latency
            .with_label_values(&[operation])
            .observe(duration_secs);
    }

    /// Get Prometheus metrics as a string.
    pub fn gather(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = prometheus::gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
