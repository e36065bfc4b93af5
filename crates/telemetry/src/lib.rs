//! Observability for the Fundatlas fund directory.

pub mod audit;
pub mod logging;
pub mod metrics;

pub use logging::init_logging;
pub use metrics::Metrics;
