//! Fund query layer: per-entity fetches stitched into in-memory profiles.

pub mod loader;
pub mod source;

pub use loader::{load_catalog, FundCatalog, FundProfile};
pub use source::{FundSource, SqliteFundSource};
