//! Filter/paginate layer: re-derives a filtered view of the in-memory fund
//! list on every query and slices it into pages.

pub mod filter;
pub mod page;

pub use filter::{ChequeRange, FundFilters};
pub use page::{paginate, FundPage, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
