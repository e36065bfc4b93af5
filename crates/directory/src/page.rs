//! Pagination by array slicing.

use fundatlas_catalog::FundProfile;
use serde::Serialize;

/// Default number of funds per page.
pub const DEFAULT_PAGE_SIZE: usize = 24;

/// Upper bound on client-requested page sizes.
pub const MAX_PAGE_SIZE: usize = 100;

/// One page of the filtered directory view.
#[derive(Debug, Clone, Serialize)]
pub struct FundPage {
    pub items: Vec<FundProfile>,
    /// Funds in the catalog before filtering.
    pub total: usize,
    /// Funds matching the active filters.
    pub filtered: usize,
    pub page: usize,
    pub per_page: usize,
    /// Whether another page of results exists past this one.
    pub has_more: bool,
}

/// Slice one page out of a filtered view.
///
/// `page` is 1-based; 0 is treated as 1. A `per_page` of 0 falls back to
/// the default, and values above [`MAX_PAGE_SIZE`] are clamped. A page
/// past the end yields an empty slice with `has_more = false`.
pub fn paginate(
    filtered: &[&FundProfile],
    total: usize,
    page: usize,
    per_page: usize,
) -> FundPage {
    let page = page.max(1);
    let per_page = if per_page == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        per_page.min(MAX_PAGE_SIZE)
    };

    let start = (page - 1).saturating_mul(per_page);
    let items: Vec<FundProfile> = filtered
        .iter()
        .skip(start)
        .take(per_page)
        .map(|p| (*p).clone())
        .collect();
    let has_more = start + items.len() < filtered.len();

    FundPage {
        items,
        total,
        filtered: filtered.len(),
        page,
        per_page,
        has_more,
    }
}
