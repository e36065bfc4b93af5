//! Introduction email drafts.
//!
//! Joins the viewing user's portfolio-company record with a fund's contact
//! record and renders an email draft plus a `mailto:` link. The email is
//! addressed to the portfolio company's own team contact, asking them to
//! make the introduction to the fund.

pub mod composer;
pub mod mailto;

pub use composer::{draft_intro, IntroDraft};
pub use mailto::mailto_link;

/// Error type for the introduction-email flow.
#[derive(Debug, thiserror::Error)]
pub enum IntroError {
    #[error("User not found: {0}")]
    UserNotFound(i64),
    /// The user record is missing a first or last name; the caller should
    /// collect both and retry after a profile update.
    #[error("User profile is missing a first or last name")]
    ProfileIncomplete,
    #[error("No portfolio company associated with user {0}")]
    NoPortfolioCompany(i64),
    #[error("Fund not found: {0}")]
    FundNotFound(i64),
    #[error("Database error: {0}")]
    Db(#[from] anyhow::Error),
}

/// Result type for the introduction-email flow.
pub type IntroResult<T> = Result<T, IntroError>;
