//! Database models and types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A venture-capital fund as stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Fund {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub domain: Option<String>,
    pub linkedin_url: Option<String>,
    /// Smallest first cheque the fund writes, in whole currency units.
    pub first_cheque_minimum: Option<i64>,
    /// Largest first cheque the fund writes, in whole currency units.
    pub first_cheque_maximum: Option<i64>,
    pub investor_type_id: Option<i64>,
    pub investment_focus_id: Option<i64>,
    pub contact_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// An investment stage (pre-seed, seed, series A, ...).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Stage {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// An investment theme (climate, deep tech, ...).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Theme {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// An investor type (VC, angel syndicate, family office, ...).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InvestorType {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// An investment focus (generalist, sector-specific, ...).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InvestmentFocus {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Fund-to-stage join row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FundStageLink {
    pub id: i64,
    pub fund_id: i64,
    pub stage_id: i64,
}

/// Fund-to-theme join row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FundThemeLink {
    pub id: i64,
    pub fund_id: i64,
    pub theme_id: i64,
}

/// A contact person attached to a fund or a portfolio company.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TeamMember {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A portfolio company a platform user belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PortfolioCompany {
    pub id: i64,
    pub name: String,
    pub domain: Option<String>,
    pub contact_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// A platform user. Only the name fields are mutable through this service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub portfolio_company_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}
