//! Typed query helpers for directory entities.

use anyhow::Result;
use sqlx::SqlitePool;

use crate::models::{
    Fund, FundStageLink, FundThemeLink, InvestmentFocus, InvestorType, PortfolioCompany, Stage,
    TeamMember, Theme, User,
};

/// Fetch every fund row.
pub async fn fetch_funds(pool: &SqlitePool) -> Result<Vec<Fund>> {
    let funds = sqlx::query_as::<_, Fund>("SELECT * FROM funds ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(funds)
}

/// Fetch every stage, ordered by name.
pub async fn fetch_stages(pool: &SqlitePool) -> Result<Vec<Stage>> {
    let stages = sqlx::query_as::<_, Stage>("SELECT * FROM stages ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(stages)
}

/// Fetch every theme, ordered by name.
pub async fn fetch_themes(pool: &SqlitePool) -> Result<Vec<Theme>> {
    let themes = sqlx::query_as::<_, Theme>("SELECT * FROM themes ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(themes)
}

/// Fetch every investor type.
pub async fn fetch_investor_types(pool: &SqlitePool) -> Result<Vec<InvestorType>> {
    let types = sqlx::query_as::<_, InvestorType>("SELECT * FROM investor_types ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(types)
}

/// Fetch every investment focus.
pub async fn fetch_investment_focuses(pool: &SqlitePool) -> Result<Vec<InvestmentFocus>> {
    let focuses =
        sqlx::query_as::<_, InvestmentFocus>("SELECT * FROM investment_focuses ORDER BY name")
            .fetch_all(pool)
            .await?;
    Ok(focuses)
}

/// Fetch every fund-to-stage join row.
pub async fn fetch_fund_stage_links(pool: &SqlitePool) -> Result<Vec<FundStageLink>> {
    let links = sqlx::query_as::<_, FundStageLink>("SELECT * FROM fund_stages")
        .fetch_all(pool)
        .await?;
    Ok(links)
}

/// Fetch every fund-to-theme join row.
pub async fn fetch_fund_theme_links(pool: &SqlitePool) -> Result<Vec<FundThemeLink>> {
    let links = sqlx::query_as::<_, FundThemeLink>("SELECT * FROM fund_themes")
        .fetch_all(pool)
        .await?;
    Ok(links)
}

/// Fetch a single fund by id.
pub async fn get_fund(pool: &SqlitePool, fund_id: i64) -> Result<Option<Fund>> {
    let fund = sqlx::query_as::<_, Fund>("SELECT * FROM funds WHERE id = ?")
        .bind(fund_id)
        .fetch_optional(pool)
        .await?;
    Ok(fund)
}

/// Fetch a single user by id.
pub async fn get_user(pool: &SqlitePool, user_id: i64) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Fetch a single portfolio company by id.
pub async fn get_portfolio_company(
    pool: &SqlitePool,
    company_id: i64,
) -> Result<Option<PortfolioCompany>> {
    let company =
        sqlx::query_as::<_, PortfolioCompany>("SELECT * FROM portfolio_companies WHERE id = ?")
            .bind(company_id)
            .fetch_optional(pool)
            .await?;
    Ok(company)
}

/// Fetch a single team member by id.
pub async fn get_team_member(pool: &SqlitePool, member_id: i64) -> Result<Option<TeamMember>> {
    let member = sqlx::query_as::<_, TeamMember>("SELECT * FROM team_members WHERE id = ?")
        .bind(member_id)
        .fetch_optional(pool)
        .await?;
    Ok(member)
}

/// Set a user's first and last name.
///
/// Returns true when a row was updated.
pub async fn update_user_name(
    pool: &SqlitePool,
    user_id: i64,
    first_name: &str,
    last_name: &str,
) -> Result<bool> {
    let result = sqlx::query("UPDATE users SET first_name = ?, last_name = ? WHERE id = ?")
        .bind(first_name)
        .bind(last_name)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
