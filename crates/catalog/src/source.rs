//! Entity source abstraction for catalog loading.
//!
//! The loader fetches each table separately and joins relations in memory,
//! so the source only needs flat per-entity reads. The trait keeps the
//! loader testable without a database.

use async_trait::async_trait;
use fundatlas_db::models::{
    Fund, FundStageLink, FundThemeLink, InvestmentFocus, InvestorType, Stage, Theme,
};
use fundatlas_db::{queries, DbPool};

/// Per-entity reads backing a catalog load.
#[async_trait]
pub trait FundSource: Send + Sync {
    async fn fetch_funds(&self) -> anyhow::Result<Vec<Fund>>;
    async fn fetch_stages(&self) -> anyhow::Result<Vec<Stage>>;
    async fn fetch_themes(&self) -> anyhow::Result<Vec<Theme>>;
    async fn fetch_investor_types(&self) -> anyhow::Result<Vec<InvestorType>>;
    async fn fetch_investment_focuses(&self) -> anyhow::Result<Vec<InvestmentFocus>>;
    async fn fetch_fund_stage_links(&self) -> anyhow::Result<Vec<FundStageLink>>;
    async fn fetch_fund_theme_links(&self) -> anyhow::Result<Vec<FundThemeLink>>;
}

/// SQLite-backed entity source.
pub struct SqliteFundSource {
    db: DbPool,
}

impl SqliteFundSource {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FundSource for SqliteFundSource {
    async fn fetch_funds(&self) -> anyhow::Result<Vec<Fund>> {
        queries::fetch_funds(self.db.pool()).await
    }

    async fn fetch_stages(&self) -> anyhow::Result<Vec<Stage>> {
        queries::fetch_stages(self.db.pool()).await
    }

    async fn fetch_themes(&self) -> anyhow::Result<Vec<Theme>> {
        queries::fetch_themes(self.db.pool()).await
    }

    async fn fetch_investor_types(&self) -> anyhow::Result<Vec<InvestorType>> {
        queries::fetch_investor_types(self.db.pool()).await
    }

    async fn fetch_investment_focuses(&self) -> anyhow::Result<Vec<InvestmentFocus>> {
        queries::fetch_investment_focuses(self.db.pool()).await
    }

    async fn fetch_fund_stage_links(&self) -> anyhow::Result<Vec<FundStageLink>> {
        queries::fetch_fund_stage_links(self.db.pool()).await
    }

    async fn fetch_fund_theme_links(&self) -> anyhow::Result<Vec<FundThemeLink>> {
        queries::fetch_fund_theme_links(self.db.pool()).await
    }
}
