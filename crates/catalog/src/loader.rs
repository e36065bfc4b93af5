//! Catalog loading: fetch all entities and stitch relations in memory.

use fundatlas_db::models::{Fund, InvestmentFocus, InvestorType, Stage, Theme};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::source::FundSource;

/// A fund with its derived relations resolved.
///
/// `stages` and `themes` are read-only views recomputed on every catalog
/// load; they carry no state of their own.
#[derive(Debug, Clone, Serialize)]
pub struct FundProfile {
    #[serde(flatten)]
    pub fund: Fund,
    pub stages: Vec<Stage>,
    pub themes: Vec<Theme>,
    pub investor_type: Option<InvestorType>,
    pub investment_focus: Option<InvestmentFocus>,
}

/// In-memory snapshot of the full directory.
#[derive(Debug, Clone, Default)]
pub struct FundCatalog {
    profiles: Vec<FundProfile>,
    stages: Vec<Stage>,
    themes: Vec<Theme>,
    investor_types: Vec<InvestorType>,
    investment_focuses: Vec<InvestmentFocus>,
}

impl FundCatalog {
    /// All fund profiles, in fund-name order.
    pub fn profiles(&self) -> &[FundProfile] {
        &self.profiles
    }

    /// Look up a single profile by fund id.
    pub fn profile(&self, fund_id: i64) -> Option<&FundProfile> {
        self.profiles.iter().find(|p| p.fund.id == fund_id)
    }

    /// All stages, in name order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// All themes, in name order.
    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn investor_types(&self) -> &[InvestorType] {
        &self.investor_types
    }

    pub fn investment_focuses(&self) -> &[InvestmentFocus] {
        &self.investment_focuses
    }

    /// Number of funds in the snapshot.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Load a fresh catalog snapshot from the source.
///
/// Fetches every table, builds id lookup maps, and stitches each fund's
/// stages, themes, investor type, and investment focus. A join row that
/// points at a missing lookup row is skipped with a warning rather than
/// failing the load.
pub async fn load_catalog(source: &dyn FundSource) -> anyhow::Result<FundCatalog> {
    let funds = source.fetch_funds().await?;
    let stages = source.fetch_stages().await?;
    let themes = source.fetch_themes().await?;
    let investor_types = source.fetch_investor_types().await?;
    let investment_focuses = source.fetch_investment_focuses().await?;
    let stage_links = source.fetch_fund_stage_links().await?;
    let theme_links = source.fetch_fund_theme_links().await?;

    let stage_map: HashMap<i64, &Stage> = stages.iter().map(|s| (s.id, s)).collect();
    let theme_map: HashMap<i64, &Theme> = themes.iter().map(|t| (t.id, t)).collect();
    let investor_type_map: HashMap<i64, &InvestorType> =
        investor_types.iter().map(|it| (it.id, it)).collect();
    let focus_map: HashMap<i64, &InvestmentFocus> =
        investment_focuses.iter().map(|f| (f.id, f)).collect();

    let mut stages_by_fund: HashMap<i64, Vec<Stage>> = HashMap::new();
    for link in &stage_links {
        match stage_map.get(&link.stage_id) {
            Some(stage) => stages_by_fund
                .entry(link.fund_id)
                .or_default()
                .push((*stage).clone()),
            None => warn!(
                "Fund {} references missing stage {}",
                link.fund_id, link.stage_id
            ),
        }
    }

    let mut themes_by_fund: HashMap<i64, Vec<Theme>> = HashMap::new();
    for link in &theme_links {
        match theme_map.get(&link.theme_id) {
            Some(theme) => themes_by_fund
                .entry(link.fund_id)
                .or_default()
                .push((*theme).clone()),
            None => warn!(
                "Fund {} references missing theme {}",
                link.fund_id, link.theme_id
            ),
        }
    }

    let profiles: Vec<FundProfile> = funds
        .into_iter()
        .map(|fund| {
            let mut fund_stages = stages_by_fund.remove(&fund.id).unwrap_or_default();
            fund_stages.sort_by(|a, b| a.name.cmp(&b.name));
            let mut fund_themes = themes_by_fund.remove(&fund.id).unwrap_or_default();
            fund_themes.sort_by(|a, b| a.name.cmp(&b.name));

            let investor_type = fund
                .investor_type_id
                .and_then(|id| investor_type_map.get(&id))
                .map(|it| (*it).clone());
            let investment_focus = fund
                .investment_focus_id
                .and_then(|id| focus_map.get(&id))
                .map(|f| (*f).clone());

            FundProfile {
                fund,
                stages: fund_stages,
                themes: fund_themes,
                investor_type,
                investment_focus,
            }
        })
        .collect();

    info!("Loaded catalog snapshot with {} funds", profiles.len());

    Ok(FundCatalog {
        profiles,
        stages,
        themes,
        investor_types,
        investment_focuses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fundatlas_db::models::{FundStageLink, FundThemeLink};

    struct StubSource {
        funds: Vec<Fund>,
        stages: Vec<Stage>,
        themes: Vec<Theme>,
        investor_types: Vec<InvestorType>,
        stage_links: Vec<FundStageLink>,
        theme_links: Vec<FundThemeLink>,
    }

    #[async_trait]
    impl FundSource for StubSource {
        async fn fetch_funds(&self) -> anyhow::Result<Vec<Fund>> {
            Ok(self.funds.clone())
        }
        async fn fetch_stages(&self) -> anyhow::Result<Vec<Stage>> {
            Ok(self.stages.clone())
        }
        async fn fetch_themes(&self) -> anyhow::Result<Vec<Theme>> {
            Ok(self.themes.clone())
        }
        async fn fetch_investor_types(&self) -> anyhow::Result<Vec<InvestorType>> {
            Ok(self.investor_types.clone())
        }
        async fn fetch_investment_focuses(&self) -> anyhow::Result<Vec<InvestmentFocus>> {
            Ok(vec![])
        }
        async fn fetch_fund_stage_links(&self) -> anyhow::Result<Vec<FundStageLink>> {
            Ok(self.stage_links.clone())
        }
        async fn fetch_fund_theme_links(&self) -> anyhow::Result<Vec<FundThemeLink>> {
            Ok(self.theme_links.clone())
        }
    }

    fn test_fund(id: i64, name: &str, investor_type_id: Option<i64>) -> Fund {
        Fund {
            id,
            name: name.to_string(),
            description: None,
            domain: None,
            linkedin_url: None,
            first_cheque_minimum: None,
            first_cheque_maximum: None,
            investor_type_id,
            investment_focus_id: None,
            contact_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn stub() -> StubSource {
        StubSource {
            funds: vec![test_fund(1, "Alpha Capital", Some(7)), test_fund(2, "Beta Ventures", None)],
            stages: vec![
                Stage { id: 10, name: "Seed".into(), description: None },
                Stage { id: 11, name: "Series A".into(), description: None },
            ],
            themes: vec![Theme { id: 20, name: "Climate".into(), description: None }],
            investor_types: vec![InvestorType { id: 7, name: "VC".into(), description: None }],
            stage_links: vec![
                FundStageLink { id: 1, fund_id: 1, stage_id: 11 },
                FundStageLink { id: 2, fund_id: 1, stage_id: 10 },
                FundStageLink { id: 3, fund_id: 2, stage_id: 99 },
            ],
            theme_links: vec![FundThemeLink { id: 1, fund_id: 2, theme_id: 20 }],
        }
    }

    #[tokio::test]
    async fn stitches_relations_per_fund() {
        let catalog = load_catalog(&stub()).await.unwrap();
        assert_eq!(catalog.len(), 2);

        let alpha = catalog.profile(1).unwrap();
        let stage_names: Vec<&str> = alpha.stages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(stage_names, vec!["Seed", "Series A"]);
        assert!(alpha.themes.is_empty());
        assert_eq!(alpha.investor_type.as_ref().unwrap().name, "VC");
    }

    #[tokio::test]
    async fn skips_links_to_missing_rows() {
        let catalog = load_catalog(&stub()).await.unwrap();
        let beta = catalog.profile(2).unwrap();
        // stage link 99 has no stage row and must not surface
        assert!(beta.stages.is_empty());
        assert_eq!(beta.themes[0].name, "Climate");
        assert!(beta.investor_type.is_none());
    }

    #[tokio::test]
    async fn unknown_fund_id_yields_none() {
        let catalog = load_catalog(&stub()).await.unwrap();
        assert!(catalog.profile(42).is_none());
    }
}
