//! Fund filtering over the in-memory catalog snapshot.

use chrono::NaiveDate;
use fundatlas_catalog::FundProfile;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// First-cheque size buckets, keyed on a fund's maximum first cheque.
///
/// Buckets are half-open `[lo, hi)` apart from the open-ended extremes.
/// A fund with no maximum cheque never matches a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChequeRange {
    #[serde(rename = "under-1m")]
    Under1m,
    #[serde(rename = "1m-3m")]
    From1mTo3m,
    #[serde(rename = "3m-5m")]
    From3mTo5m,
    #[serde(rename = "5m-10m")]
    From5mTo10m,
    #[serde(rename = "10m-20m")]
    From10mTo20m,
    #[serde(rename = "over-20m")]
    Over20m,
}

const M: i64 = 1_000_000;

impl ChequeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChequeRange::Under1m => "under-1m",
            ChequeRange::From1mTo3m => "1m-3m",
            ChequeRange::From3mTo5m => "3m-5m",
            ChequeRange::From5mTo10m => "5m-10m",
            ChequeRange::From10mTo20m => "10m-20m",
            ChequeRange::Over20m => "over-20m",
        }
    }

    /// Whether a maximum first cheque falls in this bucket.
    pub fn contains(&self, max_cheque: i64) -> bool {
        match self {
            ChequeRange::Under1m => max_cheque < M,
            ChequeRange::From1mTo3m => (M..3 * M).contains(&max_cheque),
            ChequeRange::From3mTo5m => (3 * M..5 * M).contains(&max_cheque),
            ChequeRange::From5mTo10m => (5 * M..10 * M).contains(&max_cheque),
            ChequeRange::From10mTo20m => (10 * M..20 * M).contains(&max_cheque),
            ChequeRange::Over20m => max_cheque >= 20 * M,
        }
    }
}

impl FromStr for ChequeRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "under-1m" => Ok(ChequeRange::Under1m),
            "1m-3m" => Ok(ChequeRange::From1mTo3m),
            "3m-5m" => Ok(ChequeRange::From3mTo5m),
            "5m-10m" => Ok(ChequeRange::From5mTo10m),
            "10m-20m" => Ok(ChequeRange::From10mTo20m),
            "over-20m" => Ok(ChequeRange::Over20m),
            other => Err(anyhow::anyhow!("Unknown cheque range: {}", other)),
        }
    }
}

/// Conjunctive filter set over the full fund list.
///
/// Every field is optional; an empty set matches everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FundFilters {
    pub search: Option<String>,
    pub cheque_range: Option<ChequeRange>,
    pub stage_id: Option<i64>,
    pub theme_id: Option<i64>,
    pub created_from: Option<NaiveDate>,
    pub created_to: Option<NaiveDate>,
}

impl FundFilters {
    /// Whether a single profile passes every active filter.
    pub fn matches(&self, profile: &FundProfile) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !needle.is_empty() && !profile.fund.name.to_lowercase().contains(&needle) {
                return false;
            }
        }

        if let Some(range) = &self.cheque_range {
            match profile.fund.first_cheque_maximum {
                Some(max) if range.contains(max) => {}
                _ => return false,
            }
        }

        if let Some(stage_id) = self.stage_id {
            if !profile.stages.iter().any(|s| s.id == stage_id) {
                return false;
            }
        }

        if let Some(theme_id) = self.theme_id {
            if !profile.themes.iter().any(|t| t.id == theme_id) {
                return false;
            }
        }

        if let Some(from) = self.created_from {
            match profile.fund.created_at {
                Some(created) if created.date_naive() >= from => {}
                _ => return false,
            }
        }

        if let Some(to) = self.created_to {
            match profile.fund.created_at {
                Some(created) if created.date_naive() <= to => {}
                _ => return false,
            }
        }

        true
    }

    /// Re-derive the filtered view from the full list.
    pub fn apply<'a>(&self, profiles: &'a [FundProfile]) -> Vec<&'a FundProfile> {
        profiles.iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use fundatlas_db::models::{Fund, Stage, Theme};

    fn profile(name: &str, max_cheque: Option<i64>, stage_ids: &[i64]) -> FundProfile {
        FundProfile {
            fund: Fund {
                id: 1,
                name: name.to_string(),
                description: None,
                domain: None,
                linkedin_url: None,
                first_cheque_minimum: None,
                first_cheque_maximum: max_cheque,
                investor_type_id: None,
                investment_focus_id: None,
                contact_id: None,
                created_at: Some(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()),
                updated_at: None,
            },
            stages: stage_ids
                .iter()
                .map(|id| Stage { id: *id, name: format!("stage-{id}"), description: None })
                .collect(),
            themes: vec![Theme { id: 5, name: "Climate".into(), description: None }],
            investor_type: None,
            investment_focus: None,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let p = profile("Alpha Capital", None, &[]);
        assert!(FundFilters::default().matches(&p));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let p = profile("Alpha Capital", None, &[]);
        let filters = FundFilters { search: Some("alpha".into()), ..Default::default() };
        assert!(filters.matches(&p));
        let filters = FundFilters { search: Some("beta".into()), ..Default::default() };
        assert!(!filters.matches(&p));
    }

    #[test]
    fn cheque_range_buckets_are_half_open() {
        assert!(ChequeRange::Under1m.contains(999_999));
        assert!(!ChequeRange::Under1m.contains(1_000_000));
        assert!(ChequeRange::From1mTo3m.contains(1_000_000));
        assert!(!ChequeRange::From1mTo3m.contains(3_000_000));
        assert!(ChequeRange::Over20m.contains(20_000_000));
    }

    #[test]
    fn cheque_filter_excludes_funds_without_maximum() {
        let p = profile("Alpha Capital", None, &[]);
        let filters =
            FundFilters { cheque_range: Some(ChequeRange::Under1m), ..Default::default() };
        assert!(!filters.matches(&p));

        let p = profile("Alpha Capital", Some(500_000), &[]);
        assert!(filters.matches(&p));
    }

    #[test]
    fn stage_and_theme_filters_check_derived_relations() {
        let p = profile("Alpha Capital", None, &[10, 11]);
        let filters = FundFilters { stage_id: Some(11), ..Default::default() };
        assert!(filters.matches(&p));
        let filters = FundFilters { stage_id: Some(12), ..Default::default() };
        assert!(!filters.matches(&p));

        let filters = FundFilters { theme_id: Some(5), ..Default::default() };
        assert!(filters.matches(&p));
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let p = profile("Alpha Capital", None, &[]);
        let filters = FundFilters {
            created_from: Some(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()),
            created_to: Some(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()),
            ..Default::default()
        };
        assert!(filters.matches(&p));

        let filters = FundFilters {
            created_from: Some(NaiveDate::from_ymd_opt(2024, 6, 16).unwrap()),
            ..Default::default()
        };
        assert!(!filters.matches(&p));
    }

    #[test]
    fn filters_are_conjunctive() {
        let p = profile("Alpha Capital", Some(2_000_000), &[10]);
        let filters = FundFilters {
            search: Some("alpha".into()),
            cheque_range: Some(ChequeRange::From1mTo3m),
            stage_id: Some(10),
            ..Default::default()
        };
        assert!(filters.matches(&p));

        let filters = FundFilters {
            search: Some("alpha".into()),
            cheque_range: Some(ChequeRange::Over20m),
            ..Default::default()
        };
        assert!(!filters.matches(&p));
    }

    #[test]
    fn cheque_range_round_trips_wire_names() {
        for name in ["under-1m", "1m-3m", "3m-5m", "5m-10m", "10m-20m", "over-20m"] {
            let range: ChequeRange = name.parse().unwrap();
            assert_eq!(range.as_str(), name);
        }
        assert!("1m-2m".parse::<ChequeRange>().is_err());
    }
}
