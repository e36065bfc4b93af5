//! Draft composition: user → portfolio company → contact joined with
//! fund → contact.

use fundatlas_db::models::TeamMember;
use fundatlas_db::{queries, DbPool};
use serde::Serialize;
use tracing::info;

use crate::mailto::mailto_link;
use crate::{IntroError, IntroResult};

const FALLBACK_COMPANY_CONTACT: &str = "Team Member";
const FALLBACK_FUND_CONTACT: &str = "Fund Representative";

/// A composed introduction email draft.
#[derive(Debug, Clone, Serialize)]
pub struct IntroDraft {
    /// Recipient: the portfolio company's team contact. Empty when the
    /// contact has no email on record.
    pub to: String,
    pub subject: String,
    pub body: String,
    pub mailto: String,
}

fn contact_first_name(contact: Option<&TeamMember>, fallback: &str) -> String {
    contact
        .and_then(|c| c.first_name.clone())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Compose a draft from already-resolved names.
pub fn compose(
    user_first_name: &str,
    company_name: &str,
    company_contact: Option<&TeamMember>,
    fund_name: &str,
    fund_contact: Option<&TeamMember>,
) -> IntroDraft {
    let to = company_contact
        .and_then(|c| c.email.clone())
        .unwrap_or_default();
    let company_contact_name = contact_first_name(company_contact, FALLBACK_COMPANY_CONTACT);
    let fund_contact_name = contact_first_name(fund_contact, FALLBACK_FUND_CONTACT);

    let subject = format!("Introduction Request: {company_name} ↔ {fund_name}");
    let body = format!(
        "Hi {company_contact_name},\n\n\
         I hope this email finds you well. I am writing to request an introduction \
         between {company_name} and {fund_name}.\n\n\
         We would like to introduce our portfolio company to this fund for potential \
         investment opportunities. The fund appears to be a good fit based on their \
         investment focus and stage preferences.\n\n\
         Contact: {fund_contact_name}\n\n\
         Thank you for your time and assistance.\n\n\
         Best regards,\n\
         {user_first_name}\n\n\
         ---\n\
         This email was generated from the Fundatlas founders platform."
    );
    let mailto = mailto_link(&to, &subject, &body);

    IntroDraft {
        to,
        subject,
        body,
        mailto,
    }
}

fn has_name(value: &Option<String>) -> bool {
    value.as_deref().map(|v| !v.trim().is_empty()).unwrap_or(false)
}

/// Build an introduction draft for a user and a fund.
///
/// Performs the full join: user → portfolio company → team contact on one
/// side, fund → team contact on the other.
pub async fn draft_intro(db: &DbPool, user_id: i64, fund_id: i64) -> IntroResult<IntroDraft> {
    let user = queries::get_user(db.pool(), user_id)
        .await?
        .ok_or(IntroError::UserNotFound(user_id))?;

    if !has_name(&user.first_name) || !has_name(&user.last_name) {
        return Err(IntroError::ProfileIncomplete);
    }

    let company_id = user
        .portfolio_company_id
        .ok_or(IntroError::NoPortfolioCompany(user_id))?;
    let company = queries::get_portfolio_company(db.pool(), company_id)
        .await?
        .ok_or(IntroError::NoPortfolioCompany(user_id))?;

    let company_contact = match company.contact_id {
        Some(id) => queries::get_team_member(db.pool(), id).await?,
        None => None,
    };

    let fund = queries::get_fund(db.pool(), fund_id)
        .await?
        .ok_or(IntroError::FundNotFound(fund_id))?;
    let fund_contact = match fund.contact_id {
        Some(id) => queries::get_team_member(db.pool(), id).await?,
        None => None,
    };

    let user_first_name = user.first_name.as_deref().unwrap_or_default();
    let draft = compose(
        user_first_name,
        &company.name,
        company_contact.as_ref(),
        &fund.name,
        fund_contact.as_ref(),
    );

    info!(
        "Composed intro draft for user {} towards fund {}",
        user_id, fund.name
    );
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn contact(first: Option<&str>, email: Option<&str>) -> TeamMember {
        TeamMember {
            id: 1,
            first_name: first.map(String::from),
            last_name: None,
            email: email.map(String::from),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn draft_addresses_company_contact() {
        let company_contact = contact(Some("Petra"), Some("petra@rocketlabs.example"));
        let fund_contact = contact(Some("Jonas"), Some("jonas@alpha.example"));

        let draft = compose(
            "Maya",
            "Rocket Labs",
            Some(&company_contact),
            "Alpha Capital",
            Some(&fund_contact),
        );

        assert_eq!(draft.to, "petra@rocketlabs.example");
        assert_eq!(draft.subject, "Introduction Request: Rocket Labs ↔ Alpha Capital");
        assert!(draft.body.starts_with("Hi Petra,"));
        assert!(draft.body.contains("Contact: Jonas"));
        assert!(draft.body.contains("Best regards,\nMaya"));
        assert!(draft.mailto.starts_with("mailto:petra@rocketlabs.example?subject="));
    }

    #[test]
    fn missing_contacts_use_fallback_names() {
        let draft = compose("Maya", "Rocket Labs", None, "Alpha Capital", None);
        assert_eq!(draft.to, "");
        assert!(draft.body.starts_with("Hi Team Member,"));
        assert!(draft.body.contains("Contact: Fund Representative"));
    }

    #[test]
    fn blank_contact_first_name_uses_fallback() {
        let company_contact = contact(Some("  "), Some("team@rocketlabs.example"));
        let draft = compose("Maya", "Rocket Labs", Some(&company_contact), "Alpha Capital", None);
        assert!(draft.body.starts_with("Hi Team Member,"));
        assert_eq!(draft.to, "team@rocketlabs.example");
    }
}
