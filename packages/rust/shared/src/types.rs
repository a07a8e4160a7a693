//! Core domain types shared by every stage of the lead pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{LeadGenError, Result};

/// Column order of the exported CSV. Downstream sheets depend on it.
pub const LEAD_COLUMNS: [&str; 9] = [
    "id",
    "company_name",
    "website",
    "linkedin_url",
    "twitter_url",
    "phone_number",
    "description",
    "outreach_subject",
    "outreach_body",
];

// ---------------------------------------------------------------------------
// SearchParams
// ---------------------------------------------------------------------------

/// Filters for a single directory search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Industry keyword tags (at least one).
    pub keywords: Vec<String>,
    /// Employee-count ranges such as `"50,200"`.
    pub size_ranges: Vec<String>,
    /// Location filters.
    pub locations: Vec<String>,
    /// Maximum number of organizations to return.
    pub limit: u32,
}

impl SearchParams {
    /// Build validated search parameters. Blank entries are dropped.
    pub fn new(
        keywords: Vec<String>,
        size_ranges: Vec<String>,
        locations: Vec<String>,
        limit: u32,
    ) -> Result<Self> {
        let keywords = non_blank(keywords);
        if keywords.is_empty() {
            return Err(LeadGenError::validation("at least one keyword is required"));
        }
        if limit == 0 {
            return Err(LeadGenError::validation("limit must be a positive integer"));
        }

        Ok(Self {
            keywords,
            size_ranges: non_blank(size_ranges),
            locations: non_blank(locations),
            limit,
        })
    }
}

fn non_blank(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

// ---------------------------------------------------------------------------
// CompanyRecord
// ---------------------------------------------------------------------------

/// A normalized directory hit. Every optional field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Provider identifier, or the company name when the provider gave none.
    pub id: String,
    pub name: String,
    pub website: Option<String>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub phone: Option<String>,
    pub industry: Option<String>,
    pub employee_count: Option<u64>,
}

impl CompanyRecord {
    /// The website, if present and not blank.
    pub fn website(&self) -> Option<&str> {
        self.website
            .as_deref()
            .map(str::trim)
            .filter(|w| !w.is_empty())
    }
}

// ---------------------------------------------------------------------------
// OutreachMessage
// ---------------------------------------------------------------------------

/// A drafted outreach email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutreachMessage {
    pub subject: String,
    pub body: String,
}

// ---------------------------------------------------------------------------
// LeadRow
// ---------------------------------------------------------------------------

/// One exported record. Field order matches [`LEAD_COLUMNS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRow {
    pub id: String,
    pub company_name: String,
    pub website: String,
    pub linkedin_url: String,
    pub twitter_url: String,
    pub phone_number: String,
    pub description: String,
    pub outreach_subject: String,
    pub outreach_body: String,
}

impl LeadRow {
    /// Start a row from company metadata, leaving derived fields empty.
    pub fn from_company(company: &CompanyRecord) -> Self {
        let id = if company.id.trim().is_empty() {
            company.name.clone()
        } else {
            company.id.clone()
        };

        Self {
            id,
            company_name: company.name.clone(),
            website: company.website.clone().unwrap_or_default(),
            linkedin_url: company.linkedin_url.clone().unwrap_or_default(),
            twitter_url: company.twitter_url.clone().unwrap_or_default(),
            phone_number: company.phone.clone().unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Flatten bullet points into the description column.
    pub fn set_description(&mut self, bullets: &[String]) {
        self.description = bullets.join("\n");
    }

    pub fn set_outreach(&mut self, message: OutreachMessage) {
        self.outreach_subject = message.subject;
        self.outreach_body = message.body;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company() -> CompanyRecord {
        CompanyRecord {
            id: "org_1".into(),
            name: "Acme Analytics".into(),
            website: Some("http://acme.example".into()),
            linkedin_url: Some("https://linkedin.com/company/acme".into()),
            twitter_url: None,
            phone: Some("+1 555 0100".into()),
            industry: Some("software".into()),
            employee_count: Some(120),
        }
    }

    #[test]
    fn search_params_rejects_zero_limit() {
        let err = SearchParams::new(vec!["software".into()], vec![], vec![], 0).unwrap_err();
        assert!(err.to_string().contains("limit"));
    }

    #[test]
    fn search_params_requires_a_keyword() {
        let err = SearchParams::new(vec!["  ".into()], vec![], vec![], 5).unwrap_err();
        assert!(err.to_string().contains("keyword"));
    }

    #[test]
    fn search_params_drops_blank_filters() {
        let params = SearchParams::new(
            vec!["software".into()],
            vec!["".into(), "50,200".into()],
            vec![" Bangalore ".into()],
            10,
        )
        .unwrap();
        assert_eq!(params.size_ranges, vec!["50,200"]);
        assert_eq!(params.locations, vec!["Bangalore"]);
    }

    #[test]
    fn lead_row_copies_company_fields() {
        let row = LeadRow::from_company(&company());
        assert_eq!(row.id, "org_1");
        assert_eq!(row.company_name, "Acme Analytics");
        assert_eq!(row.twitter_url, "");
        assert_eq!(row.phone_number, "+1 555 0100");
        assert!(row.description.is_empty());
    }

    #[test]
    fn lead_row_id_falls_back_to_name() {
        let mut c = company();
        c.id = String::new();
        assert_eq!(LeadRow::from_company(&c).id, "Acme Analytics");
    }

    #[test]
    fn description_joins_bullets_with_newlines() {
        let mut row = LeadRow::from_company(&company());
        row.set_description(&["Builds analytics".into(), "Based in Pune".into()]);
        assert_eq!(row.description, "Builds analytics\nBased in Pune");
    }

    #[test]
    fn blank_website_is_treated_as_missing() {
        let mut c = company();
        c.website = Some("   ".into());
        assert!(c.website().is_none());
    }
}
