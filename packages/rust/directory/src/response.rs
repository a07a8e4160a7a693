//! Tolerant decoding of organization search responses.
//!
//! Providers have shipped the organization list under different keys and
//! routinely omit or null out fields, so every field here is optional.

use leadgen_shared::CompanyRecord;
use serde::Deserialize;
use serde_json::Value;

/// Top-level search response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    organizations: Option<Vec<Organization>>,
    #[serde(default)]
    data: Option<Vec<Organization>>,
}

impl SearchResponse {
    /// Organizations from `organizations`, or from `data` when the former is absent or empty.
    pub(crate) fn into_organizations(self) -> Vec<Organization> {
        match self.organizations {
            Some(orgs) if !orgs.is_empty() => orgs,
            _ => self.data.unwrap_or_default(),
        }
    }
}

/// One organization entry.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Organization {
    #[serde(deserialize_with = "lenient_string")]
    id: Option<String>,
    name: Option<String>,
    website_url: Option<String>,
    linkedin_url: Option<String>,
    twitter_url: Option<String>,
    sanitized_phone: Option<String>,
    industry: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    estimated_num_employees: Option<u64>,
}

/// Accept ids sent as strings or numbers.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accept counts sent as integers, floats, or numeric strings; anything else is dropped.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

impl Organization {
    /// Map into a [`CompanyRecord`]; `fallback_industry` fills a missing industry.
    pub(crate) fn into_record(self, fallback_industry: &str) -> CompanyRecord {
        let name = self.name.unwrap_or_default();
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| name.clone());

        CompanyRecord {
            id,
            name,
            website: non_empty(self.website_url),
            linkedin_url: non_empty(self.linkedin_url),
            twitter_url: non_empty(self.twitter_url),
            phone: non_empty(self.sanitized_phone),
            industry: non_empty(self.industry).or_else(|| non_empty(Some(fallback_industry.into()))),
            employee_count: self.estimated_num_employees,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_organizations_key() {
        let json = r#"{"organizations":[{"id":"a1","name":"Acme"}]}"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        let orgs = resp.into_organizations();
        assert_eq!(orgs.len(), 1);
    }

    #[test]
    fn falls_back_to_data_key() {
        let json = r#"{"organizations":[],"data":[{"name":"Beta"},{"name":"Gamma"}]}"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.into_organizations().len(), 2);
    }

    #[test]
    fn missing_keys_yield_empty_list() {
        let resp: SearchResponse = serde_json::from_str(r#"{"pagination":{}}"#).unwrap();
        assert!(resp.into_organizations().is_empty());
    }

    #[test]
    fn nulls_and_missing_fields_never_fail() {
        let json = r#"{"name":"Acme","website_url":null,"industry":null,"unknown":42}"#;
        let org: Organization = serde_json::from_str(json).unwrap();
        let record = org.into_record("software");
        assert_eq!(record.id, "Acme");
        assert_eq!(record.website, None);
        assert_eq!(record.industry.as_deref(), Some("software"));
        assert_eq!(record.employee_count, None);
    }

    #[test]
    fn odd_field_types_are_tolerated() {
        let json = r#"{"id":12345,"name":"Acme","estimated_num_employees":"250"}"#;
        let org: Organization = serde_json::from_str(json).unwrap();
        let record = org.into_record("software");
        assert_eq!(record.id, "12345");
        assert_eq!(record.employee_count, Some(250));

        let json = r#"{"name":"Acme","estimated_num_employees":{"min":10}}"#;
        let org: Organization = serde_json::from_str(json).unwrap();
        assert_eq!(org.into_record("software").employee_count, None);
    }

    #[test]
    fn maps_every_field() {
        let json = r#"{
            "id": "5f2a",
            "name": "Acme Analytics",
            "website_url": "http://www.acme.example",
            "linkedin_url": "http://www.linkedin.com/company/acme",
            "twitter_url": "https://twitter.com/acme",
            "sanitized_phone": "+919876543210",
            "industry": "information technology & services",
            "estimated_num_employees": 140
        }"#;
        let org: Organization = serde_json::from_str(json).unwrap();
        let record = org.into_record("software");
        assert_eq!(record.id, "5f2a");
        assert_eq!(record.website.as_deref(), Some("http://www.acme.example"));
        assert_eq!(record.phone.as_deref(), Some("+919876543210"));
        assert_eq!(
            record.industry.as_deref(),
            Some("information technology & services")
        );
        assert_eq!(record.employee_count, Some(140));
    }
}
