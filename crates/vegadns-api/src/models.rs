// Wire types for the VegaDNS domain and record endpoints.
//
// Field names follow the API's snake_case JSON. Envelope counters are
// defaulted because older API versions omit them.

use serde::{Deserialize, Serialize};

/// A hosted domain (zone).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub domain_id: i64,
    /// FQDN without the trailing dot.
    pub domain: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub owner_id: i64,
}

/// `GET /1.0/domains` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct DomainsResponse {
    #[serde(default)]
    pub status: String,
    #[serde(rename = "total_domains", default)]
    pub total: i64,
    #[serde(default)]
    pub domains: Vec<Domain>,
}

/// A DNS record inside a hosted domain.
///
/// Format reference: <https://github.com/shupp/VegaDNS-API/blob/master/records_format.json>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub record_id: i64,
    pub domain_id: i64,
    pub name: String,
    #[serde(default)]
    pub value: String,
    pub record_type: String,
    #[serde(default)]
    pub ttl: i64,
    /// `null` for records in the default location.
    #[serde(default)]
    pub location_id: Option<String>,
}

/// `GET /1.0/records` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordsResponse {
    #[serde(default)]
    pub status: String,
    #[serde(rename = "total_records", default)]
    pub total: i64,
    pub domain: Option<Domain>,
    #[serde(default)]
    pub records: Vec<Record>,
}

/// Form payload for `POST /1.0/records`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub domain_id: i64,
    pub name: String,
    pub value: String,
    pub record_type: String,
    pub ttl: i64,
}

impl NewRecord {
    /// A TXT record, the shape ACME DNS-01 challenges use.
    pub fn txt(domain_id: i64, name: impl Into<String>, value: impl Into<String>, ttl: i64) -> Self {
        Self {
            domain_id,
            name: name.into(),
            value: value.into(),
            record_type: "TXT".into(),
            ttl,
        }
    }

    pub(crate) fn form_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("record_type", self.record_type.clone()),
            ("ttl", self.ttl.to_string()),
            ("domain_id", self.domain_id.to_string()),
            ("name", self.name.clone()),
            ("value", self.value.clone()),
        ]
    }
}
