// Domain endpoints
//
// The API's `search` filter is a fuzzy substring match, so every lookup
// by name re-checks the returned list for an exact `domain` match.

use reqwest::{Method, StatusCode};
use tracing::debug;

use crate::client::VegaClient;
use crate::error::Error;
use crate::models::{Domain, DomainsResponse};

impl VegaClient {
    /// List hosted domains, optionally filtered by the API's `search`.
    ///
    /// `GET /1.0/domains[?search=...]`
    pub async fn list_domains(&self, search: Option<&str>) -> Result<Vec<Domain>, Error> {
        let params: Vec<(&str, String)> = search
            .map(|s| vec![("search", s.to_owned())])
            .unwrap_or_default();

        let answer: DomainsResponse = self
            .call(Method::GET, "domains", &params, StatusCode::OK, "list domains")
            .await?;

        debug!(
            count = answer.domains.len(),
            total = answer.total,
            "listed domains"
        );
        Ok(answer.domains)
    }

    /// Look up a hosted domain by its exact name.
    pub async fn find_domain(&self, domain: &str) -> Result<Domain, Error> {
        let domains = self.list_domains(Some(domain)).await?;

        exact_match(domains, domain).ok_or_else(|| Error::NotFound {
            entity: "domain",
            identifier: domain.to_owned(),
        })
    }

    /// The `domain_id` of the hosted domain named exactly `domain`.
    pub async fn get_domain_id(&self, domain: &str) -> Result<i64, Error> {
        self.find_domain(domain).await.map(|d| d.domain_id)
    }
}

fn exact_match(domains: Vec<Domain>, name: &str) -> Option<Domain> {
    domains.into_iter().find(|d| d.domain == name)
}
