// Record endpoints
//
// Reference: https://generator.swagger.io/?url=https://raw.githubusercontent.com/shupp/VegaDNS-API/refs/heads/master/swagger/vegadns.swagger.json#/Records

use reqwest::{Method, StatusCode};
use tracing::debug;

use crate::client::VegaClient;
use crate::error::Error;
use crate::models::{NewRecord, Record, RecordsResponse};

impl VegaClient {
    /// All records of a domain.
    ///
    /// `GET /1.0/records?domain_id=N`
    pub async fn list_records(&self, domain_id: i64) -> Result<Vec<Record>, Error> {
        let answer: RecordsResponse = self
            .call(
                Method::GET,
                "records",
                &[("domain_id", domain_id.to_string())],
                StatusCode::OK,
                "list records",
            )
            .await?;

        debug!(domain_id, count = answer.records.len(), "listed records");
        Ok(answer.records)
    }

    /// The id of the first record matching `name` and `record_type`.
    ///
    /// The API does not enforce uniqueness on this pair.
    pub async fn get_record_id(
        &self,
        domain_id: i64,
        name: &str,
        record_type: &str,
    ) -> Result<i64, Error> {
        let records = self.list_records(domain_id).await?;

        records
            .iter()
            .find(|r| r.name == name && r.record_type == record_type)
            .map(|r| r.record_id)
            .ok_or_else(|| Error::NotFound {
                entity: "record",
                identifier: format!("{record_type} {name} (domain {domain_id})"),
            })
    }

    /// Create a record.
    ///
    /// `POST /1.0/records`, form-encoded, answered with `201`.
    pub async fn create_record(&self, record: &NewRecord) -> Result<(), Error> {
        debug!(
            domain_id = record.domain_id,
            name = %record.name,
            record_type = %record.record_type,
            "creating record"
        );
        self.call_empty(
            Method::POST,
            "records",
            &record.form_params(),
            StatusCode::CREATED,
            "create record",
        )
        .await
    }

    /// Create a TXT record.
    pub async fn create_txt_record(
        &self,
        domain_id: i64,
        name: &str,
        value: &str,
        ttl: i64,
    ) -> Result<(), Error> {
        self.create_record(&NewRecord::txt(domain_id, name, value, ttl))
            .await
    }

    /// Delete a record.
    ///
    /// `DELETE /1.0/records/{id}`
    pub async fn delete_record(&self, record_id: i64) -> Result<(), Error> {
        debug!(record_id, "deleting record");
        self.call_empty(
            Method::DELETE,
            &format!("records/{record_id}"),
            &[],
            StatusCode::OK,
            "delete record",
        )
        .await
    }
}
