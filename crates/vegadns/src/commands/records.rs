//! Record command handlers.

use serde::Serialize;
use tabled::Tabled;
use vegadns_api::{Record, VegaClient};

use crate::cli::{GlobalOpts, RecordsArgs, RecordsCommand};
use crate::config::Resolved;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    record_type: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "TTL")]
    ttl: i64,
}

impl From<&Record> for RecordRow {
    fn from(r: &Record) -> Self {
        Self {
            id: r.record_id,
            name: r.name.clone(),
            record_type: r.record_type.clone(),
            value: r.value.clone(),
            ttl: r.ttl,
        }
    }
}

#[derive(Serialize)]
struct RecordRef<'a> {
    record_id: i64,
    domain_id: i64,
    name: &'a str,
    record_type: &'a str,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &VegaClient,
    args: RecordsArgs,
    resolved: &Resolved,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        RecordsCommand::List {
            domain_id,
            record_type,
        } => {
            let mut records = client.list_records(domain_id).await?;
            if let Some(ref wanted) = record_type {
                records.retain(|r| r.record_type.eq_ignore_ascii_case(wanted));
            }
            let out = output::render_list(
                global.format(),
                &records,
                |r| RecordRow::from(r),
                |r| r.record_id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RecordsCommand::Id {
            domain_id,
            name,
            record_type,
        } => {
            let record_id = client.get_record_id(domain_id, &name, &record_type).await?;
            let found = RecordRef {
                record_id,
                domain_id,
                name: &name,
                record_type: &record_type,
            };
            let out = output::render_single(
                global.format(),
                &found,
                |r| r.record_id.to_string(),
                |r| r.record_id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RecordsCommand::CreateTxt {
            domain_id,
            name,
            value,
            ttl,
        } => {
            let ttl = ttl.unwrap_or(resolved.ttl);
            client
                .create_txt_record(domain_id, &name, &value, ttl)
                .await?;
            output::print_status(&format!("TXT record {name} created (ttl {ttl})"), global.quiet);
            Ok(())
        }

        RecordsCommand::Delete { record_id } => {
            if !util::confirm(
                &format!("Delete record {record_id}?"),
                "records delete",
                global.yes,
            )? {
                return Ok(());
            }
            client.delete_record(record_id).await?;
            output::print_status(&format!("Record {record_id} deleted"), global.quiet);
            Ok(())
        }
    }
}
