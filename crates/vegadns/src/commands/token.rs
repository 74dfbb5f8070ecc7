//! OAuth token inspection. The token value itself is never printed.

use chrono::{DateTime, Utc};
use serde::Serialize;
use vegadns_api::{AuthStrategy, VegaClient};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct TokenInfo {
    token_type: String,
    expires_in: i64,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

pub async fn handle(client: &VegaClient, global: &GlobalOpts) -> Result<(), CliError> {
    if client.auth_strategy() != AuthStrategy::OAuth {
        return Err(CliError::Unsupported {
            operation: "token".into(),
            required: "OAuth credentials (--api-key and --api-secret, or api_key in the profile)"
                .into(),
        });
    }

    let token = client.token().await?;
    let info = TokenInfo {
        token_type: token.token_type().to_owned(),
        expires_in: token.expires_in(),
        issued_at: token.issued_at(),
        expires_at: token.expires_at(),
    };

    let out = output::render_single(
        global.format(),
        &info,
        |t| {
            util::detail(&[
                ("Type", t.token_type.clone()),
                ("Expires in", format!("{}s", t.expires_in)),
                ("Issued at", t.issued_at.to_rfc3339()),
                ("Expires at", t.expires_at.to_rfc3339()),
            ])
        },
        |t| t.expires_at.to_rfc3339(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
