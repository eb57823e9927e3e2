//! menugate csrf - Issue a CSRF token

use std::path::PathBuf;
use clap::Args;
use url::Url;

use crate::api::ApiClient;
use crate::cli::output;
use crate::core::{GateError, GateResult};
use crate::csrf::CsrfGuard;

#[derive(Args)]
pub struct CsrfArgs {
    /// Directory holding menugate.toml
    #[arg(long, default_value = ".")]
    pub cwd: PathBuf,

    /// Show whether a request with this method would carry the token
    #[arg(long, default_value = "POST")]
    pub method: String,

    /// Request URL to test against the attach rules
    #[arg(long)]
    pub url: Option<String>,
}

pub async fn execute(args: CsrfArgs, json_output: bool) -> GateResult<()> {
    let config = super::load_config(&args.cwd)?;
    let client = ApiClient::new(&config)?;
    let guard = CsrfGuard::new(Url::parse(&config.server.base_url)?, &config.csrf);

    let token = guard
        .issue(&client)
        .await
        .ok_or_else(|| GateError::CsrfUnavailable("no token issued".into()))?;

    let method = reqwest::Method::from_bytes(args.method.to_uppercase().as_bytes())
        .map_err(|_| GateError::other(format!("Unknown HTTP method: {}", args.method)))?;
    let attached = args
        .url
        .as_deref()
        .map(|url| guard.header_for(&method, url).is_some());

    if json_output {
        output::json(&serde_json::json!({
            "header_name": token.header_name,
            "parameter_name": token.parameter_name,
            "token": token.token,
            "attached": attached,
        }))?;
        return Ok(());
    }

    output::success("CSRF token issued");
    println!("  Header: {}", token.header_name);
    println!("  Form field: {}", token.parameter_name);
    if let (Some(url), Some(attached)) = (&args.url, attached) {
        if attached {
            output::info(&format!("{} {} carries the token", method, url));
        } else {
            output::info(&format!("{} {} goes out without the token", method, url));
        }
    }

    Ok(())
}
