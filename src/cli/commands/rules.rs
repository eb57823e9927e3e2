//! menugate rules - List page access rules

use std::path::PathBuf;
use clap::Args;

use crate::cli::output;
use crate::core::GateResult;
use crate::gate::PageAccessRules;

#[derive(Args)]
pub struct RulesArgs {
    /// Directory holding menugate.toml
    #[arg(long, default_value = ".")]
    pub cwd: PathBuf,

    /// Only show the rule for this page path
    #[arg(long)]
    pub path: Option<String>,
}

pub async fn execute(args: RulesArgs, json_output: bool) -> GateResult<()> {
    let config = super::load_config(&args.cwd)?;
    let rules = PageAccessRules::new(config.gate.rules.clone());

    if let Some(ref path) = args.path {
        let capability = rules.required_capability(path);
        if json_output {
            output::json(&serde_json::json!({
                "path": path,
                "capability": capability,
                "open": capability.is_none(),
            }))?;
        } else {
            match capability {
                Some(capability) => output::info(&format!("{} requires '{}'", path, capability)),
                None => output::info(&format!("{} is open to every signed-in user", path)),
            }
        }
        return Ok(());
    }

    if json_output {
        output::json(&serde_json::json!({
            "landing_path": config.gate.landing_path,
            "top_tier_code": config.gate.top_tier_code,
            "rules": config.gate.rules,
        }))?;
        return Ok(());
    }

    output::table_header(&["PAGE", "CAPABILITY"]);
    output::divider();
    for (path, capability) in rules.iter() {
        println!("{}  {}", output::pad(path, 36), capability);
    }
    output::divider();
    println!(
        "  Landing page: {}  Top-tier code: {}",
        config.gate.landing_path, config.gate.top_tier_code
    );

    Ok(())
}
