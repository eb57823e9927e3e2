//! menugate header - Render the public header navigation

use std::path::PathBuf;
use clap::Args;

use crate::api::ApiClient;
use crate::cli::output;
use crate::core::GateResult;
use crate::menu::{load_header, HeaderSource};
use crate::ui::hover::HoverController;

#[derive(Args)]
pub struct HeaderArgs {
    /// Directory holding menugate.toml
    #[arg(long, default_value = ".")]
    pub cwd: PathBuf,

    /// Render the mobile variant
    #[arg(long)]
    pub mobile: bool,

    /// Print markup instead of a tree
    #[arg(long)]
    pub html: bool,
}

pub async fn execute(args: HeaderArgs, json_output: bool) -> GateResult<()> {
    let config = super::load_config(&args.cwd)?;
    let client = ApiClient::new(&config)?;
    let header = load_header(&client).await;

    if json_output {
        let hover = HoverController::for_header(&header);
        output::json(&serde_json::json!({
            "source": header.source,
            "entries": header.entries,
            "hover_bindings": hover.bindings(),
        }))?;
        return Ok(());
    }

    if args.html {
        let markup = if args.mobile {
            header.mobile_html()
        } else {
            header.desktop_html()
        };
        println!("{}", markup);
        return Ok(());
    }

    if header.source == HeaderSource::Fallback {
        output::warning("Header menu API unavailable, showing the built-in menu");
    }
    for entry in header.entries.iter().filter(|e| e.active) {
        println!("{}  {}", console::style(&entry.name).bold(), console::style(entry.href()).dim());
        for child in entry.active_children() {
            println!("    {}  {}", child.name, console::style(child.href()).dim());
        }
    }

    Ok(())
}
