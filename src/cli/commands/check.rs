//! menugate check - Run the permission gate for one admin page

use std::path::PathBuf;
use std::sync::Arc;
use clap::Args;

use crate::api::ApiClient;
use crate::cli::output;
use crate::core::{GateError, GateResult};
use crate::gate::{AccessDecision, GateState, PermissionGate};
use crate::ui::TerminalPage;

#[derive(Args)]
pub struct CheckArgs {
    /// Page path as the browser would see it, e.g. /admin/menu-management.html
    pub path: String,

    /// Directory holding menugate.toml
    #[arg(long, default_value = ".")]
    pub cwd: PathBuf,

    /// Print the rendered sidebar markup
    #[arg(long)]
    pub html: bool,
}

pub async fn execute(args: CheckArgs, json_output: bool) -> GateResult<()> {
    let config = super::load_config(&args.cwd)?;
    let backend = Arc::new(ApiClient::new(&config)?);
    let page = Arc::new(TerminalPage::new(args.path.clone(), !json_output));
    let mut gate = PermissionGate::new(backend, page.clone(), page.clone(), &config.gate);

    let spinner = (!json_output).then(|| output::spinner(&format!("Checking {}", args.path)));
    let granted = gate.initialize().await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let menu = page.menu();

    if json_output {
        output::json(&serde_json::json!({
            "path": args.path,
            "granted": granted,
            "state": gate.state().to_string(),
            "user": gate.state().session().map(|s| &s.user_id),
            "decision": gate.decision(),
            "alerts": page.alerts(),
            "redirects": page.navigations(),
            "menu": menu,
        }))?;
    } else if granted {
        output::success(&format!("Access to {} granted", args.path));
        match &menu {
            Some(menu) if args.html => println!("{}", menu.to_html()),
            Some(menu) => {
                for item in &menu.items {
                    println!("  {} {}  {}", item.icon, item.name, console::style(&item.href).dim());
                    for child in &item.children {
                        println!("      {}  {}", child.name, console::style(&child.href).dim());
                    }
                }
                if menu.is_empty() {
                    output::info(crate::menu::sidebar::EMPTY_MENU_MESSAGE);
                }
            }
            None => output::warning("Sidebar menu could not be loaded"),
        }
    }

    if granted {
        return Ok(());
    }

    Err(match gate.state() {
        GateState::Error { reason } => GateError::IdentityUnavailable(reason.clone()),
        _ => GateError::AccessDenied {
            path: args.path.clone(),
            capability: match gate.decision() {
                Some(AccessDecision::Denied { capability: Some(c), .. }) => c.clone(),
                _ => gate.rules().label_for(&args.path).to_string(),
            },
        },
    })
}
