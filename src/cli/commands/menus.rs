//! menugate menus - Render the sidebar the current user may see

use std::path::PathBuf;
use clap::Args;

use crate::api::{ApiClient, Backend};
use crate::cli::output;
use crate::core::GateResult;
use crate::menu::{render_sidebar, MenuEntry};

#[derive(Args)]
pub struct MenusArgs {
    /// Directory holding menugate.toml
    #[arg(long, default_value = ".")]
    pub cwd: PathBuf,

    /// Print the sidebar markup instead of a list
    #[arg(long)]
    pub html: bool,
}

pub async fn execute(args: MenusArgs, json_output: bool) -> GateResult<()> {
    let config = super::load_config(&args.cwd)?;
    let client = ApiClient::new(&config)?;

    let menus = client.fetch_accessible_menus().await?;
    let entries: Vec<MenuEntry> = menus.into_iter().map(MenuEntry::from).collect();
    let sidebar = render_sidebar(&entries);

    if json_output {
        output::json(&sidebar)?;
    } else if args.html {
        println!("{}", sidebar.to_html());
    } else if sidebar.is_empty() {
        output::info(crate::menu::sidebar::EMPTY_MENU_MESSAGE);
    } else {
        output::table_header(&["ID", "MENU", "TARGET"]);
        output::divider();
        for item in &sidebar.items {
            println!(
                "{}  {}  {}",
                output::pad(&item.id, 4),
                output::pad(&format!("{} {}", item.icon, item.name), 28),
                item.href
            );
        }
    }

    Ok(())
}
