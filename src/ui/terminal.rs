//! Page adapter for running the gate outside a browser
//!
//! Records every alert, navigation and rendered menu. With `echo` enabled
//! the alerts and redirects are also printed to stderr.

use parking_lot::Mutex;
use console::style;

use crate::menu::SidebarMenu;
use crate::ui::{MenuView, Navigator};

pub struct TerminalPage {
    path: String,
    echo: bool,
    alerts: Mutex<Vec<String>>,
    navigations: Mutex<Vec<String>>,
    menu: Mutex<Option<SidebarMenu>>,
}

impl TerminalPage {
    pub fn new(path: impl Into<String>, echo: bool) -> Self {
        Self {
            path: path.into(),
            echo,
            alerts: Mutex::new(Vec::new()),
            navigations: Mutex::new(Vec::new()),
            menu: Mutex::new(None),
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().clone()
    }

    /// Last menu handed to the container, if any
    pub fn menu(&self) -> Option<SidebarMenu> {
        self.menu.lock().clone()
    }
}

impl Navigator for TerminalPage {
    fn current_path(&self) -> String {
        self.path.clone()
    }

    fn alert(&self, message: &str) {
        if self.echo {
            eprintln!("{} {}", style("!").yellow().bold(), message.replace('\n', " "));
        }
        self.alerts.lock().push(message.to_string());
    }

    fn navigate(&self, path: &str) {
        if self.echo {
            eprintln!("{} {}", style("→").cyan().bold(), path);
        }
        self.navigations.lock().push(path.to_string());
    }
}

impl MenuView for TerminalPage {
    fn render(&self, menu: SidebarMenu) {
        *self.menu.lock() = Some(menu);
    }
}
