//! CLI command implementations

pub mod check;
pub mod csrf;
pub mod header;
pub mod menus;
pub mod rules;

use std::env;
use std::path::Path;

use crate::core::{Config, GateResult};

/// Load configuration for a `--cwd` argument, relative paths resolved from the current directory
pub(crate) fn load_config(cwd: &Path) -> GateResult<Config> {
    let project_dir = if cwd.is_absolute() {
        cwd.to_path_buf()
    } else {
        env::current_dir()?.join(cwd)
    };
    Config::load(&project_dir)
}
