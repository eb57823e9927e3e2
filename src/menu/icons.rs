//! Icon name to glyph mapping for the admin sidebar

use std::collections::HashMap;
use once_cell::sync::Lazy;

pub const FALLBACK_ICON: &str = "📁";

static ICONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("dashboard", "📊"),
        ("content_copy", "📄"),
        ("people", "👥"),
        ("settings", "⚙️"),
        ("announcement", "📢"),
        ("newspaper", "📰"),
        ("menu", "📋"),
        ("admin_panel_settings", "👤"),
        ("tune", "🎛️"),
        ("history", "📜"),
    ])
});

/// Glyph for a backend icon name
pub fn glyph(icon: Option<&str>) -> &'static str {
    icon.and_then(|name| ICONS.get(name).copied())
        .unwrap_or(FALLBACK_ICON)
}
