//! Public site header navigation
//!
//! Not security gated. Any failure to load the remote tree falls back to a
//! built-in tree so the header is never empty.

use std::fmt::Write;
use serde::Serialize;

use crate::api::Backend;
use crate::menu::entry::MenuEntry;
use crate::menu::html::escape;

/// Where the rendered tree came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderSource {
    Remote,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderMenu {
    pub source: HeaderSource,
    pub entries: Vec<MenuEntry>,
}

/// Load the header tree, falling back to [`default_tree`] on any failure
pub async fn load_header<B: Backend + ?Sized>(backend: &B) -> HeaderMenu {
    match backend.fetch_menu_tree().await {
        Ok(nodes) => HeaderMenu {
            source: HeaderSource::Remote,
            entries: nodes.into_iter().map(MenuEntry::from).collect(),
        },
        Err(e) => {
            tracing::warn!("Header menu unavailable, using built-in tree: {}", e);
            HeaderMenu {
                source: HeaderSource::Fallback,
                entries: default_tree(),
            }
        }
    }
}

/// Built-in public navigation
pub fn default_tree() -> Vec<MenuEntry> {
    fn section(id: &str, name: &str, leaves: &[(&str, &str)]) -> MenuEntry {
        let children = leaves
            .iter()
            .enumerate()
            .map(|(i, (leaf, url))| MenuEntry::new(format!("{id}-{}", i + 1), *leaf, Some(*url)))
            .collect::<Vec<_>>();
        let url = leaves.first().map(|(_, url)| *url);
        MenuEntry::new(id, name, url).with_children(children)
    }

    vec![
        section(
            "about",
            "케이원소개",
            &[
                ("회사소개", "./sub0101.html"),
                ("케이원연혁", "./sub0102.html"),
                ("CEO 인사말", "./sub0103.html"),
                ("윤리경영", "./sub0104.html"),
                ("조직구성", "./sub0105.html"),
                ("인증현황", "./sub0106.html"),
                ("오시는 길", "./sub0107.html"),
            ],
        ),
        section(
            "business",
            "사업영역",
            &[("사업하기", "./sub0201.html"), ("문의하기", "./sub0202.html")],
        ),
        section(
            "pr",
            "홍보센터",
            &[("보도자료", "./sub0301.html"), ("공지사항", "./sub0302.html")],
        ),
        section(
            "careers",
            "채용공고",
            &[("채용공고", "./sub0401.html"), ("인재상", "./sub0402.html")],
        ),
    ]
}

impl HeaderMenu {
    /// Markup for the desktop `.header-gnb .gnb-depth-1` list
    pub fn desktop_html(&self) -> String {
        self.render(true)
    }

    /// Markup for the mobile `.sidebar .gnb-depth-1` list
    pub fn mobile_html(&self) -> String {
        self.render(false)
    }

    fn render(&self, desktop: bool) -> String {
        let mut out = String::new();
        for entry in self.entries.iter().filter(|e| e.active) {
            out.push_str("<li class=\"depth-1\">");
            let class = if desktop {
                "depth-1-link hover-underline"
            } else {
                "depth-1-link"
            };
            write_link(&mut out, entry, class);

            let children: Vec<&MenuEntry> = entry.active_children().collect();
            if !children.is_empty() {
                if desktop {
                    out.push_str("<div class=\"depth-item\">");
                }
                out.push_str("<ul class=\"gnb-depth-2\">");
                for child in children {
                    out.push_str("<li class=\"depth-2\">");
                    write_link(&mut out, child, "depth-2-link");
                    out.push_str("</li>");
                }
                out.push_str("</ul>");
                if desktop {
                    out.push_str("</div>");
                }
            }
            out.push_str("</li>");
        }
        out
    }
}

fn write_link(out: &mut String, entry: &MenuEntry, class: &str) {
    let target = if entry.new_window {
        " target=\"_blank\""
    } else {
        ""
    };
    let _ = write!(
        out,
        "<a href=\"{}\" class=\"{}\"{}><span>{}</span></a>",
        escape(entry.href()),
        class,
        target,
        escape(&entry.name)
    );
}
