//! Routes, pages and the sidebar of the documentation site.

use crate::content::markdown::parse_markdown;
use crate::content::outline::assign_heading_ids;
use crate::content::page::ContentRegion;

/// Route rendered for the empty path
pub const HOME: &str = "/";

struct PageSource {
    path: &'static str,
    title: &'static str,
    markdown: &'static str,
}

const PAGES: &[PageSource] = &[
    PageSource {
        path: "/",
        title: "Getting Started",
        markdown: include_str!("pages/getting_started.md"),
    },
    PageSource {
        path: "/what-is-featherai",
        title: "What is FeatherAI",
        markdown: include_str!("pages/what_is_featherai.md"),
    },
    PageSource {
        path: "/system-instructions",
        title: "System Instructions",
        markdown: include_str!("pages/system_instructions.md"),
    },
    PageSource {
        path: "/tool-calling",
        title: "Tool Calling",
        markdown: include_str!("pages/tool_calling.md"),
    },
    PageSource {
        path: "/structured-output",
        title: "Structured Output",
        markdown: include_str!("pages/structured_output.md"),
    },
    PageSource {
        path: "/multimodal",
        title: "Multimodal",
        markdown: include_str!("pages/multimodal.md"),
    },
    PageSource {
        path: "/native-tools",
        title: "Native Tools",
        markdown: include_str!("pages/native_tools.md"),
    },
    PageSource {
        path: "/arun-method",
        title: "arun Method",
        markdown: include_str!("pages/arun_method.md"),
    },
    PageSource {
        path: "/async-tools",
        title: "Asynchronous Tools",
        markdown: include_str!("pages/async_tools.md"),
    },
    PageSource {
        path: "/examples",
        title: "Examples",
        markdown: include_str!("pages/examples.md"),
    },
    PageSource {
        path: "/featured-projects",
        title: "Featured Projects",
        markdown: include_str!("pages/featured_projects.md"),
    },
];

const NOT_FOUND_MARKDOWN: &str = "# Page Not Found\n\n\
    The page you are looking for does not exist. Use the sidebar or the search box to find your way back.\n";

/// A sidebar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Link {
        title: &'static str,
        path: &'static str,
    },
    /// Collapsible group of links; starts collapsed
    Group {
        title: &'static str,
        children: &'static [(&'static str, &'static str)],
    },
}

pub const SIDEBAR: &[NavItem] = &[
    NavItem::Link {
        title: "What is FeatherAI",
        path: "/what-is-featherai",
    },
    NavItem::Link {
        title: "Getting Started",
        path: "/",
    },
    NavItem::Group {
        title: "Basic Agents",
        children: &[
            ("System Instructions", "/system-instructions"),
            ("Tool Calling", "/tool-calling"),
            ("Structured Output", "/structured-output"),
            ("Multimodal", "/multimodal"),
        ],
    },
    NavItem::Link {
        title: "Native Tools",
        path: "/native-tools",
    },
    NavItem::Group {
        title: "Asynchronous Execution",
        children: &[
            ("arun Method", "/arun-method"),
            ("Asynchronous Tools", "/async-tools"),
        ],
    },
    NavItem::Link {
        title: "Examples",
        path: "/examples",
    },
    NavItem::Link {
        title: "Featured Projects",
        path: "/featured-projects",
    },
];

/// One routed page with its parsed content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub path: String,
    pub title: String,
    pub region: ContentRegion,
}

impl Page {
    /// Parse `markdown` and assign ids to headings that lack one
    pub fn from_markdown(path: &str, title: &str, markdown: &str) -> Self {
        let mut blocks = parse_markdown(markdown);
        assign_heading_ids(&mut blocks);
        Self {
            path: path.to_string(),
            title: title.to_string(),
            region: ContentRegion::new(blocks),
        }
    }
}

/// Split a navigation target such as `/native-tools#crawl` into its route
/// and fragment. The fragment is returned without `#`; an empty route is
/// the home page.
pub fn split_target(target: &str) -> (&str, Option<&str>) {
    let (path, fragment) = match target.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment).filter(|f| !f.is_empty())),
        None => (target, None),
    };
    let path = if path.is_empty() { HOME } else { path };
    (path, fragment)
}

/// All pages of the site
#[derive(Debug, Clone)]
pub struct Site {
    pages: Vec<Page>,
    not_found: Page,
}

impl Site {
    pub fn builtin() -> Self {
        let pages = PAGES
            .iter()
            .map(|src| Page::from_markdown(src.path, src.title, src.markdown))
            .collect();
        let not_found = Page::from_markdown("", "Not Found", NOT_FOUND_MARKDOWN);
        Self { pages, not_found }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    fn position(&self, path: &str) -> Option<usize> {
        let path = normalize_path(path);
        self.pages.iter().position(|p| p.path == path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.position(path).is_some()
    }

    pub fn page(&self, path: &str) -> Option<&Page> {
        self.position(path).map(|i| &self.pages[i])
    }

    /// The page at `path`, or the not-found page
    pub fn resolve(&self, path: &str) -> &Page {
        match self.position(path) {
            Some(i) => &self.pages[i],
            None => &self.not_found,
        }
    }

    pub fn resolve_mut(&mut self, path: &str) -> &mut Page {
        match self.position(path) {
            Some(i) => &mut self.pages[i],
            None => &mut self.not_found,
        }
    }
}

impl Default for Site {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Trailing slashes are not significant
fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { HOME } else { trimmed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::DocIndex;

    #[test]
    fn test_split_target() {
        assert_eq!(split_target("/native-tools#crawl"), ("/native-tools", Some("crawl")));
        assert_eq!(split_target("/native-tools"), ("/native-tools", None));
        assert_eq!(split_target("/native-tools#"), ("/native-tools", None));
        assert_eq!(split_target("#quickstart"), ("/", Some("quickstart")));
        assert_eq!(split_target(""), ("/", None));
    }

    #[test]
    fn test_builtin_routes() {
        let site = Site::builtin();
        assert_eq!(site.pages().len(), 11);
        assert!(site.contains("/"));
        assert!(site.contains("/async-tools/"));
        assert_eq!(site.resolve("/native-tools").title, "Native Tools");
    }

    #[test]
    fn test_unknown_route_is_not_found() {
        let site = Site::builtin();
        assert!(site.page("/nope").is_none());
        let page = site.resolve("/nope");
        assert_eq!(page.title, "Not Found");
        assert!(page.region.text_content().contains("does not exist"));
    }

    #[test]
    fn test_sidebar_links_resolve() {
        let site = Site::builtin();
        for item in SIDEBAR {
            match item {
                NavItem::Link { path, .. } => assert!(site.contains(path), "{}", path),
                NavItem::Group { children, .. } => {
                    for (_, path) in children.iter() {
                        assert!(site.contains(path), "{}", path);
                    }
                }
            }
        }
    }

    #[test]
    fn test_every_index_target_resolves() {
        let site = Site::builtin();
        let index = DocIndex::builtin().unwrap();
        for entry in index.entries() {
            let page = site.page(&entry.path);
            assert!(page.is_some(), "no page for {}", entry.path);
            if !entry.anchor.is_empty() {
                assert!(
                    page.unwrap().region.find_anchor(&entry.anchor).is_some(),
                    "no heading {} on {}",
                    entry.anchor,
                    entry.path
                );
            }
        }
    }

    #[test]
    fn test_headings_get_slugs() {
        let site = Site::builtin();
        let page = site.resolve("/arun-method");
        assert!(page.region.find_anchor("#when-to-use-arun").is_some());
        assert!(page.region.find_anchor("#concurrent").is_some());
    }
}
