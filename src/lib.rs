//! # feather-docs - FeatherAI documentation browser
//!
//! A terminal browser for the FeatherAI agent framework documentation with
//! instant keyword search over a small static index.
//!
//! ## Architecture
//!
//! - [`index`] - The static document index (embedded JSON, validated at load)
//! - [`query`] - Query normalization, additive scoring and keyword selection
//! - [`content`] - Markdown pages, heading outline, search and syntax highlighting, routes
//! - [`nav`] - Search box state, result activation and arrival processing
//! - [`tui`] - Interactive terminal UI
//! - [`output`] - Colored printing for the non-interactive commands
//! - [`utils`] - App data directory and config file
//! - [`logging`] - Tracing setup
//!
//! ## Quick Start
//!
//! ```
//! use feather_docs::content::{Site, apply_highlights};
//! use feather_docs::index::DocIndex;
//! use feather_docs::query::search;
//!
//! let index = DocIndex::builtin().unwrap();
//! let results = search("crawl website", index.entries());
//! assert_eq!(results[0].entry.target(), "/native-tools#crawl");
//!
//! let mut site = Site::builtin();
//! let page = site.resolve_mut(&results[0].entry.path);
//! apply_highlights(&mut page.region, &results[0].matched_keyword);
//! assert!(page.region.has_highlights());
//! ```

pub mod content;
pub mod index;
pub mod logging;
pub mod nav;
pub mod output;
pub mod query;
#[cfg(feature = "interactive")]
pub mod tui;
pub mod utils;
