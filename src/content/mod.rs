//! Page content: parsing, outline, search and syntax highlighting, and the
//! site map.

pub mod highlight;
pub mod markdown;
pub mod outline;
pub mod page;
pub mod site;
pub mod syntax;

pub use highlight::{apply_highlights, clear_highlights, find_marks};
pub use outline::{OutlineEntry, active_entry, assign_heading_ids, outline, slugify};
pub use page::{Block, BlockKind, ContentRegion, InlineStyle, Leaf, LeafId, Mark, Segment};
pub use site::{NavItem, Page, SIDEBAR, Site, split_target};
pub use syntax::{CodeSpan, CodeStyle, SyntaxHighlighter};
