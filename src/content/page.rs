//! Rendered page content.
//!
//! A [`ContentRegion`] is the "main content" of one page: a flat list of
//! blocks, each made of text leaves. The text is immutable once parsed; search
//! highlights live beside it as a sorted list of [`Mark`]s, so removing them
//! always restores the region exactly.

use std::fmt::Write as _;
use std::ops::Range;

/// Inline style of a text leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineStyle {
    Plain,
    Emphasis,
    Strong,
    Link(String),
    /// Inline code or raw markup; never highlighted
    Code,
}

/// A contiguous run of same-styled text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub style: InlineStyle,
    pub text: String,
}

impl Leaf {
    pub fn new(style: InlineStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// `id` is empty until heading discovery assigns one
    Heading { level: u8, id: String },
    Paragraph,
    ListItem { depth: usize },
    Quote,
    CodeBlock { lang: Option<String> },
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub leaves: Vec<Leaf>,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            leaves: Vec::new(),
        }
    }

    /// Code and raw HTML blocks hold no prose
    pub fn is_prose(&self) -> bool {
        !matches!(self.kind, BlockKind::CodeBlock { .. } | BlockKind::Html)
    }

    pub fn text(&self) -> String {
        self.leaves.iter().map(|l| l.text.as_str()).collect()
    }

    pub fn heading_id(&self) -> Option<&str> {
        match &self.kind {
            BlockKind::Heading { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// Address of a leaf inside a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LeafId {
    pub block: usize,
    pub leaf: usize,
}

/// A highlighted byte range inside one leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mark {
    pub leaf: LeafId,
    pub range: Range<usize>,
}

/// A piece of leaf text, either plain or highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

/// The main content of a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentRegion {
    blocks: Vec<Block>,
    marks: Vec<Mark>,
}

impl ContentRegion {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            marks: Vec::new(),
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn has_highlights(&self) -> bool {
        !self.marks.is_empty()
    }

    pub fn first_mark(&self) -> Option<&Mark> {
        self.marks.first()
    }

    /// Replace all marks. Marks are kept sorted by position.
    pub(crate) fn set_marks(&mut self, mut marks: Vec<Mark>) {
        marks.sort_by_key(|m| (m.leaf, m.range.start));
        self.marks = marks;
    }

    pub(crate) fn clear_marks(&mut self) {
        self.marks.clear();
    }

    pub fn leaf(&self, id: LeafId) -> Option<&Leaf> {
        self.blocks.get(id.block)?.leaves.get(id.leaf)
    }

    /// Leaves that may carry highlights, in document order
    pub fn prose_leaves(&self) -> impl Iterator<Item = (LeafId, &Leaf)> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, block)| block.is_prose())
            .flat_map(|(b, block)| {
                block
                    .leaves
                    .iter()
                    .enumerate()
                    .filter(|(_, leaf)| leaf.style != InlineStyle::Code)
                    .map(move |(l, leaf)| (LeafId { block: b, leaf: l }, leaf))
            })
    }

    /// Concatenated text of every leaf; highlights never change it
    pub fn text_content(&self) -> String {
        self.blocks
            .iter()
            .flat_map(|b| b.leaves.iter())
            .map(|l| l.text.as_str())
            .collect()
    }

    /// Index of the heading whose id matches `anchor` (with or without `#`)
    pub fn find_anchor(&self, anchor: &str) -> Option<usize> {
        let id = anchor.strip_prefix('#').unwrap_or(anchor);
        if id.is_empty() {
            return None;
        }
        self.blocks.iter().position(|b| b.heading_id() == Some(id))
    }

    /// Split a leaf into plain and highlighted segments
    pub fn segments(&self, id: LeafId) -> Vec<Segment<'_>> {
        let Some(leaf) = self.leaf(id) else {
            return Vec::new();
        };
        let text = leaf.text.as_str();

        let mut segments = Vec::new();
        let mut pos = 0;
        for mark in self.marks.iter().filter(|m| m.leaf == id) {
            if mark.range.start > pos {
                segments.push(Segment {
                    text: &text[pos..mark.range.start],
                    highlighted: false,
                });
            }
            segments.push(Segment {
                text: &text[mark.range.clone()],
                highlighted: true,
            });
            pos = mark.range.end;
        }
        if pos < text.len() || segments.is_empty() {
            segments.push(Segment {
                text: &text[pos..],
                highlighted: false,
            });
        }

        segments
    }

    fn leaf_has_marks(&self, id: LeafId) -> bool {
        self.marks.iter().any(|m| m.leaf == id)
    }

    /// Render the region as HTML.
    ///
    /// Highlighted leaves are wrapped in `<span data-search-highlighted="true">`
    /// and each match in `<mark class="search-highlight">`. All text is escaped.
    pub fn render_html(&self) -> String {
        let mut out = String::new();

        for (b, block) in self.blocks.iter().enumerate() {
            let (open, close) = match &block.kind {
                BlockKind::Heading { level, id } if id.is_empty() => {
                    (format!("<h{}>", level), format!("</h{}>", level))
                }
                BlockKind::Heading { level, id } => (
                    format!("<h{} id=\"{}\">", level, escape_html(id)),
                    format!("</h{}>", level),
                ),
                BlockKind::Paragraph => ("<p>".to_string(), "</p>".to_string()),
                BlockKind::ListItem { .. } => ("<li>".to_string(), "</li>".to_string()),
                BlockKind::Quote => ("<blockquote>".to_string(), "</blockquote>".to_string()),
                BlockKind::CodeBlock { lang: Some(lang) } => (
                    format!("<pre><code class=\"language-{}\">", escape_html(lang)),
                    "</code></pre>".to_string(),
                ),
                BlockKind::CodeBlock { lang: None } => {
                    ("<pre><code>".to_string(), "</code></pre>".to_string())
                }
                BlockKind::Html => (String::new(), String::new()),
            };

            out.push_str(&open);
            for (l, leaf) in block.leaves.iter().enumerate() {
                let id = LeafId { block: b, leaf: l };
                if block.kind == BlockKind::Html {
                    // raw markup is emitted as authored
                    out.push_str(&leaf.text);
                    continue;
                }

                let (leaf_open, leaf_close) = match &leaf.style {
                    InlineStyle::Plain => (String::new(), ""),
                    InlineStyle::Emphasis => ("<em>".to_string(), "</em>"),
                    InlineStyle::Strong => ("<strong>".to_string(), "</strong>"),
                    InlineStyle::Link(href) => {
                        (format!("<a href=\"{}\">", escape_html(href)), "</a>")
                    }
                    InlineStyle::Code if block.is_prose() => ("<code>".to_string(), "</code>"),
                    InlineStyle::Code => (String::new(), ""),
                };

                out.push_str(&leaf_open);
                if self.leaf_has_marks(id) {
                    out.push_str("<span data-search-highlighted=\"true\">");
                    for segment in self.segments(id) {
                        if segment.highlighted {
                            let _ = write!(
                                out,
                                "<mark class=\"search-highlight\">{}</mark>",
                                escape_html(segment.text)
                            );
                        } else {
                            out.push_str(&escape_html(segment.text));
                        }
                    }
                    out.push_str("</span>");
                } else {
                    out.push_str(&escape_html(&leaf.text));
                }
                out.push_str(leaf_close);
            }
            out.push_str(&close);
            out.push('\n');
        }

        out
    }
}

/// Escape text for inclusion in HTML content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
