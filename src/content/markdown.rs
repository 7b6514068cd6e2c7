//! Markdown to content blocks.
//!
//! Pages are authored in CommonMark with `{#id}` heading attributes. The
//! parser flattens the event stream into [`Block`]s: one per heading,
//! paragraph, list item, quoted paragraph, code block or raw HTML block.

use crate::content::page::{Block, BlockKind, InlineStyle, Leaf};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

/// What a `Start` event opened, so the matching `End` knows what to close
enum Open {
    Block,
    Container,
    Style,
    Ignored,
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    current: Option<Block>,
    /// Innermost last; list items and quotes
    containers: Vec<BlockKind>,
    styles: Vec<InlineStyle>,
    open: Vec<Open>,
}

impl BlockBuilder {
    fn container_kind(&self) -> BlockKind {
        self.containers
            .last()
            .cloned()
            .unwrap_or(BlockKind::Paragraph)
    }

    fn flush(&mut self) {
        let Some(mut block) = self.current.take() else {
            return;
        };

        if let BlockKind::CodeBlock { .. } = block.kind
            && let Some(leaf) = block.leaves.last_mut()
        {
            let trimmed = leaf.text.trim_end_matches('\n').len();
            leaf.text.truncate(trimmed);
        }

        let keep = matches!(block.kind, BlockKind::Heading { .. })
            || block.leaves.iter().any(|l| !l.text.trim().is_empty());
        if keep {
            self.blocks.push(block);
        }
    }

    fn begin(&mut self, kind: BlockKind) {
        self.flush();
        self.current = Some(Block::new(kind));
        self.open.push(Open::Block);
    }

    fn push_text(&mut self, style: InlineStyle, text: &str) {
        if self.current.is_none() {
            self.current = Some(Block::new(self.container_kind()));
        }
        let Some(block) = self.current.as_mut() else {
            return;
        };

        match block.leaves.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => block.leaves.push(Leaf::new(style, text)),
        }
    }

    fn text_style(&self) -> InlineStyle {
        match self.current.as_ref().map(|b| &b.kind) {
            Some(BlockKind::CodeBlock { .. } | BlockKind::Html) => InlineStyle::Code,
            _ => self.styles.last().cloned().unwrap_or(InlineStyle::Plain),
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, id, .. } => {
                let id = id.map(|id| id.to_string()).unwrap_or_default();
                self.begin(BlockKind::Heading {
                    level: level as u8,
                    id,
                });
            }
            Tag::Paragraph => {
                // a list item or quote opened an empty block for this paragraph
                let reuse = self
                    .current
                    .as_ref()
                    .is_some_and(|b| b.leaves.is_empty() && b.kind == self.container_kind());
                if reuse {
                    self.open.push(Open::Block);
                } else {
                    self.begin(self.container_kind());
                }
            }
            Tag::Item => {
                let depth = self
                    .containers
                    .iter()
                    .filter(|k| matches!(k, BlockKind::ListItem { .. }))
                    .count();
                let kind = BlockKind::ListItem { depth };
                self.containers.push(kind.clone());
                self.flush();
                self.current = Some(Block::new(kind));
                self.open.push(Open::Container);
            }
            Tag::BlockQuote(_) => {
                self.flush();
                self.containers.push(BlockKind::Quote);
                self.open.push(Open::Container);
            }
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(str::to_string),
                    CodeBlockKind::Indented => None,
                };
                self.begin(BlockKind::CodeBlock { lang });
            }
            Tag::HtmlBlock => self.begin(BlockKind::Html),
            Tag::Emphasis => {
                self.styles.push(InlineStyle::Emphasis);
                self.open.push(Open::Style);
            }
            Tag::Strong => {
                self.styles.push(InlineStyle::Strong);
                self.open.push(Open::Style);
            }
            Tag::Link { dest_url, .. } => {
                self.styles.push(InlineStyle::Link(dest_url.to_string()));
                self.open.push(Open::Style);
            }
            _ => self.open.push(Open::Ignored),
        }
    }

    fn end(&mut self) {
        match self.open.pop() {
            Some(Open::Block) => self.flush(),
            Some(Open::Container) => {
                self.flush();
                self.containers.pop();
            }
            Some(Open::Style) => {
                self.styles.pop();
            }
            Some(Open::Ignored) | None => {}
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(_) => self.end(),
            Event::Text(text) => {
                let style = self.text_style();
                self.push_text(style, &text);
            }
            Event::Code(code) => self.push_text(InlineStyle::Code, &code),
            Event::Html(html) | Event::InlineHtml(html) => {
                self.push_text(InlineStyle::Code, &html)
            }
            Event::SoftBreak => {
                let style = self.text_style();
                self.push_text(style, " ");
            }
            Event::HardBreak => {
                let style = self.text_style();
                self.push_text(style, "\n");
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }
}

/// Parse a Markdown page into content blocks
pub fn parse_markdown(source: &str) -> Vec<Block> {
    let mut builder = BlockBuilder::default();
    for event in Parser::new_ext(source, Options::ENABLE_HEADING_ATTRIBUTES) {
        builder.event(event);
    }
    builder.finish()
}
