//! Output formatting for the non-interactive commands

use crate::content::page::{BlockKind, InlineStyle, LeafId};
use crate::content::site::Page;
use crate::content::syntax::{CodeStyle, SyntaxHighlighter};
use crate::index::{DocIndex, ScoredResult};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn stdout(color: bool) -> StandardStream {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

fn styled<W: WriteColor>(out: &mut W, spec: &ColorSpec, text: &str) -> io::Result<()> {
    out.set_color(spec)?;
    write!(out, "{}", text)?;
    out.reset()
}

/// Print ranked search results, one per line
pub fn print_results(results: &[ScoredResult], color: bool) -> io::Result<()> {
    write_results(&mut stdout(color), results)
}

pub fn write_results<W: WriteColor>(out: &mut W, results: &[ScoredResult]) -> io::Result<()> {
    for (rank, result) in results.iter().enumerate() {
        let entry = &result.entry;

        write!(out, "{:>2}. ", rank + 1)?;
        styled(out, ColorSpec::new().set_bold(true), &entry.title)?;
        if let Some(section) = &entry.section {
            write!(out, " > {}", section)?;
        }
        write!(out, "  ")?;
        styled(out, ColorSpec::new().set_fg(Some(Color::Magenta)), &entry.target())?;
        write!(out, "  ")?;
        styled(
            out,
            ColorSpec::new().set_fg(Some(Color::Green)),
            &result.score.to_string(),
        )?;
        if !result.matched_keyword.is_empty() {
            write!(out, "  ")?;
            styled(
                out,
                ColorSpec::new().set_fg(Some(Color::Yellow)),
                &result.matched_keyword,
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Print results as a JSON array
pub fn print_results_json(results: &[ScoredResult]) -> io::Result<()> {
    let json = serde_json::to_string_pretty(results).map_err(io::Error::other)?;
    let mut out = io::stdout().lock();
    writeln!(out, "{}", json)
}

/// Print a page with its highlights
pub fn print_page(page: &Page, color: bool) -> io::Result<()> {
    write_page(&mut stdout(color), page, &SyntaxHighlighter::new())
}

fn code_spec(style: CodeStyle) -> ColorSpec {
    let mut spec = ColorSpec::new();
    match style.fg {
        Some((r, g, b)) => spec.set_fg(Some(Color::Rgb(r, g, b))),
        None => spec.set_fg(Some(Color::Green)),
    };
    spec.set_bold(style.bold)
        .set_italic(style.italic)
        .set_underline(style.underline);
    spec
}

pub fn write_page<W: WriteColor>(
    out: &mut W,
    page: &Page,
    highlighter: &SyntaxHighlighter,
) -> io::Result<()> {
    let region = &page.region;
    let mut mark_spec = ColorSpec::new();
    mark_spec
        .set_fg(Some(Color::Black))
        .set_bg(Some(Color::Yellow))
        .set_bold(true);

    for (b, block) in region.blocks().iter().enumerate() {
        match &block.kind {
            BlockKind::Heading { level, .. } => {
                writeln!(out)?;
                out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
                write!(out, "{} ", "#".repeat(*level as usize))?;
                out.reset()?;
            }
            BlockKind::ListItem { depth } => write!(out, "{}- ", "  ".repeat(*depth))?,
            BlockKind::Quote => write!(out, "> ")?,
            BlockKind::CodeBlock { lang } => {
                for spans in highlighter.highlight(&block.text(), lang.as_deref()) {
                    write!(out, "    ")?;
                    for span in spans {
                        styled(out, &code_spec(span.style), &span.text)?;
                    }
                    writeln!(out)?;
                }
                writeln!(out)?;
                continue;
            }
            BlockKind::Html => {
                writeln!(out, "{}\n", block.text())?;
                continue;
            }
            BlockKind::Paragraph => {}
        }

        for (l, leaf) in block.leaves.iter().enumerate() {
            let mut spec = ColorSpec::new();
            match &leaf.style {
                InlineStyle::Plain => {}
                InlineStyle::Emphasis => {
                    spec.set_italic(true);
                }
                InlineStyle::Strong => {
                    spec.set_bold(true);
                }
                InlineStyle::Link(_) => {
                    spec.set_fg(Some(Color::Blue)).set_underline(true);
                }
                InlineStyle::Code => {
                    spec.set_fg(Some(Color::Green));
                }
            }
            if matches!(block.kind, BlockKind::Heading { .. }) {
                spec.set_fg(Some(Color::Cyan)).set_bold(true);
            }

            for segment in region.segments(LeafId { block: b, leaf: l }) {
                let segment_spec = if segment.highlighted { &mark_spec } else { &spec };
                styled(out, segment_spec, segment.text)?;
            }
        }

        if let Some(id) = block.heading_id().filter(|id| !id.is_empty()) {
            styled(
                out,
                ColorSpec::new().set_fg(Some(Color::Magenta)),
                &format!("  #{}", id),
            )?;
        }
        writeln!(out)?;
        if !matches!(block.kind, BlockKind::ListItem { .. }) {
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Print the headings of a page with their ids
pub fn print_outline(page: &Page, color: bool) -> io::Result<()> {
    write_outline(&mut stdout(color), page)
}

pub fn write_outline<W: WriteColor>(out: &mut W, page: &Page) -> io::Result<()> {
    for block in page.region.blocks() {
        if let BlockKind::Heading { level, id } = &block.kind {
            write!(out, "{}{}", "  ".repeat((*level as usize).saturating_sub(1)), block.text())?;
            write!(out, "  ")?;
            styled(
                out,
                ColorSpec::new().set_fg(Some(Color::Magenta)),
                &format!("#{}", id),
            )?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Print every index entry with its target and keywords
pub fn print_index(index: &DocIndex, color: bool) -> io::Result<()> {
    write_index(&mut stdout(color), index)
}

pub fn write_index<W: WriteColor>(out: &mut W, index: &DocIndex) -> io::Result<()> {
    for entry in index.entries() {
        styled(out, ColorSpec::new().set_bold(true), &entry.id)?;
        write!(out, "  ")?;
        styled(out, ColorSpec::new().set_fg(Some(Color::Magenta)), &entry.target())?;
        writeln!(out, "  [{}] {}", entry.category, entry.keywords.join(", "))?;
    }
    writeln!(out, "{} entries", index.len())
}
