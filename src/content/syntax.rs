//! Syntax highlighting for code blocks.
//!
//! Produces renderer-neutral styled pieces per line; the TUI maps them to
//! ratatui spans and the CLI to termcolor specs. Code blocks are never search
//! targets, so marks and syntax colors do not interact.

use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Blocks longer than this are shown without colors
const MAX_HIGHLIGHT_LINES: usize = 3000;

const THEME: &str = "base16-eighties.dark";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeStyle {
    pub fg: Option<(u8, u8, u8)>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl CodeStyle {
    const PLAIN: CodeStyle = CodeStyle {
        fg: None,
        bold: false,
        italic: false,
        underline: false,
    };
}

/// A run of code text in one style, never containing a newline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSpan {
    pub style: CodeStyle,
    pub text: String,
}

/// Syntax highlighter for fenced code blocks
pub struct SyntaxHighlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl SyntaxHighlighter {
    /// Load the bundled syntax definitions and theme
    pub fn new() -> Self {
        let mut themes = ThemeSet::load_defaults().themes;
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme: themes.remove(THEME).unwrap_or_default(),
        }
    }

    /// Syntax for a fence language tag (`python`, `py`, `bash`, ...)
    fn syntax_for(&self, lang: Option<&str>, code: &str) -> &SyntaxReference {
        lang.map(str::trim)
            .filter(|l| !l.is_empty())
            .and_then(|l| self.syntax_set.find_syntax_by_token(l))
            .or_else(|| {
                code.lines()
                    .next()
                    .and_then(|line| self.syntax_set.find_syntax_by_first_line(line))
            })
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }

    /// Split `code` into lines of styled spans. Concatenating the spans of a
    /// line gives back that line of `code`.
    pub fn highlight(&self, code: &str, lang: Option<&str>) -> Vec<Vec<CodeSpan>> {
        if code.lines().count() > MAX_HIGHLIGHT_LINES {
            return plain_lines(code);
        }

        let syntax = self.syntax_for(lang, code);
        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        // the newline syntaxes expect every line to end in '\n'
        let mut source = code.to_string();
        if !source.ends_with('\n') {
            source.push('\n');
        }

        let mut lines = Vec::new();
        for line in LinesWithEndings::from(&source) {
            let ranges = match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => ranges,
                Err(e) => {
                    tracing::warn!(error = %e, syntax = %syntax.name, "syntax highlighting failed");
                    return plain_lines(code);
                }
            };

            let spans = ranges
                .into_iter()
                .filter_map(|(style, text)| {
                    let clean_text = text.trim_end_matches('\n').trim_end_matches('\r');
                    (!clean_text.is_empty()).then(|| CodeSpan {
                        style: CodeStyle {
                            fg: Some((style.foreground.r, style.foreground.g, style.foreground.b)),
                            bold: style.font_style.contains(FontStyle::BOLD),
                            italic: style.font_style.contains(FontStyle::ITALIC),
                            underline: style.font_style.contains(FontStyle::UNDERLINE),
                        },
                        text: clean_text.to_string(),
                    })
                })
                .collect();
            lines.push(spans);
        }
        lines
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

fn plain_lines(code: &str) -> Vec<Vec<CodeSpan>> {
    code.lines()
        .map(|line| {
            if line.is_empty() {
                Vec::new()
            } else {
                vec![CodeSpan {
                    style: CodeStyle::PLAIN,
                    text: line.to_string(),
                }]
            }
        })
        .collect()
}
