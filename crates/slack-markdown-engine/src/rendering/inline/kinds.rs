//! Inline constructs with their owned delimiter constants.
//!
//! Rewrite code asks these types for delimiters; it never hardcodes
//! `` ``` `` or `*` itself.

use std::sync::OnceLock;

use regex::Regex;

/// Triple-backtick fenced code. A raw zone: nothing inside is rewritten.
pub struct CodeFence;

impl CodeFence {
    pub const DELIM: &'static str = "```";
}

/// Single-backtick inline code. Also a raw zone.
pub struct InlineCode;

impl InlineCode {
    pub const TICK: char = '`';
}

/// Stand-in tokens for protected code while the surrounding text is rewritten.
///
/// Tokens look like `\0F3\0` and contain none of the characters any rewrite
/// step matches on.
pub struct Placeholder;

impl Placeholder {
    pub const SENTINEL: char = '\u{0}';
    pub const FENCE: char = 'F';
    pub const SPAN: char = 'I';

    pub fn token(tag: char, index: usize) -> String {
        format!("{s}{tag}{index}{s}", s = Self::SENTINEL)
    }
}

/// A single-delimiter emphasis span and what it becomes in Markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emphasis {
    pub delim: char,
    pub replacement: &'static str,
    /// Leave the span alone when it would swallow a placeholder.
    pub guarded: bool,
}

impl Emphasis {
    /// `*bold*` becomes `**bold**`.
    pub const BOLD: Emphasis = Emphasis {
        delim: '*',
        replacement: "**",
        guarded: true,
    };
    /// `_italic_` becomes `*italic*`.
    pub const ITALIC: Emphasis = Emphasis {
        delim: '_',
        replacement: "*",
        guarded: true,
    };
    /// `~strike~` becomes `~~strike~~`.
    pub const STRIKE: Emphasis = Emphasis {
        delim: '~',
        replacement: "~~",
        guarded: false,
    };

    /// Rewrite order.
    pub const ALL: [Emphasis; 3] = [Self::BOLD, Self::ITALIC, Self::STRIKE];

    /// Matches either a run of two or more delimiters (group 1 absent) or a
    /// single-delimited span (group 1 = inner text).
    pub fn pattern(&self) -> &'static Regex {
        static BOLD: OnceLock<Regex> = OnceLock::new();
        static ITALIC: OnceLock<Regex> = OnceLock::new();
        static STRIKE: OnceLock<Regex> = OnceLock::new();

        let cell = match self.delim {
            '*' => &BOLD,
            '_' => &ITALIC,
            _ => &STRIKE,
        };
        cell.get_or_init(|| {
            let d = regex::escape(&self.delim.to_string());
            Regex::new(&format!(r"{d}{{2,}}|{d}([^{d}]+){d}")).expect("Invalid emphasis regex")
        })
    }
}
