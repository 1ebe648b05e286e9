//! # Inline markup translation
//!
//! Rewrites the platform's inline markup (`*bold*`, `_italic_`, `~strike~`,
//! `<@U1>` mentions, `<url|label>` links) into Markdown.
//!
//! Code is a raw zone. Fenced blocks and inline spans are lifted into a
//! [`CodeVault`] before any rewriting and put back afterwards, so nothing
//! between backticks is ever touched.

pub mod emoji;
pub mod kinds;
pub mod references;
pub mod vault;

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::models::NameTable;
use kinds::{Emphasis, Placeholder};
use vault::CodeVault;

pub use emoji::format_emoji;
pub use references::{
    display_name, escape_markdown, format_channel_mention, format_link, format_user_mention,
};

/// Translates platform markup in `text` to Markdown, resolving user mentions
/// through `names` when given.
pub fn translate(text: &str, names: Option<&NameTable>) -> String {
    let mut vault = CodeVault::new();
    let protected = vault.protect_fences(text);
    let protected = vault.protect_spans(&protected);

    let rewritten = references::rewrite(&protected, names);
    let rewritten = Emphasis::ALL
        .iter()
        .fold(rewritten, |acc, kind| rewrite_emphasis(&acc, kind));

    // Code is still behind placeholders here; fence bodies keep their blank lines.
    let tidied = tidy_blank_lines(&rewritten);
    if vault.is_empty() {
        return tidied;
    }
    vault.restore(&tidied).trim_matches('\n').to_string()
}

/// Rewrites single-delimiter spans of one emphasis kind. Runs of two or more
/// delimiters are copied through, which keeps already-converted Markdown stable.
fn rewrite_emphasis(text: &str, kind: &Emphasis) -> String {
    kind.pattern()
        .replace_all(text, |caps: &Captures| match caps.get(1) {
            Some(inner) if !(kind.guarded && inner.as_str().contains(Placeholder::SENTINEL)) => {
                format!("{r}{}{r}", inner.as_str(), r = kind.replacement)
            }
            _ => caps[0].to_string(),
        })
        .into_owned()
}

fn tidy_blank_lines(text: &str) -> String {
    static EXCESS: OnceLock<Regex> = OnceLock::new();
    EXCESS
        .get_or_init(|| Regex::new(r"\n{3,}").expect("Invalid blank line regex"))
        .replace_all(text.trim_matches('\n'), "\n\n")
        .into_owned()
}
