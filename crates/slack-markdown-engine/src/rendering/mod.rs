//! # Rendering
//!
//! Pure functions from the message model to text. Every renderer takes a
//! [`RenderContext`] carrying the caller's name table and the chosen
//! [`OutputStyle`], and either returns a string or a [`RenderError`] that the
//! orchestrator turns into an empty section.
//!
//! ## Modules
//!
//! - [`inline`] - inline markup translation, mentions, emoji
//! - [`blocks`] - block trees, including nested rich text
//! - [`attachments`] - legacy attachment boxes
//! - [`files`] - uploaded file listings
//! - [`metadata`] - header, reactions, thread and edit annotations

pub mod attachments;
pub mod blocks;
pub mod files;
pub mod inline;
pub mod metadata;
pub(crate) mod tags;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::NameTable;

/// Separator between paragraphs, blocks and top-level sections.
pub const BLANK_LINE: &str = "\n\n";

/// Which of the two output conventions to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputStyle {
    /// `<section>`, `<attachment>`, `<file>` and `<reaction>` pseudo-tags.
    #[default]
    Tagged,
    /// Plain Markdown with no pseudo-tags.
    Markdown,
}

impl std::str::FromStr for OutputStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tagged" => Ok(OutputStyle::Tagged),
            "markdown" => Ok(OutputStyle::Markdown),
            other => Err(format!("unknown output style '{other}' (expected tagged or markdown)")),
        }
    }
}

/// The failure of a single renderer call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("timestamp {raw} is outside the representable date range")]
    TimestampOutOfRange { raw: String },

    #[error("list indent {indent} is deeper than {max}", max = blocks::MAX_LIST_INDENT)]
    IndentTooDeep { indent: usize },
}

/// Everything a renderer needs besides the node it is rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderContext<'a> {
    pub names: Option<&'a NameTable>,
    pub style: OutputStyle,
}

impl<'a> RenderContext<'a> {
    pub fn new(names: Option<&'a NameTable>, style: OutputStyle) -> Self {
        Self { names, style }
    }

    pub fn is_tagged(&self) -> bool {
        self.style == OutputStyle::Tagged
    }

    /// Translates inline markup, resolving mentions through the name table.
    pub fn translate(&self, text: &str) -> String {
        inline::translate(text, self.names)
    }

    /// `@name` for a known user id, `@id` otherwise.
    pub fn mention(&self, user_id: &str) -> String {
        inline::format_user_mention(user_id, inline::display_name(self.names, user_id))
    }
}

/// Joins the non-empty parts with `sep`.
pub(crate) fn join_non_empty<I>(parts: I, sep: &str) -> String
where
    I: IntoIterator<Item = String>,
{
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}
