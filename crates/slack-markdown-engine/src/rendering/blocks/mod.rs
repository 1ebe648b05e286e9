//! # Block trees
//!
//! A closed dispatch over [`Block`]. Each block renders to one string; empty
//! strings (unknown block types, empty context blocks) are dropped before the
//! blocks are joined with blank lines.

mod interactive;
mod layout;
mod rich_text;

use crate::models::{Block, TextKind, TextObject};

use super::{BLANK_LINE, RenderContext, RenderError, join_non_empty};

pub use rich_text::{MAX_LIST_INDENT, render_rich_text};

/// Renders a block list, one paragraph per non-empty block.
pub fn render_blocks(blocks: &[Block], ctx: &RenderContext) -> Result<String, RenderError> {
    let rendered = blocks
        .iter()
        .map(|block| render_block(block, ctx))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(join_non_empty(rendered, BLANK_LINE))
}

pub fn render_block(block: &Block, ctx: &RenderContext) -> Result<String, RenderError> {
    let text = match block {
        Block::RichText { elements } => render_rich_text(elements, ctx)?,
        Block::Section { text, fields } => layout::section(text.as_ref(), fields, ctx),
        Block::Header { text } => layout::header(text.as_ref()),
        Block::Context { elements } => layout::context(elements, ctx),
        Block::Divider => layout::DIVIDER.to_string(),
        Block::Image {
            image_url,
            alt_text,
            title,
        } => layout::image(image_url, alt_text, title.as_ref()),
        Block::Actions { elements } => interactive::actions(elements),
        Block::Input {
            label,
            hint,
            optional,
            element,
        } => interactive::input(label.as_ref(), hint.as_ref(), *optional, element.as_ref()),
        Block::Unknown => String::new(),
    };
    Ok(text)
}

/// Plain text as-is, `mrkdwn` through the inline translator, anything else
/// (e.g. images in a context block) as nothing.
pub(crate) fn render_text(text: &TextObject, ctx: &RenderContext) -> String {
    match text.kind() {
        TextKind::PlainText => text.text().to_string(),
        TextKind::Mrkdwn => ctx.translate(text.text()),
        TextKind::Other => String::new(),
    }
}
