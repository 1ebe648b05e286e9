//! Legacy attachment boxes.

use crate::models::{Attachment, AttachmentField, EpochSeconds};

use super::blocks::render_blocks;
use super::inline::escape_markdown;
use super::metadata::{TIMESTAMP_FORMAT, utc_from_seconds};
use super::{BLANK_LINE, RenderContext, RenderError, join_non_empty, tags};

/// Separates consecutive attachments.
pub const ATTACHMENT_SEPARATOR: &str = "\n\n---\n\n";

/// Renders every attachment and joins them with a horizontal rule.
///
/// A footer timestamp that cannot be represented fails the whole list.
pub fn render_attachments(
    attachments: &[Attachment],
    ctx: &RenderContext,
) -> Result<String, RenderError> {
    let rendered = attachments
        .iter()
        .map(|attachment| render_attachment(attachment, ctx))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(join_non_empty(rendered, ATTACHMENT_SEPARATOR))
}

fn render_attachment(attachment: &Attachment, ctx: &RenderContext) -> Result<String, RenderError> {
    let body = if attachment.blocks.is_empty() {
        non_empty(&attachment.text).map(|text| ctx.translate(text)).unwrap_or_default()
    } else {
        render_blocks(&attachment.blocks, ctx)?
    };

    let parts = [
        color_indicator(non_empty(&attachment.color)).to_string(),
        non_empty(&attachment.pretext).map(|text| ctx.translate(text)).unwrap_or_default(),
        author(non_empty(&attachment.author_name), non_empty(&attachment.author_link)),
        title(non_empty(&attachment.title), non_empty(&attachment.title_link)),
        body,
        render_fields(&attachment.fields, ctx),
        non_empty(&attachment.image_url).map(|url| format!("![Image]({url})")).unwrap_or_default(),
        non_empty(&attachment.thumb_url).map(|url| format!("![Thumbnail]({url})")).unwrap_or_default(),
        footer(non_empty(&attachment.footer), attachment.ts.as_ref())?,
    ];

    let content = join_non_empty(parts, BLANK_LINE);
    if content.is_empty() || !ctx.is_tagged() {
        Ok(content)
    } else {
        Ok(tags::envelope("attachment", &content))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Colored marker for the attachment's side bar color.
pub fn color_indicator(color: Option<&str>) -> &'static str {
    let Some(color) = color else {
        return "";
    };
    match color.to_lowercase().as_str() {
        "good" => "🟢",
        "warning" => "🟡",
        "danger" => "🔴",
        _ if color.starts_with('#') => "🟩",
        _ => "",
    }
}

fn author(name: Option<&str>, link: Option<&str>) -> String {
    match (name, link) {
        (Some(name), Some(link)) => format!("[{name}]({link})"),
        (Some(name), None) => name.to_string(),
        (None, _) => String::new(),
    }
}

fn title(title: Option<&str>, link: Option<&str>) -> String {
    match (title, link) {
        (Some(title), Some(link)) => format!("**[{title}]({link})**"),
        (Some(title), None) => format!("**{title}**"),
        (None, _) => String::new(),
    }
}

/// Short fields first, then long ones.
///
/// Tagged style renders every field as `###title\n\nvalue`; Markdown style
/// puts short fields in a two-column table and long ones in bold-titled
/// paragraphs.
pub fn render_fields(fields: &[AttachmentField], ctx: &RenderContext) -> String {
    let (short, long): (Vec<&AttachmentField>, Vec<&AttachmentField>) =
        fields.iter().partition(|field| field.short);

    if ctx.is_tagged() {
        return short
            .iter()
            .chain(long.iter())
            .map(|field| format!("###{}\n\n{}", field.title, field.value))
            .collect::<Vec<_>>()
            .join(BLANK_LINE);
    }

    let table = field_table(&short);
    let paragraphs = long
        .iter()
        .map(|field| format!("**{}**\n\n{}", field.title, field.value));
    join_non_empty(std::iter::once(table).chain(paragraphs), BLANK_LINE)
}

fn field_table(fields: &[&AttachmentField]) -> String {
    if fields.is_empty() {
        return String::new();
    }
    let mut rows = vec!["| Field | Value |".to_string(), "| --- | --- |".to_string()];
    rows.extend(fields.iter().map(|field| {
        format!(
            "| {} | {} |",
            escape_markdown(&field.title),
            escape_markdown(&field.value)
        )
    }));
    rows.join("\n")
}

/// `_footer • 2024-01-11 13:40:00_`. A zero, missing or non-numeric
/// timestamp leaves the date out.
fn footer(text: Option<&str>, ts: Option<&EpochSeconds>) -> Result<String, RenderError> {
    let mut parts = Vec::with_capacity(2);
    if let Some(text) = text {
        parts.push(text.to_string());
    }
    if let Some(seconds) = ts.and_then(EpochSeconds::seconds).filter(|s| *s != 0.0 && !s.is_nan()) {
        let time = utc_from_seconds(seconds).ok_or_else(|| RenderError::TimestampOutOfRange {
            raw: seconds.to_string(),
        })?;
        parts.push(time.format(TIMESTAMP_FORMAT).to_string());
    }
    if parts.is_empty() {
        Ok(String::new())
    } else {
        Ok(format!("_{}_", parts.join(" • ")))
    }
}
