//! Recursive rendering of `rich_text` node trees.

use chrono::Local;

use crate::models::{InlineElement, ListStyle, RichTextList, RichTextNode, RichTextSection, TextStyle};
use crate::rendering::inline::{self, emoji};
use crate::rendering::metadata::{TIMESTAMP_FORMAT, utc_from_seconds};
use crate::rendering::{RenderContext, RenderError};

/// Deepest list nesting rendered; anything deeper fails the block tree.
pub const MAX_LIST_INDENT: usize = 64;

/// Renders each node and joins them with single line breaks.
pub fn render_rich_text(nodes: &[RichTextNode], ctx: &RenderContext) -> Result<String, RenderError> {
    let rendered = nodes
        .iter()
        .map(|node| render_node(node, ctx))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rendered.join("\n"))
}

fn render_node(node: &RichTextNode, ctx: &RenderContext) -> Result<String, RenderError> {
    Ok(match node {
        RichTextNode::Section(section) => render_section(section, ctx)?,
        RichTextNode::List(list) => render_list(list, ctx)?,
        RichTextNode::Quote { elements } => format!("> {}", render_inline(elements, ctx)?),
        RichTextNode::Preformatted { elements } => {
            format!("```\n{}\n```", render_inline(elements, ctx)?)
        }
        RichTextNode::Unknown => String::new(),
    })
}

fn render_section(section: &RichTextSection, ctx: &RenderContext) -> Result<String, RenderError> {
    render_inline(&section.elements, ctx)
}

/// One line per item. Numbering restarts at 1 for every list node; nesting
/// comes only from `indent`.
fn render_list(list: &RichTextList, ctx: &RenderContext) -> Result<String, RenderError> {
    if list.indent > MAX_LIST_INDENT {
        return Err(RenderError::IndentTooDeep {
            indent: list.indent,
        });
    }
    let indent = "  ".repeat(list.indent);
    let lines = list
        .elements
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let marker = match list.style {
                ListStyle::Ordered => format!("{}.", i + 1),
                ListStyle::Bullet => "-".to_string(),
            };
            Ok(format!("{indent}{marker} {}", render_section(item, ctx)?))
        })
        .collect::<Result<Vec<_>, RenderError>>()?;
    Ok(lines.join("\n"))
}

fn render_inline(elements: &[InlineElement], ctx: &RenderContext) -> Result<String, RenderError> {
    elements.iter().map(|element| render_element(element, ctx)).collect()
}

fn render_element(element: &InlineElement, ctx: &RenderContext) -> Result<String, RenderError> {
    Ok(match element {
        InlineElement::Text { text, style } => apply_style(text, *style),
        InlineElement::Link { url, text, .. } => inline::format_link(url, text.as_deref()),
        InlineElement::User { user_id } => ctx.mention(user_id),
        InlineElement::Channel { channel_id } => inline::format_channel_mention(channel_id, None),
        InlineElement::Emoji { name, unicode } => emoji::resolve(name, unicode.as_deref()),
        InlineElement::Broadcast { range } => format!("@{range}"),
        InlineElement::Color { value } => value.clone(),
        InlineElement::Date {
            timestamp,
            fallback,
        } => render_date(*timestamp, fallback.as_deref())?,
        InlineElement::Team { team_id } => format!("@{team_id}"),
        InlineElement::Usergroup { usergroup_id } => format!("@{usergroup_id}"),
        InlineElement::Unknown => String::new(),
    })
}

/// Wraps in bold, then italic, then strike, then code; flags compose.
fn apply_style(text: &str, style: TextStyle) -> String {
    let mut out = text.to_string();
    if style.bold {
        out = format!("**{out}**");
    }
    if style.italic {
        out = format!("*{out}*");
    }
    if style.strike {
        out = format!("~~{out}~~");
    }
    if style.code {
        out = format!("`{out}`");
    }
    out
}

fn render_date(timestamp: f64, fallback: Option<&str>) -> Result<String, RenderError> {
    match utc_from_seconds(timestamp) {
        Some(time) => Ok(time.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string()),
        None => fallback
            .map(str::to_string)
            .ok_or_else(|| RenderError::TimestampOutOfRange {
                raw: timestamp.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NameTable;
    use crate::rendering::OutputStyle;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn render(value: serde_json::Value) -> Result<String, RenderError> {
        let nodes: Vec<RichTextNode> = serde_json::from_value(value).unwrap();
        render_rich_text(&nodes, &RenderContext::default())
    }

    fn section(elements: serde_json::Value) -> serde_json::Value {
        json!([{"type": "rich_text_section", "elements": elements}])
    }

    #[test]
    fn test_plain_section() {
        let out = render(section(json!([{"type": "text", "text": "Hello World"}])));
        assert_eq!(out.unwrap(), "Hello World");
    }

    #[rstest]
    #[case(json!({"bold": true}), "**t**")]
    #[case(json!({"italic": true}), "*t*")]
    #[case(json!({"strike": true}), "~~t~~")]
    #[case(json!({"code": true}), "`t`")]
    #[case(json!({"bold": true, "italic": true}), "***t***")]
    #[case(json!({"bold": true, "code": true}), "`**t**`")]
    fn test_styled_text(#[case] style: serde_json::Value, #[case] expected: &str) {
        let out = render(section(json!([{"type": "text", "text": "t", "style": style}])));
        assert_eq!(out.unwrap(), expected);
    }

    #[test]
    fn test_inline_elements_concatenate() {
        let out = render(section(json!([
            {"type": "text", "text": "see "},
            {"type": "link", "url": "https://example.com", "text": "Example"},
            {"type": "text", "text": " "},
            {"type": "link", "url": "https://bare.example"},
            {"type": "text", "text": " "},
            {"type": "user", "user_id": "U1"},
            {"type": "channel", "channel_id": "C1"},
            {"type": "emoji", "name": "tada"},
            {"type": "broadcast", "range": "here"},
            {"type": "color", "value": "#FF0000"},
            {"type": "team", "team_id": "T1"},
            {"type": "usergroup", "usergroup_id": "S1"},
            {"type": "canvas", "canvas_id": "X"}
        ])));
        assert_eq!(
            out.unwrap(),
            "see [Example](https://example.com) https://bare.example @U1#C1🎉@here#FF0000@T1@S1"
        );
    }

    #[test]
    fn test_user_elements_use_name_table() {
        let names = NameTable::from([("U1".to_string(), "Alice".to_string())]);
        let ctx = RenderContext::new(Some(&names), OutputStyle::Tagged);
        let nodes: Vec<RichTextNode> =
            serde_json::from_value(section(json!([{"type": "user", "user_id": "U1"}]))).unwrap();
        assert_eq!(render_rich_text(&nodes, &ctx).unwrap(), "@Alice");
    }

    #[test]
    fn test_unknown_emoji_keeps_shortcode() {
        let out = render(section(json!([{"type": "emoji", "name": "party_parrot"}])));
        assert_eq!(out.unwrap(), ":party_parrot:");
    }

    #[test]
    fn test_lists_with_indent_and_numbering() {
        let out = render(json!([
            {"type": "rich_text_list", "style": "ordered", "indent": 0, "elements": [
                {"type": "rich_text_section", "elements": [{"type": "text", "text": "one"}]},
                {"type": "rich_text_section", "elements": [{"type": "text", "text": "two"}]}
            ]},
            {"type": "rich_text_list", "style": "bullet", "indent": 1, "elements": [
                {"type": "rich_text_section", "elements": [{"type": "text", "text": "nested"}]}
            ]},
            {"type": "rich_text_list", "style": "ordered", "indent": 0, "elements": [
                {"type": "rich_text_section", "elements": [{"type": "text", "text": "three"}]}
            ]}
        ]));
        assert_eq!(out.unwrap(), "1. one\n2. two\n  - nested\n1. three");
    }

    #[rstest]
    #[case(MAX_LIST_INDENT, true)]
    #[case(MAX_LIST_INDENT + 1, false)]
    #[case(4_611_686_018_427_387_904, false)]
    fn test_list_indent_is_bounded(#[case] indent: usize, #[case] renders: bool) {
        let out = render(json!([
            {"type": "rich_text_list", "indent": indent, "elements": [
                {"type": "rich_text_section", "elements": [{"type": "text", "text": "deep"}]}
            ]}
        ]));
        if renders {
            assert_eq!(out.unwrap(), format!("{}- deep", "  ".repeat(indent)));
        } else {
            assert_eq!(out, Err(RenderError::IndentTooDeep { indent }));
        }
    }

    #[test]
    fn test_quote_and_preformatted() {
        let out = render(json!([
            {"type": "rich_text_quote", "elements": [{"type": "text", "text": "quoted"}]},
            {"type": "rich_text_preformatted", "elements": [{"type": "text", "text": "let x = 1;"}]}
        ]));
        assert_eq!(out.unwrap(), "> quoted\n```\nlet x = 1;\n```");
    }

    #[test]
    fn test_missing_elements_are_empty() {
        let out = render(json!([
            {"type": "rich_text_section"},
            {"type": "rich_text_quote"}
        ]));
        assert_eq!(out.unwrap(), "\n> ");
    }

    #[test]
    fn test_date_in_local_time() {
        let expected = utc_from_seconds(1704980400.0)
            .unwrap()
            .with_timezone(&Local)
            .format(TIMESTAMP_FORMAT)
            .to_string();
        let out = render(section(json!([{"type": "date", "timestamp": 1704980400}])));
        assert_eq!(out.unwrap(), expected);
    }

    #[test]
    fn test_unrepresentable_date_uses_fallback() {
        assert_eq!(render_date(1e300, Some("someday")).unwrap(), "someday");
        assert!(matches!(
            render_date(1e300, None),
            Err(RenderError::TimestampOutOfRange { .. })
        ));
    }
}
