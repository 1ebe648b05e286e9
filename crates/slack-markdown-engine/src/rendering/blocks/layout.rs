//! Non-interactive layout blocks.

use crate::models::TextObject;
use crate::rendering::{BLANK_LINE, RenderContext, join_non_empty, tags};

use super::render_text;

pub const DIVIDER: &str = "---";

/// Section text, then its fields two to a line as `a | b`.
pub fn section(text: Option<&TextObject>, fields: &[TextObject], ctx: &RenderContext) -> String {
    let text = text.map(|t| render_text(t, ctx)).unwrap_or_default();

    let field_lines = fields
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|field| render_text(field, ctx))
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect::<Vec<_>>()
        .join("\n");

    let body = join_non_empty([text, field_lines], BLANK_LINE);
    if body.is_empty() || !ctx.is_tagged() {
        body
    } else {
        tags::envelope("section", &body)
    }
}

pub fn header(text: Option<&TextObject>) -> String {
    format!("# {}", text.map(TextObject::text).unwrap_or_default())
}

/// Element texts joined with ` | ` inside one italic span.
pub fn context(elements: &[TextObject], ctx: &RenderContext) -> String {
    let texts: Vec<String> = elements
        .iter()
        .map(|element| render_text(element, ctx))
        .filter(|text| !text.is_empty())
        .collect();
    if texts.is_empty() {
        String::new()
    } else {
        format!("_{}_", texts.join(" | "))
    }
}

pub fn image(url: &str, alt: &str, title: Option<&TextObject>) -> String {
    let picture = format!("![{alt}]({url})");
    match title {
        Some(title) => format!("**{}**\n{picture}", title.text()),
        None => picture,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ComposedText, NameTable, TextKind};
    use crate::rendering::OutputStyle;
    use pretty_assertions::assert_eq;

    fn tagged() -> RenderContext<'static> {
        RenderContext::default()
    }

    #[test]
    fn test_section_with_plain_text() {
        let text = TextObject::plain("これはセクションのテキストです");
        assert_eq!(
            section(Some(&text), &[], &tagged()),
            "<section>\nこれはセクションのテキストです\n</section>"
        );
    }

    #[test]
    fn test_section_with_mrkdwn_text() {
        let text = TextObject::mrkdwn("*太字*と_斜体_のテキスト");
        assert_eq!(
            section(Some(&text), &[], &tagged()),
            "<section>\n**太字**と*斜体*のテキスト\n</section>"
        );
    }

    #[test]
    fn test_section_fields_in_pairs() {
        let fields = [
            TextObject::mrkdwn("項目1"),
            TextObject::mrkdwn("値1"),
            TextObject::mrkdwn("項目2"),
            TextObject::mrkdwn("値2"),
        ];
        assert_eq!(
            section(None, &fields, &tagged()),
            "<section>\n項目1 | 値1\n項目2 | 値2\n</section>"
        );
    }

    #[test]
    fn test_section_text_and_fields() {
        let text = TextObject::mrkdwn("メインテキスト");
        let fields = [TextObject::plain("項目1"), TextObject::plain("値1")];
        assert_eq!(
            section(Some(&text), &fields, &tagged()),
            "<section>\nメインテキスト\n\n項目1 | 値1\n</section>"
        );
    }

    #[test]
    fn test_odd_trailing_field_stands_alone() {
        let fields = [
            TextObject::plain("a"),
            TextObject::plain("b"),
            TextObject::plain("c"),
        ];
        let ctx = RenderContext::new(None, OutputStyle::Markdown);
        assert_eq!(section(None, &fields, &ctx), "a | b\nc");
    }

    #[test]
    fn test_empty_section_renders_nothing() {
        assert_eq!(section(None, &[], &tagged()), "");
    }

    #[test]
    fn test_section_mentions_use_name_table() {
        let names = NameTable::from([("U1".to_string(), "Alice".to_string())]);
        let ctx = RenderContext::new(Some(&names), OutputStyle::Markdown);
        let text = TextObject::mrkdwn("owner: <@U1>");
        assert_eq!(section(Some(&text), &[], &ctx), "owner: @Alice");
    }

    #[test]
    fn test_header_text() {
        assert_eq!(header(Some(&TextObject::plain("Notice"))), "# Notice");
        assert_eq!(header(Some(&TextObject::Bare("Notice".into()))), "# Notice");
    }

    #[test]
    fn test_context_joins_and_skips_images() {
        let elements = [
            TextObject::mrkdwn("作成者: *Bot*"),
            TextObject::Composed(ComposedText {
                kind: TextKind::Other,
                text: String::new(),
            }),
            TextObject::plain("2024-01-01"),
        ];
        assert_eq!(context(&elements, &tagged()), "_作成者: **Bot** | 2024-01-01_");
    }

    #[test]
    fn test_empty_context_renders_nothing() {
        assert_eq!(context(&[], &tagged()), "");
    }

    #[test]
    fn test_image_with_and_without_title() {
        assert_eq!(image("https://x/i.png", "alt", None), "![alt](https://x/i.png)");
        assert_eq!(
            image("https://x/i.png", "alt", Some(&TextObject::plain("Chart"))),
            "**Chart**\n![alt](https://x/i.png)"
        );
    }
}
