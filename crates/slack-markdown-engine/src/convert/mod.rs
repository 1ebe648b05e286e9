//! # Conversion
//!
//! Composes the renderers into one text per message. Each top-level section
//! (header, body, attachments, files, reactions, edit info) goes through a
//! [`SectionGuard`], so a section that fails is left out while the rest of
//! the message still renders.

pub mod guard;
pub mod result;

use serde::{Deserialize, Serialize};

use crate::models::{Message, NameTable};
use crate::rendering::attachments::render_attachments;
use crate::rendering::blocks::render_blocks;
use crate::rendering::files::render_files;
use crate::rendering::metadata::{
    render_edit_info, render_header, render_reactions, render_thread_info,
};
use crate::rendering::{BLANK_LINE, OutputStyle, RenderContext, join_non_empty};

pub use guard::{Section, SectionFailure, SectionGuard};
pub use result::{ConversionError, ConversionResult, ErrorCode};

/// Separator between the top-level sections of one message, and between
/// messages in batch output.
pub const SECTION_SEPARATOR: &str = BLANK_LINE;

/// Knobs for a conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    pub style: OutputStyle,
    /// Add a thread annotation right after the header.
    pub include_thread_info: bool,
    /// Report swallowed section failures as `PARTIAL_CONVERSION`.
    pub report_partial: bool,
}

/// Converts messages with a fixed name table and options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Converter<'a> {
    names: Option<&'a NameTable>,
    options: ConvertOptions,
}

impl<'a> Converter<'a> {
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            names: None,
            options,
        }
    }

    pub fn with_names(mut self, names: &'a NameTable) -> Self {
        self.names = Some(names);
        self
    }

    /// Converts one message. Never panics on input data; every failure comes
    /// back as a [`ConversionResult::Failure`].
    pub fn convert(&self, message: &Message) -> ConversionResult {
        log::debug!(
            "Converting message ts={} user={}",
            message.ts.as_deref().unwrap_or("-"),
            message.user.as_deref().unwrap_or("-")
        );
        self.compose(message).unwrap_or_else(|err| {
            log::error!("Conversion failed unexpectedly: {err:#}");
            ConversionResult::failure(ConversionError::unknown_error(&err))
        })
    }

    /// Converts each message independently, preserving order.
    pub fn convert_batch(&self, messages: &[Message]) -> Vec<ConversionResult> {
        messages.iter().map(|message| self.convert(message)).collect()
    }

    /// Checks that `value` is shaped like a message before converting it.
    pub fn convert_value(&self, value: &serde_json::Value) -> ConversionResult {
        match Message::deserialize(value) {
            Ok(message) => self.convert(&message),
            Err(err) => {
                log::debug!("Rejected message: {err}");
                ConversionResult::failure(ConversionError::invalid_shape(&err))
            }
        }
    }

    fn compose(&self, message: &Message) -> anyhow::Result<ConversionResult> {
        if !message.is_contentful() {
            return Ok(ConversionResult::failure(ConversionError::missing_content(
                message,
            )?));
        }

        let ctx = RenderContext::new(self.names, self.options.style);
        let mut guard = SectionGuard::new();
        let mut sections = Vec::with_capacity(7);

        sections.push(guard.try_render(Section::Header, String::new(), || {
            Ok(render_header(
                message.user.as_deref(),
                message.ts.as_deref(),
                &ctx,
            ))
        }));

        if self.options.include_thread_info {
            sections.push(guard.try_render(Section::Thread, String::new(), || {
                Ok(render_thread_info(message))
            }));
        }

        if message.has_blocks() {
            sections.push(guard.try_render(Section::Body, String::new(), || {
                render_blocks(&message.blocks, &ctx)
            }));
        } else if let Some(text) = message.text() {
            sections.push(guard.try_render(Section::Body, text.to_string(), || {
                Ok(ctx.translate(text))
            }));
        }

        if message.has_attachments() {
            sections.push(guard.try_render(Section::Attachments, String::new(), || {
                render_attachments(&message.attachments, &ctx)
            }));
        }

        if message.has_files() {
            sections.push(guard.try_render(Section::Files, String::new(), || {
                Ok(render_files(&message.files, &ctx))
            }));
        }

        if message.has_reactions() {
            sections.push(guard.try_render(Section::Reactions, String::new(), || {
                Ok(render_reactions(&message.reactions, &ctx))
            }));
        }

        if message.edited.is_some() {
            sections.push(guard.try_render(Section::Edited, String::new(), || {
                Ok(render_edit_info(message.edited.as_ref(), &ctx))
            }));
        }

        let markdown = join_non_empty(sections, SECTION_SEPARATOR);
        if markdown.is_empty() {
            return Ok(ConversionResult::failure(ConversionError::missing_content(
                message,
            )?));
        }

        let failures = guard.into_failures();
        if self.options.report_partial && !failures.is_empty() {
            return Ok(ConversionResult::partial(markdown, &failures));
        }
        Ok(ConversionResult::success(markdown))
    }
}

/// [`Converter::convert`] with default options.
pub fn convert(message: &Message, names: Option<&NameTable>) -> ConversionResult {
    converter(names).convert(message)
}

/// [`Converter::convert_batch`] with default options.
pub fn convert_batch(messages: &[Message], names: Option<&NameTable>) -> Vec<ConversionResult> {
    converter(names).convert_batch(messages)
}

/// [`Converter::convert_value`] with default options.
pub fn convert_value(value: &serde_json::Value, names: Option<&NameTable>) -> ConversionResult {
    converter(names).convert_value(value)
}

fn converter(names: Option<&NameTable>) -> Converter<'_> {
    let converter = Converter::default();
    match names {
        Some(names) => converter.with_names(names),
        None => converter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn message(value: serde_json::Value) -> Message {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_contentless_message_is_missing_content() {
        let result = convert(&message(json!({"type": "message", "ts": "1704980400"})), None);
        assert_eq!(result.error().map(|e| e.code), Some(ErrorCode::MissingContent));
    }

    #[test]
    fn test_sections_in_order() {
        let msg = message(json!({
            "user": "U1",
            "ts": "1704980400",
            "text": "Hello *world*!",
            "files": [{"id": "F1", "name": "a.txt", "mimetype": "text/plain", "size": 3, "url_private": "https://x/a.txt"}],
            "reactions": [{"name": "eyes", "users": ["U2"], "count": 1}],
            "edited": {"user": "U1", "ts": ""}
        }));
        assert_eq!(
            convert(&msg, None).markdown().unwrap(),
            "**@U1** - 2024-01-11 13:40:00\n\n\
             Hello **world**!\n\n\
             <file id=\"F1\" mimetype=\"text/plain\" href=\"https://x/a.txt\" size=\"3\">a.txt</file>\n\n\
             <reaction count=\"1\" users=\"U2\">eyes</reaction>\n\n\
             *(edited by @U1)*"
        );
    }

    #[test]
    fn test_blocks_replace_text() {
        let msg = message(json!({
            "text": "fallback text",
            "blocks": [{"type": "header", "text": "Notice"}]
        }));
        assert_eq!(convert(&msg, None).markdown(), Some("# Notice"));
    }

    #[test]
    fn test_only_unknown_blocks_is_missing_content() {
        let msg = message(json!({"blocks": [{"type": "mystery"}]}));
        let result = convert(&msg, None);
        assert_eq!(result.error().map(|e| e.code), Some(ErrorCode::MissingContent));
    }

    #[test]
    fn test_failed_section_is_dropped() {
        let msg = message(json!({
            "text": "body",
            "attachments": [{"footer": "x", "ts": 1e300}]
        }));
        assert_eq!(convert(&msg, None).markdown(), Some("body"));
    }

    #[test]
    fn test_failed_section_reported_when_asked() {
        let msg = message(json!({
            "text": "body",
            "attachments": [{"footer": "x", "ts": 1e300}]
        }));
        let converter = Converter::new(ConvertOptions {
            report_partial: true,
            ..ConvertOptions::default()
        });
        let result = converter.convert(&msg);
        assert_eq!(result.error().map(|e| e.code), Some(ErrorCode::PartialConversion));
        assert_eq!(result.partial_markdown(), Some("body"));
    }

    #[test]
    fn test_thread_info_after_header_when_enabled() {
        let msg = message(json!({
            "user": "U1",
            "text": "reply",
            "ts": "1704981000",
            "thread_ts": "1704980400"
        }));
        let converter = Converter::new(ConvertOptions {
            include_thread_info: true,
            ..ConvertOptions::default()
        });
        assert_eq!(
            converter.convert(&msg).markdown(),
            Some("**@U1** - 2024-01-11 13:50:00\n\n↳ **Reply to thread**\n\nreply")
        );
        assert_eq!(
            convert(&msg, None).markdown(),
            Some("**@U1** - 2024-01-11 13:50:00\n\nreply")
        );
    }

    #[test]
    fn test_names_reach_every_section() {
        let names = NameTable::from([("U1".to_string(), "Alice".to_string())]);
        let msg = message(json!({
            "user": "U1",
            "text": "hi <@U1>",
            "edited": {"user": "U1", "ts": ""}
        }));
        assert_eq!(
            convert(&msg, Some(&names)).markdown(),
            Some("**@Alice**\n\nhi @Alice\n\n*(edited by @Alice)*")
        );
    }

    #[test]
    fn test_batch_results_are_independent() {
        let messages = [
            message(json!({"text": "one"})),
            message(json!({"ts": "1"})),
            message(json!({"text": "three"})),
        ];
        let results = convert_batch(&messages, None);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_success());
        assert_eq!(results[1].error().map(|e| e.code), Some(ErrorCode::MissingContent));
        assert_eq!(results[2].markdown(), Some("three"));
    }

    #[test]
    fn test_value_with_wrong_shape_is_invalid_json() {
        let result = convert_value(&json!({"text": 42}), None);
        let err = result.error().unwrap();
        assert_eq!(err.code, ErrorCode::InvalidJson);
        assert_eq!(err.message, "Message does not match the expected shape");
    }

    #[test]
    fn test_too_deep_list_drops_only_the_blocks_section() {
        let options = ConvertOptions {
            report_partial: true,
            ..ConvertOptions::default()
        };
        let message = json!({
            "user": "U1",
            "text": "fallback",
            "blocks": [{"type": "rich_text", "elements": [
                {"type": "rich_text_list", "indent": usize::MAX, "elements": [
                    {"type": "rich_text_section", "elements": [{"type": "text", "text": "deep"}]}
                ]}
            ]}]
        });

        let result = Converter::new(options).convert_value(&message);

        assert_eq!(result.error().map(|e| e.code), Some(ErrorCode::PartialConversion));
        assert_eq!(result.partial_markdown(), Some("**@U1**"));
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: ConvertOptions = serde_json::from_value(json!({"style": "markdown"})).unwrap();
        assert_eq!(
            options,
            ConvertOptions {
                style: OutputStyle::Markdown,
                include_thread_info: false,
                report_partial: false,
            }
        );
    }
}
