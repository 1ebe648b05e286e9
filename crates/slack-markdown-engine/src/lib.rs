//! Converts chat message payloads (text, Block Kit trees, attachments, files,
//! reactions, thread and edit metadata) into Markdown.
//!
//! The engine is pure: no I/O, no configuration lookup. Callers hand it a
//! [`Message`], an optional [`NameTable`] and [`ConvertOptions`], and get a
//! [`ConversionResult`] back.
//!
//! ```
//! use slack_markdown_engine::{Message, convert};
//!
//! let message: Message = serde_json::from_str(
//!     r#"{"text": "Hello *world*!", "user": "U1", "ts": "1704980400"}"#,
//! ).unwrap();
//! let markdown = convert(&message, None).markdown().unwrap().to_string();
//! assert_eq!(markdown, "**@U1** - 2024-01-11 13:40:00\n\nHello **world**!");
//! ```

pub mod convert;
pub mod models;
pub mod rendering;

// Re-export key types for easier usage
pub use convert::{
    ConversionError, ConversionResult, ConvertOptions, Converter, ErrorCode, SECTION_SEPARATOR,
    SectionFailure, convert, convert_batch, convert_value,
};
pub use models::{Attachment, Block, EditRecord, File, Message, NameTable, Reaction};
pub use rendering::inline::translate;
pub use rendering::{OutputStyle, RenderContext, RenderError};
