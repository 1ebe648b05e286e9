//! Block Kit layout tree.
//!
//! Every union is internally tagged on `"type"` and ends in an `Unknown`
//! catch-all, so payloads using block or element types this crate has never
//! heard of still deserialize. Unknown nodes render as nothing.

use serde::{Deserialize, Serialize};

/// A top-level layout block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    RichText {
        #[serde(default)]
        elements: Vec<RichTextNode>,
    },
    Section {
        text: Option<TextObject>,
        #[serde(default)]
        fields: Vec<TextObject>,
    },
    Header {
        text: Option<TextObject>,
    },
    Context {
        #[serde(default)]
        elements: Vec<TextObject>,
    },
    Divider,
    Image {
        #[serde(default)]
        image_url: String,
        #[serde(default)]
        alt_text: String,
        title: Option<TextObject>,
    },
    Actions {
        #[serde(default)]
        elements: Vec<InteractiveElement>,
    },
    Input {
        label: Option<TextObject>,
        hint: Option<TextObject>,
        #[serde(default)]
        optional: bool,
        element: Option<InteractiveElement>,
    },
    #[serde(other)]
    Unknown,
}

/// A composition text object.
///
/// The platform always sends `{type, text}`, but hand-written payloads often
/// put a bare string where a text object belongs; that is read as plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextObject {
    Bare(String),
    Composed(ComposedText),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComposedText {
    #[serde(rename = "type", default)]
    pub kind: TextKind,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    #[default]
    PlainText,
    Mrkdwn,
    /// Anything else that shares the element slot, e.g. context images.
    #[serde(other)]
    Other,
}

impl TextObject {
    pub fn plain(text: impl Into<String>) -> Self {
        TextObject::Composed(ComposedText {
            kind: TextKind::PlainText,
            text: text.into(),
        })
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        TextObject::Composed(ComposedText {
            kind: TextKind::Mrkdwn,
            text: text.into(),
        })
    }

    pub fn kind(&self) -> TextKind {
        match self {
            TextObject::Bare(_) => TextKind::PlainText,
            TextObject::Composed(c) => c.kind,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            TextObject::Bare(s) => s,
            TextObject::Composed(c) => &c.text,
        }
    }
}

/// A child of a `rich_text` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RichTextNode {
    #[serde(rename = "rich_text_section")]
    Section(RichTextSection),
    #[serde(rename = "rich_text_list")]
    List(RichTextList),
    #[serde(rename = "rich_text_quote")]
    Quote {
        #[serde(default)]
        elements: Vec<InlineElement>,
    },
    #[serde(rename = "rich_text_preformatted")]
    Preformatted {
        #[serde(default)]
        elements: Vec<InlineElement>,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichTextSection {
    #[serde(default)]
    pub elements: Vec<InlineElement>,
}

/// A flat list. Nesting is expressed by sibling lists with a larger `indent`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichTextList {
    #[serde(default)]
    pub style: ListStyle,
    #[serde(default)]
    pub indent: usize,
    #[serde(default)]
    pub elements: Vec<RichTextSection>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListStyle {
    Ordered,
    #[default]
    #[serde(other)]
    Bullet,
}

/// Leaf element inside a rich-text section, quote or preformatted node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineElement {
    Text {
        #[serde(default)]
        text: String,
        #[serde(default)]
        style: TextStyle,
    },
    Link {
        #[serde(default)]
        url: String,
        text: Option<String>,
        #[serde(default)]
        style: TextStyle,
    },
    User {
        #[serde(default)]
        user_id: String,
    },
    Channel {
        #[serde(default)]
        channel_id: String,
    },
    Emoji {
        #[serde(default)]
        name: String,
        unicode: Option<String>,
    },
    Broadcast {
        #[serde(default)]
        range: String,
    },
    Color {
        #[serde(default)]
        value: String,
    },
    Date {
        #[serde(default)]
        timestamp: f64,
        fallback: Option<String>,
    },
    Team {
        #[serde(default)]
        team_id: String,
    },
    Usergroup {
        #[serde(default)]
        usergroup_id: String,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub strike: bool,
    #[serde(default)]
    pub code: bool,
}

/// Interactive controls found in `actions` and `input` blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractiveElement {
    Button {
        text: Option<TextObject>,
    },
    #[serde(
        rename = "static_select",
        alias = "external_select",
        alias = "users_select",
        alias = "conversations_select",
        alias = "channels_select"
    )]
    Select {
        placeholder: Option<TextObject>,
    },
    #[serde(
        rename = "multi_static_select",
        alias = "multi_external_select",
        alias = "multi_users_select",
        alias = "multi_conversations_select",
        alias = "multi_channels_select"
    )]
    MultiSelect {
        placeholder: Option<TextObject>,
    },
    Overflow,
    Datepicker,
    Timepicker,
    Checkboxes,
    RadioButtons,
    PlainTextInput,
    #[serde(other)]
    Unknown,
}
