use serde::{Deserialize, Serialize};

use super::Block;

/// Legacy secondary content box attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub color: Option<String>,
    pub fallback: Option<String>,
    pub pretext: Option<String>,
    pub author_name: Option<String>,
    pub author_link: Option<String>,
    pub author_icon: Option<String>,
    pub title: Option<String>,
    pub title_link: Option<String>,
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<AttachmentField>,
    pub image_url: Option<String>,
    pub thumb_url: Option<String>,
    pub footer: Option<String>,
    pub footer_icon: Option<String>,
    pub ts: Option<EpochSeconds>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachmentField {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub short: bool,
}

/// Seconds since the epoch, sent either as a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EpochSeconds {
    Number(f64),
    Text(String),
}

impl EpochSeconds {
    /// The value as seconds; `None` when the string form is not numeric.
    pub fn seconds(&self) -> Option<f64> {
        match self {
            EpochSeconds::Number(n) => Some(*n),
            EpochSeconds::Text(s) => s.trim().parse().ok(),
        }
    }
}
