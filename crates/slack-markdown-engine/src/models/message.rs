use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Attachment, Block, File};

/// Caller-supplied mapping from author id to display name.
pub type NameTable = HashMap<String, String>;

/// A single chat message as delivered by the platform API.
///
/// Every field is optional on the wire; collections default to empty so a
/// missing `blocks` and an empty `blocks` behave the same.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<File>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<Reaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reply_users: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_users_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_reply: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited: Option<EditRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_user_id: Option<String>,
}

impl Message {
    /// Free text, if present and non-empty.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    pub fn has_blocks(&self) -> bool {
        !self.blocks.is_empty()
    }

    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }

    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn has_reactions(&self) -> bool {
        !self.reactions.is_empty()
    }

    /// True when the message carries at least one renderable element.
    ///
    /// A message failing this check is rejected before any rendering happens.
    pub fn is_contentful(&self) -> bool {
        self.text().is_some()
            || self.has_blocks()
            || self.has_attachments()
            || self.has_files()
            || self.has_reactions()
            || self.reply_count.is_some_and(|n| n > 0)
            || self.edited.is_some()
    }

    /// A reply posted inside somebody else's thread.
    pub fn is_thread_reply(&self) -> bool {
        match (&self.thread_ts, &self.ts) {
            (Some(root), Some(own)) => root != own,
            (Some(_), None) => true,
            _ => false,
        }
    }
}

/// One emoji reaction on a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub count: i64,
}

/// Who last edited a message and when. Either field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditRecord {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub ts: String,
}
