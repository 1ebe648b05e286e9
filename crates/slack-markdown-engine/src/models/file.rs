use serde::{Deserialize, Serialize};

/// Metadata for a file uploaded alongside a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct File {
    #[serde(default)]
    pub id: String,
    pub name: Option<String>,
    pub title: Option<String>,
    pub mimetype: Option<String>,
    pub filetype: Option<String>,
    pub pretty_type: Option<String>,
    pub size: Option<u64>,
    pub url_private: Option<String>,
    pub url_private_download: Option<String>,
    pub permalink: Option<String>,
    pub thumb_64: Option<String>,
    pub thumb_80: Option<String>,
    pub thumb_160: Option<String>,
    pub thumb_360: Option<String>,
    pub thumb_480: Option<String>,
    pub thumb_720: Option<String>,
    pub thumb_800: Option<String>,
    pub thumb_960: Option<String>,
    pub thumb_1024: Option<String>,
    #[serde(default)]
    pub is_external: bool,
    pub external_type: Option<String>,
}

impl File {
    /// Title if set, else file name, else `default`.
    pub fn display_name<'a>(&'a self, default: &'a str) -> &'a str {
        non_empty(&self.title)
            .or_else(|| non_empty(&self.name))
            .unwrap_or(default)
    }

    pub fn url(&self) -> &str {
        self.url_private.as_deref().unwrap_or_default()
    }

    /// Thumbnails from the largest breakpoint down to the smallest.
    pub fn thumbnails_largest_first(&self) -> impl Iterator<Item = &str> {
        [
            &self.thumb_1024,
            &self.thumb_960,
            &self.thumb_800,
            &self.thumb_720,
            &self.thumb_480,
            &self.thumb_360,
            &self.thumb_160,
            &self.thumb_80,
            &self.thumb_64,
        ]
        .into_iter()
        .filter_map(|t| t.as_deref())
        .filter(|t| !t.is_empty())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
