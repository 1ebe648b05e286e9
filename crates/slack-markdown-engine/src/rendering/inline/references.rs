//! Angle-bracket references: `<#C1|general>`, `<@U1>`, `<https://x|label>`.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::models::NameTable;

/// Rewrites channel mentions, then user mentions, then links.
pub fn rewrite(text: &str, names: Option<&NameTable>) -> String {
    let text = labeled_channel().replace_all(text, "#${2}");
    let text = bare_channel().replace_all(&text, "#${1}");
    let text = user_mention().replace_all(&text, |caps: &Captures| {
        format_user_mention(&caps[1], display_name(names, &caps[1]))
    });
    let text = labeled_link().replace_all(&text, "[${2}](${1})");
    bare_link().replace_all(&text, "${1}").into_owned()
}

/// Display name for `id` from the name table, if any.
pub fn display_name<'a>(names: Option<&'a NameTable>, id: &str) -> Option<&'a str> {
    names
        .and_then(|table| table.get(id))
        .map(String::as_str)
        .filter(|name| !name.is_empty())
}

pub fn format_user_mention(user_id: &str, user_name: Option<&str>) -> String {
    match user_name {
        Some(name) if !name.is_empty() => format!("@{name}"),
        _ => format!("@{user_id}"),
    }
}

pub fn format_channel_mention(channel_id: &str, channel_name: Option<&str>) -> String {
    match channel_name {
        Some(name) if !name.is_empty() => format!("#{name}"),
        _ => format!("#{channel_id}"),
    }
}

/// `[label](url)`, or the bare URL when there is no label.
pub fn format_link(url: &str, label: Option<&str>) -> String {
    match label {
        Some(label) if !label.is_empty() => format!("[{label}]({url})"),
        _ => url.to_string(),
    }
}

/// Backslash-escapes every character Markdown could treat as syntax.
pub fn escape_markdown(text: &str) -> String {
    static SPECIAL: OnceLock<Regex> = OnceLock::new();
    SPECIAL
        .get_or_init(|| {
            Regex::new(r"([*_\[\]`#~>!+\-=|{}()\\])").expect("Invalid markdown escape regex")
        })
        .replace_all(text, r"\${1}")
        .into_owned()
}

fn labeled_channel() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<#([^|>]+)\|([^>]+)>").expect("Invalid channel regex"))
}

fn bare_channel() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<#([^|>]+)>").expect("Invalid channel regex"))
}

fn user_mention() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<@([^|>]+)>").expect("Invalid user mention regex"))
}

fn labeled_link() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<([^|>]+)\|([^>]+)>").expect("Invalid link regex"))
}

fn bare_link() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<([^|>]+)>").expect("Invalid link regex"))
}
