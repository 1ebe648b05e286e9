//! Pseudo-tags used by the tagged output style.

use html_escape::{encode_double_quoted_attribute, encode_text};

/// `<name a="1" b="2">text</name>` on one line, attributes and text escaped.
pub fn element(name: &str, attrs: &[(&str, &str)], text: &str) -> String {
    let mut out = format!("<{name}");
    for (key, value) in attrs {
        out.push_str(&format!(
            " {key}=\"{}\"",
            encode_double_quoted_attribute(value)
        ));
    }
    out.push('>');
    out.push_str(&encode_text(text));
    out.push_str(&format!("</{name}>"));
    out
}

/// Wraps an already-rendered body: `<name>\nbody\n</name>`.
pub fn envelope(name: &str, body: &str) -> String {
    format!("<{name}>\n{body}\n</{name}>")
}
