//! Interactive widgets have no Markdown form; they render as bracketed
//! placeholders naming the control.

use crate::models::{InteractiveElement, TextObject};

/// Placeholders for every recognized control, space separated.
pub fn actions(elements: &[InteractiveElement]) -> String {
    elements
        .iter()
        .filter_map(action_placeholder)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Bold label (with an optional marker), the control placeholder, then the
/// hint in italics.
pub fn input(
    label: Option<&TextObject>,
    hint: Option<&TextObject>,
    optional: bool,
    element: Option<&InteractiveElement>,
) -> String {
    let label = label.map(TextObject::text).unwrap_or_default();
    let marker = if optional { " (optional)" } else { "" };
    let mut lines = vec![format!("**{label}{marker}**"), input_placeholder(element).to_string()];
    if let Some(hint) = hint.map(TextObject::text).filter(|h| !h.is_empty()) {
        lines.push(format!("_{hint}_"));
    }
    lines.join("\n")
}

fn action_placeholder(element: &InteractiveElement) -> Option<String> {
    let label = match element {
        InteractiveElement::Button { text } => labelled(text.as_ref(), "Button"),
        InteractiveElement::Select { placeholder } => labelled(placeholder.as_ref(), "Select"),
        InteractiveElement::Overflow => "[Menu]".to_string(),
        InteractiveElement::Datepicker
        | InteractiveElement::Timepicker
        | InteractiveElement::Checkboxes
        | InteractiveElement::RadioButtons => widget_label(element)?.to_string(),
        InteractiveElement::MultiSelect { .. }
        | InteractiveElement::PlainTextInput
        | InteractiveElement::Unknown => return None,
    };
    Some(label)
}

fn input_placeholder(element: Option<&InteractiveElement>) -> &'static str {
    match element {
        Some(InteractiveElement::PlainTextInput) => "[Text Input]",
        Some(InteractiveElement::Select { .. }) => "[Select]",
        Some(InteractiveElement::MultiSelect { .. }) => "[Multi Select]",
        Some(other) => widget_label(other).unwrap_or("[Input]"),
        None => "[Input]",
    }
}

/// Fixed labels shared by actions and input blocks.
fn widget_label(element: &InteractiveElement) -> Option<&'static str> {
    match element {
        InteractiveElement::Datepicker => Some("[Date Picker]"),
        InteractiveElement::Timepicker => Some("[Time Picker]"),
        InteractiveElement::Checkboxes => Some("[Checkboxes]"),
        InteractiveElement::RadioButtons => Some("[Radio Buttons]"),
        _ => None,
    }
}

fn labelled(text: Option<&TextObject>, default: &str) -> String {
    let text = text.map(TextObject::text).filter(|t| !t.is_empty());
    format!("[{}]", text.unwrap_or(default))
}
