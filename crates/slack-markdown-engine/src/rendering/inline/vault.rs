use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::kinds::{CodeFence, InlineCode, Placeholder};

/// Ordered side-tables of code regions lifted out of a text before markup
/// rewriting, and put back afterwards.
///
/// Fences are extracted first, so an inline span can contain a fence token but
/// never the other way round; restore runs in the opposite order.
#[derive(Debug, Default)]
pub struct CodeVault {
    fences: Vec<String>,
    spans: Vec<String>,
}

impl CodeVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every fenced block with a placeholder, normalizing the fence so
    /// that both delimiters sit on their own line.
    pub fn protect_fences(&mut self, text: &str) -> String {
        fence_regex()
            .replace_all(text, |caps: &Captures| {
                let token = Placeholder::token(Placeholder::FENCE, self.fences.len());
                self.fences.push(normalize_fence(&caps[0]));
                token
            })
            .into_owned()
    }

    /// Replaces every single-backtick span with a placeholder, verbatim.
    pub fn protect_spans(&mut self, text: &str) -> String {
        span_regex()
            .replace_all(text, |caps: &Captures| {
                let token = Placeholder::token(Placeholder::SPAN, self.spans.len());
                self.spans.push(caps[0].to_string());
                token
            })
            .into_owned()
    }

    /// Puts inline spans back verbatim, then fences with exactly one blank line
    /// on either side. Line breaks touching a fence placeholder are replaced;
    /// fence bodies are copied as they were.
    pub fn restore(&self, text: &str) -> String {
        let text = placeholder_regex()
            .replace_all(text, |caps: &Captures| {
                self.entry(caps, Placeholder::SPAN)
                    .map(str::to_string)
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned();
        self.restore_fences(&text)
    }

    pub fn is_empty(&self) -> bool {
        self.fences.is_empty() && self.spans.is_empty()
    }

    fn restore_fences(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut after_fence = false;

        for caps in placeholder_regex().captures_iter(text) {
            let (Some(whole), Some(block)) = (caps.get(0), self.entry(&caps, Placeholder::FENCE))
            else {
                continue;
            };
            push_gap(&mut out, &text[last..whole.start()], after_fence);
            out.truncate(out.trim_end_matches('\n').len());
            out.push_str(FENCE_SPACING);
            out.push_str(block);
            out.push_str(FENCE_SPACING);
            last = whole.end();
            after_fence = true;
        }
        push_gap(&mut out, &text[last..], after_fence);
        out
    }

    /// The stored code a placeholder with `tag` stands for.
    fn entry(&self, caps: &Captures, tag: char) -> Option<&str> {
        let table = if tag == Placeholder::FENCE {
            &self.fences
        } else {
            &self.spans
        };
        caps[1]
            .starts_with(tag)
            .then(|| caps[2].parse::<usize>().ok())
            .flatten()
            .and_then(|i| table.get(i))
            .map(String::as_str)
    }
}

const FENCE_SPACING: &str = "\n\n";

fn push_gap(out: &mut String, gap: &str, after_fence: bool) {
    if after_fence {
        out.push_str(gap.trim_start_matches('\n'));
    } else {
        out.push_str(gap);
    }
}

fn normalize_fence(block: &str) -> String {
    let delim = CodeFence::DELIM;
    let body = &block[delim.len()..block.len() - delim.len()];

    let mut out = String::with_capacity(block.len() + 2);
    out.push_str(delim);
    if !body.starts_with('\n') {
        out.push('\n');
    }
    out.push_str(body);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(delim);
    out
}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        let d = regex::escape(CodeFence::DELIM);
        Regex::new(&format!(r"(?s){d}.*?{d}")).expect("Invalid fence regex")
    })
}

fn span_regex() -> &'static Regex {
    static SPAN: OnceLock<Regex> = OnceLock::new();
    SPAN.get_or_init(|| {
        let t = InlineCode::TICK;
        Regex::new(&format!(r"{t}[^{t}]+{t}")).expect("Invalid code span regex")
    })
}

fn placeholder_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\x00([FI])(\d+)\x00").expect("Invalid placeholder regex"))
}
