//! Per-section failure isolation.

use std::fmt;

use crate::rendering::RenderError;

/// The top-level pieces a message rendering is composed of, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Header,
    Thread,
    Body,
    Attachments,
    Files,
    Reactions,
    Edited,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Header => "header",
            Section::Thread => "thread",
            Section::Body => "body",
            Section::Attachments => "attachments",
            Section::Files => "files",
            Section::Reactions => "reactions",
            Section::Edited => "edited",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A section that failed and was replaced by its fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionFailure {
    pub section: Section,
    pub error: RenderError,
}

impl fmt::Display for SectionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.section, self.error)
    }
}

/// Runs section renderers, substituting a fallback for any that fail and
/// remembering which ones did.
#[derive(Debug, Default)]
pub struct SectionGuard {
    failures: Vec<SectionFailure>,
}

impl SectionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the rendered value, or `fallback` if `render` fails.
    pub fn try_render<T>(
        &mut self,
        section: Section,
        fallback: T,
        render: impl FnOnce() -> Result<T, RenderError>,
    ) -> T {
        match render() {
            Ok(value) => value,
            Err(error) => {
                log::warn!("Could not render {section} section: {error}");
                self.failures.push(SectionFailure { section, error });
                fallback
            }
        }
    }

    pub fn failures(&self) -> &[SectionFailure] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<SectionFailure> {
        self.failures
    }
}
