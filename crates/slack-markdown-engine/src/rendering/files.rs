//! Uploaded file listings.
//!
//! Tagged style emits one `<file>` element per upload. Markdown style
//! classifies each file as an image, a document or anything else and renders
//! a line (plus a preview for images) accordingly.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::models::File;

use super::{BLANK_LINE, RenderContext, tags};

/// MIME prefixes that count as documents.
const DOCUMENT_MIME_PREFIXES: &[&str] = &[
    "application/pdf",
    "text/",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
];

const MIME_LABELS: &[(&str, &str)] = &[
    ("image/jpeg", "JPEG"),
    ("image/jpg", "JPEG"),
    ("image/png", "PNG"),
    ("image/gif", "GIF"),
    ("image/webp", "WebP"),
    ("image/svg+xml", "SVG"),
    ("application/pdf", "PDF"),
    ("text/plain", "TXT"),
    ("text/csv", "CSV"),
    ("text/html", "HTML"),
    ("text/css", "CSS"),
    ("text/javascript", "JS"),
    ("application/json", "JSON"),
    ("application/xml", "XML"),
    ("application/zip", "ZIP"),
    ("application/x-rar-compressed", "RAR"),
    ("application/x-7z-compressed", "7Z"),
    ("application/msword", "DOC"),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "DOCX",
    ),
    ("application/vnd.ms-excel", "XLS"),
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "XLSX",
    ),
    ("application/vnd.ms-powerpoint", "PPT"),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "PPTX",
    ),
    ("audio/mpeg", "MP3"),
    ("audio/wav", "WAV"),
    ("video/mp4", "MP4"),
    ("video/avi", "AVI"),
    ("video/mov", "MOV"),
];

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileClass {
    Image,
    Document,
    Other,
}

impl FileClass {
    fn of(file: &File) -> Self {
        match file.mimetype.as_deref() {
            Some(mime) if mime.starts_with("image/") => FileClass::Image,
            Some(mime) if DOCUMENT_MIME_PREFIXES.iter().any(|p| mime.starts_with(p)) => {
                FileClass::Document
            }
            _ => FileClass::Other,
        }
    }
}

/// Renders every file, separated by blank lines.
pub fn render_files(files: &[File], ctx: &RenderContext) -> String {
    files
        .iter()
        .map(|file| {
            if ctx.is_tagged() {
                tagged_file(file)
            } else {
                markdown_file(file)
            }
        })
        .collect::<Vec<_>>()
        .join(BLANK_LINE)
}

fn tagged_file(file: &File) -> String {
    let size = file.size.unwrap_or(0).to_string();
    let name = file
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| file.display_name("file"));
    tags::element(
        "file",
        &[
            ("id", file.id.as_str()),
            ("mimetype", file.mimetype.as_deref().unwrap_or_default()),
            ("href", file.url()),
            ("size", size.as_str()),
        ],
        name,
    )
}

fn markdown_file(file: &File) -> String {
    let kind = type_label(file.mimetype.as_deref());
    let size = file.size.unwrap_or(0);
    let url = file.url();

    match FileClass::of(file) {
        FileClass::Image => {
            let name = file.display_name("Image");
            let line = format!("**{name}** ({kind}, {})", format_file_size(size));
            let preview = file.thumbnails_largest_first().next().unwrap_or(url);
            if preview.is_empty() {
                line
            } else {
                format!("{line}{BLANK_LINE}![{name}]({preview})")
            }
        }
        FileClass::Document => {
            let name = file.display_name("Document");
            format!("📄 **[{name}]({url})** ({kind}, {})", format_file_size(size))
        }
        FileClass::Other if file.is_external => {
            let name = file.display_name("File");
            let external = file
                .external_type
                .as_deref()
                .filter(|t| !t.is_empty())
                .unwrap_or("external");
            format!("🔗 **[{name}]({url})** - External ({external})")
        }
        FileClass::Other => {
            let name = file.display_name("File");
            if size > 0 {
                format!("📎 **[{name}]({url})** ({kind}, {})", format_file_size(size))
            } else {
                format!("📎 **[{name}]({url})** ({kind})")
            }
        }
    }
}

/// Human-readable size: `0 B`, `1 KB`, `1.5 KB`, `1 GB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if size.fract() == 0.0 {
        format!("{size} {}", SIZE_UNITS[unit])
    } else {
        format!("{size:.1} {}", SIZE_UNITS[unit])
    }
}

/// Short type label for a MIME type, e.g. `PNG` or `DOCX`.
pub fn type_label(mimetype: Option<&str>) -> &'static str {
    static LABELS: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

    let Some(mime) = mimetype.filter(|m| !m.is_empty()) else {
        return "Unknown";
    };
    let labels = LABELS.get_or_init(|| MIME_LABELS.iter().copied().collect());
    if let Some(label) = labels.get(mime.to_lowercase().as_str()).copied() {
        return label;
    }
    match mime.split('/').next() {
        Some("image") => "Image",
        Some("audio") => "Audio",
        Some("video") => "Video",
        Some("text") => "Text",
        _ => "File",
    }
}
