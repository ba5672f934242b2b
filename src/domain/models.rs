use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::path::Path;

/// Formatting operations the document engine applies as single atomic edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Bold,
    Italic,
    Strike,
    InlineCode,
    Heading(u8),
    CodeBlock,
    Blockquote,
}

impl Format {
    /// Inline marker for the marks that wrap text, `None` for block formats.
    #[must_use]
    pub fn marker(&self) -> Option<&'static str> {
        match self {
            Format::Bold => Some("**"),
            Format::Italic => Some("*"),
            Format::Strike => Some("~~"),
            Format::InlineCode => Some("`"),
            _ => None,
        }
    }
}

/// Raw image bytes as read from disk. Never decoded, only re-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ImageData {
    #[must_use]
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }

    #[must_use]
    pub fn to_markdown(&self) -> String {
        format!("![{}]({})", self.name, self.data_url())
    }
}

#[must_use]
pub fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_markdown_uses_data_url() {
        let image = ImageData {
            name: "dot.png".to_string(),
            mime: "image/png",
            bytes: b"abc".to_vec(),
        };
        assert_eq!(image.data_url(), "data:image/png;base64,YWJj");
        assert_eq!(image.to_markdown(), "![dot.png](data:image/png;base64,YWJj)");
    }

    #[test]
    fn test_image_mime_by_extension() {
        assert_eq!(image_mime(Path::new("a/b.PNG")), Some("image/png"));
        assert_eq!(image_mime(Path::new("photo.jpeg")), Some("image/jpeg"));
        assert_eq!(image_mime(Path::new("notes.md")), None);
        assert_eq!(image_mime(Path::new("no_extension")), None);
    }
}
