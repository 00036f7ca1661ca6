//! Extension to content-type table.

/// How an asset is read from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentClass {
    /// Read as UTF-8 text.
    Text,
    /// Read as raw bytes.
    Binary,
}

/// A resolved media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MimeType {
    pub essence: &'static str,
    pub class: ContentClass,
}

impl MimeType {
    const fn text(essence: &'static str) -> Self {
        Self {
            essence,
            class: ContentClass::Text,
        }
    }

    const fn binary(essence: &'static str) -> Self {
        Self {
            essence,
            class: ContentClass::Binary,
        }
    }

    /// Value for the `Content-Type` header.
    pub fn header_value(&self) -> String {
        match self.class {
            ContentClass::Text => format!("{}; charset=utf-8", self.essence),
            ContentClass::Binary => self.essence.to_string(),
        }
    }
}

/// Look up the media type for a file extension (without the dot).
pub fn lookup(extension: &str) -> Option<MimeType> {
    let mime = match extension.to_ascii_lowercase().as_str() {
        "html" | "htm" => MimeType::text("text/html"),
        "xml" => MimeType::text("text/xml"),
        "txt" => MimeType::text("text/plain"),
        "json" => MimeType::text("application/json"),
        "css" => MimeType::text("text/css"),
        "js" => MimeType::text("text/javascript"),
        "jpg" | "jpeg" => MimeType::binary("image/jpeg"),
        "png" => MimeType::binary("image/png"),
        "webp" => MimeType::binary("image/webp"),
        "mp3" => MimeType::binary("audio/mpeg"),
        "ogg" => MimeType::binary("audio/ogg"),
        "mp4" => MimeType::binary("video/mp4"),
        "ttf" => MimeType::binary("font/ttf"),
        "woff" => MimeType::binary("font/woff"),
        _ => return None,
    };
    Some(mime)
}
