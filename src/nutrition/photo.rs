use bytes::Bytes;

/// An uploaded meal photo held in memory.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub body: Bytes,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

impl PhotoUpload {
    pub fn new(body: Bytes) -> Self {
        Self {
            body,
            content_type: None,
            file_name: None,
        }
    }

    /// Image MIME type for the data URL sent to the provider.
    ///
    /// Prefers the declared part type when it is an image, then the file
    /// extension, then falls back to JPEG.
    pub fn mime_type(&self) -> &str {
        if let Some(ct) = self.content_type.as_deref() {
            if ct.starts_with("image/") {
                return ct;
            }
        }
        self.file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .and_then(|(_, ext)| mime_from_ext(ext))
            .unwrap_or("image/jpeg")
    }
}

fn mime_from_ext(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}
