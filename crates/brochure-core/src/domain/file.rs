use serde::{Deserialize, Serialize};

/// A dropped or selected file as the widget sees it (no contents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub name: String,
    pub size: u64,
    /// MIME type reported by the host, may be empty.
    #[serde(default)]
    pub mime: String,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, size: u64, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime: mime.into(),
        }
    }

    /// Lowercased text after the final dot, or the whole name when it has none.
    pub fn extension(&self) -> String {
        self.name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased_last_segment() {
        assert_eq!(FileDescriptor::new("Report.Final.PDF", 1, "").extension(), "pdf");
        assert_eq!(FileDescriptor::new("README", 1, "").extension(), "readme");
    }

    #[test]
    fn image_detection_uses_mime() {
        assert!(FileDescriptor::new("a.png", 1, "image/png").is_image());
        assert!(!FileDescriptor::new("a.png", 1, "").is_image());
    }
}
