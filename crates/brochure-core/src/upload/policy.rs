//! UploadPolicy - size cap and extension allow-list
//!
//! # 検証順序
//! 1. サイズ（上限を超えたらファイル名と上限を含むメッセージ）
//! 2. 拡張子（許可リストにない場合はファイル名と許可リストを含むメッセージ）

use thiserror::Error;

use crate::domain::{ErrorKind, FileDescriptor};
use crate::validate::format_bytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    Document,
    Image,
    Spreadsheet,
    Presentation,
    Archive,
    Other,
}

impl FileCategory {
    pub const ALL: [FileCategory; 5] = [
        FileCategory::Document,
        FileCategory::Image,
        FileCategory::Spreadsheet,
        FileCategory::Presentation,
        FileCategory::Archive,
    ];

    pub fn default_extensions(self) -> &'static [&'static str] {
        match self {
            FileCategory::Document => &["pdf", "doc", "docx", "txt", "rtf"],
            FileCategory::Image => &["jpg", "jpeg", "png", "gif", "webp", "svg"],
            FileCategory::Spreadsheet => &["xls", "xlsx", "csv"],
            FileCategory::Presentation => &["ppt", "pptx"],
            FileCategory::Archive => &["zip", "rar", "7z"],
            FileCategory::Other => &[],
        }
    }

    /// Icon class shown next to the file name.
    pub fn icon(self, extension: &str) -> &'static str {
        match self {
            FileCategory::Document if extension == "pdf" => "fa-file-pdf",
            FileCategory::Document => "fa-file-alt",
            FileCategory::Image => "fa-file-image",
            FileCategory::Spreadsheet => "fa-file-excel",
            FileCategory::Presentation => "fa-file-powerpoint",
            FileCategory::Archive => "fa-file-archive",
            FileCategory::Other => "fa-file",
        }
    }
}

/// Why a file (or a whole drop) was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("File \"{file}\" quá lớn. Kích thước tối đa: {max}")]
    TooLarge { file: String, max: String },

    #[error("File \"{file}\" có định dạng không được hỗ trợ. Chỉ hỗ trợ: {allowed}")]
    UnsupportedType { file: String, allowed: String },

    #[error("Chỉ được chọn một file")]
    TooManyFiles,

    #[error("Không có file nào được chọn")]
    NoFiles,
}

impl Rejection {
    pub fn file_name(&self) -> Option<&str> {
        match self {
            Rejection::TooLarge { file, .. } | Rejection::UnsupportedType { file, .. } => Some(file),
            Rejection::TooManyFiles | Rejection::NoFiles => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadPolicy {
    pub max_file_size: u64,
    categories: Vec<(FileCategory, Vec<String>)>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(10 * 1024 * 1024)
    }
}

impl UploadPolicy {
    pub fn new(max_file_size: u64) -> Self {
        let categories = FileCategory::ALL
            .iter()
            .map(|c| {
                let exts = c.default_extensions().iter().map(|e| e.to_string()).collect();
                (*c, exts)
            })
            .collect();
        Self {
            max_file_size,
            categories,
        }
    }

    /// Allow-list in category order.
    pub fn allowed_extensions(&self) -> Vec<&str> {
        self.categories
            .iter()
            .flat_map(|(_, exts)| exts.iter().map(String::as_str))
            .collect()
    }

    pub fn category(&self, file: &FileDescriptor) -> FileCategory {
        let ext = file.extension();
        self.categories
            .iter()
            .find(|(_, exts)| exts.iter().any(|e| *e == ext))
            .map(|(c, _)| *c)
            .unwrap_or(FileCategory::Other)
    }

    pub fn icon(&self, file: &FileDescriptor) -> &'static str {
        self.category(file).icon(&file.extension())
    }

    pub fn validate(&self, file: &FileDescriptor) -> Result<(), Rejection> {
        if file.size > self.max_file_size {
            return Err(Rejection::TooLarge {
                file: file.name.clone(),
                max: format_bytes(self.max_file_size),
            });
        }
        if self.category(file) == FileCategory::Other {
            return Err(Rejection::UnsupportedType {
                file: file.name.clone(),
                allowed: self.allowed_extensions().join(", "),
            });
        }
        Ok(())
    }
}

/// Files the preview modal can show.
pub fn is_previewable(file_name: &str) -> bool {
    let ext = file_name
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase();
    matches!(
        ext.as_str(),
        "jpg" | "jpeg" | "png" | "gif" | "webp" | "svg" | "pdf" | "txt"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn oversize_file_names_file_and_maximum() {
        let policy = UploadPolicy::default();
        let file = FileDescriptor::new("video.zip", 11 * 1024 * 1024, "application/zip");

        let err = policy.validate(&file).unwrap_err();
        assert_eq!(err.file_name(), Some("video.zip"));
        let message = err.to_string();
        assert!(message.contains("\"video.zip\""), "got {message}");
        assert!(message.contains("10 MB"), "got {message}");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn unsupported_extension_lists_the_allow_list() {
        let policy = UploadPolicy::default();
        let err = policy
            .validate(&FileDescriptor::new("setup.exe", 10, "application/octet-stream"))
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("\"setup.exe\""));
        assert!(message.contains("pdf, doc, docx, txt, rtf, jpg"), "got {message}");
        assert!(message.ends_with("zip, rar, 7z"), "got {message}");
    }

    #[test]
    fn size_at_the_cap_is_accepted() {
        let policy = UploadPolicy::new(100);
        assert!(policy.validate(&FileDescriptor::new("a.PDF", 100, "application/pdf")).is_ok());
        assert!(policy.validate(&FileDescriptor::new("a.pdf", 101, "application/pdf")).is_err());
    }

    #[rstest]
    #[case("report.pdf", FileCategory::Document, "fa-file-pdf")]
    #[case("notes.TXT", FileCategory::Document, "fa-file-alt")]
    #[case("logo.svg", FileCategory::Image, "fa-file-image")]
    #[case("q3.xlsx", FileCategory::Spreadsheet, "fa-file-excel")]
    #[case("deck.pptx", FileCategory::Presentation, "fa-file-powerpoint")]
    #[case("src.7z", FileCategory::Archive, "fa-file-archive")]
    #[case("run.sh", FileCategory::Other, "fa-file")]
    fn categorizes_and_picks_icons(
        #[case] name: &str,
        #[case] category: FileCategory,
        #[case] icon: &str,
    ) {
        let policy = UploadPolicy::default();
        let file = FileDescriptor::new(name, 1, "");
        assert_eq!(policy.category(&file), category);
        assert_eq!(policy.icon(&file), icon);
    }

    #[rstest]
    #[case("photo.JPG", true)]
    #[case("paper.pdf", true)]
    #[case("sheet.csv", false)]
    #[case("noext", false)]
    fn previewable_files(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_previewable(name), expected);
    }

    proptest! {
        #[test]
        fn disallowed_extension_is_always_rejected_naming_the_file(
            stem in "[a-z]{1,8}",
            ext in "(exe|bat|mp4|html|js)",
            size in 0u64..50 * 1024 * 1024,
        ) {
            let name = format!("{stem}.{ext}");
            let policy = UploadPolicy::default();
            let err = policy.validate(&FileDescriptor::new(name.clone(), size, "")).unwrap_err();
            prop_assert_eq!(err.file_name(), Some(name.as_str()));
            prop_assert!(err.to_string().contains(&name));
        }
    }
}
