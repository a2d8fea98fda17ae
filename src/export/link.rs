//! Download link for an exported document

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

pub const PDF_MIME: &str = "application/pdf";

/// A file embedded in a `data:` URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub file_name: String,
    pub href: String,
}

impl DownloadLink {
    /// Encode `bytes` as a base64 PDF data URL
    pub fn pdf(bytes: &[u8], file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            href: format!("data:{};base64,{}", PDF_MIME, BASE64.encode(bytes)),
        }
    }

    /// HTML anchor that downloads the file under its name
    pub fn anchor(&self) -> String {
        format!(
            r#"<a href="{}" download="{}">Download PDF</a>"#,
            self.href,
            self.file_name.replace('"', "&quot;")
        )
    }
}
