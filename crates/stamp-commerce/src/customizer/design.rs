//! Design artwork and the asset host seam.

use crate::error::CommerceError;
use async_trait::async_trait;
use std::fmt;

/// File extensions accepted for design artwork.
pub const ACCEPTED_DESIGN_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "pdf", "ai", "eps"];

/// Durable storage for design artwork.
#[async_trait]
pub trait AssetUploader: Send + Sync {
    /// Upload a design once and return its hosted URL.
    ///
    /// Implementations report any failure as [`CommerceError::UploadFailed`].
    async fn upload_asset(&self, file: &DesignFile) -> Result<String, CommerceError>;
}

/// A design file attached by the customer.
#[derive(Clone, PartialEq, Eq)]
pub struct DesignFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl DesignFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Lowercased file extension, if any.
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Check that the file is non-empty and in an accepted format
    /// (any image content type, or an accepted extension).
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.is_empty() {
            return Err(CommerceError::InvalidDesignFile(format!(
                "{} is empty",
                self.file_name
            )));
        }

        let is_image = self
            .content_type
            .as_deref()
            .map(|ct| ct.starts_with("image/"))
            .unwrap_or(false);
        let accepted_extension = self
            .extension()
            .map(|ext| ACCEPTED_DESIGN_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false);

        if is_image || accepted_extension {
            Ok(())
        } else {
            Err(CommerceError::InvalidDesignFile(format!(
                "{} (accepted: PNG, JPG, PDF, AI, EPS)",
                self.file_name
            )))
        }
    }
}

impl fmt::Debug for DesignFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DesignFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_known_extensions() {
        for name in ["logo.PNG", "art.jpeg", "proof.pdf", "vector.ai", "mark.eps"] {
            assert!(DesignFile::new(name, vec![1, 2, 3]).validate().is_ok(), "{name}");
        }
    }

    #[test]
    fn test_accepts_any_image_content_type() {
        let file = DesignFile::new("logo.webp", vec![1]).with_content_type("image/webp");
        assert!(file.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_and_unknown() {
        assert!(DesignFile::new("logo.png", Vec::new()).validate().is_err());
        assert!(DesignFile::new("notes.txt", vec![1]).validate().is_err());
        assert!(DesignFile::new("README", vec![1]).validate().is_err());
    }

    #[test]
    fn test_debug_omits_bytes() {
        let file = DesignFile::new("logo.png", vec![0; 2048]);
        assert!(format!("{:?}", file).contains("len: 2048"));
    }
}
