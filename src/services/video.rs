// ABOUTME: Video clip loading with MIME inference, size limits, and SHA-256 fingerprints
// ABOUTME: Fingerprints let the wizard analyze each uploaded clip at most once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use std::fmt;
use std::path::Path;

use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::debug;

use crate::errors::{AppError, AppResult};

/// Supported extensions and their MIME types
const VIDEO_TYPES: &[(&str, &str)] = &[
    ("mp4", "video/mp4"),
    ("m4v", "video/mp4"),
    ("mov", "video/quicktime"),
    ("webm", "video/webm"),
    ("avi", "video/x-msvideo"),
    ("mkv", "video/x-matroska"),
];

/// An uploaded movement video held in memory
#[derive(Clone, PartialEq, Eq)]
pub struct VideoClip {
    file_name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl VideoClip {
    /// Build a clip from bytes already in memory
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `bytes` is empty.
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> AppResult<Self> {
        let file_name = file_name.into();
        if bytes.is_empty() {
            return Err(AppError::invalid_input(format!("Video '{file_name}' is empty")));
        }
        Ok(Self {
            file_name,
            mime_type: mime_type.into(),
            bytes,
        })
    }

    /// Load a clip from disk, inferring its MIME type from the extension
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for unsupported extensions, empty files, or files
    /// larger than `max_bytes`, and `StorageError` when the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>, max_bytes: usize) -> AppResult<Self> {
        let path = path.as_ref();
        let mime_type = Self::mime_type_for(path).ok_or_else(|| {
            AppError::invalid_input(format!(
                "Unsupported video format '{}'. Use mp4, mov, webm, avi, mkv, or m4v.",
                path.display()
            ))
        })?;

        let metadata = fs::metadata(path).await?;
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > max_bytes {
            return Err(AppError::invalid_input(format!(
                "Video is {} MiB; the limit is {} MiB",
                size / (1024 * 1024),
                max_bytes / (1024 * 1024)
            )));
        }

        let bytes = fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());

        debug!(file = %file_name, mime_type, bytes = bytes.len(), "Loaded video clip");
        Self::new(file_name, mime_type, bytes)
    }

    /// MIME type for a path's extension, if supported
    #[must_use]
    pub fn mime_type_for(path: &Path) -> Option<&'static str> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        VIDEO_TYPES
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, mime)| *mime)
    }

    /// Hex SHA-256 of the clip's bytes
    #[must_use]
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }

    /// Original file name
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// MIME type
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Raw bytes
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false for a constructed clip
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for VideoClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoClip")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_inference() {
        assert_eq!(VideoClip::mime_type_for(Path::new("a.MOV")), Some("video/quicktime"));
        assert_eq!(VideoClip::mime_type_for(Path::new("a.mkv")), Some("video/x-matroska"));
        assert_eq!(VideoClip::mime_type_for(Path::new("a.gif")), None);
        assert_eq!(VideoClip::mime_type_for(Path::new("noext")), None);
    }

    #[test]
    fn test_fingerprint_depends_on_content_only() {
        let a = VideoClip::new("a.mp4", "video/mp4", vec![1, 2, 3]).unwrap();
        let b = VideoClip::new("b.mp4", "video/mp4", vec![1, 2, 3]).unwrap();
        let c = VideoClip::new("a.mp4", "video/mp4", vec![3, 2, 1]).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn test_empty_clip_rejected() {
        assert!(VideoClip::new("a.mp4", "video/mp4", Vec::new()).is_err());
    }
}
