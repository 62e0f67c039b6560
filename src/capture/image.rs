use chrono::{DateTime, Utc};
use image::ImageFormat;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::CaptureError;

/// A single user-selected meal photo: the raw upload payload plus the sniffed
/// format. The byte buffer is shared, so clones are cheap.
#[derive(Debug, Clone)]
pub struct CapturedImage {
    id: Uuid,
    bytes: Arc<Vec<u8>>,
    format: ImageFormat,
    captured_at: DateTime<Utc>,
}

impl CapturedImage {
    /// Validates a file-like input. Empty payloads and payloads that are not
    /// a recognized image format are rejected at capture time.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, CaptureError> {
        if bytes.is_empty() {
            return Err(CaptureError::InvalidImage("input is empty".to_string()));
        }
        let format = image::guess_format(&bytes).map_err(|_| {
            CaptureError::InvalidImage("input is not a recognized image format".to_string())
        })?;

        Ok(Self {
            id: Uuid::new_v4(),
            bytes: Arc::new(bytes),
            format,
            captured_at: Utc::now(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    /// Upload file name derived from the sniffed format, e.g. `meal.png`.
    pub fn file_name(&self) -> String {
        let extension = self.format.extensions_str().first().copied().unwrap_or("bin");
        format!("meal.{extension}")
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}
