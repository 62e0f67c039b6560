use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::debug;

use super::image::CapturedImage;
use crate::error::CaptureError;

/// Boundary to the platform's capture/selection UI. `open` only triggers the
/// prompt; the picked image arrives asynchronously on the channel handed to
/// the implementation at construction.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn open(&self) -> Result<(), CaptureError>;
}

/// File-picker stand-in that reads a fixed path and delivers the validated
/// image through the capture channel.
pub struct FileSource {
    path: PathBuf,
    picked_tx: mpsc::Sender<CapturedImage>,
}

impl FileSource {
    pub fn new(path: PathBuf, picked_tx: mpsc::Sender<CapturedImage>) -> Self {
        Self { path, picked_tx }
    }
}

#[async_trait]
impl ImageSource for FileSource {
    async fn open(&self) -> Result<(), CaptureError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| CaptureError::Io {
                path: self.path.display().to_string(),
                source,
            })?;

        let image = CapturedImage::from_bytes(bytes)?;
        debug!(image_id = %image.id(), path = %self.path.display(), "image picked");

        self.picked_tx
            .send(image)
            .await
            .map_err(|_| CaptureError::ChannelClosed)
    }
}
