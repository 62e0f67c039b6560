use image::DynamicImage;
use std::sync::{Arc, Weak};
use tracing::debug;
use uuid::Uuid;

use super::image::CapturedImage;
use crate::error::CaptureError;

/// Longest edge of the derived preview, in pixels.
const PREVIEW_EDGE: u32 = 256;

/// Displayable reference derived deterministically from a selected image.
/// The handle is owned exclusively by the current `CaptureState`; dropping it
/// is the release, so replacement and teardown free the resource exactly once.
pub struct PreviewHandle {
    image_id: Uuid,
    pixels: Arc<DynamicImage>,
}

impl PreviewHandle {
    /// Decodes the payload and scales it down for display. Decode failures
    /// surface as `InvalidImage` so a corrupt payload never reaches Ready.
    pub fn derive(image: &CapturedImage) -> Result<Self, CaptureError> {
        let decoded = image::load_from_memory(image.bytes())
            .map_err(|err| CaptureError::InvalidImage(format!("could not decode image: {err}")))?;
        let pixels = decoded.thumbnail(PREVIEW_EDGE, PREVIEW_EDGE);

        Ok(Self {
            image_id: image.id(),
            pixels: Arc::new(pixels),
        })
    }

    /// Id of the captured image this preview was derived from.
    pub fn image_id(&self) -> Uuid {
        self.image_id
    }

    /// Read-only view handed to presenters through workflow snapshots.
    pub fn frame(&self) -> PreviewFrame {
        PreviewFrame {
            image_id: self.image_id,
            pixels: self.pixels.clone(),
        }
    }

    /// Observer used by tests to verify the handle was released.
    pub fn watch(&self) -> Weak<DynamicImage> {
        Arc::downgrade(&self.pixels)
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        debug!(image_id = %self.image_id, "preview handle released");
    }
}

/// Cheap clone of the preview pixels for rendering. Snapshots carry this
/// instead of the handle itself, so ownership of the release stays with the
/// capture state.
#[derive(Debug, Clone)]
pub struct PreviewFrame {
    pub image_id: Uuid,
    pub pixels: Arc<DynamicImage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::image::tests::png_bytes;

    #[test]
    fn derives_scaled_preview_for_selected_image() {
        let captured = CapturedImage::from_bytes(png_bytes(1024, 512)).unwrap();
        let preview = PreviewHandle::derive(&captured).unwrap();

        assert_eq!(preview.image_id(), captured.id());
        let frame = preview.frame();
        assert!(frame.pixels.width() <= PREVIEW_EDGE);
        assert!(frame.pixels.height() <= PREVIEW_EDGE);
    }

    #[test]
    fn dropping_the_handle_releases_the_pixels() {
        let captured = CapturedImage::from_bytes(png_bytes(16, 16)).unwrap();
        let preview = PreviewHandle::derive(&captured).unwrap();
        let watch = preview.watch();

        drop(preview);
        assert!(watch.upgrade().is_none());
    }
}
