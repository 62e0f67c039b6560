use super::image::CapturedImage;
use super::preview::{PreviewFrame, PreviewHandle};
use crate::error::CaptureError;

/// Owns the current selection and its derived preview.
/// Invariant: a preview exists if and only if a selection exists.
pub struct CaptureState {
    selected: Option<CapturedImage>,
    preview: Option<PreviewHandle>,
}

impl CaptureState {
    pub fn empty() -> Self {
        Self {
            selected: None,
            preview: None,
        }
    }

    /// Installs a new selection. The preview for the incoming image is
    /// derived before the previous handle is released, so a failure here
    /// leaves the current selection untouched.
    pub fn select(&mut self, image: CapturedImage) -> Result<(), CaptureError> {
        let preview = PreviewHandle::derive(&image)?;

        // Old handle dropped here, exactly once.
        self.preview = Some(preview);
        self.selected = Some(image);
        Ok(())
    }

    /// Clears the selection and releases the preview handle.
    pub fn clear(&mut self) {
        self.preview = None;
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&CapturedImage> {
        self.selected.as_ref()
    }

    pub fn preview_frame(&self) -> Option<PreviewFrame> {
        self.preview.as_ref().map(PreviewHandle::frame)
    }

    #[cfg(test)]
    pub(crate) fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.as_ref()
    }
}

impl Default for CaptureState {
    fn default() -> Self {
        Self::empty()
    }
}
