pub mod image;
pub mod preview;
pub mod source;
pub mod state;

pub use self::image::CapturedImage;
pub use preview::{PreviewFrame, PreviewHandle};
pub use source::{FileSource, ImageSource};
pub use state::CaptureState;
