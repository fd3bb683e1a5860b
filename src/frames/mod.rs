//! Frame location and loading.
//!
//! Frames are still images previously extracted from a video, one file per
//! frame, named by a printf-style pattern such as `image%d.png`.

mod loader;
mod locator;

pub use loader::{BytesLoader, FrameInfo, FrameLoader, ImageProbe, PathLoader};
pub use locator::{FrameLocator, FramePattern};

/// Default file name pattern for extracted frames.
pub const DEFAULT_PATTERN: &str = "image%d.png";
