//! Loading frame payloads from disk.
//!
//! The aligner is generic over [`FrameLoader`]. Three loaders ship with the
//! crate, and any `FnMut(&Path) -> io::Result<T>` closure is a loader too.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::AlignError;

/// Produces the payload for one frame.
pub trait FrameLoader {
    type Frame;

    /// Loads the frame stored at `path`.
    fn load(&mut self, path: &Path) -> Result<Self::Frame, AlignError>;
}

impl<F, T> FrameLoader for F
where
    F: FnMut(&Path) -> io::Result<T>,
{
    type Frame = T;

    fn load(&mut self, path: &Path) -> Result<T, AlignError> {
        self(path).map_err(|source| AlignError::FrameLoad {
            path: path.to_path_buf(),
            source: source.into(),
        })
    }
}

/// Reads the whole image file into memory.
#[derive(Clone, Copy, Debug, Default)]
pub struct BytesLoader;

impl FrameLoader for BytesLoader {
    type Frame = Vec<u8>;

    fn load(&mut self, path: &Path) -> Result<Vec<u8>, AlignError> {
        fs::read(path).map_err(|source| AlignError::FrameLoad {
            path: path.to_path_buf(),
            source: source.into(),
        })
    }
}

/// Never touches the disk; the payload is the resolved path.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathLoader;

impl FrameLoader for PathLoader {
    type Frame = PathBuf;

    fn load(&mut self, path: &Path) -> Result<PathBuf, AlignError> {
        Ok(path.to_path_buf())
    }
}

/// Header-only image metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FrameInfo {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Reads image dimensions from the file header without decoding pixels.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageProbe;

impl FrameLoader for ImageProbe {
    type Frame = FrameInfo;

    fn load(&mut self, path: &Path) -> Result<FrameInfo, AlignError> {
        let size = imagesize::size(path).map_err(|source| AlignError::FrameLoad {
            path: path.to_path_buf(),
            source: source.into(),
        })?;

        let width: u32 = size.width.try_into().map_err(|_| AlignError::FrameLoad {
            path: path.to_path_buf(),
            source: format!("image width {} does not fit in u32", size.width).into(),
        })?;

        let height: u32 = size.height.try_into().map_err(|_| AlignError::FrameLoad {
            path: path.to_path_buf(),
            source: format!("image height {} does not fit in u32", size.height).into(),
        })?;

        Ok(FrameInfo {
            path: path.to_path_buf(),
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn image_probe_reports_missing_files() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let err = ImageProbe
            .load(&temp.path().join("image404.png"))
            .unwrap_err();
        assert!(matches!(err, AlignError::FrameLoad { .. }));
        let source = err.source().expect("load error keeps its cause");
        assert!(source.is::<imagesize::ImageError>());
    }

    #[test]
    fn closure_errors_keep_their_source() {
        let mut loader = |_: &Path| -> io::Result<Vec<u8>> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked"))
        };
        let err = loader.load(Path::new("image5.png")).unwrap_err();

        let source = err.source().expect("load error keeps its cause");
        let io_err = source
            .downcast_ref::<io::Error>()
            .expect("cause is the loader's io error");
        assert_eq!(io_err.kind(), io::ErrorKind::PermissionDenied);
        assert!(err.to_string().contains("locked"));
    }

    #[test]
    fn bytes_loader_reads_file_contents() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("image2.raw");
        fs::write(&path, b"pixels").expect("write frame");

        assert_eq!(BytesLoader.load(&path).expect("load"), b"pixels".to_vec());
    }

    #[test]
    fn closures_are_loaders() {
        let mut calls = 0;
        let mut loader = |path: &Path| -> io::Result<String> {
            calls += 1;
            Ok(path.display().to_string())
        };
        let frame = loader.load(Path::new("image3.png")).expect("load");
        assert_eq!(frame, "image3.png");
        drop(loader);
        assert_eq!(calls, 1);
    }
}
