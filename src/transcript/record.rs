//! Frame index newtype and the annotation record it keys.
//!
//! Frame indices are 1-based. Using a newtype keeps them from being mixed up
//! with line numbers, which are also 1-based and travel alongside them in
//! diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 1-based frame number within a video.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// The first frame of every video.
    pub const FIRST: FrameIndex = FrameIndex(1);

    /// Creates a new FrameIndex.
    #[inline]
    pub fn new(index: u64) -> Self {
        Self(index)
    }

    /// Returns the underlying u64 value.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns the index of the frame immediately after this one.
    #[inline]
    pub fn successor(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Debug for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameIndex({})", self.0)
    }
}

impl fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The pair of labels a transcript line attaches to a frame.
///
/// In the transcripts this crate was written for, `a` is the speaker name
/// shown on screen and `b` is the on-screen clock, but nothing here depends
/// on that.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    pub a: String,
    pub b: String,
}

impl Labels {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }
}

/// One transcript line, resolved to a concrete frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotationRecord {
    pub frame: FrameIndex,
    pub labels: Labels,
}

impl AnnotationRecord {
    pub fn new(frame: FrameIndex, labels: Labels) -> Self {
        Self { frame, labels }
    }
}
