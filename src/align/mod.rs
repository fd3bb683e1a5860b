//! Sparse-to-dense alignment of transcripts to frames.
//!
//! A transcript only names the frames where something changes. [`Aligner`]
//! turns it into one item per frame, starting at frame 1 and never skipping
//! a frame: frames between two records repeat the labels of the earlier one.
//!
//! The aligner pulls one transcript line at a time and holds back at most one
//! record (the lookahead) while it fills the gap in front of it, so memory use
//! does not depend on transcript length or gap size.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use framealign::align::{Aligner, FrameOrigin};
//! use framealign::frames::{FrameLocator, PathLoader};
//!
//! let transcript = Cursor::new("1\tAlice\t10:00\n3\tBob\t10:02\n");
//! let locator = FrameLocator::new("frames", "image%d.png")?;
//! let frames: Vec<_> = Aligner::new(transcript, locator, PathLoader)
//!     .collect::<Result<_, _>>()?;
//!
//! assert_eq!(frames.len(), 3);
//! assert_eq!(frames[1].labels.a, "Alice");
//! assert_eq!(frames[1].origin, FrameOrigin::GapFilled);
//! assert_eq!(frames[2].labels.a, "Bob");
//! # Ok::<(), framealign::AlignError>(())
//! ```

mod stats;

pub use stats::AlignStats;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter::FusedIterator;
use std::mem;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::AlignError;
use crate::frames::{FrameLoader, FrameLocator};
use crate::transcript::{parse_line, AnnotationRecord, FrameIndex, FrameRef, Labels};

/// Why a frame carries the labels it does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameOrigin {
    /// A transcript record names this frame.
    Annotated,
    /// Repeats the labels of the closest earlier record.
    GapFilled,
    /// Precedes the first record; labels are empty.
    Unannotated,
}

/// One frame of aligned output.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AlignedFrame<P> {
    pub index: FrameIndex,
    pub path: PathBuf,
    /// `None` if the frame loader failed for this frame.
    pub payload: Option<P>,
    pub labels: Labels,
    pub origin: FrameOrigin,
}

/// The most recently emitted frame.
#[derive(Clone, Debug)]
struct Cursor {
    frame: FrameIndex,
    labels: Labels,
}

/// The single held-back record.
#[derive(Clone, Debug, Default)]
enum Lookahead {
    #[default]
    Empty,
    /// A record for a frame past the one after `last`.
    Pending(AnnotationRecord),
}

/// Iterator over transcript-aligned frames.
///
/// Yields `Err` at most once, when reading the transcript fails mid-stream;
/// the transcript is closed at that point and the iterator is exhausted.
/// The transcript is also closed when input runs out, on [`Aligner::close`],
/// or when the aligner is dropped, whichever happens first.
pub struct Aligner<R, L> {
    source: Option<R>,
    locator: FrameLocator,
    loader: L,
    last: Option<Cursor>,
    lookahead: Lookahead,
    stats: AlignStats,
}

impl<L: FrameLoader> Aligner<BufReader<File>, L> {
    /// Opens the transcript at `path`.
    ///
    /// # Errors
    /// Returns [`AlignError::TranscriptOpen`] if the file cannot be opened.
    pub fn open(path: &Path, locator: FrameLocator, loader: L) -> Result<Self, AlignError> {
        let file = File::open(path).map_err(|source| AlignError::TranscriptOpen {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(transcript = %path.display(), "opened transcript");
        Ok(Self::new(BufReader::new(file), locator, loader))
    }
}

impl<R: BufRead, L: FrameLoader> Aligner<R, L> {
    /// Creates an aligner reading transcript lines from `source`.
    pub fn new(source: R, locator: FrameLocator, loader: L) -> Self {
        Self {
            source: Some(source),
            locator,
            loader,
            last: None,
            lookahead: Lookahead::Empty,
            stats: AlignStats::default(),
        }
    }

    pub fn stats(&self) -> &AlignStats {
        &self.stats
    }

    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    /// Releases the transcript. Later calls to `next` return `None`.
    pub fn close(&mut self) {
        if let Some(source) = self.source.take() {
            drop(source);
            self.lookahead = Lookahead::Empty;
            tracing::debug!(
                lines = self.stats.lines_read,
                frames = self.stats.frames_emitted,
                "closed transcript"
            );
        }
    }

    /// The frame the next emitted item will carry.
    fn next_frame(&self) -> FrameIndex {
        self.last
            .as_ref()
            .map_or(FrameIndex::FIRST, |cursor| cursor.frame.successor())
    }

    fn step(&mut self) -> Option<Result<AlignedFrame<L::Frame>, AlignError>> {
        if self.is_closed() {
            return None;
        }

        if let Lookahead::Pending(record) = mem::take(&mut self.lookahead) {
            return Some(Ok(self.advance_towards(record)));
        }

        match self.read_record() {
            Ok(Some(record)) if record.frame == self.next_frame() => {
                Some(Ok(self.emit(record.frame, record.labels, FrameOrigin::Annotated)))
            }
            Ok(Some(record)) => Some(Ok(self.advance_towards(record))),
            Ok(None) => {
                self.close();
                None
            }
            Err(err) => {
                self.close();
                Some(Err(err))
            }
        }
    }

    /// Emits the next frame on the way to `record`, holding the record back
    /// if it is not reached yet.
    fn advance_towards(&mut self, record: AnnotationRecord) -> AlignedFrame<L::Frame> {
        let next = self.next_frame();

        if next < record.frame {
            let (labels, origin) = match &self.last {
                Some(cursor) => (cursor.labels.clone(), FrameOrigin::GapFilled),
                None => (Labels::default(), FrameOrigin::Unannotated),
            };
            self.lookahead = Lookahead::Pending(record);
            return self.emit(next, labels, origin);
        }

        if record.frame < next {
            self.stats.records_out_of_order += 1;
            tracing::warn!(
                record_frame = %record.frame,
                emitted_as = %next,
                "transcript record is out of order; using it for the next frame"
            );
        }
        self.emit(next, record.labels, FrameOrigin::Annotated)
    }

    /// Reads lines until one parses into a record. `Ok(None)` at end of input.
    fn read_record(&mut self) -> Result<Option<AnnotationRecord>, AlignError> {
        let fallback = self.next_frame();
        let Some(source) = self.source.as_mut() else {
            return Ok(None);
        };

        let mut line = String::new();
        loop {
            line.clear();
            let read = source
                .read_line(&mut line)
                .map_err(|err| AlignError::TranscriptRead {
                    line: self.stats.lines_read + 1,
                    source: err,
                })?;
            if read == 0 {
                return Ok(None);
            }
            self.stats.lines_read += 1;

            let Some(parsed) = parse_line(&line) else {
                self.stats.lines_skipped += 1;
                continue;
            };

            match &parsed.frame {
                FrameRef::Explicit(_) => self.stats.records_explicit += 1,
                FrameRef::Recovered(index) => {
                    self.stats.records_recovered += 1;
                    tracing::debug!(
                        line = self.stats.lines_read,
                        frame = %index,
                        "recovered frame number from image path"
                    );
                }
                FrameRef::Unresolved(raw) => {
                    self.stats.records_fallback += 1;
                    tracing::warn!(
                        line = self.stats.lines_read,
                        field = %raw,
                        frame = %fallback,
                        "could not read frame number; placing record after previous frame"
                    );
                }
            }

            return Ok(Some(AnnotationRecord::new(
                parsed.frame.resolve(fallback),
                parsed.labels,
            )));
        }
    }

    fn emit(
        &mut self,
        frame: FrameIndex,
        labels: Labels,
        origin: FrameOrigin,
    ) -> AlignedFrame<L::Frame> {
        let path = self.locator.locate(frame);
        let payload = match self.loader.load(&path) {
            Ok(payload) => Some(payload),
            Err(err) => {
                self.stats.payload_failures += 1;
                tracing::warn!(frame = %frame, error = %err, "frame failed to load");
                None
            }
        };

        self.stats.frames_emitted += 1;
        match origin {
            FrameOrigin::Annotated => self.stats.frames_annotated += 1,
            FrameOrigin::GapFilled => self.stats.frames_gap_filled += 1,
            FrameOrigin::Unannotated => self.stats.frames_unannotated += 1,
        }
        tracing::trace!(frame = %frame, ?origin, "emitting frame");

        self.last = Some(Cursor {
            frame,
            labels: labels.clone(),
        });

        AlignedFrame {
            index: frame,
            path,
            payload,
            labels,
            origin,
        }
    }
}

impl<R: BufRead, L: FrameLoader> Iterator for Aligner<R, L> {
    type Item = Result<AlignedFrame<L::Frame>, AlignError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}

impl<R: BufRead, L: FrameLoader> FusedIterator for Aligner<R, L> {}
