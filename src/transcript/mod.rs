//! Transcript records and line parsing.
//!
//! A transcript is a hand-written, tab-separated text file mapping some of a
//! video's frames to what should be read off them:
//!
//! ```text
//! # frame   name    clock
//! 1	Alice	10:00
//! 3	Bob	10:02
//! image007.png	Carol	10:05
//! ```
//!
//! # Example
//!
//! ```
//! use framealign::transcript::{parse_line, FrameIndex, FrameRef, Labels};
//!
//! let parsed = parse_line("image007.png\tCarol\t10:05").unwrap();
//! assert_eq!(parsed.frame, FrameRef::Recovered(FrameIndex::new(7)));
//! assert_eq!(parsed.labels, Labels::new("Carol", "10:05"));
//! ```

mod parse;
mod record;

pub use parse::{is_ignorable, parse_frame_field, parse_line, FrameRef, ParsedLine, COMMENT_MARKER};
pub use record::{AnnotationRecord, FrameIndex, Labels};

#[cfg(feature = "fuzzing")]
pub use parse::fuzz_parse_line;
