//! Static checks for transcripts.
//!
//! Alignment never fails on a malformed transcript; it recovers and carries
//! on. This module reports where it had to, so a transcript author can fix
//! the file instead of trusting the recovery:
//! - Frame fields that were recovered from image paths or guessed
//! - Records that repeat or go back to an earlier frame
//! - Lines with dropped extra fields or no labels at all

mod report;

pub use report::{CheckIssue, CheckReport, IssueCode, IssueContext, Severity};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::AlignError;
use crate::transcript::{parse_line, FrameIndex, FrameRef};

/// Checks the transcript at `path`.
pub fn check_transcript_file(path: &Path) -> Result<CheckReport, AlignError> {
    let file = File::open(path).map_err(|source| AlignError::TranscriptOpen {
        path: path.to_path_buf(),
        source,
    })?;
    check_transcript(BufReader::new(file))
}

/// Checks a transcript read from `reader`.
///
/// Frames are resolved the way the aligner resolves them, so the reported
/// `last_frame` is the last frame alignment would emit.
pub fn check_transcript<R: BufRead>(reader: R) -> Result<CheckReport, AlignError> {
    let mut report = CheckReport::new();
    let mut position: Option<FrameIndex> = None;

    for (line_idx, line) in reader.lines().enumerate() {
        let line_num = line_idx + 1;
        let line = line.map_err(|source| AlignError::TranscriptRead {
            line: line_num,
            source,
        })?;
        let Some(parsed) = parse_line(&line) else {
            continue;
        };
        report.records += 1;

        let context = IssueContext::Line { line: line_num };
        let next = position.map_or(FrameIndex::FIRST, FrameIndex::successor);

        match &parsed.frame {
            FrameRef::Explicit(_) => {}
            FrameRef::Recovered(frame) => report.add(CheckIssue::warning(
                IssueCode::RecoveredFrameNumber,
                format!("frame {} recovered from image path", frame),
                context.clone(),
            )),
            FrameRef::Unresolved(raw) => report.add(CheckIssue::warning(
                IssueCode::UnresolvedFrameNumber,
                format!("cannot read frame number from '{}'; assuming frame {}", raw, next),
                context.clone(),
            )),
        }

        let frame = parsed.frame.resolve(next);
        match position {
            Some(previous) if frame == previous => report.add(CheckIssue::error(
                IssueCode::DuplicateFrame,
                format!("frame {} already has a record; it will land on frame {}", frame, next),
                context.clone(),
            )),
            Some(previous) if frame < previous => report.add(CheckIssue::error(
                IssueCode::OutOfOrderFrame,
                format!(
                    "frame {} comes after frame {}; it will land on frame {}",
                    frame, previous, next
                ),
                context.clone(),
            )),
            _ => {}
        }

        if parsed.extra_fields > 0 {
            report.add(CheckIssue::warning(
                IssueCode::ExtraFields,
                format!("{} extra field(s) ignored", parsed.extra_fields),
                context.clone(),
            ));
        }

        if parsed.labels.a.is_empty() && parsed.labels.b.is_empty() {
            report.add(CheckIssue::warning(
                IssueCode::EmptyLabels,
                "record has no labels",
                context,
            ));
        }

        position = Some(frame.max(next));
    }

    if report.records == 0 {
        report.add(CheckIssue::warning(
            IssueCode::EmptyTranscript,
            "transcript contains no records",
            IssueContext::Transcript,
        ));
    }
    report.last_frame = position;

    Ok(report)
}
