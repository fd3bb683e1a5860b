//! Check report types for structured transcript diagnostics.
//!
//! This module provides structured check results that can be displayed to
//! users or serialized for programmatic use.

use std::fmt;

use serde::Serialize;

use crate::transcript::FrameIndex;

/// The result of checking a transcript.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CheckReport {
    /// Number of records (non-blank, non-comment lines).
    pub records: usize,

    /// Highest frame a record resolved to, which is also the number of
    /// frames an aligner emits for an in-order transcript.
    pub last_frame: Option<FrameIndex>,

    /// All issues found, in line order.
    pub issues: Vec<CheckIssue>,
}

impl CheckReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an issue to the report.
    pub fn add(&mut self, issue: CheckIssue) {
        self.issues.push(issue);
    }

    /// Returns the number of errors in the report.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns the issues with the given code.
    pub fn issues_with(&self, code: IssueCode) -> impl Iterator<Item = &CheckIssue> {
        self.issues.iter().filter(move |i| i.code == code)
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last_frame {
            Some(last) => writeln!(f, "{} record(s) covering frames 1-{}", self.records, last)?,
            None => writeln!(f, "{} record(s)", self.records)?,
        }

        if self.issues.is_empty() {
            return writeln!(f, "Check passed: no issues found");
        }

        writeln!(
            f,
            "Check completed with {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single check issue (error or warning).
#[derive(Clone, Debug, Serialize)]
pub struct CheckIssue {
    pub severity: Severity,

    /// A stable code for the issue type.
    pub code: IssueCode,

    pub message: String,

    pub context: IssueContext,
}

impl CheckIssue {
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        context: IssueContext,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            context,
        }
    }

    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Error, code, message, context)
    }

    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Warning, code, message, context)
    }
}

impl fmt::Display for CheckIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} at {}: {}",
            severity, self.code, self.context, self.message
        )
    }
}

/// The severity of a check issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Alignment still works but may not be what the author meant.
    Warning,
    /// Alignment will not reproduce the transcript faithfully.
    Error,
}

/// A stable code identifying the type of check issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCode {
    // Frame field issues
    /// The frame number was recovered from an image path.
    RecoveredFrameNumber,
    /// The frame field was unusable; the record follows the previous one.
    UnresolvedFrameNumber,

    // Ordering issues
    /// The record names the same frame as the record before it.
    DuplicateFrame,
    /// The record names a frame before the previous record's frame.
    OutOfOrderFrame,

    // Field issues
    /// The line has more than three tab-separated fields.
    ExtraFields,
    /// Both labels are empty.
    EmptyLabels,

    // Transcript issues
    /// The transcript contains no records.
    EmptyTranscript,
}

/// Where a check issue occurred.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueContext {
    /// Issue with the transcript as a whole.
    Transcript,
    /// Issue with a specific line.
    Line { line: usize },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Transcript => write!(f, "transcript"),
            IssueContext::Line { line } => write!(f, "line {}", line),
        }
    }
}
