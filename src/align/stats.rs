//! Counters describing one alignment pass.

use std::fmt;

use serde::Serialize;

/// Diagnostic counters collected while aligning.
///
/// Frame-number recovery is a heuristic, so the counters separate lines whose
/// frame number was read directly from lines where it had to be recovered or
/// guessed. A transcript that aligns cleanly has `records_recovered == 0` and
/// `records_fallback == 0`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AlignStats {
    /// Physical lines read from the transcript.
    pub lines_read: usize,
    /// Blank and comment lines.
    pub lines_skipped: usize,
    /// Records with a plain numeric frame field.
    pub records_explicit: usize,
    /// Records whose frame number was recovered from an image path.
    pub records_recovered: usize,
    /// Records placed right after the previous frame because the frame field
    /// was unusable.
    pub records_fallback: usize,
    /// Records at or before an already emitted frame.
    pub records_out_of_order: usize,
    pub frames_emitted: usize,
    pub frames_annotated: usize,
    pub frames_gap_filled: usize,
    /// Frames before the first record, emitted with empty labels.
    pub frames_unannotated: usize,
    /// Frames whose payload could not be loaded.
    pub payload_failures: usize,
}

impl AlignStats {
    /// Total number of records parsed from the transcript.
    pub fn records_parsed(&self) -> usize {
        self.records_explicit + self.records_recovered + self.records_fallback
    }

    /// Returns true if any frame number was not read directly.
    pub fn recovery_invoked(&self) -> bool {
        self.records_recovered > 0 || self.records_fallback > 0
    }
}

impl fmt::Display for AlignStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Lines read:        {}", self.lines_read)?;
        writeln!(f, "  skipped:         {}", self.lines_skipped)?;
        writeln!(f, "Records parsed:    {}", self.records_parsed())?;
        writeln!(f, "  recovered:       {}", self.records_recovered)?;
        writeln!(f, "  fallback:        {}", self.records_fallback)?;
        writeln!(f, "  out of order:    {}", self.records_out_of_order)?;
        writeln!(f, "Frames emitted:    {}", self.frames_emitted)?;
        writeln!(f, "  annotated:       {}", self.frames_annotated)?;
        writeln!(f, "  gap-filled:      {}", self.frames_gap_filled)?;
        writeln!(f, "  unannotated:     {}", self.frames_unannotated)?;
        writeln!(f, "Payload failures:  {}", self.payload_failures)
    }
}
