//! Line-level transcript parsing.
//!
//! A transcript line is `<frame>\t<label a>\t<label b>`. The frame field is
//! normally a bare number, but hand-made transcripts often paste the image
//! path instead (`frames/image007.png`), so the parser recovers the number
//! from that shape when it can. Anything it cannot recover is left for the
//! aligner to place after the previous frame.

use super::record::{FrameIndex, Labels};

/// Lines starting with this character (after trimming) are ignored.
pub const COMMENT_MARKER: char = '#';

/// Prefix of the image file names frame numbers are recovered from.
const IMAGE_PREFIX: &str = "image";

/// How the frame field of a line was interpreted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameRef {
    /// The field was a plain frame number.
    Explicit(FrameIndex),
    /// The field was an `image<digits>.<ext>` path and the digits were used.
    Recovered(FrameIndex),
    /// Nothing usable; carries the raw field for diagnostics.
    Unresolved(String),
}

impl FrameRef {
    /// Returns the concrete frame, using `fallback` when unresolved.
    pub fn resolve(&self, fallback: FrameIndex) -> FrameIndex {
        match self {
            FrameRef::Explicit(index) | FrameRef::Recovered(index) => *index,
            FrameRef::Unresolved(_) => fallback,
        }
    }
}

/// A transcript line that is not blank or a comment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedLine {
    pub frame: FrameRef,
    pub labels: Labels,
    /// Tab-separated fields past the third; these are dropped.
    pub extra_fields: usize,
}

/// Returns true for lines the aligner never looks at.
pub fn is_ignorable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER)
}

/// Parses one transcript line. Returns `None` for blank and comment lines.
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    if is_ignorable(line) {
        return None;
    }
    let trimmed = line.trim();

    let mut fields = trimmed.split('\t');
    let frame_field = fields.next().unwrap_or_default();
    let a = fields.next().unwrap_or_default();
    let b = fields.next().unwrap_or_default();
    let extra_fields = fields.count();

    Some(ParsedLine {
        frame: parse_frame_field(frame_field),
        labels: Labels::new(a, b),
        extra_fields,
    })
}

/// Interprets the first field of a transcript line.
pub fn parse_frame_field(field: &str) -> FrameRef {
    if let Some(index) = parse_positive(field) {
        return FrameRef::Explicit(index);
    }

    match recover_from_path(field) {
        Some(index) => FrameRef::Recovered(index),
        None => FrameRef::Unresolved(field.to_string()),
    }
}

/// Recovers `7` from `some/dir/image007.png`.
fn recover_from_path(field: &str) -> Option<FrameIndex> {
    let file_name = field.rsplit(['/', '\\']).next()?;
    let rest = file_name.strip_prefix(IMAGE_PREFIX)?;
    let digits = match rest.rsplit_once('.') {
        Some((stem, _ext)) => stem,
        None => rest,
    };
    parse_positive(digits)
}

fn parse_positive(raw: &str) -> Option<FrameIndex> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match raw.parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(FrameIndex::new(n)),
    }
}

/// Fuzz-only entrypoint for single-line transcript parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_line(input: &str) {
    if let Some(parsed) = parse_line(input) {
        let _ = parsed.frame.resolve(FrameIndex::FIRST);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line_reads_all_three_fields() {
        let parsed = parse_line("12\tAlice\t10:00").expect("line should parse");
        assert_eq!(parsed.frame, FrameRef::Explicit(FrameIndex(12)));
        assert_eq!(parsed.labels, Labels::new("Alice", "10:00"));
        assert_eq!(parsed.extra_fields, 0);
    }

    #[test]
    fn parse_line_defaults_missing_fields() {
        let parsed = parse_line("3\tBob").expect("line should parse");
        assert_eq!(parsed.labels, Labels::new("Bob", ""));

        let parsed = parse_line("4").expect("line should parse");
        assert_eq!(parsed.labels, Labels::default());
    }

    #[test]
    fn parse_line_drops_fields_past_the_third() {
        let parsed = parse_line("5\tA\tB\tC\tD").expect("line should parse");
        assert_eq!(parsed.labels, Labels::new("A", "B"));
        assert_eq!(parsed.extra_fields, 2);
    }

    #[test]
    fn parse_line_trims_surrounding_whitespace() {
        let parsed = parse_line("  6\tAlice\t10:00 \r\n").expect("line should parse");
        assert_eq!(parsed.frame, FrameRef::Explicit(FrameIndex(6)));
        assert_eq!(parsed.labels, Labels::new("Alice", "10:00"));
    }

    #[test]
    fn parse_line_skips_blank_and_comment_lines() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   \t ").is_none());
        assert!(parse_line("# 1\tAlice\t10:00").is_none());
        assert!(parse_line("   #indented comment").is_none());
    }

    #[test]
    fn frame_field_recovers_image_paths() {
        assert_eq!(
            parse_frame_field("image007.png"),
            FrameRef::Recovered(FrameIndex(7))
        );
        assert_eq!(
            parse_frame_field("/data/frames/image12.jpg"),
            FrameRef::Recovered(FrameIndex(12))
        );
        assert_eq!(
            parse_frame_field(r"C:\frames\image3.png"),
            FrameRef::Recovered(FrameIndex(3))
        );
        assert_eq!(
            parse_frame_field("image44"),
            FrameRef::Recovered(FrameIndex(44))
        );
    }

    #[test]
    fn frame_field_leaves_unknown_shapes_unresolved() {
        for raw in ["frame7.png", "imageX.png", "image.png", "abc", "-3", "0", "image0.png"] {
            assert_eq!(
                parse_frame_field(raw),
                FrameRef::Unresolved(raw.to_string()),
                "{raw} should not resolve"
            );
        }
    }

    #[test]
    fn frame_field_rejects_overflowing_numbers() {
        let raw = "99999999999999999999999";
        assert_eq!(parse_frame_field(raw), FrameRef::Unresolved(raw.to_string()));
    }

    #[test]
    fn unresolved_uses_fallback() {
        let unresolved = FrameRef::Unresolved("??".to_string());
        assert_eq!(unresolved.resolve(FrameIndex(10)), FrameIndex(10));
        assert_eq!(
            FrameRef::Explicit(FrameIndex(3)).resolve(FrameIndex(10)),
            FrameIndex(3)
        );
    }
}
