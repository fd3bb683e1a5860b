//! Mapping frame numbers to image files on disk.

use std::fmt;
use std::path::PathBuf;

use crate::error::AlignError;
use crate::transcript::FrameIndex;

/// Widest useful padding: the number of digits in `u64::MAX`.
const MAX_WIDTH: usize = 20;

/// Resolves a frame index to the path of its image.
///
/// The pattern is printf-like and must contain exactly one `%d` conversion,
/// optionally zero padded (`image%05d.png`). `%%` is a literal percent sign.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameLocator {
    dir: PathBuf,
    pattern: FramePattern,
}

impl FrameLocator {
    /// Creates a locator for `pattern` inside `dir`.
    ///
    /// # Errors
    /// Returns [`AlignError::InvalidPattern`] if the pattern has no `%d`
    /// conversion, more than one, an unsupported conversion, or a padding
    /// width wider than a `u64` can print.
    pub fn new(dir: impl Into<PathBuf>, pattern: &str) -> Result<Self, AlignError> {
        Ok(Self {
            dir: dir.into(),
            pattern: FramePattern::parse(pattern)?,
        })
    }

    /// Returns the image path for `frame`.
    pub fn locate(&self, frame: FrameIndex) -> PathBuf {
        self.dir.join(self.pattern.render(frame))
    }

    pub fn pattern(&self) -> &FramePattern {
        &self.pattern
    }
}

/// A parsed `%d` file name pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FramePattern {
    prefix: String,
    suffix: String,
    width: usize,
}

impl FramePattern {
    pub fn parse(raw: &str) -> Result<Self, AlignError> {
        let invalid = |message: &str| AlignError::InvalidPattern {
            pattern: raw.to_string(),
            message: message.to_string(),
        };

        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut width = None;
        let mut chars = raw.chars().peekable();

        while let Some(c) = chars.next() {
            let out = if width.is_some() { &mut suffix } else { &mut prefix };
            if c != '%' {
                out.push(c);
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                out.push('%');
                continue;
            }
            if width.is_some() {
                return Err(invalid("more than one conversion"));
            }

            let mut digits = String::new();
            while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                digits.push(d);
                chars.next();
            }
            if !digits.is_empty() && !digits.starts_with('0') {
                return Err(invalid("only zero padding is supported (use %0Nd)"));
            }
            if chars.next() != Some('d') {
                return Err(invalid("only %d conversions are supported"));
            }
            let padding = if digits.is_empty() {
                0
            } else {
                digits
                    .parse::<usize>()
                    .map_err(|_| invalid("padding width out of range"))?
            };
            if padding > MAX_WIDTH {
                return Err(invalid("padding width out of range"));
            }
            width = Some(padding);
        }

        let Some(width) = width else {
            return Err(invalid("missing %d conversion"));
        };
        if prefix.contains(['/', '\\']) || suffix.contains(['/', '\\']) {
            return Err(invalid("pattern must be a file name, not a path"));
        }

        Ok(Self {
            prefix,
            suffix,
            width,
        })
    }

    /// Formats the file name for `frame`.
    pub fn render(&self, frame: FrameIndex) -> String {
        format!(
            "{}{:0width$}{}",
            self.prefix,
            frame.as_u64(),
            self.suffix,
            width = self.width
        )
    }
}

impl fmt::Display for FramePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let escape = |s: &str| s.replace('%', "%%");
        if self.width == 0 {
            write!(f, "{}%d{}", escape(&self.prefix), escape(&self.suffix))
        } else {
            write!(
                f,
                "{}%0{}d{}",
                escape(&self.prefix),
                self.width,
                escape(&self.suffix)
            )
        }
    }
}
