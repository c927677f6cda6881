//! Scan — left-to-right segment matcher.

use crate::format::{LogFormat, Segment};

/// A successful match: every declared field name paired with its raw
/// capture, in line order. Captures borrow from the input line.
pub type RawCaptures<'a> = Vec<(&'static str, &'a str)>;

impl LogFormat {
    /// Match this grammar against the start of `line`.
    ///
    /// The match is anchored at position zero but consumes only a prefix:
    /// trailing content after the last segment (a line terminator, stray
    /// bytes) is tolerated. Returns `None` when the line does not conform;
    /// malformed lines are never an error.
    pub fn match_line<'a>(&self, line: &'a str) -> Option<RawCaptures<'a>> {
        let mut rest = line;
        let mut captures = RawCaptures::with_capacity(self.segments().len());

        for segment in self.segments() {
            match *segment {
                Segment::Literal(text) => {
                    rest = rest.strip_prefix(text)?;
                }
                Segment::Token { name, allow_empty } => {
                    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                    if end == 0 && !allow_empty {
                        return None;
                    }
                    captures.push((name, &rest[..end]));
                    rest = &rest[end..];
                }
                Segment::Status { name } => {
                    let bytes = rest.as_bytes();
                    if bytes.len() < 3 || !bytes[..3].iter().all(u8::is_ascii_digit) {
                        return None;
                    }
                    captures.push((name, &rest[..3]));
                    rest = &rest[3..];
                }
                Segment::Bracketed { name } => {
                    // Stops at the first `]`; the delimiter itself belongs
                    // to the following literal.
                    let end = rest.find(']')?;
                    if end == 0 {
                        return None;
                    }
                    captures.push((name, &rest[..end]));
                    rest = &rest[end..];
                }
                Segment::Quoted { name, allow_empty } => {
                    let end = rest.find('"')?;
                    if end == 0 && !allow_empty {
                        return None;
                    }
                    captures.push((name, &rest[..end]));
                    rest = &rest[end..];
                }
            }
        }

        Some(captures)
    }
}
