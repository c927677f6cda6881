//! Format — grammar model for Apache access log lines.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// One step of a line grammar: fixed delimiter text or a named capture slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Fixed text that must appear verbatim.
    Literal(&'static str),
    /// Maximal run of non-whitespace characters.
    Token {
        name: &'static str,
        allow_empty: bool,
    },
    /// Exactly three ASCII digits (HTTP status code).
    Status { name: &'static str },
    /// Content up to the first `]`, non-empty.
    Bracketed { name: &'static str },
    /// Content up to the next `"`. May contain spaces.
    Quoted {
        name: &'static str,
        allow_empty: bool,
    },
}

impl Segment {
    /// The field name this segment captures into, if any.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Segment::Literal(_) => None,
            Segment::Token { name, .. }
            | Segment::Status { name }
            | Segment::Bracketed { name }
            | Segment::Quoted { name, .. } => Some(name),
        }
    }
}

/// An ordered set of named capture slots and literal delimiters describing
/// one access-log layout. Immutable after construction; the built-ins are
/// shared process-wide statics.
#[derive(Debug, Clone)]
pub struct LogFormat {
    kind: FormatKind,
    segments: Vec<Segment>,
}

impl LogFormat {
    fn new(kind: FormatKind, segments: Vec<Segment>) -> Self {
        debug_assert!(
            {
                let names: Vec<_> = segments.iter().filter_map(Segment::name).collect();
                let mut deduped = names.clone();
                deduped.sort_unstable();
                deduped.dedup();
                names.len() == deduped.len()
            },
            "field names within a format must be unique"
        );
        Self { kind, segments }
    }

    pub fn kind(&self) -> FormatKind {
        self.kind
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Field names in line order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.segments.iter().filter_map(Segment::name)
    }
}

/// The shared CLF prefix: host, identity, userid, timestamp, request line,
/// status, size. The quoted request line decomposes into method, url, and
/// protocol; protocol runs to the closing quote so it may contain spaces.
fn clf_segments() -> Vec<Segment> {
    vec![
        Segment::Token {
            name: "hostname",
            allow_empty: false,
        },
        Segment::Literal(" "),
        Segment::Token {
            name: "identity",
            allow_empty: true,
        },
        Segment::Literal(" "),
        Segment::Token {
            name: "userid",
            allow_empty: true,
        },
        Segment::Literal(" ["),
        Segment::Bracketed { name: "time" },
        Segment::Literal("] \""),
        Segment::Token {
            name: "method",
            allow_empty: false,
        },
        Segment::Literal(" "),
        Segment::Token {
            name: "url",
            allow_empty: false,
        },
        Segment::Literal(" "),
        Segment::Quoted {
            name: "protocol",
            allow_empty: false,
        },
        Segment::Literal("\" "),
        Segment::Status { name: "status" },
        Segment::Literal(" "),
        Segment::Token {
            name: "size",
            allow_empty: false,
        },
    ]
}

/// Common Log Format: the classic seven-field access log line.
///
/// Example:
/// `127.0.0.1 - frank [10/Oct/2000:13:55:36 -0700] "GET /apache_pb.gif HTTP/1.0" 200 2326`
pub static COMMON: Lazy<LogFormat> =
    Lazy::new(|| LogFormat::new(FormatKind::Common, clf_segments()));

/// Combined Log Format: CLF plus referer, user-agent, and a trailing extra
/// quoted field (e.g. X-Forwarded-For).
///
/// Example:
/// `127.0.0.1 - - [10/Oct/2000:13:55:36 -0700] "GET /apache_pb.gif HTTP/1.0" 200 2326 "http://example.com/start.html" "Mozilla/4.08" "-"`
pub static COMBINED: Lazy<LogFormat> = Lazy::new(|| {
    let mut segments = clf_segments();
    segments.extend([
        Segment::Literal(" \""),
        Segment::Quoted {
            name: "referer",
            allow_empty: true,
        },
        Segment::Literal("\" \""),
        Segment::Quoted {
            name: "user_agent",
            allow_empty: true,
        },
        Segment::Literal("\" \""),
        Segment::Quoted {
            name: "extra",
            allow_empty: true,
        },
        Segment::Literal("\""),
    ]);
    LogFormat::new(FormatKind::Combined, segments)
});

/// Names the built-in formats. Serializes snake_case for configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    Common,
    Combined,
}

impl FormatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatKind::Common => "common",
            FormatKind::Combined => "combined",
        }
    }

    /// Case-insensitive lookup by name, as used in config files and
    /// environment variables.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "common" => Some(FormatKind::Common),
            "combined" => Some(FormatKind::Combined),
            _ => None,
        }
    }

    /// The built-in grammar for this format.
    pub fn grammar(&self) -> &'static LogFormat {
        match self {
            FormatKind::Common => &COMMON,
            FormatKind::Combined => &COMBINED,
        }
    }
}

impl Default for FormatKind {
    fn default() -> Self {
        FormatKind::Combined
    }
}
