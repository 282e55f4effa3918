use std::fmt;

/// Category of an XML reading problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The markup is not well-formed: bad syntax, a mismatched end tag, or
    /// text before the root element.
    E001,
    /// The input ended while an element was still open.
    E002,
    /// An entity reference other than the five predefined entities or a
    /// character reference.
    E003,
    /// The input contains no element at all.
    E004,
    /// A second top-level element or non-whitespace text follows the root.
    E005,
    /// An attribute could not be read, e.g. it has no value or no quotes.
    E006,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 6] = [
        ErrorCode::E001,
        ErrorCode::E002,
        ErrorCode::E003,
        ErrorCode::E004,
        ErrorCode::E005,
        ErrorCode::E006,
    ];

    /// Returns a short summary of the problem.
    pub fn summary(self) -> &'static str {
        match self {
            ErrorCode::E001 => "malformed XML",
            ErrorCode::E002 => "unclosed element",
            ErrorCode::E003 => "undefined entity",
            ErrorCode::E004 => "missing root element",
            ErrorCode::E005 => "content after root element",
            ErrorCode::E006 => "malformed attribute",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Variant names are the codes.
        fmt::Debug::fmt(self, f)
    }
}
