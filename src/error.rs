use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Broad grouping of [`ErrorKind`]s.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorClass {
    /// The input is not well-formed JSON.
    Syntax,
    /// Well-formed JSON this decoder does not handle.
    Unsupported,
    /// A fixed-size destination or a configured limit was exceeded.
    Capacity,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("expected {0}")]
    Expected(&'static str),
    #[error("invalid literal")]
    InvalidLiteral,
    #[error("invalid number")]
    InvalidNumber,
    #[error("invalid escape sequence")]
    InvalidEscape,
    #[error("control character in string")]
    ControlCharacter,
    #[error("string is not valid utf-8")]
    InvalidUtf8,
    #[error("trailing comma")]
    TrailingComma,
    #[error("trailing characters after value")]
    TrailingCharacters,
    #[error("unicode escapes are not supported")]
    UnicodeEscape,
    #[error("fraction or exponent in integer")]
    FractionalInteger,
    #[error("number out of range")]
    NumberOutOfRange,
    #[error("string exceeds destination capacity")]
    StringCapacity,
    #[error("array exceeds capacity of {capacity} elements")]
    ArrayCapacity { capacity: usize },
    #[error("nesting deeper than {limit}")]
    DepthLimit { limit: usize },
}

impl ErrorKind {
    pub fn class(&self) -> ErrorClass {
        use ErrorKind::*;
        match self {
            UnicodeEscape | FractionalInteger | NumberOutOfRange => ErrorClass::Unsupported,
            StringCapacity | ArrayCapacity { .. } | DepthLimit { .. } => ErrorClass::Capacity,
            _ => ErrorClass::Syntax,
        }
    }
}

/// A decode failure, with the position where it was detected.
///
/// `line` and `column` are zero-based; `column` counts bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("JSON decode error: {kind} at index {offset} (line {line} column {column})")]
pub struct Error {
    pub kind: ErrorKind,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Error {
    #[cold]
    pub(crate) fn at(kind: ErrorKind, consumed: &[u8]) -> Self {
        let offset = consumed.len();
        let line = consumed.iter().filter(|b| **b == b'\n').count();
        let column = match consumed.iter().rposition(|b| *b == b'\n') {
            Some(nl) => offset - (nl + 1),
            None => offset,
        };
        Self {
            kind,
            offset,
            line,
            column,
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn class(&self) -> ErrorClass {
        self.kind.class()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_position() {
        let e = Error::at(ErrorKind::InvalidNumber, b"{\n  \"a\": 1.");
        assert_eq!((e.offset, e.line, e.column), (11, 1, 9));
        let e = Error::at(ErrorKind::UnexpectedEnd, b"[1, 2");
        assert_eq!((e.offset, e.line, e.column), (5, 0, 5));
    }

    #[test]
    fn test_class() {
        assert_eq!(ErrorKind::UnicodeEscape.class(), ErrorClass::Unsupported);
        assert_eq!(
            ErrorKind::ArrayCapacity { capacity: 2 }.class(),
            ErrorClass::Capacity
        );
        assert_eq!(ErrorKind::TrailingComma.class(), ErrorClass::Syntax);
    }
}
