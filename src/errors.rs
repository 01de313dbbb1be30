use std::fmt;

/// Errors that can be returned by the boundary of the canopy engine: builder
/// configuration and profile I/O. The discovery loop itself treats contract
/// violations as fatal (see `util::check_argument` callers vs. `assert!`).
#[derive(Debug, PartialEq)]
pub enum CanopyError {
    InvalidArgument {
        msg: &'static str,
    },
    DimensionMismatch {
        expected: usize,
        found: usize,
        line: usize,
    },
    MalformedProfileLine {
        line: usize,
        detail: String,
    },
    Io(String),
}

impl fmt::Display for CanopyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanopyError::InvalidArgument { msg } => write!(f, "invalid argument: {}", msg),
            CanopyError::DimensionMismatch {
                expected,
                found,
                line,
            } => write!(
                f,
                "line {}: expected {} samples, found {}",
                line, expected, found
            ),
            CanopyError::MalformedProfileLine { line, detail } => {
                write!(f, "line {}: {}", line, detail)
            }
            CanopyError::Io(msg) => write!(f, "io error: {}", msg),
        }
    }
}

impl std::error::Error for CanopyError {}
