//! Error kinds raised by user code and the errors a run can end with.
//!
//! User code signals failure by returning [`Raised`], which carries an
//! [`ErrorKind`]. Kinds form a static hierarchy so `throws` can accept an
//! error of the expected kind or any of its sub-kinds.

use std::fmt;
use std::io;
use thiserror::Error;

/// A node in the error-kind hierarchy.
///
/// Declare custom kinds as statics so children can point at their parent:
///
/// ```
/// use assay_runtime::{kinds, ErrorKind};
///
/// static PARSE_ERROR: ErrorKind = ErrorKind::child("ParseError", &kinds::RUNTIME_ERROR);
/// assert!(PARSE_ERROR.is_a(&kinds::ERROR));
/// ```
#[derive(Debug)]
pub struct ErrorKind {
    name: &'static str,
    parent: Option<&'static ErrorKind>,
}

impl ErrorKind {
    pub const fn root(name: &'static str) -> Self {
        Self { name, parent: None }
    }

    pub const fn child(name: &'static str, parent: &'static ErrorKind) -> Self {
        Self {
            name,
            parent: Some(parent),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parent(&self) -> Option<&'static ErrorKind> {
        self.parent
    }

    /// True if `self` is `ancestor` or descends from it.
    pub fn is_a(&self, ancestor: &ErrorKind) -> bool {
        if std::ptr::eq(self, ancestor) {
            return true;
        }
        let mut current = self.parent;
        while let Some(kind) = current {
            if std::ptr::eq(kind, ancestor) {
                return true;
            }
            current = kind.parent;
        }
        false
    }
}

impl PartialEq for ErrorKind {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for ErrorKind {}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Built-in kinds.
///
/// ```text
/// Error
/// ├── LogicError
/// │   ├── InvalidArgument
/// │   └── BadCall
/// │       └── BadMethodCall
/// └── RuntimeError
///     ├── OutOfRange
///     └── UnexpectedValue
/// ```
pub mod kinds {
    use super::ErrorKind;

    pub static ERROR: ErrorKind = ErrorKind::root("Error");

    pub static LOGIC_ERROR: ErrorKind = ErrorKind::child("LogicError", &ERROR);
    pub static INVALID_ARGUMENT: ErrorKind = ErrorKind::child("InvalidArgument", &LOGIC_ERROR);
    pub static BAD_CALL: ErrorKind = ErrorKind::child("BadCall", &LOGIC_ERROR);
    pub static BAD_METHOD_CALL: ErrorKind = ErrorKind::child("BadMethodCall", &BAD_CALL);

    pub static RUNTIME_ERROR: ErrorKind = ErrorKind::child("RuntimeError", &ERROR);
    pub static OUT_OF_RANGE: ErrorKind = ErrorKind::child("OutOfRange", &RUNTIME_ERROR);
    pub static UNEXPECTED_VALUE: ErrorKind = ErrorKind::child("UnexpectedValue", &RUNTIME_ERROR);
}

/// An error raised by a test body, hook, or `throws` callback.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct Raised {
    kind: &'static ErrorKind,
    message: String,
}

impl Raised {
    pub fn new(kind: &'static ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &'static ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_a(&self, kind: &ErrorKind) -> bool {
        self.kind.is_a(kind)
    }
}

/// Result of a test body or hook
pub type TestResult = Result<(), Raised>;

/// Where in a suite a run was aborted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortSite {
    Setup,
    Test(String),
    TearDown,
}

impl fmt::Display for AbortSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortSite::Setup => write!(f, "setup hook"),
            AbortSite::Test(name) => write!(f, "test \"{}\"", name),
            AbortSite::TearDown => write!(f, "tearDown hook"),
        }
    }
}

/// Fatal run errors
#[derive(Debug, Error)]
pub enum RunError {
    /// User code returned an error outside `throws`; nothing after it ran.
    #[error("run aborted in {site} of suite \"{suite}\": {source}")]
    Aborted {
        suite: String,
        site: AbortSite,
        #[source]
        source: Raised,
    },

    #[error("failed to write report: {0}")]
    Report(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] assay_config::ConfigError),
}
