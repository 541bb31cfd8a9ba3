//! Exit codes for the gqlsh binary.
//!
//! Scripts running gqlsh in one-shot mode can tell a bad config apart from an
//! unreachable endpoint or a query the server rejected.

/// Exit codes used by the CLI.
///
/// 0 indicates success; every failure mode has its own non-zero value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - no errors
    Success = 0,
    /// The server answered a one-shot query with GraphQL errors
    QueryError = 1,
    /// Configuration error (missing or invalid config file, bad flags)
    ConfigError = 2,
    /// Schema load error (introspection rejected, SDL could not be parsed)
    SchemaError = 3,
    /// I/O error (query file or stdin could not be read)
    IoError = 4,
    /// Transport error (endpoint unreachable, HTTP error status, malformed response)
    TransportError = 5,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self as i32)
    }

    /// Get the numeric value of this exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::QueryError => write!(f, "query error"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::SchemaError => write!(f, "schema load error"),
            Self::IoError => write!(f, "I/O error"),
            Self::TransportError => write!(f, "transport error"),
        }
    }
}
