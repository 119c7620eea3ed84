use std::error::Error;
use std::fmt::{Display, Formatter, Result};

#[macro_export]
macro_rules! create_m3u_sync_error {
     ($kind: expr, $($arg:tt)*) => {
        $crate::m3u_sync_error::M3uSyncError::new($kind, format!($($arg)*))
    }
}
pub use create_m3u_sync_error;

#[macro_export]
macro_rules! create_m3u_sync_error_result {
     ($kind: expr, $($arg:tt)*) => {
        Err($crate::m3u_sync_error::M3uSyncError::new($kind, format!($($arg)*)))
    }
}
pub use create_m3u_sync_error_result;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum M3uSyncErrorKind {
    // invalid or unreadable configuration
    Config,
    // upstream could not be fetched
    Fetch,
    // local playlist could not be read or written
    Io,
}

impl Display for M3uSyncErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", match self {
            Self::Config => "config",
            Self::Fetch => "fetch",
            Self::Io => "io",
        })
    }
}

#[derive(Debug)]
pub struct M3uSyncError {
    pub kind: M3uSyncErrorKind,
    pub message: String,
}

impl M3uSyncError {
    pub const fn new(kind: M3uSyncErrorKind, message: String) -> Self {
        Self { kind, message }
    }
}

impl Display for M3uSyncError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "M3uSync {} error: {}", self.kind, self.message)
    }
}

impl Error for M3uSyncError {}
