/// Fatal scan errors.
///
/// Only problems with the scan root itself are fatal. Everything below the
/// root (unreadable subdirectories, files that vanish before their size is
/// read) is absorbed by the scanner and shows up as diagnostic counters on
/// the final `ScanResult` instead.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// The root path does not exist or is not a directory.
    #[error("folder not found: {}", path.display())]
    RootNotFound { path: PathBuf },

    /// The root exists but cannot be listed.
    #[error("access denied to {}: {source}", path.display())]
    AccessDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// The root path the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::RootNotFound { path } | Self::AccessDenied { path, .. } => path,
        }
    }
}
