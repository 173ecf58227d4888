/// File enumerator built on `jwalk`.
///
/// Walks everything below a root and yields the paths of regular files.
/// Directories that cannot be listed (permission denied, removed while the
/// walk was running) are skipped together with their subtree; the walk
/// carries on with their siblings and the skip is counted.
///
/// Only the root itself can fail the walk: [`check_root`] runs before any
/// entry is produced.
use crate::config::{parallelism_for, ScanConfig};
use crate::error::ScanError;
use crate::scanner::CancellationToken;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Produces a fresh walk of one root on every [`files`](Enumerator::files) call.
#[derive(Debug, Clone)]
pub struct Enumerator {
    root: PathBuf,
    walk_threads: usize,
}

impl Enumerator {
    pub fn new(root: impl Into<PathBuf>, config: &ScanConfig) -> Self {
        Self {
            root: root.into(),
            walk_threads: config.walk_threads,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate the root and start a new lazy walk.
    ///
    /// Nothing is cached between calls; a second call walks the disk again.
    pub fn files(&self) -> Result<FileWalk, ScanError> {
        check_root(&self.root)?;

        let entries = jwalk::WalkDir::new(&self.root)
            .skip_hidden(false)
            .follow_links(false)
            .parallelism(parallelism_for(self.walk_threads))
            .into_iter();

        debug!("Enumerating {}", self.root.display());
        Ok(FileWalk::new(entries))
    }
}

/// Check that `root` is an existing, listable directory.
pub fn check_root(root: &Path) -> Result<(), ScanError> {
    let meta = fs::metadata(root).map_err(|err| root_error(root, err))?;

    if !meta.is_dir() {
        return Err(ScanError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    // Opening the directory is enough to prove it can be listed.
    fs::read_dir(root).map_err(|source| ScanError::AccessDenied {
        path: root.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// Map a failed `stat` of the root to the error the caller sees.
fn root_error(root: &Path, err: io::Error) -> ScanError {
    if err.kind() == io::ErrorKind::PermissionDenied {
        ScanError::AccessDenied {
            path: root.to_path_buf(),
            source: err,
        }
    } else {
        ScanError::RootNotFound {
            path: root.to_path_buf(),
        }
    }
}

/// Lazy sequence of regular-file paths under a root.
///
/// Symlinks are not followed and are not reported as files.
pub struct FileWalk {
    entries: jwalk::DirEntryIter<((), ())>,
    cancel: Option<CancellationToken>,
    skipped_dirs: u64,
    cut_short: bool,
    exhausted: bool,
}

impl FileWalk {
    fn new(entries: jwalk::DirEntryIter<((), ())>) -> Self {
        Self {
            entries,
            cancel: None,
            skipped_dirs: 0,
            cut_short: false,
            exhausted: false,
        }
    }

    /// End the walk early once `token` is cancelled.
    ///
    /// The token is checked before every directory entry, not just before
    /// every file, so a tree made mostly of directories still stops promptly.
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Number of subdirectories skipped so far because they could not be read.
    pub fn skipped_dirs(&self) -> u64 {
        self.skipped_dirs
    }

    /// `true` if the walk ended because the token was cancelled rather than
    /// because every entry had been seen.
    pub fn was_cut_short(&self) -> bool {
        self.cut_short
    }

    fn skip_dir(&mut self, path: Option<&Path>, err: &jwalk::Error) {
        self.skipped_dirs += 1;
        let path = path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        warn!("Skipping unreadable directory {path}: {err}");
    }
}

impl Iterator for FileWalk {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            if self.exhausted || self.cut_short {
                return None;
            }
            if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
                self.cut_short = true;
                return None;
            }

            let Some(item) = self.entries.next() else {
                self.exhausted = true;
                return None;
            };
            match item {
                Ok(entry) => {
                    // jwalk reports a directory it could not list on the
                    // directory's own entry, not as an `Err` item.
                    if let Some(err) = &entry.read_children_error {
                        self.skip_dir(Some(&entry.path()), err);
                    } else if entry.file_type().is_file() {
                        return Some(entry.path());
                    }
                }
                Err(err) => self.skip_dir(err.path(), &err),
            }
        }
    }
}
