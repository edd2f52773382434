//! Filesystem adapter for discovering DPX frames.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use hdr_nits_core::{FrameDescriptor, FrameError, FrameSource};
use tracing::{debug, warn};

use crate::dpx;

/// Default frame file extension.
pub const DEFAULT_EXTENSION: &str = "dpx";

/// Frames found by one directory scan.
struct Listing {
    /// Frame identifiers in path order.
    ids: Vec<String>,
    paths: HashMap<String, PathBuf>,
}

/// Filesystem frame source adapter.
///
/// Frame identifiers are paths relative to the scanned directory, sorted so
/// that runs are reproducible. The directory is scanned once, on first use;
/// `frames` and `count_hint` both report that snapshot.
pub struct FsFrameSource {
    dir: PathBuf,
    recursive: bool,
    extension: String,
    listing: OnceLock<io::Result<Listing>>,
}

impl FsFrameSource {
    /// Creates a new filesystem frame source.
    ///
    /// # Arguments
    ///
    /// * `dir` - Directory to scan
    /// * `recursive` - Whether to recurse into subdirectories
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, recursive: bool) -> Self {
        Self {
            dir: dir.into(),
            recursive,
            extension: DEFAULT_EXTENSION.to_owned(),
            listing: OnceLock::new(),
        }
    }

    /// Overrides the frame file extension (matched case-insensitively).
    #[must_use]
    pub fn with_extension(mut self, extension: &str) -> Self {
        extension
            .trim_start_matches('.')
            .clone_into(&mut self.extension);
        self.listing = OnceLock::new();
        self
    }

    fn listing(&self) -> io::Result<&Listing> {
        match self.listing.get_or_init(|| self.scan()) {
            Ok(listing) => Ok(listing),
            Err(e) => Err(io::Error::new(e.kind(), e.to_string())),
        }
    }

    /// Collects all frame files below the configured directory.
    fn scan(&self) -> io::Result<Listing> {
        let mut files = Vec::new();
        self.collect_from_dir(&self.dir, &mut files)?;
        files.sort();
        debug!("Found {} frame files in {}", files.len(), self.dir.display());

        let mut ids = Vec::with_capacity(files.len());
        let mut paths = HashMap::with_capacity(files.len());
        for path in files {
            let id = self.frame_id(&path);
            if let Some(other) = paths.insert(id.clone(), path) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("two files map to frame id {id} ({})", other.display()),
                ));
            }
            ids.push(id);
        }
        Ok(Listing { ids, paths })
    }

    fn collect_from_dir(&self, dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
        let entries = std::fs::read_dir(dir).map_err(|e| {
            warn!("Failed to read directory {}: {e}", dir.display());
            e
        })?;
        self.collect_entries(dir, entries.map(|entry| entry.map(|e| e.path())), files)
    }

    /// Adds frame paths from one directory's entries. An unreadable entry
    /// fails the scan rather than dropping a frame from the batch.
    fn collect_entries(
        &self,
        dir: &Path,
        entries: impl Iterator<Item = io::Result<PathBuf>>,
        files: &mut Vec<PathBuf>,
    ) -> io::Result<()> {
        for entry in entries {
            let path = entry.map_err(|e| {
                warn!("Unreadable entry in {}: {e}", dir.display());
                e
            })?;
            if path.is_dir() {
                if self.recursive {
                    self.collect_from_dir(&path, files)?;
                }
            } else if self.is_frame(&path) {
                files.push(path);
            }
        }
        Ok(())
    }

    /// Checks if a path has the frame extension.
    fn is_frame(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension))
    }

    /// Relative path as a string. Names that are not UTF-8 are escaped
    /// byte-wise so distinct files keep distinct ids.
    fn frame_id(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.dir).unwrap_or(path);
        relative.to_str().map_or_else(
            || relative.as_os_str().as_encoded_bytes().escape_ascii().to_string(),
            ToOwned::to_owned,
        )
    }

    fn resolve(&self, frame: &str) -> PathBuf {
        self.listing()
            .ok()
            .and_then(|listing| listing.paths.get(frame).cloned())
            .unwrap_or_else(|| self.dir.join(frame))
    }
}

impl FrameSource for FsFrameSource {
    fn frames(&self) -> Box<dyn Iterator<Item = Result<String, FrameError>> + Send + '_> {
        match self.listing() {
            Ok(listing) => Box::new(listing.ids.iter().cloned().map(Ok)),
            Err(e) => Box::new(std::iter::once(Err(FrameError::Io(e)))),
        }
    }

    fn count_hint(&self) -> Option<usize> {
        self.listing().ok().map(|listing| listing.ids.len())
    }

    fn descriptor(&self, frame: &str) -> Result<FrameDescriptor, FrameError> {
        dpx::read_descriptor(&self.resolve(frame))
    }

    fn load_pixels(
        &self,
        frame: &str,
        descriptor: &FrameDescriptor,
    ) -> Result<Vec<u8>, FrameError> {
        dpx::read_pixels(&self.resolve(frame), descriptor)
    }
}
