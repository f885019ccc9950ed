use crate::{
    error::{DeletionError, PutError, Result},
    metadata::EntryMetadata,
    utils::{DiskUsage, disk_usage, display_width},
};
use std::{
    collections::BTreeSet,
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Name column width used when the listing is empty
pub const EMPTY_NAME_WIDTH: usize = 12;

/// Listing of one directory plus the set of selected entries.
///
/// Selection indices point into the current `entries` order, so every
/// reload clears the selection.
#[derive(Debug, Clone)]
pub struct DirectoryModel {
    working_dir: PathBuf,
    entries: Vec<OsString>,
    selected: BTreeSet<usize>,
    max_name_len: usize,
    total_size: u64,
    selected_size: u64,
    disk: DiskUsage,
}

impl DirectoryModel {
    pub fn new(path: &Path) -> Result<Self> {
        Self::load(path)
    }

    /// Switches to `path`. On error the current listing is kept untouched.
    pub fn change_directory(&mut self, path: &Path) -> Result<()> {
        let next = Self::load(path)?;
        info!(from = %self.working_dir.display(), to = %next.working_dir.display(), "changed directory");
        *self = next;
        Ok(())
    }

    /// Re-reads disk usage, the listing and all sizes. Clears the selection.
    pub fn refresh(&mut self) -> Result<()> {
        *self = Self::load(&self.working_dir)?;
        Ok(())
    }

    fn load(path: &Path) -> Result<Self> {
        let invalid = |reason: String| PutError::InvalidDirectory {
            path: path.to_path_buf(),
            reason,
        };
        let meta = fs::metadata(path).map_err(|e| invalid(e.to_string()))?;
        if !meta.is_dir() {
            return Err(invalid("not a directory".to_string()));
        }
        let working_dir = fs::canonicalize(path).map_err(|e| invalid(e.to_string()))?;
        let disk = disk_usage(&working_dir)?;

        let mut names = Vec::new();
        for entry in fs::read_dir(&working_dir).map_err(|e| invalid(e.to_string()))? {
            match entry {
                Ok(e) => names.push(e.file_name()),
                Err(e) => warn!("Skipping unreadable entry in {}: {}", working_dir.display(), e),
            }
        }
        names.sort();

        let mut entries = Vec::with_capacity(names.len());
        let mut total_size = 0u64;
        for name in names {
            match EntryMetadata::resolve(&working_dir, &name) {
                Ok(m) => {
                    entries.push(name);
                    total_size += m.size;
                }
                Err(PutError::NotFound { path }) => {
                    debug!("Entry vanished while listing: {}", path.display());
                }
                Err(e) => {
                    warn!("Could not stat entry: {}", e);
                    entries.push(name);
                }
            }
        }

        let max_name_len = entries
            .iter()
            .map(|n| display_width(&n.to_string_lossy()))
            .max()
            .unwrap_or(EMPTY_NAME_WIDTH);

        debug!(
            dir = %working_dir.display(),
            entries = entries.len(),
            total_size,
            "listed directory"
        );

        Ok(Self {
            working_dir,
            entries,
            selected: BTreeSet::new(),
            max_name_len,
            total_size,
            selected_size: 0,
            disk,
        })
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(PutError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
        }
    }

    pub fn select_entry(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.selected.insert(index);
        self.recalculate_selected_size();
        Ok(())
    }

    /// Removes `index` from the selection. Unselected or unknown indices are ignored.
    pub fn unselect_entry(&mut self, index: usize) {
        if self.selected.remove(&index) {
            self.recalculate_selected_size();
        }
    }

    /// Re-stats every selected entry. Entries that can no longer be read count as 0.
    fn recalculate_selected_size(&mut self) {
        let mut size = 0;
        for name in self.selected.iter().filter_map(|&i| self.entries.get(i)) {
            match EntryMetadata::resolve(&self.working_dir, name) {
                Ok(m) => size += m.size,
                Err(e) => warn!("Not counting selected entry: {}", e),
            }
        }
        self.selected_size = size;
    }

    /// Deletes every selected entry, then refreshes.
    ///
    /// Each failure is collected and the remaining entries are still
    /// attempted. Directories are refused rather than removed. If the final
    /// refresh fails the listing is emptied and the failures travel inside
    /// [`PutError::DeleteRefresh`].
    pub fn delete_selected(&mut self) -> Result<Vec<DeletionError>> {
        let targets = self.selected_paths();
        self.selected.clear();
        self.selected_size = 0;

        let mut failures = Vec::new();
        for path in targets {
            match delete_entry(&path) {
                Ok(()) => info!("Deleted {}", path.display()),
                Err(source) => {
                    warn!("Could not delete {}: {}", path.display(), source);
                    failures.push(DeletionError { path, source });
                }
            }
        }

        if let Err(e) = self.refresh() {
            warn!("Could not re-list {} after delete: {}", self.working_dir.display(), e);
            self.clear_listing();
            return Err(PutError::DeleteRefresh {
                failures,
                source: Box::new(e),
            });
        }
        Ok(failures)
    }

    fn clear_listing(&mut self) {
        self.entries.clear();
        self.selected.clear();
        self.max_name_len = EMPTY_NAME_WIDTH;
        self.total_size = 0;
        self.selected_size = 0;
    }

    pub fn entry_path(&self, index: usize) -> Result<PathBuf> {
        self.entries
            .get(index)
            .map(|name| self.working_dir.join(name))
            .ok_or(PutError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    /// Fresh metadata for the entry at `index`.
    pub fn entry_metadata(&self, index: usize) -> Result<EntryMetadata> {
        match self.entries.get(index) {
            Some(name) => EntryMetadata::resolve(&self.working_dir, name),
            None => Err(PutError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            }),
        }
    }

    pub fn selected_paths(&self) -> Vec<PathBuf> {
        self.selected
            .iter()
            .filter_map(|&i| self.entries.get(i))
            .map(|name| self.working_dir.join(name))
            .collect()
    }

    // Accessors

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn entries(&self) -> &[OsString] {
        &self.entries
    }

    pub fn selected_indices(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn file_count(&self) -> usize {
        self.entries.len()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn max_name_len(&self) -> usize {
        self.max_name_len
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn selected_size(&self) -> u64 {
        self.selected_size
    }

    pub fn disk_usage(&self) -> DiskUsage {
        self.disk
    }

    pub fn disk_total(&self) -> u64 {
        self.disk.total
    }

    pub fn disk_used(&self) -> u64 {
        self.disk.used
    }

    pub fn disk_free(&self) -> u64 {
        self.disk.free
    }
}

fn delete_entry(path: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(path)?;
    if meta.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::IsADirectory,
            "directories are not deleted",
        ));
    }
    fs::remove_file(path)
}
