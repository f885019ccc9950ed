use crate::{
    error::{PutError, Result},
    utils::expand_tabs,
};
use chrono::{DateTime, Local};
use std::{
    ffi::{OsStr, OsString},
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

/// Snapshot of one directory entry's filesystem facts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMetadata {
    pub name: OsString,
    pub full_path: PathBuf,
    pub is_symlink: bool,
    pub is_broken_link: bool,
    pub is_dir: bool,
    pub size: u64,
    pub modified_time: Option<SystemTime>,
}

impl EntryMetadata {
    /// Resolves `name` inside `dir`.
    ///
    /// Links are followed for directory flag, size and mtime. A link whose
    /// target cannot be reached is reported broken with size 0 and no mtime.
    /// Fails with [`PutError::NotFound`] if the entry itself is gone.
    pub fn resolve(dir: &Path, name: &OsStr) -> Result<Self> {
        let full_path = dir.join(name);
        let link_meta =
            fs::symlink_metadata(&full_path).map_err(|e| PutError::from_io(&full_path, e))?;
        let is_symlink = link_meta.file_type().is_symlink();

        let target_meta = if is_symlink {
            fs::metadata(&full_path).ok()
        } else {
            Some(link_meta)
        };

        let metadata = match target_meta {
            Some(m) => Self {
                name: name.to_os_string(),
                full_path,
                is_symlink,
                is_broken_link: false,
                is_dir: m.is_dir(),
                size: m.len(),
                modified_time: m.modified().ok(),
            },
            None => Self {
                name: name.to_os_string(),
                full_path,
                is_symlink,
                is_broken_link: true,
                is_dir: false,
                size: 0,
                modified_time: None,
            },
        };
        Ok(metadata)
    }

    pub fn display_name(&self) -> String {
        self.name.to_string_lossy().into_owned()
    }

    /// Fixed-format listing row: name column, 10-wide size, mtime.
    pub fn render(&self, max_name_len: usize) -> String {
        let mut name = self.display_name();
        if self.is_dir {
            name.push('/');
        }
        let name = expand_tabs(&format!("{}\t", name), max_name_len + 2);
        let size = if self.is_broken_link {
            "N/A".to_string()
        } else {
            self.size.to_string()
        };
        format!("{}{:>10}  {}", name, size, self.render_mtime())
    }

    fn render_mtime(&self) -> String {
        match self.modified_time {
            Some(mtime) if !self.is_broken_link => {
                let dt: DateTime<Local> = DateTime::from(mtime);
                dt.format("%Y-%m-%d %H:%M").to_string()
            }
            _ => "N/A".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    fn sample(name: &str, is_dir: bool, is_broken_link: bool) -> EntryMetadata {
        EntryMetadata {
            name: OsString::from(name),
            full_path: PathBuf::from("/tmp").join(name),
            is_symlink: is_broken_link,
            is_broken_link,
            is_dir,
            size: if is_broken_link { 0 } else { 42 },
            modified_time: if is_broken_link {
                None
            } else {
                Some(UNIX_EPOCH + Duration::from_secs(86_400 * 365))
            },
        }
    }

    #[test]
    fn render_pads_name_and_sizes() {
        let row = sample("a.txt", false, false).render(12);
        assert!(row.starts_with("a.txt         "));
        assert_eq!(row.get(14..24), Some("        42"));
        assert_eq!(row.get(24..26), Some("  "));
        // YYYY-MM-DD HH:MM
        assert_eq!(row.len(), 14 + 10 + 2 + 16);
    }

    #[test]
    fn render_marks_directories() {
        let row = sample("docs", true, false).render(4);
        assert!(row.starts_with("docs/ "));
        assert_eq!(row.get(6..16), Some("        42"));
    }

    #[test]
    fn render_broken_link_shows_na() {
        let row = sample("dangling", false, true).render(8);
        assert_eq!(row, format!("dangling  {:>10}  N/A", "N/A"));
    }
}
