use crate::error::{PutError, Result};
use number_prefix::{NumberPrefix, Prefix};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Capacity figures for the volume holding a directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskUsage {
    pub total: u64,
    pub used: u64,
    /// Space available to an unprivileged user.
    pub free: u64,
}

/// Human readable file size.
///
/// Units step by 1024 and stop at PB. Plain byte counts carry no decimals,
/// every larger unit carries one, so 1536 renders as "1.5 kB". This departs
/// from the older unit table that printed kB without decimals.
pub fn sizeof_fmt(num: u64) -> String {
    match num {
        0 => return "0 bytes".to_string(),
        1 => return "1 byte".to_string(),
        _ => {}
    }
    match NumberPrefix::binary(num as f64) {
        NumberPrefix::Standalone(bytes) => format!("{:.0} bytes", bytes),
        NumberPrefix::Prefixed(prefix, n) => {
            let (unit, n) = match prefix {
                Prefix::Mebi => ("MB", n),
                Prefix::Gibi => ("GB", n),
                Prefix::Tebi => ("TB", n),
                Prefix::Pebi => ("PB", n),
                // Past PB the table is clamped
                Prefix::Exbi => ("PB", n * 1024.0),
                Prefix::Zebi => ("PB", n * 1024.0 * 1024.0),
                Prefix::Yobi => ("PB", n * 1024.0 * 1024.0 * 1024.0),
                _ => ("kB", n),
            };
            format!("{:.1} {}", n, unit)
        }
    }
}

/// Right-justified size used by the stats footer.
pub fn render_size(size: u64) -> String {
    format!("{:>8}", sizeof_fmt(size))
}

/// Terminal column width of a string.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Replaces each tab with spaces up to the next multiple of `tabsize`.
pub fn expand_tabs(s: &str, tabsize: usize) -> String {
    let mut out = String::with_capacity(s.len() + tabsize);
    let mut column = 0usize;
    for ch in s.chars() {
        match ch {
            '\t' => {
                if tabsize == 0 {
                    continue;
                }
                let pad = tabsize - column % tabsize;
                out.extend(std::iter::repeat_n(' ', pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(ch);
                column = 0;
            }
            _ => {
                out.push(ch);
                let mut buf = [0u8; 4];
                column += display_width(ch.encode_utf8(&mut buf));
            }
        }
    }
    out
}

/// Reads total, used and free bytes for the volume containing `path`.
pub fn disk_usage(path: &Path) -> Result<DiskUsage> {
    let io_err = |e| PutError::from_io(path, e);
    let total = fs2::total_space(path).map_err(io_err)?;
    let fs_free = fs2::free_space(path).map_err(io_err)?;
    let free = fs2::available_space(path).map_err(io_err)?;
    Ok(DiskUsage {
        total,
        used: total.saturating_sub(fs_free),
        free,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizeof_fmt_small_values() {
        assert_eq!(sizeof_fmt(0), "0 bytes");
        assert_eq!(sizeof_fmt(1), "1 byte");
        assert_eq!(sizeof_fmt(2), "2 bytes");
        assert_eq!(sizeof_fmt(1023), "1023 bytes");
    }

    #[test]
    fn sizeof_fmt_scaled_values() {
        assert_eq!(sizeof_fmt(1024), "1.0 kB");
        assert_eq!(sizeof_fmt(1536), "1.5 kB");
        assert_eq!(sizeof_fmt(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(sizeof_fmt(1_073_741_824), "1.0 GB");
        assert_eq!(sizeof_fmt(1u64 << 40), "1.0 TB");
        assert_eq!(sizeof_fmt(1u64 << 50), "1.0 PB");
    }

    #[test]
    fn sizeof_fmt_clamps_to_petabytes() {
        assert_eq!(sizeof_fmt(1u64 << 60), "1024.0 PB");
    }

    #[test]
    fn render_size_is_right_justified() {
        assert_eq!(render_size(0), " 0 bytes");
        assert_eq!(render_size(1536), "  1.5 kB");
    }

    #[test]
    fn expand_tabs_pads_to_next_stop() {
        assert_eq!(expand_tabs("ab\t", 4), "ab  ");
        assert_eq!(expand_tabs("abcd\t", 4), "abcd    ");
        assert_eq!(expand_tabs("\tx", 3), "   x");
        assert_eq!(expand_tabs("no tabs", 8), "no tabs");
    }

    #[test]
    fn disk_usage_reports_consistent_figures() -> Result<()> {
        let usage = disk_usage(Path::new("."))?;
        assert!(usage.total >= usage.used);
        assert!(usage.total >= usage.free);
        Ok(())
    }
}
