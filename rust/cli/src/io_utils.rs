//! File I/O helpers for reports and the history file.
//!
//! Paths ending in `.zst` are transparently Zstandard-compressed on write and
//! decompressed on read. Errors are returned as `String` for easy integration with
//! command error handling.

use std::path::Path;

/// Read text file with automatic .zst decompression detection.
///
/// A leading UTF-8 BOM is stripped.
///
/// ```rust,no_run
/// # use wheelsim_cli::io_utils::read_text_auto;
/// let report = read_text_auto("output/report.json.zst").unwrap();
/// ```
pub fn read_text_auto(path: &str) -> Result<String, String> {
    let mut content = if path.ends_with(".zst") {
        let comp = std::fs::read(path).map_err(|e| e.to_string())?;
        let dec = zstd::bulk::decompress(&comp, 64 * 1024 * 1024).map_err(|e| e.to_string())?;
        String::from_utf8(dec).map_err(|e| e.to_string())?
    } else {
        std::fs::read_to_string(path).map_err(|e| e.to_string())?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Writes `content` to `path`, compressing when the path ends in `.zst`.
///
/// Missing parent directories are created.
pub fn write_text_auto(path: &str, content: &str) -> Result<(), String> {
    ensure_parent_dir(Path::new(path))?;
    if path.ends_with(".zst") {
        let comp = zstd::bulk::compress(content.as_bytes(), 3).map_err(|e| e.to_string())?;
        std::fs::write(path, comp).map_err(|e| e.to_string())
    } else {
        std::fs::write(path, content).map_err(|e| e.to_string())
    }
}

/// Ensure parent directory exists for given path, creating if needed.
pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_strip_utf8_bom() {
        let mut s = "\u{feff}hello".to_string();
        strip_utf8_bom(&mut s);
        assert_eq!(s, "hello");

        let mut s = "hello".to_string();
        strip_utf8_bom(&mut s);
        assert_eq!(s, "hello");
    }

    #[test]
    fn test_ensure_parent_dir_creates_directory() {
        let temp_dir = tempdir().unwrap();
        let nested_path = temp_dir.path().join("subdir").join("file.txt");

        ensure_parent_dir(&nested_path).unwrap();
        assert!(temp_dir.path().join("subdir").is_dir());
    }

    #[test]
    fn test_ensure_parent_dir_bare_file_name() {
        assert!(ensure_parent_dir(Path::new("file.txt")).is_ok());
    }

    #[test]
    fn test_plain_and_compressed_files_read_back() {
        let temp_dir = tempdir().unwrap();
        let body = "{\"flat\": 1}";
        for name in ["out/report.json", "out/report.json.zst"] {
            let path = temp_dir.path().join(name);
            let path = path.to_str().unwrap();
            write_text_auto(path, body).unwrap();
            assert_eq!(read_text_auto(path).unwrap(), body);
        }
        let raw = std::fs::read(temp_dir.path().join("out/report.json.zst")).unwrap();
        assert_ne!(raw, body.as_bytes());
    }

    #[test]
    fn test_read_missing_file_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("missing.json");
        assert!(read_text_auto(path.to_str().unwrap()).is_err());
    }
}
