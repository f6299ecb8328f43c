//! Reading and writing inventory files: UTF-8 text, one path per line.

use crate::app::error::InventoryError;
use crate::app::models::LineSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

/// Reads an inventory into a set, dropping empty lines and duplicates.
pub fn read_lines(path: &Path) -> Result<LineSet, InventoryError> {
    let read_err = |source: std::io::Error| match source.kind() {
        ErrorKind::NotFound => InventoryError::NotFound {
            path: path.to_path_buf(),
        },
        _ => InventoryError::Read {
            path: path.to_path_buf(),
            source,
        },
    };

    let file = File::open(path).map_err(read_err)?;
    let mut lines = LineSet::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(read_err)?;
        if !line.is_empty() {
            lines.insert(line);
        }
    }
    Ok(lines)
}

/// Writes `files` to `path`, one per line.
///
/// Content goes to a temporary file next to `path` which replaces it only
/// after a full flush, so a failure never leaves a half-written inventory.
pub fn write_inventory(path: &Path, files: &[String]) -> Result<(), InventoryError> {
    let write_err = |source| InventoryError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let tmp = temp_builder().tempfile_in(dir).map_err(write_err)?;
    // Replacing an existing inventory keeps its mode.
    if let Ok(existing) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(write_err)?;
    }
    let mut writer = BufWriter::new(tmp);
    for file in files {
        writeln!(writer, "{}", file).map_err(write_err)?;
    }
    let tmp = writer.into_inner().map_err(|e| write_err(e.into_error()))?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// New inventories get 0666 minus the umask, like any freshly created file.
fn temp_builder() -> tempfile::Builder<'static, 'static> {
    #[allow(unused_mut)]
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn read_strips_terminators_and_blank_lines() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("inv.txt");
        fs::write(&path, "a.txt\r\n\nb.txt\na.txt\n\n").unwrap();

        let lines = read_lines(&path).unwrap();

        assert_eq!(lines.into_iter().collect::<Vec<_>>(), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn read_keeps_last_line_without_newline() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("inv.txt");
        fs::write(&path, "first\nlast").unwrap();

        let lines = read_lines(&path).unwrap();

        assert!(lines.contains("last"));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn read_missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();

        let err = read_lines(&tmp.path().join("missing.txt")).unwrap_err();

        assert!(matches!(err, InventoryError::NotFound { .. }));
    }

    #[test]
    fn read_rejects_invalid_utf8() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bin.txt");
        fs::write(&path, [0x66, 0xff, 0x0a]).unwrap();

        let err = read_lines(&path).unwrap_err();

        assert!(matches!(err, InventoryError::Read { .. }));
    }

    #[test]
    fn write_one_path_per_line() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.txt");
        let files = vec![
            "/path/to/file1.txt".to_string(),
            "/path/to/file2.mp3".to_string(),
            "/another/path/file3.doc".to_string(),
        ];

        write_inventory(&path, &files).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "/path/to/file1.txt\n/path/to/file2.mp3\n/another/path/file3.doc\n"
        );
    }

    #[test]
    fn write_empty_list_truncates() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.txt");
        fs::write(&path, "stale\n").unwrap();

        write_inventory(&path, &[]).unwrap();

        assert_eq!(fs::read(&path).unwrap().len(), 0);
    }

    #[test]
    fn write_into_missing_directory_fails_cleanly() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("no/such/dir/out.txt");

        let err = write_inventory(&path, &["a".to_string()]).unwrap_err();

        assert!(matches!(err, InventoryError::Write { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn written_inventory_reads_back_as_set() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("inv.txt");
        let files = vec!["b".to_string(), "a".to_string()];

        write_inventory(&path, &files).unwrap();
        let lines = read_lines(&path).unwrap();

        assert_eq!(lines.len(), 2);
        assert!(lines.contains("a") && lines.contains("b"));
    }

    #[cfg(unix)]
    #[test]
    fn new_inventory_gets_default_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let reference = tmp.path().join("reference.txt");
        File::create(&reference).unwrap();
        let path = tmp.path().join("inv.txt");

        write_inventory(&path, &["a".to_string()]).unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), mode(&reference));
    }

    #[cfg(unix)]
    #[test]
    fn replacing_inventory_keeps_its_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("inv.txt");
        fs::write(&path, "old\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        write_inventory(&path, &["new".to_string()]).unwrap();

        assert_eq!(fs::metadata(&path).unwrap().permissions().mode() & 0o777, 0o640);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }
}
