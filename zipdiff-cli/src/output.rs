//! Output destinations.
//!
//! Nothing reaches the destination unless rendering succeeds. Standard
//! output is buffered in memory; files are rendered into a temporary file
//! next to the destination, which then replaces it.

use std::io::{self, BufWriter, Cursor, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;
use zipdiff_core::{Result, ZipDiffError};
use zipdiff_output::RenderSink;

/// Destination name meaning standard output.
pub const STDOUT: &str = "-";

/// Whether `dest` designates standard output.
pub fn is_stdout(dest: &Path) -> bool {
    dest.as_os_str() == STDOUT
}

/// Run `render` against a sink for `dest` and publish the result only if it
/// succeeds.
pub fn write_rendered<F>(dest: &Path, render: F) -> Result<()>
where
    F: FnOnce(&mut dyn RenderSink) -> Result<()>,
{
    if is_stdout(dest) {
        let mut buffer = Cursor::new(Vec::new());
        render(&mut buffer)?;

        let mut stdout = io::stdout().lock();
        return stdout
            .write_all(buffer.get_ref())
            .and_then(|()| stdout.flush())
            .map_err(|e| write_error(dest, e));
    }

    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(|e| write_error(dest, e))?;
    debug!(staged = %staged.path().display(), "rendering into temporary file");

    {
        let mut writer = BufWriter::new(staged.as_file_mut());
        render(&mut writer)?;
        writer.flush().map_err(|e| write_error(dest, e))?;
    }

    staged.persist(dest).map_err(|e| write_error(dest, e.error))?;
    Ok(())
}

fn write_error(dest: &Path, err: io::Error) -> ZipDiffError {
    ZipDiffError::render(format!("cannot write {}: {err}", dest.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn entries_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_is_stdout() {
        assert!(is_stdout(Path::new("-")));
        assert!(!is_stdout(Path::new("out.txt")));
        assert!(!is_stdout(Path::new("./-")));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        write_rendered(&path, |sink| {
            sink.write_all(b"Total differences: 0\n")?;
            Ok(())
        })
        .unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"Total differences: 0\n");
        assert_eq!(entries_in(dir.path()), vec!["report.txt"]);
    }

    #[test]
    fn test_existing_file_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        fs::write(&path, b"a much longer previous report").unwrap();

        write_rendered(&path, |sink| {
            sink.write_all(b"new")?;
            Ok(())
        })
        .unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn test_failed_render_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patch.zip");
        let err = write_rendered(&path, |sink| {
            sink.write_all(b"PK\x03\x04 half an archive")?;
            Err(ZipDiffError::entry_not_found("a.txt"))
        })
        .unwrap_err();

        assert!(matches!(err, ZipDiffError::EntryNotFound { .. }));
        assert!(entries_in(dir.path()).is_empty());
    }

    #[test]
    fn test_unwritable_destination_is_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.txt");
        let err = write_rendered(&path, |_| Ok(())).unwrap_err();
        assert!(matches!(err, ZipDiffError::Render { .. }));
    }
}
