use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};
use zipdiff_archive::{TreeOptions, build_tree};
use zipdiff_core::{ComparePolicy, DifferenceSet, ZipDiffError, compare_trees};
use zipdiff_output::{ArchiveRenderer, OutputRenderer, RendererKind};

fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, SimpleFileOptions::default()).unwrap();
        } else {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(data).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

fn write_zip(dir: &Path, file_name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, zip_bytes(entries)).unwrap();
    path
}

/// Old and new releases of an application, both under a `root/` folder.
fn releases(dir: &Path) -> (PathBuf, PathBuf) {
    let old_lib = zip_bytes(&[("Foo.class", b"foo".as_slice())]);
    let new_lib = zip_bytes(&[("Foo.class", b"foo".as_slice()), ("Bar.class", b"bar".as_slice())]);

    let old = write_zip(
        dir,
        "old.zip",
        &[
            ("root/a.txt", b"same".as_slice()),
            ("root/b.txt", b"before".as_slice()),
            ("root/gone.txt", b"gone".as_slice()),
            ("root/lib.jar", old_lib.as_slice()),
        ],
    );
    let new = write_zip(
        dir,
        "new.zip",
        &[
            ("root/a.txt", b"same".as_slice()),
            ("root/b.txt", b"after, longer".as_slice()),
            ("root/c.txt", b"brand new".as_slice()),
            ("root/dir/", b"".as_slice()),
            ("root/lib.jar", new_lib.as_slice()),
        ],
    );
    (old, new)
}

fn diff_of(old: &Path, new: &Path, skip: usize) -> DifferenceSet {
    let options = TreeOptions::new().with_skip_prefixes(skip);
    let tree1 = build_tree(old, &options).unwrap();
    let tree2 = build_tree(new, &options).unwrap();
    compare_trees(&tree1, &tree2, &ComparePolicy::default())
}

fn render_zip(target: &Path, output_skip: usize, diff: &DifferenceSet) -> ZipArchive<Cursor<Vec<u8>>> {
    let mut out = Cursor::new(Vec::new());
    RendererKind::Zip
        .renderer(target)
        .render(&mut out, output_skip, diff)
        .unwrap();
    out.set_position(0);
    ZipArchive::new(out).unwrap()
}

fn sorted_names(archive: &ZipArchive<Cursor<Vec<u8>>>) -> Vec<String> {
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    names
}

fn read_entry(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> Vec<u8> {
    let mut data = Vec::new();
    archive.by_name(name).unwrap().read_to_end(&mut data).unwrap();
    data
}

#[test]
fn test_rebuild_holds_added_and_changed_entries() {
    let dir = tempfile::tempdir().unwrap();
    let (old, new) = releases(dir.path());
    let diff = diff_of(&old, &new, 1);

    assert!(diff.added().contains_key("lib.jar!Bar.class"));
    assert!(diff.removed().contains_key("gone.txt"));

    let mut rebuilt = render_zip(&new, 0, &diff);
    assert_eq!(sorted_names(&rebuilt), vec!["b.txt", "c.txt", "dir/", "lib.jar"]);
    assert_eq!(read_entry(&mut rebuilt, "b.txt"), b"after, longer");
    assert_eq!(read_entry(&mut rebuilt, "c.txt"), b"brand new");
    assert!(rebuilt.by_name("dir/").unwrap().is_dir());

    let lib = read_entry(&mut rebuilt, "lib.jar");
    let mut lib = ZipArchive::new(Cursor::new(lib)).unwrap();
    assert_eq!(lib.len(), 2);
    assert_eq!(read_entry(&mut lib, "Bar.class"), b"bar");
}

#[test]
fn test_rebuild_applies_output_skip() {
    let dir = tempfile::tempdir().unwrap();
    let (old, new) = releases(dir.path());
    let diff = diff_of(&old, &new, 0);

    let rebuilt = render_zip(&new, 1, &diff);
    assert_eq!(sorted_names(&rebuilt), vec!["b.txt", "c.txt", "dir/", "lib.jar"]);

    let collapsed = render_zip(&new, 2, &diff);
    assert_eq!(collapsed.len(), 0);
}

#[test]
fn test_rebuild_without_differences_is_an_empty_archive() {
    let dir = tempfile::tempdir().unwrap();
    let (_, new) = releases(dir.path());
    let diff = diff_of(&new, &new, 0);

    let rebuilt = render_zip(&new, 0, &diff);
    assert_eq!(rebuilt.len(), 0);
}

#[test]
fn test_rebuild_from_wrong_archive_is_entry_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let (old, new) = releases(dir.path());
    let diff = diff_of(&old, &new, 0);

    let mut out = Cursor::new(Vec::new());
    let err = ArchiveRenderer::new(&old).render(&mut out, 0, &diff).unwrap_err();
    assert!(matches!(err, ZipDiffError::EntryNotFound { .. }));
}

#[test]
fn test_rebuild_from_missing_archive_is_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let (old, new) = releases(dir.path());
    let diff = diff_of(&old, &new, 0);

    let mut out = Cursor::new(Vec::new());
    let err = ArchiveRenderer::new(dir.path().join("missing.zip"))
        .render(&mut out, 0, &diff)
        .unwrap_err();
    assert!(matches!(err, ZipDiffError::ArchiveOpen { .. }));
    assert!(out.get_ref().is_empty());
}

#[test]
fn test_text_output_for_real_archives() {
    let dir = tempfile::tempdir().unwrap();
    let (old, new) = releases(dir.path());
    let diff = diff_of(&old, &new, 1);

    let mut out = Cursor::new(Vec::new());
    RendererKind::Text.renderer(&new).render(&mut out, 0, &diff).unwrap();
    let text = String::from_utf8(out.into_inner()).unwrap();

    assert!(text.contains("\t[added] lib.jar!Bar.class\n"));
    assert!(text.contains("\t[removed] gone.txt\n"));
    assert!(text.contains("\t[changed] b.txt (size: 6 : 13)\n"));
    assert!(text.ends_with(&format!("Total differences: {}\n", diff.total())));
}

/// A destination that accepts `capacity` bytes and then reports a full disk.
struct FullDisk {
    inner: Cursor<Vec<u8>>,
    capacity: usize,
}

impl Write for FullDisk {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let room = self.capacity.saturating_sub(self.inner.get_ref().len());
        if room == 0 {
            return Err(io::Error::other("no space left on device"));
        }
        self.inner.write(&buf[..buf.len().min(room)])
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for FullDisk {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

#[test]
fn test_rebuild_write_failure_is_render_error() {
    let dir = tempfile::tempdir().unwrap();
    let (old, new) = releases(dir.path());
    let diff = diff_of(&old, &new, 1);

    let mut sink = FullDisk {
        inner: Cursor::new(Vec::new()),
        capacity: 64,
    };
    let err = ArchiveRenderer::new(&new)
        .render(&mut sink, 0, &diff)
        .unwrap_err();
    assert!(matches!(err, ZipDiffError::Render { .. }), "{err}");
}
