// THEORY:
// `walk_files` lists every file under a root as a lazy iterator. It keeps a
// stack of pending entries and only reads a directory when the walk reaches
// it, so the caller drives the traversal with a plain `for` loop.
//
// Entries inside a directory are visited in file name order to keep batch
// output reproducible. Children are classified with `DirEntry::file_type`,
// which does not follow symlinks: a symlinked directory is reported as a plain
// path and never descended into, and no child is ever stat'ed. Only the root
// itself is resolved. Errors carry the path that failed; the caller decides
// whether they are fatal.

use crate::error::{Result, RoadError};
use std::fs;
use std::path::{Path, PathBuf};

enum Pending {
    Dir(PathBuf),
    File(PathBuf),
}

/// Depth-first iterator over the files below a root path.
pub struct TrackFiles {
    root: Option<PathBuf>,
    /// Entries still to visit, the next one at the end.
    pending: Vec<Pending>,
}

pub fn walk_files(root: impl AsRef<Path>) -> TrackFiles {
    TrackFiles {
        root: Some(root.as_ref().to_path_buf()),
        pending: Vec::new(),
    }
}

impl TrackFiles {
    fn push_children(&mut self, dir: &Path) -> Result<()> {
        let mut children = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| RoadError::io(dir, e))? {
            let entry = entry.map_err(|e| RoadError::io(dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| RoadError::io(&path, e))?;
            children.push(if file_type.is_dir() {
                Pending::Dir(path)
            } else {
                Pending::File(path)
            });
        }

        children.sort_by(|a, b| a.path().cmp(b.path()));
        // Reverse so the smallest name is popped first.
        self.pending.extend(children.into_iter().rev());
        Ok(())
    }
}

impl Pending {
    fn path(&self) -> &Path {
        match self {
            Pending::Dir(path) | Pending::File(path) => path,
        }
    }
}

impl Iterator for TrackFiles {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            match fs::metadata(&root) {
                Ok(metadata) if metadata.is_dir() => self.pending.push(Pending::Dir(root)),
                Ok(_) => return Some(Ok(root)),
                Err(e) => return Some(Err(RoadError::io(root, e))),
            }
        }

        while let Some(entry) = self.pending.pop() {
            match entry {
                Pending::File(path) => return Some(Ok(path)),
                Pending::Dir(dir) => {
                    if let Err(e) = self.push_children(&dir) {
                        return Some(Err(e));
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    fn relative(root: &Path) -> Vec<PathBuf> {
        walk_files(root)
            .collect::<Result<Vec<_>>>()
            .unwrap()
            .into_iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect()
    }

    #[test]
    fn lists_nested_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("b.png"));
        touch(&root.join("a/z.png"));
        touch(&root.join("a/nested/deep.png"));
        touch(&root.join("c.txt"));

        assert_eq!(
            relative(root),
            vec![
                PathBuf::from("a/nested/deep.png"),
                PathBuf::from("a/z.png"),
                PathBuf::from("b.png"),
                PathBuf::from("c.txt"),
            ]
        );
    }

    #[test]
    fn empty_directory_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(walk_files(dir.path()).count(), 0);
    }

    #[test]
    fn file_root_yields_itself() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("background_solo.png");
        touch(&file);

        let files: Vec<_> = walk_files(&file).collect::<Result<_>>().unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn missing_root_is_an_error_naming_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let mut walk = walk_files(&missing);

        match walk.next() {
            Some(Err(RoadError::Io { path, source })) => {
                assert_eq!(path, missing);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected an I/O error, got {other:?}"),
        }
        assert!(walk.next().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_cycle_is_not_followed() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("a/background_x.png"));
        std::os::unix::fs::symlink(root, root.join("a/loop")).unwrap();

        assert_eq!(
            relative(root),
            vec![PathBuf::from("a/background_x.png"), PathBuf::from("a/loop")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_listed_without_error() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::os::unix::fs::symlink(root.join("gone.md"), root.join("readme_link")).unwrap();

        assert_eq!(relative(root), vec![PathBuf::from("readme_link")]);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_error_names_that_directory() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can still read the directory; nothing to check then.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let errors: Vec<RoadError> = walk_files(dir.path()).filter_map(|r| r.err()).collect();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], RoadError::Io { path, .. } if *path == locked));
    }
}
