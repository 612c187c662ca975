//! Transcript discovery.
//!
//! Finds CHAT transcript files (`.cha`) under each configured input
//! directory. A directory that does not exist is not an error: it is
//! reported as missing and contributes no files.

use std::path::{Path, PathBuf};

use chabatch_common::error::ChabatchResult;
use serde::Serialize;

/// Discovery report for one input directory.
#[derive(Debug, Clone, Serialize)]
pub struct DirReport {
    /// The configured directory path.
    pub path: PathBuf,

    /// Whether the directory existed at discovery time.
    pub exists: bool,

    /// All `.cha` files found under the directory, sorted.
    pub files: Vec<PathBuf>,
}

impl DirReport {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Find all `.cha` files under each directory, recursively.
pub fn find_cha_files(dirs: &[PathBuf]) -> ChabatchResult<Vec<DirReport>> {
    dirs.iter().map(|dir| scan_dir(dir)).collect()
}

fn scan_dir(dir: &Path) -> ChabatchResult<DirReport> {
    if !dir.is_dir() {
        return Ok(DirReport {
            path: dir.to_path_buf(),
            exists: false,
            files: Vec::new(),
        });
    }

    let mut files = Vec::new();
    walk(dir, &mut files)?;
    files.sort();

    Ok(DirReport {
        path: dir.to_path_buf(),
        exists: true,
        files,
    })
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        // file_type() does not follow symlinks; a directory symlink could
        // form a cycle and recurse forever.
        if entry.file_type()?.is_dir() {
            walk(&path, out)?;
        } else if is_cha_file(&path) {
            out.push(path);
        }
    }
    Ok(())
}

fn is_cha_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("cha"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "@UTF8\n@Begin\n@End\n").unwrap();
    }

    #[test]
    fn finds_cha_files_recursively_and_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("ENNI_B1_TD");
        touch(&root.join("b.cha"));
        touch(&root.join("a.cha"));
        touch(&root.join("nested/deep/c.cha"));
        touch(&root.join("notes.txt"));

        let reports = find_cha_files(&[root.clone()]).unwrap();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].exists);
        assert_eq!(reports[0].file_count(), 3);
        assert_eq!(reports[0].files[0], root.join("a.cha"));
        assert_eq!(reports[0].files[1], root.join("b.cha"));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("data");
        touch(&root.join("upper.CHA"));

        let reports = find_cha_files(&[root]).unwrap();
        assert_eq!(reports[0].file_count(), 1);
    }

    #[test]
    #[cfg(unix)]
    fn directory_symlink_cycles_do_not_recurse() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("data");
        touch(&root.join("a.cha"));
        std::os::unix::fs::symlink(&root, root.join("loop")).unwrap();

        let reports = find_cha_files(&[root.clone()]).unwrap();
        assert_eq!(reports[0].file_count(), 1);
        assert_eq!(reports[0].files[0], root.join("a.cha"));
    }

    #[test]
    #[cfg(unix)]
    fn transcript_file_symlinks_are_still_found() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("data");
        touch(&root.join("real.cha"));
        std::os::unix::fs::symlink(root.join("real.cha"), root.join("alias.cha")).unwrap();

        let reports = find_cha_files(&[root]).unwrap();
        assert_eq!(reports[0].file_count(), 2);
    }

    #[test]
    fn missing_directory_reports_zero_files() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("does_not_exist");

        let reports = find_cha_files(&[missing.clone()]).unwrap();
        assert_eq!(reports.len(), 1);
        assert!(!reports[0].exists);
        assert_eq!(reports[0].file_count(), 0);
        assert_eq!(reports[0].path, missing);
    }
}
