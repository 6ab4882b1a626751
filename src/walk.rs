use crate::errors::CompactError;
use crate::filter::{Decision, FilterRules};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

/// A file that passed every filter, with its content loaded.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    pub relative_path: PathBuf,
    pub content: Vec<u8>,
}

impl FileEntry {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Depth-first walk of a project root yielding accepted files lazily, in
/// file-name order per directory. Excluded directories are pruned before
/// they are descended into. The first error ends the walk.
pub struct ProjectWalker<'a> {
    root: PathBuf,
    rules: &'a FilterRules,
    entries: Box<dyn Iterator<Item = walkdir::Result<DirEntry>> + 'a>,
    failed: bool,
}

impl<'a> ProjectWalker<'a> {
    pub fn new(root: impl AsRef<Path>, rules: &'a FilterRules) -> Self {
        let root = root.as_ref().to_path_buf();
        debug!("Walking project root: {}", root.display());
        let entries = WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !is_pruned(entry, rules));
        ProjectWalker {
            root,
            rules,
            entries: Box::new(entries),
            failed: false,
        }
    }

    fn relative_path(&self, path: &Path) -> PathBuf {
        match path.strip_prefix(&self.root) {
            Ok(relative) if relative.as_os_str().is_empty() => PathBuf::from("."),
            Ok(relative) => relative.to_path_buf(),
            Err(_) => path.to_path_buf(),
        }
    }

    fn accept(&self, entry: DirEntry) -> Option<Result<FileEntry, CompactError>> {
        let path = entry.into_path();
        let relative_path = self.relative_path(&path);
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        match self.rules.classify(&relative_path, &file_name) {
            Decision::Skip(reason) => {
                debug!("Skipping {}: {}", relative_path.display(), reason);
                None
            }
            Decision::Accept => {
                trace!("Reading {}", path.display());
                Some(match fs::read(&path) {
                    Ok(content) => Ok(FileEntry {
                        path,
                        relative_path,
                        content,
                    }),
                    Err(source) => Err(CompactError::FileRead { path, source }),
                })
            }
        }
    }
}

impl Iterator for ProjectWalker<'_> {
    type Item = Result<FileEntry, CompactError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    self.failed = true;
                    return Some(Err(CompactError::Walk(err)));
                }
            };
            if entry.file_type().is_dir() {
                continue;
            }
            if let Some(result) = self.accept(entry) {
                if result.is_err() {
                    self.failed = true;
                }
                return Some(result);
            }
        }
    }
}

fn is_pruned(entry: &DirEntry, rules: &FilterRules) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    let pruned = rules.is_excluded_dir(&name);
    if pruned {
        debug!("Pruning excluded directory: {}", entry.path().display());
    }
    pruned
}
