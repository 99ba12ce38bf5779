use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::core::IgnoreRules;
use crate::error::WalkError;
use crate::fs::FileSystem;
use crate::models::{EntryKind, IgnoredEntry, Manifest, ManifestEntry};

/// Configuration for a manifest walk.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Directory that recorded paths are made relative to. Should be
    /// absolute when the walk root is absolute.
    pub base: PathBuf,
    pub rules: IgnoreRules,
}

impl WalkOptions {
    pub fn relative_to(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            rules: IgnoreRules::default(),
        }
    }
}

/// Walk `dir` depth-first in enumeration order and collect accepted file
/// contents and ignored entries.
///
/// Any directory that cannot be listed or file that cannot be read aborts
/// the whole walk. Symlinked directories are followed without cycle
/// detection.
pub async fn walk_dir<F: FileSystem>(
    fs: &F,
    dir: &Path,
    options: &WalkOptions,
) -> Result<Manifest, WalkError> {
    let mut manifest = Manifest::default();
    walk_dir_internal(fs, dir, options, &mut manifest).await?;
    debug!(
        files = manifest.files.len(),
        ignored = manifest.ignored.len(),
        "walk finished"
    );
    Ok(manifest)
}

async fn walk_dir_internal<F: FileSystem>(
    fs: &F,
    dir: &Path,
    options: &WalkOptions,
    manifest: &mut Manifest,
) -> Result<(), WalkError> {
    let entries = fs
        .read_dir(dir)
        .await
        .map_err(|source| WalkError::ListDir {
            path: dir.to_path_buf(),
            source,
        })?;

    for entry in entries {
        let display_path = relative_display(&entry.path, &options.base);

        if let Some(kind) = options.rules.classify(&entry.name, entry.kind) {
            debug!(path = %display_path, ?kind, "ignored");
            manifest.ignored.push(IgnoredEntry {
                path: display_path,
                kind,
            });
            continue;
        }

        match entry.kind {
            EntryKind::Directory => {
                Box::pin(walk_dir_internal(fs, &entry.path, options, manifest)).await?;
            }
            EntryKind::File => {
                let content = fs.read_to_string(&entry.path).await.map_err(|source| {
                    WalkError::ReadFile {
                        path: entry.path.clone(),
                        source,
                    }
                })?;
                manifest.files.push(ManifestEntry {
                    path: display_path,
                    content,
                });
            }
        }
    }

    Ok(())
}

fn relative_display(path: &Path, base: &Path) -> String {
    relative_path(path, base).to_string_lossy().into_owned()
}

/// Lexical relative path from `base` to `path`. No filesystem access, so
/// symlinks in either path are not resolved.
pub fn relative_path(path: &Path, base: &Path) -> PathBuf {
    let path = normalize(path);
    let base = normalize(base);

    let common = path
        .iter()
        .zip(base.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push(Component::ParentDir);
    }
    for component in &path[common..] {
        relative.push(component);
    }
    relative
}

fn normalize(path: &Path) -> Vec<Component<'_>> {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            _ => out.push(component),
        }
    }
    out
}
