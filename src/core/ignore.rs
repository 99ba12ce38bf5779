use std::collections::HashSet;
use std::path::Path;

use crate::config::{IGNORED_DIRS, IGNORED_EXTENSIONS, IGNORED_FILES};
use crate::models::{EntryKind, IgnoredKind};

/// Name-based ignore rules, checked before an entry is read or descended.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    dirs: Vec<String>,
    files: HashSet<String>,
    /// Lowercase, no leading dot.
    extensions: HashSet<String>,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self::new(IGNORED_DIRS, IGNORED_FILES, IGNORED_EXTENSIONS)
    }
}

impl IgnoreRules {
    pub fn new(dirs: &[&str], files: &[&str], extensions: &[&str]) -> Self {
        Self {
            dirs: dirs.iter().map(|d| (*d).to_owned()).collect(),
            files: files.iter().map(|f| (*f).to_owned()).collect(),
            extensions: extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    /// Returns how the entry is ignored, or `None` if it is kept.
    pub fn classify(&self, name: &str, kind: EntryKind) -> Option<IgnoredKind> {
        match kind {
            EntryKind::Directory => self
                .dirs
                .iter()
                .any(|dir| name.contains(dir.as_str()))
                .then_some(IgnoredKind::Directory),
            EntryKind::File => {
                (self.files.contains(name) || self.has_ignored_extension(name))
                    .then_some(IgnoredKind::File)
            }
        }
    }

    fn has_ignored_extension(&self, name: &str) -> bool {
        // `Path::extension` yields nothing for dotfiles such as `.gitignore`.
        Path::new(name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.extensions.contains(&ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_match_by_substring() {
        let rules = IgnoreRules::default();
        assert_eq!(
            rules.classify("node_modules", EntryKind::Directory),
            Some(IgnoredKind::Directory)
        );
        assert_eq!(
            rules.classify("old_node_modules_bak", EntryKind::Directory),
            Some(IgnoredKind::Directory)
        );
        assert_eq!(
            rules.classify(".github", EntryKind::Directory),
            Some(IgnoredKind::Directory)
        );
        assert_eq!(rules.classify("src", EntryKind::Directory), None);
    }

    #[test]
    fn directory_names_do_not_apply_to_files() {
        let rules = IgnoreRules::default();
        assert_eq!(rules.classify("node_modules.txt", EntryKind::File), None);
    }

    #[test]
    fn files_match_by_name_or_lowercased_extension() {
        let rules = IgnoreRules::default();
        assert_eq!(
            rules.classify("package-lock.json", EntryKind::File),
            Some(IgnoredKind::File)
        );
        assert_eq!(
            rules.classify("README.MD", EntryKind::File),
            Some(IgnoredKind::File)
        );
        assert_eq!(
            rules.classify("logo.svg", EntryKind::File),
            Some(IgnoredKind::File)
        );
        assert_eq!(
            rules.classify(".gitignore", EntryKind::File),
            Some(IgnoredKind::File)
        );
        assert_eq!(rules.classify("package.json", EntryKind::File), None);
        assert_eq!(rules.classify(".md", EntryKind::File), None);
    }

    #[test]
    fn custom_rules_normalize_extensions() {
        let rules = IgnoreRules::new(&["target"], &[], &[".LOCK"]);
        assert_eq!(
            rules.classify("Cargo.lock", EntryKind::File),
            Some(IgnoredKind::File)
        );
        assert_eq!(
            rules.classify("target", EntryKind::Directory),
            Some(IgnoredKind::Directory)
        );
    }
}
