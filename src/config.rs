//! Fixed settings. The CLI can override the manifest path and the API base.

/// Directory names that are never descended into. A directory is ignored
/// when its name equals or contains one of these.
pub const IGNORED_DIRS: &[&str] = &[".git", "node_modules"];

/// Lowercased extensions, without the leading dot.
pub const IGNORED_EXTENSIONS: &[&str] = &["svg", "png", "md"];

pub const IGNORED_FILES: &[&str] = &[
    "package-lock.json",
    ".DS_Store",
    "fileList.json",
    "vite.config.ts",
    "tsconfig.node.json",
    "tsconfig.json",
    "vite-env.d.ts",
    ".gitignore",
];

pub const DEFAULT_MANIFEST_PATH: &str = "src/fileList.json";

/// Created in the working directory of the process.
pub const FAULT_LOG_FILE: &str = "error.json";

pub const GITHUB_API_BASE: &str = "https://api.github.com";

pub const GITHUB_WEB_PREFIX: &str = "https://github.com/";

pub const USER_AGENT: &str = concat!("repotree/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_LOG_DIRECTIVE: &str = "repotree=info";
