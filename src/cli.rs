use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{DEFAULT_MANIFEST_PATH, GITHUB_API_BASE};

#[derive(Parser, Debug)]
#[command(name = "repotree")]
#[command(about = "Snapshot local source trees and pick files from GitHub repositories", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write every non-ignored file under ROOT into a JSON manifest
    Manifest(ManifestArgs),
    /// List a GitHub repository and select entries from it
    Explore(ExploreArgs),
}

#[derive(Args, Debug)]
pub struct ManifestArgs {
    /// Directory to walk
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Where to write the manifest
    #[arg(short, long, default_value = DEFAULT_MANIFEST_PATH)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct ExploreArgs {
    /// Repository as owner/name or https://github.com/owner/name
    pub repo: String,

    /// Access token, used only if the anonymous request is forbidden
    #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Fetch this directory's listing and attach it to the tree (repeatable)
    #[arg(short, long = "expand", value_name = "DIR")]
    pub expand: Vec<String>,

    /// Check this node id (repeatable, applied in order)
    #[arg(short, long = "check", value_name = "ID")]
    pub check: Vec<String>,

    /// Uncheck this node id after all checks (repeatable, applied in order)
    #[arg(short, long = "uncheck", value_name = "ID")]
    pub uncheck: Vec<String>,

    /// GitHub API base URL
    #[arg(long, default_value = GITHUB_API_BASE)]
    pub api_base: String,
}
